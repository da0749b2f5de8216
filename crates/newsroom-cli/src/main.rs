//! Newsroom CLI
//!
//! ## Commands
//!
//! - `run`: process one lead through a basic newsroom and print the solved tasks
//! - `investigate`: run a single investigator outside a newsroom

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};

use newsroom_core::{
    basic_newsroom, init_tracing, EchoInvestigator, InvestigationTask, Lead, LeadType,
    RoomConfig, Runnable, Worker,
};

#[derive(Parser)]
#[command(name = "newsroom")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Role-based lead investigation with per-lead journals", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process one lead and print its tasks as JSON
    Run {
        /// Lead content
        #[arg(short, long)]
        content: String,

        /// Lead type: file, question or email
        #[arg(short = 't', long, default_value = "question")]
        lead_type: String,

        /// Explicit lead id (default: random UUID)
        #[arg(long)]
        lead_id: Option<String>,

        /// Room configuration file (JSON)
        #[arg(long, env = "NEWSROOM_CONFIG")]
        config: Option<PathBuf>,

        /// Directory for per-lead journals (overrides the config file)
        #[arg(long, env = "NEWSROOM_JOURNAL_DIR")]
        journal_dir: Option<PathBuf>,
    },

    /// Run one investigator on its own, journaling to <dir>/<name>_<date>.log
    Investigate {
        /// Task content
        #[arg(short, long)]
        content: String,

        /// Investigator name
        #[arg(short, long, default_value = "InvestigatorOne")]
        name: String,

        /// Journal directory (default: console)
        #[arg(long, env = "NEWSROOM_JOURNAL_DIR")]
        journal_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    init_tracing(cli.json, level);

    match cli.command {
        Commands::Run {
            content,
            lead_type,
            lead_id,
            config,
            journal_dir,
        } => cmd_run(content, &lead_type, lead_id, config, journal_dir),
        Commands::Investigate {
            content,
            name,
            journal_dir,
        } => cmd_investigate(content, name, journal_dir),
    }
}

fn load_config(path: Option<PathBuf>, journal_dir: Option<PathBuf>) -> Result<RoomConfig> {
    let mut config = match path {
        Some(path) => RoomConfig::from_json_file(&path)
            .with_context(|| format!("load room config {:?}", path))?,
        None => RoomConfig::default(),
    };
    if journal_dir.is_some() {
        config.journal_dir = journal_dir;
    }
    Ok(config)
}

fn cmd_run(
    content: String,
    lead_type: &str,
    lead_id: Option<String>,
    config: Option<PathBuf>,
    journal_dir: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config, journal_dir)?;
    let lead_type: LeadType = lead_type.parse().context("parse lead type")?;
    let lead = match lead_id {
        Some(id) => Lead::with_id(id, lead_type, content),
        None => Lead::new(lead_type, content),
    };

    let mut room = basic_newsroom(&config);
    info!(lead_id = %lead.lead_id, newsroom = %room.name(), "processing lead");
    let solved = room
        .run(&lead)
        .with_context(|| format!("process lead {}", lead.lead_id))?;

    println!("{}", serde_json::to_string_pretty(&solved)?);
    if let Some(path) = room.journal_path(&lead) {
        info!(journal = %path.display(), "lead journal written");
    }
    Ok(())
}

fn cmd_investigate(content: String, name: String, journal_dir: Option<PathBuf>) -> Result<()> {
    let mut worker = Worker::new(EchoInvestigator)
        .with_name(name)
        .with_journal_dir(journal_dir);
    let journal = worker
        .identity()
        .open_standalone_journal()
        .context("open investigator journal")?;

    let task = InvestigationTask::new(
        format!("{}_adhoc", worker.name()),
        "Ad-hoc investigation",
        content,
    );
    let task = worker.run(task).context("run investigator")?;

    println!("{}", serde_json::to_string_pretty(&task)?);
    if let Some(path) = journal {
        info!(journal = %path.display(), "investigator journal written");
    }
    Ok(())
}
