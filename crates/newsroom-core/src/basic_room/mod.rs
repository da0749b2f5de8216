//! A ready-made newsroom built from stub collaborators: a fixed two-task plan,
//! round-robin assignment and investigators that return canned results.

pub mod investigators;
pub mod plan;

pub use investigators::{AlternateInvestigator, EchoInvestigator};
pub use plan::FixedPlan;

use crate::config::RoomConfig;
use crate::roles::{Editor, Newsroom, RoundRobin, Worker};

/// Investigators alternate between [`EchoInvestigator`] and
/// [`AlternateInvestigator`] by roster position.
pub fn basic_investigators(config: &RoomConfig) -> Vec<Worker> {
    config
        .investigator_names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let worker = if i % 2 == 0 {
                Worker::new(EchoInvestigator)
            } else {
                Worker::new(AlternateInvestigator)
            };
            worker
                .with_name(name.as_str())
                .with_journal_dir(config.journal_dir.clone())
        })
        .collect()
}

/// Staff a newsroom from `config`: a [`FixedPlan`] editor with round-robin
/// assignment over [`basic_investigators`].
///
/// # Example
///
/// ```ignore
/// let mut room = basic_newsroom(&RoomConfig::default());
/// let tasks = room.run(&Lead::new(LeadType::Question, "What happened?"))?;
/// assert_eq!(tasks[0].assigned_to, "InvestigatorOne");
/// ```
pub fn basic_newsroom(config: &RoomConfig) -> Newsroom {
    let editor = Editor::new(FixedPlan, RoundRobin::new(), basic_investigators(config))
        .with_name(config.editor_name.as_str())
        .with_journal_dir(config.journal_dir.clone());

    let newsroom = Newsroom::new(editor)
        .with_name(config.newsroom_name.as_str())
        .with_journal_dir(config.journal_dir.clone());
    newsroom.identity().info(format!(
        "Newsroom '{}' initialized with {} investigators and editor '{}'.",
        newsroom.name(),
        newsroom.investigators().len(),
        newsroom.editor().name()
    ));
    newsroom
}
