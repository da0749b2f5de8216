//! Per-lead journal isolation: one file per lead, every role's channel in it,
//! and every channel restored exactly afterwards.

use std::io;
use std::path::Path;
use std::sync::Arc;

use newsroom_core::{
    basic_newsroom, Channel, ChannelSnapshot, EchoInvestigator, Editor, FixedPlan,
    InvestigationError, InvestigationTask, Lead, LeadType, LogRecord, LogSink, MemorySink,
    Newsroom, NewsroomError, RoleIdentity, RoomConfig, RoundRobin, TaskStatus, Worker,
};
use serde_json::Value;

fn snapshots(room: &Newsroom) -> Vec<(String, ChannelSnapshot)> {
    room.participant_channels()
        .into_iter()
        .map(|c| (c.name().to_string(), c.snapshot()))
        .collect()
}

fn journal_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn room_in(dir: &Path) -> Newsroom {
    basic_newsroom(&RoomConfig {
        journal_dir: Some(dir.to_path_buf()),
        ..RoomConfig::default()
    })
}

#[test]
fn lead_journal_collects_every_role_channel() {
    let dir = tempfile::tempdir().unwrap();
    let mut room = room_in(dir.path());
    let lead = Lead::with_id("lead-42", LeadType::Question, "What happened?");

    room.run(&lead).unwrap();

    assert_eq!(journal_files(dir.path()), ["lead-42.log"]);
    let text = std::fs::read_to_string(dir.path().join("lead-42.log")).unwrap();
    for channel in ["Newsroom", "Editor", "InvestigatorOne", "InvestigatorTwo"] {
        assert!(
            text.contains(&format!(" - {channel} - INFO - ")),
            "missing lines from {channel}:\n{text}"
        );
    }
    assert!(text.contains("News Room Newsroom received lead: lead-42 - What happened?"));
    assert!(text.contains("Editor Editor assigned task lead-42_task_1 to investigator InvestigatorOne"));
    assert!(text.contains("Finished execution for InvestigatorTwo."));
}

#[test]
fn channels_are_restored_after_success() {
    let dir = tempfile::tempdir().unwrap();
    let mut room = room_in(dir.path());
    let console: Arc<dyn LogSink> = Arc::new(MemorySink::new());
    room.editor().channel().add_sink(console.clone());
    room.editor().channel().set_propagate(true);

    let before = snapshots(&room);
    room.run(&Lead::with_id("ok", LeadType::File, "doc")).unwrap();
    assert_eq!(snapshots(&room), before);
    assert!(room.editor().channel().propagate());
}

#[test]
fn channels_are_restored_after_assignment_failure() {
    let dir = tempfile::tempdir().unwrap();
    let mut room = Newsroom::new(Editor::new(FixedPlan, RoundRobin::new(), Vec::new()))
        .with_journal_dir(Some(dir.path().to_path_buf()));
    let before = snapshots(&room);

    let err = room
        .run(&Lead::with_id("unstaffed", LeadType::Question, "anyone?"))
        .unwrap_err();
    assert!(matches!(err, NewsroomError::NoInvestigators { .. }));
    assert_eq!(snapshots(&room), before);

    let text = std::fs::read_to_string(dir.path().join("unstaffed.log")).unwrap();
    assert!(text.contains(" - Editor - ERROR - No investigators available to assign task."));
}

#[test]
fn nothing_leaks_into_the_journal_after_the_lead() {
    let dir = tempfile::tempdir().unwrap();
    let mut room = room_in(dir.path());
    room.run(&Lead::with_id("done", LeadType::Question, "q")).unwrap();

    let path = dir.path().join("done.log");
    let len = std::fs::metadata(&path).unwrap().len();
    room.channel().info("after the lead");
    room.investigators()[0].channel().info("also after");
    assert_eq!(std::fs::metadata(&path).unwrap().len(), len);
}

#[test]
fn shared_channel_is_redirected_and_restored_once() {
    let dir = tempfile::tempdir().unwrap();
    let shared = Channel::new("Pool");
    let mem: Arc<dyn LogSink> = Arc::new(MemorySink::new());
    shared.add_sink(mem.clone());
    shared.set_propagate(true);
    let shared_before = shared.snapshot();

    let roster = vec![
        Worker::new(EchoInvestigator).with_name("A").with_channel(shared.clone()),
        Worker::new(EchoInvestigator).with_channel(shared.clone()).with_name("B"),
    ];
    let mut room = Newsroom::new(Editor::new(FixedPlan, RoundRobin::new(), roster))
        .with_journal_dir(Some(dir.path().to_path_buf()));

    let solved = room.run(&Lead::with_id("pooled", LeadType::Email, "mail")).unwrap();
    assert_eq!(solved[0].assigned_to, "A");
    assert_eq!(solved[1].assigned_to, "B");
    assert_eq!(shared.snapshot(), shared_before);

    let text = std::fs::read_to_string(dir.path().join("pooled.log")).unwrap();
    assert!(text.contains(" - A - INFO - Investigator A processing task: pooled_task_1"));
    assert!(text.contains(" - B - INFO - Investigator B processing task: pooled_task_2"));
    assert!(!text.contains("Investigator Pool"));
    assert_eq!(
        solved[1].result,
        Some(Value::String("Dummy result for task pooled_task_2 from B".into()))
    );
}

#[test]
fn repeated_runs_append_to_the_same_journal() {
    let dir = tempfile::tempdir().unwrap();
    let mut room = room_in(dir.path());
    let lead = Lead::with_id("again", LeadType::Question, "q");

    room.run(&lead).unwrap();
    let first = std::fs::read_to_string(dir.path().join("again.log")).unwrap();
    room.run(&lead).unwrap();
    let second = std::fs::read_to_string(dir.path().join("again.log")).unwrap();

    assert!(second.starts_with(&first));
    assert_eq!(second.lines().count(), first.lines().count() * 2);
    assert_eq!(journal_files(dir.path()), ["again.log"]);
}

#[test]
fn journal_directory_is_created_on_demand() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("journals").join("leads");
    let mut room = room_in(&nested);
    room.run(&Lead::with_id("deep", LeadType::File, "f")).unwrap();
    assert!(nested.join("deep.log").is_file());
}

#[test]
fn unusable_journal_dir_is_reported_and_state_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"occupied").unwrap();

    let mut room = room_in(&blocker);
    let before = snapshots(&room);
    let err = room
        .run(&Lead::with_id("blocked", LeadType::Question, "q"))
        .unwrap_err();
    assert!(matches!(err, NewsroomError::Journal { .. }));
    assert_eq!(snapshots(&room), before);
}

#[test]
fn no_journal_dir_creates_no_file() {
    let mut room = basic_newsroom(&RoomConfig::default());
    let before = snapshots(&room);
    let lead = Lead::with_id("loose", LeadType::Question, "q");
    assert!(room.journal_path(&lead).is_none());

    let solved = room.run(&lead).unwrap();
    assert_eq!(solved.len(), 2);
    assert!(solved.iter().all(|t| t.status == TaskStatus::Done));
    assert_eq!(snapshots(&room), before);
    assert!(!Path::new("loose.log").exists());
}

#[test]
fn failing_worker_still_restores_channels() {
    let dir = tempfile::tempdir().unwrap();
    let broken = Worker::new(
        |t: &InvestigationTask, _r: &RoleIdentity| -> Result<Value, InvestigationError> {
            Err(InvestigationError::new(format!("cannot reach source for {}", t.task_id)))
        },
    )
    .with_name("Broken");
    let mut room = Newsroom::new(Editor::new(FixedPlan, RoundRobin::new(), vec![broken]))
        .with_journal_dir(Some(dir.path().to_path_buf()));
    let before = snapshots(&room);

    let solved = room.run(&Lead::with_id("dark", LeadType::Question, "q")).unwrap();
    assert!(solved.iter().all(|t| t.status == TaskStatus::Failed));
    assert_eq!(snapshots(&room), before);

    let text = std::fs::read_to_string(dir.path().join("dark.log")).unwrap();
    assert!(text.contains(" - Broken - WARNING - [Investigator] Task dark_task_1 failed: cannot reach source for dark_task_1"));
}

#[derive(Debug)]
struct FullDisk;

impl LogSink for FullDisk {
    fn write_record(&self, _record: &LogRecord<'_>) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "no space left on device"))
    }
}

#[test]
fn failing_sink_never_aborts_a_lead() {
    let full: Arc<dyn LogSink> = Arc::new(FullDisk);
    let mem = Arc::new(MemorySink::new());
    let worker = Worker::new(EchoInvestigator).with_name("InvestigatorOne");
    worker.channel().add_sink(full.clone());
    worker.channel().add_sink(mem.clone());
    let mut room = Newsroom::new(Editor::new(FixedPlan, RoundRobin::new(), vec![worker]));
    room.editor().channel().add_sink(full);

    let solved = room.run(&Lead::with_id("full", LeadType::Question, "q")).unwrap();

    assert_eq!(solved.len(), 2);
    assert!(solved.iter().all(|t| t.status == TaskStatus::Done));
    let lines = mem.lines();
    assert!(lines
        .iter()
        .any(|l| l.contains(" - InvestigatorOne - INFO - [Investigator] Task full_task_1 succeeded")));
    assert!(lines
        .iter()
        .any(|l| l.contains(" - InvestigatorOne - INFO - [Investigator] Task full_task_2 succeeded")));
}
