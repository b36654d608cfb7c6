use std::sync::Arc;

use gridiron_core::{Matchup, NflRules};
use gridiron_runtime::{JsonLinesSink, RecordSink, SimulationRunner, SinkError};

fn runner() -> SimulationRunner {
    SimulationRunner::new(Arc::new(NflRules::new()), Matchup::standard(11))
        .with_replications(3)
        .with_base_seed(77)
}

#[test]
fn json_lines_round_trip_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records").join("games.jsonl");

    let mut sink = JsonLinesSink::create(&path).unwrap();
    let summary = runner().run(&mut sink).unwrap();
    assert_eq!(sink.written(), 3);
    drop(sink);

    let loaded = JsonLinesSink::read_all(&path).unwrap();
    let (expected, _) = runner().run_collect().unwrap();
    assert_eq!(loaded, expected);
    assert_eq!(summary.games, 3);
    for (a, b) in loaded.iter().zip(&expected) {
        assert_eq!(a.digest().unwrap(), b.digest().unwrap());
    }
}

#[test]
fn create_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("games.jsonl");
    std::fs::write(&path, b"").unwrap();

    let err = JsonLinesSink::create(&path).err().expect("existing log is kept");
    assert!(matches!(err, SinkError::AlreadyExists(p) if p == path));
}

#[test]
fn open_appends_to_an_existing_log() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("games.jsonl");
    let (records, _) = runner().run_collect().unwrap();

    {
        let mut sink = JsonLinesSink::create(&path).unwrap();
        sink.ingest(&records[0]).unwrap();
        sink.flush().unwrap();
    }
    {
        let mut sink = JsonLinesSink::open(&path).unwrap();
        sink.ingest(&records[1]).unwrap();
        sink.ingest(&records[2]).unwrap();
    }

    assert_eq!(JsonLinesSink::read_all(&path).unwrap(), records);
}

#[test]
fn corrupted_line_is_reported_with_its_number() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("games.jsonl");
    let (records, _) = runner().run_collect().unwrap();

    let mut contents = serde_json::to_string(&records[0]).unwrap();
    contents.push_str("\n{\"schema_version\": \n");
    std::fs::write(&path, contents).unwrap();

    match JsonLinesSink::read_all(&path) {
        Err(SinkError::Corrupted { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected corruption error, got {other:?}"),
    }
}
