use keyscan::engine::{
    content_contains, entry_name, match_content, match_name, name_contains, probe_root,
    read_and_match,
};
use keyscan::pipeline::{
    Counters, InFlight, PipelineContext, Task, WalkItem, completion_channel, deliver_event,
    drain_events, event_channel, run_walk_loop,
};
use keyscan::report::{JsonSink, ReportSink, TextSink, write_summary, write_summary_json};
use keyscan::utils::{DEFAULT_SIZE_CEILING, apply_file_to_config, load_keyscan_toml, worker_count};
use keyscan::{
    EntryInfo, MatchKind, MatchResult, SearchConfig, SearchCounters, SearchError, SearchEvent,
    SearchSummary,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn file_entry(path: &str, size: u64) -> EntryInfo {
    let p = PathBuf::from(path);
    EntryInfo::new(p.clone(), entry_name(&p), false, size, 0)
}

fn dir_entry(path: &str) -> EntryInfo {
    let p = PathBuf::from(path);
    EntryInfo::new(p.clone(), entry_name(&p), true, 0, 0)
}

#[derive(Default)]
struct RecordingSink {
    results: Vec<MatchResult>,
    skipped: Vec<(PathBuf, u64)>,
    unreadable: Vec<PathBuf>,
}

impl ReportSink for RecordingSink {
    fn report_match(&mut self, result: &MatchResult, _verbose: bool) {
        self.results.push(result.clone());
    }

    fn report_skipped_too_large(&mut self, path: &Path, size: u64) {
        self.skipped.push((path.to_path_buf(), size));
    }

    fn report_unreadable(&mut self, path: &Path, _reason: &str) {
        self.unreadable.push(path.to_path_buf());
    }
}

// --- content_contains / name_contains ---

#[test]
fn test_content_contains_substring() {
    assert!(content_contains(b"hello world", b"hello"));
    assert!(content_contains(b"hello world", b"o w"));
    assert!(content_contains(b"hello world", b"world"));
}

#[test]
fn test_content_contains_case_sensitive() {
    assert!(!content_contains(b"hello world", b"Hello"));
}

#[test]
fn test_content_contains_keyword_longer_than_content() {
    assert!(!content_contains(b"hi", b"hello"));
    assert!(!content_contains(b"", b"x"));
}

#[test]
fn test_content_contains_binary_bytes() {
    let content = [0u8, 159, 146, 150, b'k', b'e', b'y', 0];
    assert!(content_contains(&content, b"key"));
    assert!(!content_contains(&content, b"keys"));
}

#[test]
fn test_name_contains() {
    assert!(name_contains("needle", "needle"));
    assert!(name_contains("my_needle.txt", "needle"));
    assert!(!name_contains("Needle.txt", "needle"));
    assert!(!name_contains("a.txt", "needle"));
}

// --- match_name / match_content ---

#[test]
fn test_match_name_dir_counts_folder() {
    let counters = Counters::new();
    let r = match_name(&dir_entry("/root/needle"), "needle", &counters);
    assert!(r.matched);
    assert!(r.is_dir);
    assert_eq!(r.kind, MatchKind::Name);
    let c = counters.snapshot();
    assert_eq!(c.folders_matched, 1);
    assert_eq!(c.files_matched, 0);
}

#[test]
fn test_match_name_miss_still_yields_result() {
    let counters = Counters::new();
    let r = match_name(&file_entry("/root/a.txt", 11), "needle", &counters);
    assert!(!r.matched);
    assert_eq!(r.name, "a.txt");
    assert_eq!(counters.snapshot(), SearchCounters::default());
}

#[test]
fn test_match_content_hit_counts_file() {
    let counters = Counters::new();
    let r = match_content(&file_entry("/root/a.txt", 11), b"hello world", "hello", &counters);
    assert!(r.matched);
    assert_eq!(r.kind, MatchKind::Content);
    assert_eq!(counters.snapshot().files_matched, 1);
}

#[test]
fn test_name_and_content_hit_count_once() {
    let counters = Counters::new();
    let entry = file_entry("/root/hello.txt", 5);
    assert!(match_name(&entry, "hello", &counters).matched);
    assert!(match_content(&entry, b"hello", "hello", &counters).matched);
    assert_eq!(counters.snapshot().files_matched, 1);
}

// --- Counters ---

#[test]
fn test_counters_concurrent_increments() {
    let counters = Arc::new(Counters::new());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let counters = Arc::clone(&counters);
            thread::spawn(move || {
                for _ in 0..1000 {
                    counters.record_visit(i % 2 == 0);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    let c = counters.snapshot();
    assert_eq!(c.folders_visited, 4000);
    assert_eq!(c.files_visited, 4000);
}

// --- InFlight ---

#[test]
fn test_in_flight_idle_when_nothing_tracked() {
    let in_flight = InFlight::new();
    in_flight.wait_idle();
    assert_eq!(in_flight.outstanding(), 0);
}

#[test]
fn test_in_flight_waits_for_guards() {
    let in_flight = InFlight::new();
    let guards: Vec<_> = (0..4).map(|_| in_flight.track()).collect();
    assert_eq!(in_flight.outstanding(), 4);
    let releaser = thread::spawn(move || {
        for g in guards {
            thread::sleep(Duration::from_millis(5));
            drop(g);
        }
    });
    in_flight.wait_idle();
    assert_eq!(in_flight.outstanding(), 0);
    releaser.join().unwrap();
}

// --- SearchConfig ---

#[test]
fn test_config_defaults() {
    let c = SearchConfig::new("/tmp", "kw");
    assert_eq!(c.size_ceiling, DEFAULT_SIZE_CEILING);
    assert_eq!(c.size_ceiling, 100 * 1024 * 1024);
    assert!(!c.verbose);
    assert!(!c.follow_links);
    assert_eq!(c.threads, None);
    assert!(c.validate().is_ok());
}

#[test]
fn test_config_rejects_empty_keyword() {
    let err = SearchConfig::new("/tmp", "").validate().unwrap_err();
    assert!(err.is_config());
    assert_eq!(err.to_string(), "Configuration error: Missing keyword to search");
}

#[test]
fn test_config_rejects_empty_path() {
    let err = SearchConfig::new("", "kw").validate().unwrap_err();
    assert!(matches!(err, SearchError::Config(_)));
}

#[test]
fn test_config_rejects_zero_threads() {
    let mut c = SearchConfig::new("/tmp", "kw");
    c.threads = Some(0);
    assert!(c.validate().is_err());
}

#[test]
fn test_worker_count_explicit_wins() {
    assert_eq!(worker_count(Some(3), 16, 1), 3);
}

#[test]
fn test_worker_count_never_zero() {
    assert!(worker_count(None, 0, 1) >= 1);
}

// --- probe_root ---

#[test]
fn test_probe_root_missing() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let err = probe_root(&missing).unwrap_err();
    assert!(matches!(err, SearchError::RootNotFound(_)));
    assert!(err.is_config());
}

#[test]
fn test_probe_root_existing_is_absolute() {
    let dir = tempfile::tempdir().unwrap();
    let root = probe_root(dir.path()).unwrap();
    assert!(root.is_absolute());
}

// --- .keyscan.toml ---

#[test]
fn test_load_toml_missing_is_none() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_keyscan_toml(dir.path()).is_none());
}

#[test]
fn test_load_toml_applies_present_fields_only() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".keyscan.toml"),
        "[settings]\nverbose = true\nmax_size = 2048\njson = true\n",
    )
    .unwrap();
    let file = load_keyscan_toml(dir.path()).expect("settings file should parse");
    let mut config = SearchConfig::new(dir.path(), "kw");
    apply_file_to_config(&file, &mut config);
    assert!(config.verbose);
    assert_eq!(config.size_ceiling, 2048);
    assert_eq!(config.threads, None);
    assert!(!config.follow_links);
    assert_eq!(file.json(), Some(true));
}

#[test]
fn test_load_toml_malformed_is_none() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".keyscan.toml"), "[settings\nverbose = ").unwrap();
    assert!(load_keyscan_toml(dir.path()).is_none());
}

// --- sinks ---

#[test]
fn test_text_sink_wording() {
    colored::control::set_override(false);
    let mut sink = TextSink::new(Vec::new(), "needle");
    let counters = Counters::new();
    let hit = match_name(&dir_entry("/r/needle"), "needle", &counters);
    let miss = match_name(&file_entry("/r/a.txt", 1), "needle", &counters);
    sink.report_match(&hit, false);
    sink.report_match(&miss, false);
    sink.report_match(&miss, true);
    sink.report_skipped_too_large(Path::new("/r/big.bin"), 4096);
    let out = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "/r/needle folder contains needle");
    assert_eq!(lines[1], "/r/a.txt does NOT contain needle");
    assert!(lines[2].starts_with("/r/big.bin skipped. File too large"));
}

#[test]
fn test_json_sink_records() {
    let mut sink = JsonSink::new(Vec::new());
    let counters = Counters::new();
    let hit = match_content(&file_entry("/r/a.txt", 11), b"hello world", "hello", &counters);
    let miss = match_name(&file_entry("/r/a.txt", 11), "hello", &counters);
    sink.report_match(&hit, false);
    sink.report_match(&miss, false);
    sink.report_unreadable(Path::new("/r/locked"), "permission denied");
    let out = String::from_utf8(sink.into_inner()).unwrap();
    let records: Vec<serde_json::Value> = out
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["event"], "match");
    assert_eq!(records[0]["kind"], "content");
    assert_eq!(records[0]["matched"], true);
    assert_eq!(records[0]["name"], "a.txt");
    assert_eq!(records[1]["event"], "unreadable");
    assert_eq!(records[1]["path"], "/r/locked");
}

#[test]
fn test_summary_text_and_json() {
    let config = SearchConfig::new("/r", "needle");
    let summary = SearchSummary {
        counters: SearchCounters {
            files_visited: 2,
            folders_visited: 1,
            files_matched: 0,
            folders_matched: 1,
        },
        elapsed: Duration::from_millis(12),
    };
    let mut text = Vec::new();
    write_summary(&mut text, &config, &summary).unwrap();
    let text = String::from_utf8(text).unwrap();
    assert!(text.contains("Done searching for needle"));
    assert!(text.contains("Checked 2 files in 1 folders"));
    assert!(text.contains("Found 0 files containing needle"));
    assert!(text.contains("Found 1 folders containing needle"));

    let mut json = Vec::new();
    write_summary_json(&mut json, &config, &summary).unwrap();
    let v: serde_json::Value = serde_json::from_slice(&json).unwrap();
    assert_eq!(v["event"], "summary");
    assert_eq!(v["files_visited"], 2);
    assert_eq!(v["folders_matched"], 1);
    assert_eq!(v["elapsed_ms"], 12);
}

// --- result bus / completion protocol ---

#[test]
fn test_deliver_event_gates_soft_errors_on_verbose() {
    let mut sink = RecordingSink::default();
    let skipped = SearchEvent::SkippedTooLarge {
        path: PathBuf::from("/r/big"),
        size: 10,
    };
    let unreadable = SearchEvent::Unreadable {
        path: PathBuf::from("/r/locked"),
        reason: "denied".to_string(),
    };
    deliver_event(skipped.clone(), &mut sink, false);
    deliver_event(unreadable.clone(), &mut sink, false);
    assert!(sink.skipped.is_empty());
    assert!(sink.unreadable.is_empty());
    deliver_event(skipped, &mut sink, true);
    deliver_event(unreadable, &mut sink, true);
    assert_eq!(sink.skipped, vec![(PathBuf::from("/r/big"), 10)]);
    assert_eq!(sink.unreadable, vec![PathBuf::from("/r/locked")]);
}

#[test]
fn test_drain_delivers_buffered_events_before_returning() {
    let (event_tx, event_rx) = event_channel();
    let (completion_tx, completion_rx) = completion_channel();
    let producer = thread::spawn(move || {
        let counters = Counters::new();
        for name in ["a", "b", "c"] {
            let r = match_name(&file_entry(name, 0), "a", &counters);
            event_tx.send(SearchEvent::Match(r)).unwrap();
        }
        // Fire while the events may still sit in the channel buffer.
        completion_tx.fire(Ok(()));
        drop(event_tx);
    });
    let mut sink = RecordingSink::default();
    drain_events(event_rx, completion_rx, &mut sink, true).unwrap();
    producer.join().unwrap();
    assert_eq!(sink.results.len(), 3);
    assert_eq!(sink.results.iter().filter(|r| r.matched).count(), 1);
}

#[test]
fn test_drain_returns_fatal_outcome() {
    let (event_tx, event_rx) = event_channel();
    let (completion_tx, completion_rx) = completion_channel();
    let finalizer = thread::spawn(move || {
        drop(event_tx);
        completion_tx.fire(Err(SearchError::traversal("permission denied")));
    });
    let mut sink = RecordingSink::default();
    let err = drain_events(event_rx, completion_rx, &mut sink, false).unwrap_err();
    finalizer.join().unwrap();
    assert!(matches!(err, SearchError::Traversal(_)));
    assert!(!err.is_config());
}

#[test]
fn test_drain_reports_missing_finalizer() {
    let (event_tx, event_rx) = event_channel();
    let (completion_tx, completion_rx) = completion_channel();
    drop(event_tx);
    drop(completion_tx);
    let mut sink = RecordingSink::default();
    let err = drain_events(event_rx, completion_rx, &mut sink, false).unwrap_err();
    assert!(matches!(err, SearchError::ThreadPanicked("finalizer")));
}

// --- reader ---

#[test]
fn test_read_and_match_reads_contents() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "a hello inside")?;
    let entry = EntryInfo::new(path.clone(), entry_name(&path), false, 14, 0);
    let counters = Counters::new();
    match read_and_match(&entry, "hello", &counters) {
        SearchEvent::Match(r) => {
            assert!(r.matched);
            assert_eq!(r.kind, MatchKind::Content);
        }
        other => panic!("expected a content match, got {:?}", other),
    }
    assert_eq!(counters.snapshot().files_matched, 1);
    Ok(())
}

#[test]
fn test_read_and_match_vanished_file_is_unreadable() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("gone.txt");
    std::fs::write(&path, "hello")?;
    let entry = EntryInfo::new(path.clone(), entry_name(&path), false, 5, 0);
    std::fs::remove_file(&path)?;

    let counters = Counters::new();
    match read_and_match(&entry, "hello", &counters) {
        SearchEvent::Unreadable { path: p, reason } => {
            assert_eq!(p, path);
            assert!(!reason.is_empty());
        }
        other => panic!("expected Unreadable, got {:?}", other),
    }
    assert_eq!(counters.snapshot(), SearchCounters::default());
    Ok(())
}

// --- walk loop ---

fn walk_context(in_flight: &InFlight) -> PipelineContext {
    PipelineContext {
        root: PathBuf::from("/t"),
        size_ceiling: DEFAULT_SIZE_CEILING,
        follow_links: false,
        counters: Arc::new(Counters::new()),
        in_flight: in_flight.clone(),
    }
}

#[test]
fn test_walk_stops_at_first_enumeration_error() {
    let (task_tx, task_rx) = crossbeam_channel::unbounded::<Task>();
    let (event_tx, event_rx) = event_channel();
    let in_flight = InFlight::new();
    let ctx = walk_context(&in_flight);
    let items = vec![
        WalkItem::Ok(file_entry("/t/a.txt", 5)),
        WalkItem::Err("denied".to_string()),
        WalkItem::Ok(file_entry("/t/b.txt", 5)),
    ];

    let result = run_walk_loop(task_tx, event_tx, in_flight.track(), &ctx, items.into_iter());
    assert!(matches!(result, Err(SearchError::Traversal(ref m)) if m == "denied"));

    let tasks: Vec<Task> = task_rx.try_iter().collect();
    assert_eq!(tasks.len(), 2);
    assert!(tasks.iter().all(|t| t.entry.name == "a.txt"));
    assert_eq!(ctx.counters.snapshot().files_visited, 1);
    assert!(event_rx.try_recv().is_err());

    // Walk guard released; only the queued tasks remain in flight.
    assert_eq!(in_flight.outstanding(), 2);
    drop(tasks);
    assert_eq!(in_flight.outstanding(), 0);
}

#[test]
fn test_walk_dispatch_per_entry_kind() {
    let (task_tx, task_rx) = crossbeam_channel::unbounded::<Task>();
    let (event_tx, event_rx) = event_channel();
    let in_flight = InFlight::new();
    let mut ctx = walk_context(&in_flight);
    ctx.size_ceiling = 100;
    let items = vec![
        WalkItem::Ok(dir_entry("/t/sub")),
        WalkItem::Ok(file_entry("/t/small.txt", 10)),
        WalkItem::Ok(file_entry("/t/big.bin", 100)),
        WalkItem::Ok(file_entry("/t/pipe", 0).with_special(true)),
    ];

    let result = run_walk_loop(task_tx, event_tx, in_flight.track(), &ctx, items.into_iter());
    assert_eq!(result.unwrap(), 4);

    let tasks: Vec<(String, MatchKind)> = task_rx
        .try_iter()
        .map(|t| (t.entry.name.clone(), t.kind))
        .collect();
    let content: Vec<&str> = tasks
        .iter()
        .filter(|(_, k)| *k == MatchKind::Content)
        .map(|(n, _)| n.as_str())
        .collect();
    assert_eq!(tasks.iter().filter(|(_, k)| *k == MatchKind::Name).count(), 4);
    assert_eq!(content, vec!["small.txt"]);

    let events: Vec<SearchEvent> = event_rx.try_iter().collect();
    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], SearchEvent::SkippedTooLarge { size: 100, .. }));

    let c = ctx.counters.snapshot();
    assert_eq!(c.files_visited, 3);
    assert_eq!(c.folders_visited, 1);
}
