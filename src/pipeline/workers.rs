use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::engine::matcher::match_name;
use crate::engine::reader::read_and_match;
use crate::{MatchKind, SearchEvent};

use super::counters::Counters;
use super::walk::Task;

/// Run one task to its single event.
pub fn run_task(task: &Task, keyword: &str, counters: &Counters) -> SearchEvent {
    match task.kind {
        MatchKind::Name => SearchEvent::Match(match_name(&task.entry, keyword, counters)),
        MatchKind::Content => read_and_match(&task.entry, keyword, counters),
    }
}

/// Single matcher worker: read tasks from task_rx, emit one event each on event_tx.
/// The task (and its in-flight guard) is dropped only after its event is on the bus.
fn match_worker_loop(
    task_rx: Receiver<Task>,
    event_tx: Sender<SearchEvent>,
    keyword: Arc<str>,
    counters: Arc<Counters>,
) {
    while let Ok(task) = task_rx.recv() {
        let event = run_task(&task, &keyword, &counters);
        let _ = event_tx.send(event);
        drop(task);
    }
    drop(event_tx);
}

/// Spawn the bounded matcher pool. Workers exit once the walker drops its task sender and the queue is empty.
pub fn spawn_match_workers(
    task_rx: Receiver<Task>,
    event_tx: &Sender<SearchEvent>,
    keyword: &str,
    counters: &Arc<Counters>,
    num_threads: usize,
) -> Vec<JoinHandle<()>> {
    let keyword: Arc<str> = Arc::from(keyword);
    (0..num_threads)
        .map(|_| {
            let task_rx = task_rx.clone();
            let event_tx = event_tx.clone();
            let keyword = Arc::clone(&keyword);
            let counters = Arc::clone(counters);
            thread::spawn(move || match_worker_loop(task_rx, event_tx, keyword, counters))
        })
        .collect()
}
