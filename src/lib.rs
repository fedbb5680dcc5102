//! keyscan: concurrent filesystem search for a keyword in file contents and in file/folder names

pub mod engine;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use error::SearchError;
pub use types::*;

use log::{debug, warn};
use std::time::Instant;

use crate::report::ReportSink;

/// Log a phase transition and return the new phase.
fn enter(from: SearchPhase, to: SearchPhase) -> SearchPhase {
    debug!("search phase: {} -> {}", from, to);
    to
}

/// Single entry point: search `config.root` for `config.keyword`, reporting every event to `sink`.
///
/// - Configuration errors (empty keyword/path, missing root) are returned before any work starts;
///   nothing is reported and no counters exist.
/// - Per-file read failures are soft: they reach `sink` (when verbose) and the search continues.
/// - The first enumeration error aborts the walk and is returned as [`SearchError::Traversal`]
///   once every already-queued task has reported.
///
/// Returns the final counters and elapsed time only after the completion signal fired.
pub fn search(
    config: &SearchConfig,
    sink: &mut dyn ReportSink,
) -> Result<SearchSummary, SearchError> {
    let start = Instant::now();
    let phase = SearchPhase::Idle;

    if let Err(e) = config.validate() {
        enter(phase, SearchPhase::Failed);
        return Err(e);
    }
    let root = match engine::probe_root(&config.root) {
        Ok(root) => root,
        Err(e) => {
            enter(phase, SearchPhase::Failed);
            return Err(e);
        }
    };

    let phase = enter(phase, SearchPhase::Walking);
    let handles = pipeline::run_pipeline(&root, config);
    let phase = enter(phase, SearchPhase::Draining);

    let outcome =
        pipeline::drain_events(handles.event_rx, handles.completion, sink, config.verbose);
    let joined = handles
        .finalizer
        .join()
        .map_err(|_| SearchError::ThreadPanicked("finalizer"));
    if let Err(e) = outcome.and(joined) {
        enter(phase, SearchPhase::Failed);
        warn!("{}", e);
        return Err(e);
    }

    enter(phase, SearchPhase::Finalized);
    Ok(SearchSummary {
        counters: handles.counters.snapshot(),
        elapsed: start.elapsed(),
    })
}
