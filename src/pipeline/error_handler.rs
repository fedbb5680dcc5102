use log::debug;
use std::thread::JoinHandle;

use crate::error::SearchError;

use super::bus::WalkOutcome;
use super::context::WalkResult;

/// Join the walk thread and the workers and fold them into one outcome.
/// A fatal traversal error wins over a worker panic; call after the in-flight count reached zero.
pub fn collect_walk_outcome(
    walk_handle: JoinHandle<WalkResult>,
    worker_handles: Vec<JoinHandle<()>>,
) -> WalkOutcome {
    let walk = walk_handle
        .join()
        .map_err(|_| SearchError::ThreadPanicked("walk"))
        .and_then(|r| r);
    let mut workers_ok = true;
    for h in worker_handles {
        workers_ok &= h.join().is_ok();
    }
    let count = walk?;
    if !workers_ok {
        return Err(SearchError::ThreadPanicked("worker"));
    }
    debug!("finalizer: walk and workers joined ({} entries)", count);
    Ok(())
}
