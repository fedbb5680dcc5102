//! Pipeline context and tuning: shared data passed into the walk thread and the worker pool.

use crossbeam_channel::{Receiver, Sender, bounded};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::SearchConfig;
use crate::SearchEvent;
use crate::error::SearchError;
use crate::utils::config::{ChannelCaps, WorkerThreadLimits};
use crate::utils::worker_count;

use super::bus::{CompletionReceiver, event_channel};
use super::counters::Counters;
use super::tracker::{InFlight, TaskGuard};
use super::walk::Task;

/// Tuning derived from the config and the machine: worker count and task queue cap.
#[derive(Clone, Debug)]
pub struct PipelineTuning {
    pub num_threads: usize,
    pub task_cap: usize,
}

impl PipelineTuning {
    pub fn for_config(config: &SearchConfig) -> Self {
        let limits = WorkerThreadLimits::current();
        let num_threads = worker_count(config.threads, limits.all_threads, limits.floor);
        Self {
            num_threads,
            task_cap: num_threads * ChannelCaps::TASKS_PER_WORKER,
        }
    }
}

/// Shared context for the walk thread: root, walk options and the dispatch targets.
pub struct PipelineContext {
    pub root: PathBuf,
    pub size_ceiling: u64,
    pub follow_links: bool,
    pub counters: Arc<Counters>,
    pub in_flight: InFlight,
}

/// Handles returned by [`run_pipeline`](super::run_pipeline): drain `event_rx` until
/// `completion` fires, then read `counters`.
pub struct PipelineHandles {
    pub event_rx: Receiver<SearchEvent>,
    pub completion: CompletionReceiver,
    pub counters: Arc<Counters>,
    pub finalizer: JoinHandle<()>,
}

/// Channels and shared state for the pipeline. Walk thread gets task_tx, event_tx, ctx;
/// workers get task_rx, event_tx.
pub struct PipelineChannels {
    pub task_tx: Sender<Task>,
    pub task_rx: Receiver<Task>,
    pub event_tx: Sender<SearchEvent>,
    pub event_rx: Receiver<SearchEvent>,
    /// Held by the walk thread for the whole enumeration.
    pub walk_guard: TaskGuard,
    pub ctx: PipelineContext,
}

pub fn create_pipeline_channels(
    root: &Path,
    config: &SearchConfig,
    tuning: &PipelineTuning,
) -> PipelineChannels {
    let (task_tx, task_rx) = bounded::<Task>(tuning.task_cap);
    let (event_tx, event_rx) = event_channel();
    let in_flight = InFlight::new();
    let walk_guard = in_flight.track();

    let ctx = PipelineContext {
        root: root.to_path_buf(),
        size_ceiling: config.size_ceiling,
        follow_links: config.follow_links,
        counters: Arc::new(Counters::new()),
        in_flight,
    };

    PipelineChannels {
        task_tx,
        task_rx,
        event_tx,
        event_rx,
        walk_guard,
        ctx,
    }
}

/// Fatal traversal error, or the number of entries the walk dispatched.
pub type WalkResult = Result<u64, SearchError>;
