//! Pipeline components: walk thread, matcher pool, result bus and completion protocol.
//!
//! Walk → task queue → workers (name / content match) → event channel → consumer.
//! The finalizer waits for the in-flight count to reach zero, joins every producer,
//! then fires the one-shot completion signal.

pub mod bus;
pub mod context;
pub mod counters;
pub mod error_handler;
pub mod orchestrator;
pub mod tracker;
pub mod walk;
pub mod workers;

pub use bus::{CompletionReceiver, CompletionSender, WalkOutcome, completion_channel, event_channel};
pub use context::{PipelineChannels, PipelineContext, PipelineHandles, PipelineTuning, WalkResult};
pub use counters::Counters;
pub use error_handler::collect_walk_outcome;
pub use orchestrator::{deliver_event, drain_events, run_pipeline};
pub use tracker::{InFlight, TaskGuard};
pub use walk::{Task, WalkItem, run_walk_loop, spawn_walk_thread, to_item_walkdir};
pub use workers::{run_task, spawn_match_workers};
