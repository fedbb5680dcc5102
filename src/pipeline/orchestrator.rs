use crossbeam_channel::{Receiver, never, select};
use log::debug;
use std::path::Path;
use std::sync::Arc;
use std::thread;

use crate::error::SearchError;
use crate::report::ReportSink;
use crate::{SearchConfig, SearchEvent};

use super::bus::{CompletionReceiver, WalkOutcome, completion_channel};
use super::context::{PipelineHandles, PipelineTuning, create_pipeline_channels};
use super::error_handler::collect_walk_outcome;
use super::walk::spawn_walk_thread;
use super::workers::spawn_match_workers;

/// Start walk thread, matcher pool and finalizer for an already-probed `root`.
/// Caller drains `event_rx` with [`drain_events`] and joins `finalizer` afterwards.
pub fn run_pipeline(root: &Path, config: &SearchConfig) -> PipelineHandles {
    let tuning = PipelineTuning::for_config(config);
    debug!(
        "Matcher pool: {} workers, task queue {}",
        tuning.num_threads, tuning.task_cap
    );

    let channels = create_pipeline_channels(root, config, &tuning);
    let counters = Arc::clone(&channels.ctx.counters);
    let in_flight = channels.ctx.in_flight.clone();

    let worker_handles = spawn_match_workers(
        channels.task_rx,
        &channels.event_tx,
        &config.keyword,
        &counters,
        tuning.num_threads,
    );

    let walk_handle = spawn_walk_thread(
        channels.task_tx,
        channels.event_tx.clone(),
        channels.walk_guard,
        channels.ctx,
    );

    // Dropping the spare sender means the event channel closes once walker and workers are done.
    drop(channels.event_tx);

    let (completion_tx, completion) = completion_channel();
    let finalizer = thread::spawn(move || {
        in_flight.wait_idle();
        debug!("finalizer: no tasks in flight");
        let outcome = collect_walk_outcome(walk_handle, worker_handles);
        completion_tx.fire(outcome);
    });

    PipelineHandles {
        event_rx: channels.event_rx,
        completion,
        counters,
        finalizer,
    }
}

/// Hand one event to the sink. Size skips and unreadable files are only surfaced when verbose.
pub fn deliver_event(event: SearchEvent, sink: &mut dyn ReportSink, verbose: bool) {
    match event {
        SearchEvent::Match(result) => sink.report_match(&result, verbose),
        SearchEvent::SkippedTooLarge { path, size } => {
            if verbose {
                sink.report_skipped_too_large(&path, size);
            }
        }
        SearchEvent::Unreadable { path, reason } => {
            if verbose {
                sink.report_unreadable(&path, &reason);
            }
        }
    }
}

/// Consumer loop: report events until the completion signal fires, then acknowledge exactly once.
/// Returns the walk outcome carried by the completion signal.
pub fn drain_events(
    event_rx: Receiver<SearchEvent>,
    completion: CompletionReceiver,
    sink: &mut dyn ReportSink,
    verbose: bool,
) -> WalkOutcome {
    let mut event_rx = event_rx;
    let mut received = 0_u64;
    loop {
        select! {
            recv(event_rx) -> msg => match msg {
                Ok(event) => {
                    received += 1;
                    deliver_event(event, sink, verbose);
                }
                // All producers are gone; keep waiting for the completion signal only.
                Err(_) => event_rx = never(),
            },
            recv(completion.done_rx) -> outcome => {
                for event in event_rx.try_iter() {
                    received += 1;
                    deliver_event(event, sink, verbose);
                }
                debug!("consumer: completion received after {} events", received);
                completion.acknowledge();
                return outcome.unwrap_or(Err(SearchError::ThreadPanicked("finalizer")));
            }
        }
    }
}
