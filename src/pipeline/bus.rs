//! Result bus: bounded event channel plus a one-shot completion rendezvous.
//!
//! The event channel closes when its last sender (walker or worker) is dropped; nothing
//! closes it explicitly. Completion is sent once by the finalizer, which then blocks until
//! the consumer acknowledges, so the summary can never run ahead of the last event.

use crossbeam_channel::{Receiver, Sender, bounded};

use crate::SearchEvent;
use crate::error::SearchError;
use crate::utils::config::ChannelCaps;

/// Outcome of the walk as seen by the finalizer: `Err` carries the fatal traversal error.
pub type WalkOutcome = Result<(), SearchError>;

/// Create the event channel.
pub fn event_channel() -> (Sender<SearchEvent>, Receiver<SearchEvent>) {
    bounded(ChannelCaps::EVENTS)
}

/// Finalizer side of the completion signal.
pub struct CompletionSender {
    done_tx: Sender<WalkOutcome>,
    ack_rx: Receiver<()>,
}

/// Consumer side of the completion signal.
pub struct CompletionReceiver {
    pub(crate) done_rx: Receiver<WalkOutcome>,
    ack_tx: Sender<()>,
}

pub fn completion_channel() -> (CompletionSender, CompletionReceiver) {
    let (done_tx, done_rx) = bounded(0);
    let (ack_tx, ack_rx) = bounded(0);
    (
        CompletionSender { done_tx, ack_rx },
        CompletionReceiver { done_rx, ack_tx },
    )
}

impl CompletionSender {
    /// Deliver the outcome and wait for the consumer to acknowledge. Consumes the sender: fires once.
    pub fn fire(self, outcome: WalkOutcome) {
        if self.done_tx.send(outcome).is_err() {
            return;
        }
        let _ = self.ack_rx.recv();
    }
}

impl CompletionReceiver {
    /// Release the finalizer. Consumes the receiver: acknowledges once.
    pub fn acknowledge(self) {
        let _ = self.ack_tx.send(());
    }
}
