//! One-shot tick scheduling provided by the host event loop

use std::time::Duration;
use tokio::{sync::mpsc, task::JoinHandle, time::sleep};
use tracing::debug;

use crate::{state::TickHandle, tasks::Event};

/// Schedule a single callback after a delay, or cancel one still pending
///
/// There is no repeating timer: whoever wants another tick schedules it again.
pub trait Scheduler: Send {
    fn schedule(&mut self, after: Duration) -> TickHandle;
    fn cancel(&mut self, handle: TickHandle);
}

/// Scheduler backed by tokio sleeps that post `Event::Tick` into the engine queue
#[derive(Debug)]
pub struct TokioScheduler {
    events: mpsc::UnboundedSender<Event>,
    next_id: u64,
    pending: Option<(TickHandle, JoinHandle<()>)>,
}

impl TokioScheduler {
    pub fn new(events: mpsc::UnboundedSender<Event>) -> Self {
        Self {
            events,
            next_id: 0,
            pending: None,
        }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, after: Duration) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        let events = self.events.clone();

        let task = tokio::spawn(async move {
            sleep(after).await;
            if events.send(Event::Tick(handle)).is_err() {
                debug!("Engine queue closed, dropping tick {:?}", handle);
            }
        });

        // Only one tick may be outstanding
        if let Some((_, previous)) = self.pending.replace((handle, task)) {
            previous.abort();
        }

        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        match self.pending.take() {
            Some((pending, task)) if pending == handle => {
                task.abort();
                debug!("Cancelled tick {:?}", handle);
            }
            other => self.pending = other,
        }
    }
}
