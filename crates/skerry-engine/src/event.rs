//! The tick-tagged event journal.

use crossbeam_channel::{unbounded, Receiver, Sender};
use skerry_core::{Event, EventKind, TickId};

/// Ordered journal of everything the simulation reports.
///
/// Events are appended in emission order and kept for the lifetime of the
/// world. An external logging collaborator can additionally
/// [`subscribe`](Self::subscribe) to receive events as they happen; a
/// dropped receiver is detected on the next send and never blocks or
/// fails the simulation.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<Event>,
    sender: Option<Sender<Event>>,
}

impl EventLog {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, forwarding it to the subscriber if one is
    /// attached.
    pub fn record(&mut self, tick: TickId, kind: EventKind) {
        let event = Event { tick, kind };
        if let Some(sender) = &self.sender {
            if sender.send(event.clone()).is_err() {
                // Receiver is gone; stop forwarding.
                self.sender = None;
            }
        }
        self.events.push(event);
    }

    /// Open a live channel of events.
    ///
    /// Only one subscriber is supported; a second call replaces the
    /// first, whose receiver then runs dry.
    pub fn subscribe(&mut self) -> Receiver<Event> {
        let (sender, receiver) = unbounded();
        self.sender = Some(sender);
        receiver
    }

    /// All events recorded so far, in emission order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The journal rendered as display lines.
    pub fn rendered(&self) -> Vec<String> {
        self.events.iter().map(|event| event.to_string()).collect()
    }
}
