//! Fan-out of notification signals to subscribed listeners.
//!
//! Core operations buffer signals in an outbox; the node drains the outbox
//! after the mutation commits and hands each signal to the dispatcher.

use podium_lifecycle::Notification;

/// Synchronous fan-out for notification signals.
///
/// Listeners are invoked inline on the emitting task; keep handlers fast so
/// a slow listener cannot stall the operation that produced the signal.
pub struct NotificationDispatcher {
    listeners: Vec<Box<dyn Fn(&Notification) + Send + Sync>>,
}

impl NotificationDispatcher {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&Notification) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, signal: &Notification) {
        for listener in &self.listeners {
            listener(signal);
        }
    }
}

impl Default for NotificationDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podium_types::{EventId, PresentationId, PresentationStatus, UserId};
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    fn submitted() -> Notification {
        Notification::PresentationSubmitted {
            event_id: EventId::from_index(1),
            presentation_id: PresentationId::from_index(1),
            submitted_by: UserId::new("usr_speaker"),
        }
    }

    #[test]
    fn every_listener_hears_the_signal() {
        let heard = Arc::new(AtomicUsize::new(0));
        let mut dispatcher = NotificationDispatcher::new();

        for _ in 0..3 {
            let heard = Arc::clone(&heard);
            dispatcher.subscribe(Box::new(move |_| {
                heard.fetch_add(1, Ordering::SeqCst);
            }));
        }

        dispatcher.emit(&submitted());
        dispatcher.emit(&submitted());
        assert_eq!(heard.load(Ordering::SeqCst), 6);
    }

    #[test]
    fn emitting_without_listeners_drops_the_signal() {
        let dispatcher = NotificationDispatcher::new();
        dispatcher.emit(&submitted());
    }

    #[test]
    fn listeners_can_match_on_the_variant() {
        let results_seen = Arc::new(AtomicUsize::new(0));
        let mut dispatcher = NotificationDispatcher::new();

        let seen = Arc::clone(&results_seen);
        dispatcher.subscribe(Box::new(move |signal| {
            if let Notification::PresentationResult { .. } = signal {
                seen.fetch_add(1, Ordering::SeqCst);
            }
        }));

        dispatcher.emit(&submitted());
        dispatcher.emit(&Notification::PresentationResult {
            presentation_id: PresentationId::from_index(1),
            submitted_by: UserId::new("usr_speaker"),
            status: PresentationStatus::Rejected,
        });

        assert_eq!(results_seen.load(Ordering::SeqCst), 1);
    }
}
