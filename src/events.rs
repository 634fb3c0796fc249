//! Typed event fan-out between the core and the presentation layer.
//!
//! Subscribers get an unbounded receiver; the core never blocks on delivery.
//! Receivers that have been dropped are pruned on the next emit.

use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Many-subscriber broadcast channel for a single event type.
///
/// Cloning shares the subscriber list, so the async completion path of a
/// dispatch can emit through the same channel the caller subscribed on.
pub struct Broadcaster<E> {
    subscribers: Arc<Mutex<Vec<mpsc::UnboundedSender<E>>>>,
}

impl<E> Clone for Broadcaster<E> {
    fn clone(&self) -> Self {
        Self {
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

impl<E> Default for Broadcaster<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Broadcaster<E> {
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Register a new subscriber and return its receiving end.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<E> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers
            .lock()
            .expect("subscriber list poisoned")
            .push(tx);
        rx
    }

    /// Number of live subscribers (closed ones linger until the next emit).
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .expect("subscriber list poisoned")
            .len()
    }
}

impl<E: Clone> Broadcaster<E> {
    /// Deliver an event to every live subscriber.
    pub fn emit(&self, event: E) {
        let mut subscribers = self.subscribers.lock().expect("subscriber list poisoned");
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_emit_reaches_all_subscribers() {
        let bus: Broadcaster<u32> = Broadcaster::new();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        bus.emit(7);

        assert_eq!(a.recv().await, Some(7));
        assert_eq!(b.recv().await, Some(7));
    }

    #[tokio::test]
    async fn test_dropped_subscriber_is_pruned() {
        let bus: Broadcaster<u32> = Broadcaster::new();
        let rx = bus.subscribe();
        let mut live = bus.subscribe();
        drop(rx);

        bus.emit(1);

        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(live.recv().await, Some(1));
    }
}
