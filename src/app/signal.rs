// SPDX-License-Identifier: GPL-3.0-only

//! One-shot signal channel
//!
//! A view-model emits signals (navigate, take photo, ...) that must be
//! handled exactly once by whichever screen currently observes it. There is
//! a single observer slot: subscribing replaces the previous observer, a
//! value emitted while nobody observes is dropped, and nothing is replayed
//! to a late subscriber.

use tokio::sync::mpsc::{self, Receiver, Sender, error::TrySendError};
use tracing::{debug, warn};

/// Outcome of [`OneShot::emit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    Dropped,
}

/// Single-slot, single-consumer signal source
#[derive(Debug)]
pub struct OneShot<T> {
    slot: Option<Sender<T>>,
}

impl<T> Default for OneShot<T> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<T: std::fmt::Debug> OneShot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Become the observer, replacing any previous one
    pub fn subscribe(&mut self) -> Receiver<T> {
        let (sender, receiver) = mpsc::channel(1);
        self.slot = Some(sender);
        receiver
    }

    /// Whether a live observer is attached
    pub fn has_observer(&self) -> bool {
        self.slot.as_ref().is_some_and(|sender| !sender.is_closed())
    }

    /// Hand `value` to the current observer, or drop it
    pub fn emit(&mut self, value: T) -> Delivery {
        let Some(sender) = &self.slot else {
            debug!(?value, "Signal dropped, no observer");
            return Delivery::Dropped;
        };

        match sender.try_send(value) {
            Ok(()) => Delivery::Delivered,
            Err(TrySendError::Closed(value)) => {
                debug!(?value, "Signal dropped, observer gone");
                self.slot = None;
                Delivery::Dropped
            }
            Err(TrySendError::Full(value)) => {
                warn!(?value, "Signal dropped, observer has not consumed the previous one");
                Delivery::Dropped
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_without_observer_is_dropped() {
        let mut signal = OneShot::new();
        assert_eq!(signal.emit(1u8), Delivery::Dropped);

        // Nothing is replayed to a late observer
        let mut late = signal.subscribe();
        assert!(late.try_recv().is_err());
    }

    #[test]
    fn test_live_observer_receives_once() {
        let mut signal = OneShot::new();
        let mut observer = signal.subscribe();

        assert_eq!(signal.emit("go"), Delivery::Delivered);
        assert_eq!(observer.try_recv().ok(), Some("go"));
        assert!(observer.try_recv().is_err());
    }

    #[test]
    fn test_new_observer_replaces_old() {
        let mut signal = OneShot::new();
        let mut first = signal.subscribe();
        let mut second = signal.subscribe();

        assert!(signal.has_observer());
        signal.emit(7u32);
        assert!(first.try_recv().is_err());
        assert_eq!(second.try_recv().ok(), Some(7));
    }

    #[test]
    fn test_dropped_observer_detaches() {
        let mut signal = OneShot::new();
        drop(signal.subscribe());

        assert!(!signal.has_observer());
        assert_eq!(signal.emit(()), Delivery::Dropped);
    }
}
