// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard shortcuts and hardware key debouncing

use crate::app::state::KeyAction;
use cosmic::iced::keyboard::Key;
use cosmic::iced::keyboard::key::Named;
use std::time::{Duration, Instant};

/// Shortcut bound to `key`, if any
///
/// Volume keys act as a shutter, like on a phone.
pub fn action_for(key: &Key) -> Option<KeyAction> {
    match key {
        Key::Named(Named::AudioVolumeUp | Named::AudioVolumeDown | Named::Camera) => {
            Some(KeyAction::Shutter)
        }
        Key::Named(Named::ArrowLeft) => Some(KeyAction::Previous),
        Key::Named(Named::ArrowRight) => Some(KeyAction::Next),
        Key::Named(Named::BrowserBack) => Some(KeyAction::Back),
        _ => None,
    }
}

/// Accepts a press, then ignores presses for `window`
#[derive(Debug, Clone)]
pub struct KeyDebouncer {
    window: Duration,
    last_accepted: Option<Instant>,
}

impl KeyDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    pub fn set_window(&mut self, window: Duration) {
        self.window = window;
    }

    /// Like [`accept`](Self::accept), but a press while `busy` is rejected
    /// without opening the window
    pub fn accept_when_idle(&mut self, now: Instant, busy: bool) -> bool {
        !busy && self.accept(now)
    }

    /// Record a press at `now`; true if it should be handled
    pub fn accept(&mut self, now: Instant) -> bool {
        match self.last_accepted {
            Some(last) if now.saturating_duration_since(last) < self.window => false,
            _ => {
                self.last_accepted = Some(now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_keys_are_shutter() {
        assert_eq!(
            action_for(&Key::Named(Named::AudioVolumeUp)),
            Some(KeyAction::Shutter)
        );
        assert_eq!(
            action_for(&Key::Named(Named::AudioVolumeDown)),
            Some(KeyAction::Shutter)
        );
        assert_eq!(action_for(&Key::Named(Named::Enter)), None);
    }

    #[test]
    fn test_ignored_presses_do_not_extend_window() {
        let start = Instant::now();
        let mut keys = KeyDebouncer::new(Duration::from_millis(1000));

        assert!(keys.accept(start));
        assert!(!keys.accept(start + Duration::from_millis(900)));
        assert!(keys.accept(start + Duration::from_millis(1000)));
    }

    #[test]
    fn test_busy_press_does_not_open_window() {
        let start = Instant::now();
        let mut keys = KeyDebouncer::new(Duration::from_millis(1000));

        assert!(!keys.accept_when_idle(start, true));
        assert!(keys.accept_when_idle(start + Duration::from_millis(100), false));
        assert!(!keys.accept_when_idle(start + Duration::from_millis(200), false));
    }
}
