//! Mutable owner of the login-screen configuration

use log::debug;
use serde::Serialize;
use tokio::sync::mpsc;

use crate::events::Broadcaster;

use super::types::{
    ConfigSnapshot, ConfirmButtonType, Cycle, EntryButtonType, ResponseType, Theme, TitleType,
};

/// Change notification delivered to the presentation layer.
///
/// Carries the new value only; rendering a label for it is the consumer's job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ConfigEvent {
    ConfirmButtonChanged(ConfirmButtonType),
    EntryButtonChanged(EntryButtonType),
    TitleChanged(TitleType),
    ThemeChanged(Theme),
    ResponseTypeChanged(ResponseType),
    SendStateChanged(bool),
    /// The advanced option group should be shown (`true`) or hidden (`false`).
    /// Actually enabling/disabling the cells is the presentation layer's job.
    AdvancedUiChanged(bool),
}

/// Exclusive owner of the configuration state.
///
/// All mutation goes through the `toggle_*` operations; every other component
/// only ever reads an immutable [`ConfigSnapshot`]. Created fresh per screen
/// activation with the documented defaults, torn down with the screen.
pub struct ConfigTracker {
    current: ConfigSnapshot,
    events: Broadcaster<ConfigEvent>,
}

impl Default for ConfigTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigTracker {
    /// Create a tracker holding the default configuration.
    pub fn new() -> Self {
        Self::with_snapshot(ConfigSnapshot::default())
    }

    /// Create a tracker seeded from an externally supplied configuration.
    pub fn with_snapshot(initial: ConfigSnapshot) -> Self {
        Self {
            current: initial,
            events: Broadcaster::new(),
        }
    }

    /// Register a presentation-layer observer for configuration changes.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<ConfigEvent> {
        self.events.subscribe()
    }

    /// Immutable read of all current values. Pure, O(1).
    pub fn snapshot(&self) -> ConfigSnapshot {
        self.current
    }

    /// Advance the confirm button style to the next variant.
    pub fn toggle_confirm_button_type(&mut self) {
        self.current.confirm_button = self.current.confirm_button.next();
        debug!("confirm button type -> {:?}", self.current.confirm_button);
        self.events
            .emit(ConfigEvent::ConfirmButtonChanged(self.current.confirm_button));
    }

    /// Advance the entry button style to the next variant.
    pub fn toggle_entry_button_type(&mut self) {
        self.current.entry_button = self.current.entry_button.next();
        debug!("entry button type -> {:?}", self.current.entry_button);
        self.events
            .emit(ConfigEvent::EntryButtonChanged(self.current.entry_button));
    }

    /// Advance the login view title to the next variant.
    pub fn toggle_title_type(&mut self) {
        self.current.title = self.current.title.next();
        debug!("title type -> {:?}", self.current.title);
        self.events.emit(ConfigEvent::TitleChanged(self.current.title));
    }

    /// Advance the theme to the next variant.
    pub fn toggle_theme(&mut self) {
        self.current.theme = self.current.theme.next();
        debug!("theme -> {:?}", self.current.theme);
        self.events.emit(ConfigEvent::ThemeChanged(self.current.theme));
    }

    /// Advance the requested response type to the next variant.
    pub fn toggle_response_type(&mut self) {
        self.current.response_type = self.current.response_type.next();
        debug!("response type -> {:?}", self.current.response_type);
        self.events
            .emit(ConfigEvent::ResponseTypeChanged(self.current.response_type));
    }

    /// Flip whether a state value is attached to the login request.
    pub fn toggle_send_state(&mut self) {
        self.current.send_state = !self.current.send_state;
        debug!("send state -> {}", self.current.send_state);
        self.events
            .emit(ConfigEvent::SendStateChanged(self.current.send_state));
    }

    /// Flip the visibility of the advanced option group.
    ///
    /// Visibility gates which cells the presentation layer shows; it never
    /// touches the option values themselves.
    pub fn toggle_advanced_ui(&mut self) {
        self.current.advanced_ui_visible = !self.current.advanced_ui_visible;
        debug!("advanced ui visible -> {}", self.current.advanced_ui_visible);
        self.events
            .emit(ConfigEvent::AdvancedUiChanged(self.current.advanced_ui_visible));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_matches_fold_of_toggles() {
        let mut tracker = ConfigTracker::new();

        // Interleaved reads must not disturb the sequence.
        let _ = tracker.snapshot();
        tracker.toggle_confirm_button_type();
        let _ = tracker.snapshot();
        tracker.toggle_response_type();
        tracker.toggle_response_type();
        tracker.toggle_send_state();

        let mut expected = ConfigSnapshot::default();
        expected.confirm_button = expected.confirm_button.next();
        expected.response_type = expected.response_type.next().next();
        expected.send_state = !expected.send_state;

        assert_eq!(tracker.snapshot(), expected);
    }

    #[test]
    fn test_full_cycle_returns_to_default() {
        let mut tracker = ConfigTracker::new();
        let initial = tracker.snapshot();

        // Two-variant options: a full cycle is two toggles.
        tracker.toggle_theme();
        tracker.toggle_theme();
        assert_eq!(tracker.snapshot(), initial);

        // One more step moves off the initial value again.
        tracker.toggle_theme();
        assert_ne!(tracker.snapshot().theme, initial.theme);
    }

    #[test]
    fn test_advanced_ui_toggle_leaves_options_untouched() {
        let mut tracker = ConfigTracker::new();
        tracker.toggle_theme();
        tracker.toggle_entry_button_type();
        let before = tracker.snapshot();

        tracker.toggle_advanced_ui();
        let after = tracker.snapshot();

        assert!(after.advanced_ui_visible);
        assert_eq!(after.confirm_button, before.confirm_button);
        assert_eq!(after.entry_button, before.entry_button);
        assert_eq!(after.title, before.title);
        assert_eq!(after.theme, before.theme);
        assert_eq!(after.response_type, before.response_type);
        assert_eq!(after.send_state, before.send_state);
    }

    #[test]
    fn test_theme_then_send_state_scenario() {
        let mut tracker = ConfigTracker::new();
        tracker.toggle_theme();
        tracker.toggle_send_state();

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.theme, Theme::Dark);
        assert!(snapshot.send_state);
        assert_eq!(snapshot.confirm_button, ConfirmButtonType::Default);
        assert_eq!(snapshot.entry_button, EntryButtonType::Default);
        assert_eq!(snapshot.response_type, ResponseType::Token);
        assert!(!snapshot.advanced_ui_visible);
    }

    #[tokio::test]
    async fn test_observers_see_each_change() {
        let mut tracker = ConfigTracker::new();
        let mut events = tracker.subscribe();

        tracker.toggle_theme();
        tracker.toggle_advanced_ui();
        tracker.toggle_advanced_ui();

        assert_eq!(events.recv().await, Some(ConfigEvent::ThemeChanged(Theme::Dark)));
        assert_eq!(events.recv().await, Some(ConfigEvent::AdvancedUiChanged(true)));
        assert_eq!(events.recv().await, Some(ConfigEvent::AdvancedUiChanged(false)));
    }
}
