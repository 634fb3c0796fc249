//! Core types for the login-screen configuration

use serde::{Deserialize, Serialize};

/// Closed enumeration with a fixed cyclic successor order.
///
/// Toggling is total: advancing past the last variant wraps to the first, so
/// there is no error path. Widening an option set only means giving `next()`
/// one more arm.
pub trait Cycle: Sized + Copy + PartialEq {
    /// The next variant in the cycle.
    fn next(self) -> Self;
}

/// Style of the confirmation button shown during the login flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfirmButtonType {
    #[default]
    Default,
    Custom,
}

impl Cycle for ConfirmButtonType {
    fn next(self) -> Self {
        match self {
            ConfirmButtonType::Default => ConfirmButtonType::Custom,
            ConfirmButtonType::Custom => ConfirmButtonType::Default,
        }
    }
}

/// Style of the entry button, independent of the confirm button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EntryButtonType {
    #[default]
    Default,
    Custom,
}

impl Cycle for EntryButtonType {
    fn next(self) -> Self {
        match self {
            EntryButtonType::Default => EntryButtonType::Custom,
            EntryButtonType::Custom => EntryButtonType::Default,
        }
    }
}

/// Title shown on the login view: the provider default or a custom string
/// supplied by the host app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TitleType {
    #[default]
    Default,
    Custom,
}

impl Cycle for TitleType {
    fn next(self) -> Self {
        match self {
            TitleType::Default => TitleType::Custom,
            TitleType::Custom => TitleType::Default,
        }
    }
}

/// Color theme requested for the login flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Cycle for Theme {
    fn next(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// What the login dispatch asks the identity service to hand back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResponseType {
    /// An access token usable directly by the client.
    #[default]
    Token,
    /// An authorization code for server-side exchange.
    Code,
}

impl Cycle for ResponseType {
    fn next(self) -> Self {
        match self {
            ResponseType::Token => ResponseType::Code,
            ResponseType::Code => ResponseType::Token,
        }
    }
}

/// Immutable aggregate of every configuration value at one instant.
///
/// Produced on demand by [`ConfigTracker::snapshot`](super::ConfigTracker::snapshot)
/// and never mutated afterwards; a snapshot taken after N toggles reflects
/// exactly those N toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    pub confirm_button: ConfirmButtonType,
    pub entry_button: EntryButtonType,
    pub title: TitleType,
    pub theme: Theme,
    pub response_type: ResponseType,
    /// Whether the dispatch should attach an opaque state value to the request.
    pub send_state: bool,
    /// Whether the advanced option group is currently shown.
    pub advanced_ui_visible: bool,
}
