//! Configuration state for the login screen
//!
//! The tracker owns every toggleable presentation option and hands out
//! immutable snapshots; the presentation layer learns about changes through
//! `ConfigEvent` subscriptions.

pub mod tracker;
pub mod types;

pub use tracker::{ConfigEvent, ConfigTracker};
pub use types::{
    ConfigSnapshot, ConfirmButtonType, Cycle, EntryButtonType, ResponseType, Theme, TitleType,
};
