#![allow(warnings)]

pub mod auth;
pub mod config;
pub mod events;

pub use auth::{
    AccountProfile, AccountSession, Credential, DispatchError, IdentityError, IdentityService,
    LoginDispatcher, LoginEvent, LoginMethod, LoginRequest,
};
pub use config::{ConfigEvent, ConfigSnapshot, ConfigTracker};
