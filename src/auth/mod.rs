//! Login dispatch against an external identity service
//!
//! The identity provider itself is an opaque async collaborator behind
//! [`IdentityService`]; this module owns the dispatch state machine and the
//! post-login session, never the provider protocol.

pub mod dispatcher;
pub mod service;
pub mod session;

pub use dispatcher::{DispatchError, DispatchState, LoginDispatcher, LoginEvent};
pub use service::{
    AccountProfile, Credential, IdentityError, IdentityService, LoginMethod, LoginRequest,
};
pub use session::AccountSession;
