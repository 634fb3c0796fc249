//! Login-intent dispatch with a single-attempt reentrancy guard

use std::sync::{Arc, Mutex};

use log::{debug, warn};
use serde::Serialize;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::config::ConfigTracker;
use crate::events::Broadcaster;

use super::service::{Credential, IdentityError, IdentityService, LoginMethod, LoginRequest};

/// Dispatch lifecycle: at most one login attempt is outstanding at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    InFlight,
}

/// Local dispatch failures. Recoverable: the caller may retry once the
/// current attempt completes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("a login attempt is already in flight")]
    AlreadyInFlight,
}

/// Side-channel notification for login dispatch progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LoginEvent {
    /// A request was handed to the identity service.
    Started { method: LoginMethod },
    /// A dispatch call was rejected because another attempt is in flight.
    Rejected { method: LoginMethod },
    /// The identity service resolved the outstanding attempt.
    Completed {
        method: LoginMethod,
        outcome: Result<Credential, IdentityError>,
    },
}

/// Forwards login intents to the identity service, one at a time.
///
/// A dispatch call snapshots the configuration, starts the asynchronous
/// provider call on a spawned task and returns immediately; the outcome
/// arrives later as a [`LoginEvent::Completed`] on the event channel. While
/// an attempt is outstanding, further calls fail with
/// [`DispatchError::AlreadyInFlight`] and issue no request.
pub struct LoginDispatcher<S> {
    service: Arc<S>,
    state: Arc<Mutex<DispatchState>>,
    events: Broadcaster<LoginEvent>,
}

impl<S: IdentityService> LoginDispatcher<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            state: Arc::new(Mutex::new(DispatchState::Idle)),
            events: Broadcaster::new(),
        }
    }

    /// Register an observer for dispatch progress events.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<LoginEvent> {
        self.events.subscribe()
    }

    pub fn state(&self) -> DispatchState {
        *self.state.lock().expect("dispatch state poisoned")
    }

    pub fn is_in_flight(&self) -> bool {
        self.state() == DispatchState::InFlight
    }

    /// Start an email login with the current configuration.
    pub fn login_with_email(&self, config: &ConfigTracker) -> Result<(), DispatchError> {
        self.dispatch(LoginMethod::Email, config)
    }

    /// Start a phone login with the current configuration.
    pub fn login_with_phone(&self, config: &ConfigTracker) -> Result<(), DispatchError> {
        self.dispatch(LoginMethod::Phone, config)
    }

    /// Re-enter dispatch for a login attempt the provider reports as
    /// interrupted, under the same single-attempt guard. Returns the resumed
    /// method, or `None` when there was nothing to resume.
    pub async fn resume_pending(
        &self,
        config: &ConfigTracker,
    ) -> Result<Option<LoginMethod>, DispatchError> {
        match self.service.pending_login().await {
            Some(method) => {
                debug!("resuming interrupted {:?} login", method);
                self.dispatch(method, config)?;
                Ok(Some(method))
            }
            None => Ok(None),
        }
    }

    fn dispatch(&self, method: LoginMethod, config: &ConfigTracker) -> Result<(), DispatchError> {
        {
            let mut state = self.state.lock().expect("dispatch state poisoned");
            if *state == DispatchState::InFlight {
                warn!("rejecting {:?} login, another attempt is in flight", method);
                self.events.emit(LoginEvent::Rejected { method });
                return Err(DispatchError::AlreadyInFlight);
            }
            *state = DispatchState::InFlight;
        }

        let snapshot = config.snapshot();
        let state_nonce = snapshot.send_state.then(|| Uuid::new_v4().to_string());
        let request = LoginRequest {
            method,
            config: snapshot,
            state: state_nonce.clone(),
        };

        debug!("dispatching {:?} login: {:?}", method, snapshot);
        self.events.emit(LoginEvent::Started { method });

        let service = Arc::clone(&self.service);
        let guard = Arc::clone(&self.state);
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = service.begin_login(request).await;
            let outcome = verify_state_echo(state_nonce.as_deref(), outcome);

            // Clear the guard before notifying, so a handler reacting to the
            // completion can immediately dispatch again.
            *guard.lock().expect("dispatch state poisoned") = DispatchState::Idle;
            match &outcome {
                Ok(_) => debug!("{:?} login completed", method),
                Err(e) => warn!("{:?} login failed: {}", method, e),
            }
            events.emit(LoginEvent::Completed { method, outcome });
        });

        Ok(())
    }
}

/// A code response must echo the state value the request carried, otherwise
/// the credential cannot be trusted.
fn verify_state_echo(
    sent: Option<&str>,
    outcome: Result<Credential, IdentityError>,
) -> Result<Credential, IdentityError> {
    match (&outcome, sent) {
        (Ok(Credential::AuthorizationCode { state, .. }), Some(sent))
            if state.as_deref() != Some(sent) =>
        {
            Err(IdentityError::Provider(
                "state echo mismatch on authorization code".to_string(),
            ))
        }
        _ => outcome,
    }
}
