//! Post-login account session

use std::sync::Arc;

use log::debug;

use super::service::{AccountProfile, Credential, IdentityError, IdentityService};

/// Holds the credential of the logged-in user and the account operations
/// around it.
///
/// The session starts empty; it becomes authenticated either by restoring a
/// credential the provider still holds from an earlier run, or by adopting
/// the credential a completed login delivered.
pub struct AccountSession<S> {
    service: Arc<S>,
    credential: Option<Credential>,
}

impl<S: IdentityService> AccountSession<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            credential: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    /// Adopt the provider's current credential, if any. Expired credentials
    /// are skipped and the provider is told to forget them. Returns whether
    /// the session is authenticated afterwards.
    pub async fn restore(&mut self) -> bool {
        match self.service.current_credential().await {
            Some(credential) if credential.is_expired() => {
                debug!("skipping expired credential on restore");
                self.service.log_out().await;
            }
            Some(credential) => {
                debug!("restored existing credential");
                self.credential = Some(credential);
            }
            None => {}
        }
        self.is_authenticated()
    }

    /// Install the credential a completed login handed back.
    pub fn adopt(&mut self, credential: Credential) {
        self.credential = Some(credential);
    }

    /// Fetch the account profile for the authenticated user.
    pub async fn account(&self) -> Result<AccountProfile, IdentityError> {
        if self.credential.is_none() {
            return Err(IdentityError::NotAuthenticated);
        }
        self.service.request_account().await
    }

    /// Drop the credential here and on the provider side.
    pub async fn log_out(&mut self) {
        debug!("logging out");
        self.credential = None;
        self.service.log_out().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use std::sync::Mutex;

    use super::super::service::{LoginMethod, LoginRequest};

    /// Provider stub with a settable stored credential and a logout flag.
    struct StoredCredentialService {
        stored: Mutex<Option<Credential>>,
        logged_out: Mutex<bool>,
    }

    impl StoredCredentialService {
        fn with(credential: Option<Credential>) -> Self {
            Self {
                stored: Mutex::new(credential),
                logged_out: Mutex::new(false),
            }
        }

        fn was_logged_out(&self) -> bool {
            *self.logged_out.lock().unwrap()
        }
    }

    #[async_trait]
    impl IdentityService for StoredCredentialService {
        async fn begin_login(&self, _request: LoginRequest) -> Result<Credential, IdentityError> {
            Err(IdentityError::Cancelled)
        }

        async fn current_credential(&self) -> Option<Credential> {
            self.stored.lock().unwrap().clone()
        }

        async fn pending_login(&self) -> Option<LoginMethod> {
            None
        }

        async fn request_account(&self) -> Result<AccountProfile, IdentityError> {
            Ok(AccountProfile {
                account_id: "acct-1".to_string(),
                email: Some("user@example.com".to_string()),
                phone: None,
            })
        }

        async fn log_out(&self) {
            *self.logged_out.lock().unwrap() = true;
            self.stored.lock().unwrap().take();
        }
    }

    fn valid_token() -> Credential {
        Credential::AccessToken {
            token: "tok".to_string(),
            account_id: "acct-1".to_string(),
            expires_at: Utc::now() + Duration::hours(1),
        }
    }

    fn expired_token() -> Credential {
        Credential::AccessToken {
            token: "tok".to_string(),
            account_id: "acct-1".to_string(),
            expires_at: Utc::now() - Duration::hours(1),
        }
    }

    #[tokio::test]
    async fn test_restore_adopts_valid_credential() {
        let service = Arc::new(StoredCredentialService::with(Some(valid_token())));
        let mut session = AccountSession::new(Arc::clone(&service));

        assert!(session.restore().await);
        assert!(session.is_authenticated());

        let profile = session.account().await.unwrap();
        assert_eq!(profile.account_id, "acct-1");
    }

    #[tokio::test]
    async fn test_restore_discards_expired_credential() {
        let service = Arc::new(StoredCredentialService::with(Some(expired_token())));
        let mut session = AccountSession::new(Arc::clone(&service));

        assert!(!session.restore().await);
        assert!(!session.is_authenticated());
        // The stale credential was cleaned up on the provider side too.
        assert!(service.was_logged_out());
    }

    #[tokio::test]
    async fn test_account_requires_authentication() {
        let service = Arc::new(StoredCredentialService::with(None));
        let session = AccountSession::new(Arc::clone(&service));

        assert_eq!(
            session.account().await,
            Err(IdentityError::NotAuthenticated)
        );
    }

    #[tokio::test]
    async fn test_logout_clears_both_sides() {
        let service = Arc::new(StoredCredentialService::with(None));
        let mut session = AccountSession::new(Arc::clone(&service));

        session.adopt(valid_token());
        assert!(session.is_authenticated());

        session.log_out().await;
        assert!(!session.is_authenticated());
        assert!(service.was_logged_out());
    }
}
