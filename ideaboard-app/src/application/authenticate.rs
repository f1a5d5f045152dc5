use crate::domain::{Credentials, Identity, SignupResponse};
use crate::infrastructure::api::AuthBackend;
use crate::infrastructure::session::{decode_claims, SessionManager};
use ideaboard_errors::AppError;

#[derive(Debug, Clone)]
pub struct SignupOutcome {
    pub account: SignupResponse,
    /// `None` when the automatic login after signup failed; the account still exists.
    pub identity: Option<Identity>,
    pub login_error: Option<AppError>,
}

#[derive(Clone)]
pub struct Authenticate<B> {
    backend: B,
    session: SessionManager,
}

impl<B: AuthBackend> Authenticate<B> {
    pub fn new(backend: B, session: SessionManager) -> Self {
        Self { backend, session }
    }

    /// Stores the returned credential and merges the server's voted-idea list
    /// into the ledger. Switching to a different user starts from an empty ledger.
    pub async fn login(&self, username: &str, password: &str) -> Result<Identity, AppError> {
        let credentials = validate(username, password)?;
        let response = self.backend.login(&credentials).await?;

        let claims = decode_claims(&response.access_token)
            .map_err(|e| AppError::InvalidCredential(e.to_string()))?;

        let ledger = self.session.ledger();
        let previous = self.session.current_identity();
        if previous.is_some_and(|p| p.subject_id != claims.sub) {
            tracing::info!("Different user logging in, clearing voted ideas");
            ledger.clear();
        }

        ledger.reconcile(response.voted_polls);
        self.session.set_credential(&response.access_token)?;

        Ok(Identity::from(claims))
    }

    /// Creates the account and then logs in with the same credentials.
    pub async fn signup(&self, username: &str, password: &str) -> Result<SignupOutcome, AppError> {
        let credentials = validate(username, password)?;
        let account = self.backend.signup(&credentials).await?;
        tracing::info!("Created account {}", account.username);

        match self.login(&credentials.username, &credentials.password).await {
            Ok(identity) => Ok(SignupOutcome {
                account,
                identity: Some(identity),
                login_error: None,
            }),
            Err(e) => {
                tracing::warn!("Automatic login after signup failed: {}", e);
                Ok(SignupOutcome {
                    account,
                    identity: None,
                    login_error: Some(e),
                })
            }
        }
    }

    pub fn logout(&self) {
        self.session.clear_credential();
    }
}

fn validate(username: &str, password: &str) -> Result<Credentials, AppError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AppError::Validation("username is required".to_string()));
    }
    if password.is_empty() {
        return Err(AppError::Validation("password is required".to_string()));
    }
    Ok(Credentials::new(username, password))
}
