mod events;
mod token;

pub use events::{AuthEvent, AuthEvents, LogoutReason, SubscriptionId};
pub use token::{decode_claims, TokenError};

use super::ledger::VoteLedger;
use super::storage::{KeyValueStore, CREDENTIAL_KEY};
use crate::domain::{Claims, Identity};
use chrono::{DateTime, Utc};
use ideaboard_errors::AppError;
use std::sync::Arc;

/// Owns the bearer credential and answers "who is calling" without a network call.
///
/// Claims are decoded, not verified: this is a display and gating convenience,
/// never a trust boundary. A missing, malformed or expired token reads as
/// logged out; decode failures never reach the caller.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
    ledger: VoteLedger,
    events: AuthEvents,
}

impl SessionManager {
    pub fn new(store: Arc<dyn KeyValueStore>, ledger: VoteLedger) -> Self {
        Self {
            store,
            ledger,
            events: AuthEvents::default(),
        }
    }

    /// Replaces any stored credential. The token is not validated here.
    pub fn set_credential(&self, token: &str) -> Result<(), AppError> {
        self.store.set(CREDENTIAL_KEY, token)?;

        match self.decode() {
            Some(claims) => {
                let identity = Identity::from(claims);
                tracing::info!("Logged in as {}", identity.display_name);
                self.events.emit(&AuthEvent::LoggedIn(identity));
            }
            None => tracing::warn!("Stored a credential whose claims cannot be read"),
        }

        Ok(())
    }

    pub fn credential(&self) -> Option<String> {
        self.store.get(CREDENTIAL_KEY).filter(|t| !t.is_empty())
    }

    /// Logout: drops the credential and the vote ledger together.
    pub fn clear_credential(&self) {
        self.end(LogoutReason::SignedOut);
    }

    /// Called when the server rejects the credential.
    pub fn expire(&self) {
        self.end(LogoutReason::SessionExpired);
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(Utc::now())
    }

    pub fn is_authenticated_at(&self, now: DateTime<Utc>) -> bool {
        self.decode().is_some_and(|claims| claims.is_live_at(now))
    }

    /// Decoded identity, expired or not. Gate actions on [`Self::is_authenticated`].
    pub fn current_identity(&self) -> Option<Identity> {
        self.decode().map(Identity::from)
    }

    pub fn authorization_header(&self) -> Option<String> {
        self.credential().map(|token| format!("Bearer {}", token))
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&AuthEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    pub fn ledger(&self) -> &VoteLedger {
        &self.ledger
    }

    fn decode(&self) -> Option<Claims> {
        let token = self.credential()?;
        match decode_claims(&token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::debug!("Ignoring unreadable credential: {}", e);
                None
            }
        }
    }

    fn end(&self, reason: LogoutReason) {
        let had_credential = self.credential().is_some();

        self.store.remove(CREDENTIAL_KEY);
        self.ledger.clear();

        if had_credential {
            tracing::info!("Session ended: {:?}", reason);
            self.events.emit(&AuthEvent::LoggedOut { reason });
        }
    }
}
