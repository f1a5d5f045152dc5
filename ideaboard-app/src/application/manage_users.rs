use crate::domain::{Role, User};
use crate::infrastructure::api::UserBackend;
use crate::infrastructure::session::SessionManager;
use ideaboard_errors::AppError;

/// Admin-only user management. The local role check only hides the call from
/// non-admins; the server enforces it again.
#[derive(Clone)]
pub struct ManageUsers<B> {
    backend: B,
    session: SessionManager,
}

impl<B: UserBackend> ManageUsers<B> {
    pub fn new(backend: B, session: SessionManager) -> Self {
        Self { backend, session }
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        self.require_admin()?;
        self.backend.list_users().await
    }

    pub async fn update_role(&self, user_id: &str, role: Role) -> Result<String, AppError> {
        self.require_admin()?;
        let message = self.backend.update_role(user_id, role).await?;
        tracing::info!("Set role of user {} to {}", user_id, role);
        Ok(message)
    }

    fn require_admin(&self) -> Result<(), AppError> {
        if !self.session.is_authenticated() {
            return Err(AppError::Unauthorized);
        }
        match self.session.current_identity() {
            Some(identity) if identity.is_admin() => Ok(()),
            _ => Err(AppError::Forbidden),
        }
    }
}
