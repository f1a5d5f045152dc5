mod client;
mod types;

pub use client::ApiClient;

use crate::domain::{Credentials, Idea, IdeaReport, LoginResponse, Role, SignupResponse, User};
use ideaboard_errors::AppError;

// The use cases are generic over these so they run against scripted fakes in
// tests. Futures are not required to be `Send`; browser requests never are.

#[allow(async_fn_in_trait)]
pub trait AuthBackend {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AppError>;

    async fn signup(&self, credentials: &Credentials) -> Result<SignupResponse, AppError>;
}

#[allow(async_fn_in_trait)]
pub trait VoteBackend {
    /// Returns the idea with its updated vote count.
    async fn vote(&self, idea_id: &str) -> Result<Idea, AppError>;
}

#[allow(async_fn_in_trait)]
pub trait IdeaBackend {
    async fn list_ideas(&self) -> Result<Vec<Idea>, AppError>;

    async fn create_idea(&self, title: &str) -> Result<Idea, AppError>;

    async fn rename_idea(&self, idea_id: &str, new_title: &str) -> Result<Idea, AppError>;

    async fn delete_idea(&self, idea_id: &str) -> Result<(), AppError>;

    async fn idea_report(&self, idea_id: &str) -> Result<IdeaReport, AppError>;

    async fn my_voted_ideas(&self) -> Result<Vec<Idea>, AppError>;
}

#[allow(async_fn_in_trait)]
pub trait UserBackend {
    async fn list_users(&self) -> Result<Vec<User>, AppError>;

    /// Returns the server's confirmation message.
    async fn update_role(&self, user_id: &str, role: Role) -> Result<String, AppError>;
}
