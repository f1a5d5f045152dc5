mod auth;
mod claims;
mod idea;
mod user;
mod vote;

pub use auth::{Credentials, LoginResponse, SignupResponse};
pub use claims::{Claims, Identity};
pub use idea::{Idea, IdeaReport};
pub use user::{Role, User};
pub use vote::VoteStats;
