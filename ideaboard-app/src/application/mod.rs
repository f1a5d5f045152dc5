mod authenticate;
mod manage_ideas;
mod manage_users;
mod notice;
mod vote_idea;

pub use authenticate::{Authenticate, SignupOutcome};
pub use manage_ideas::{search, top_voted, ManageIdeas, MAX_EDITED_TITLE, MAX_IDEA_TITLE};
pub use manage_users::ManageUsers;
pub use notice::{Notice, NoticeLevel};
pub use vote_idea::{VoteAttempt, VoteIdea, VoteOutcome, VotePhase};
