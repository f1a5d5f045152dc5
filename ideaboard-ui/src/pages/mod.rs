mod admin_users;
mod home;
mod idea_report;
mod my_votes;

pub use admin_users::AdminUsersPage;
pub use home::HomePage;
pub use idea_report::IdeaReportPage;
pub use my_votes::MyVotesPage;
