mod auth_section;
mod error_display;
mod idea_card;
mod loading_spinner;
mod notice_bar;
mod vote_button;

pub use auth_section::AuthSection;
pub use error_display::ErrorDisplay;
pub use idea_card::IdeaCard;
pub use loading_spinner::LoadingSpinner;
pub use notice_bar::NoticeBar;
pub use vote_button::VoteButton;
