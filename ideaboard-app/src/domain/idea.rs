use super::User;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: String,
    pub title: String,
    pub votes: i32,
    pub creator: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Idea {
    pub fn new(id: impl Into<String>, title: impl Into<String>, votes: i32, creator: User) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            votes,
            creator,
            created_at: None,
            updated_at: None,
        }
    }

    /// Case-insensitive match on the title or the creator's username.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term)
            || self.creator.username.to_lowercase().contains(&term)
    }
}

/// Per-idea vote report (`GET /ideas/{id}/report`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaReport {
    pub id: String,
    pub title: String,
    pub creator: String,
    pub votes_count: i32,
    pub voters: Vec<String>,
}
