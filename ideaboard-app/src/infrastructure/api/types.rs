use crate::domain::Role;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct NewIdeaRequest<'a> {
    pub title: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RenameIdeaRequest<'a> {
    #[serde(rename = "newTitle")]
    pub new_title: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RoleUpdateRequest {
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Error body. Validation failures send `message` as a list of strings.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn text(&self) -> Option<String> {
        match self.message.as_ref()? {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Array(items) => {
                let parts: Vec<&str> = items.iter().filter_map(|v| v.as_str()).collect();
                (!parts.is_empty()).then(|| parts.join("; "))
            }
            _ => None,
        }
    }
}
