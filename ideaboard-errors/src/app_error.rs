use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum AppError {
    #[error("Session missing or expired")]
    Unauthorized,

    #[error("Wrong username or password")]
    InvalidLogin,

    #[error("Permission denied")]
    Forbidden,

    #[error("Resource not found")]
    NotFound,

    #[error("Already voted for this idea")]
    AlreadyVoted,

    #[error("Username already taken")]
    UserExists,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Too many requests")]
    RateLimited,

    #[error("Server error: {0}")]
    Server(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// What the failed request was doing. A 409 only means "already voted" on the
/// vote endpoint; elsewhere it is a plain conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorContext {
    Login,
    Vote,
    Signup,
    Other,
}

/// Coarse classification used by callers to decide how to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Authentication,
    Conflict,
    Permission,
    NotFound,
    Invalid,
    Transient,
}

impl AppError {
    /// Maps a non-success HTTP status to an error, keeping the server's message when it has one.
    pub fn from_status(status: u16, message: Option<String>, context: ErrorContext) -> Self {
        match status {
            401 if context == ErrorContext::Login => Self::InvalidLogin,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 if context == ErrorContext::Vote => Self::AlreadyVoted,
            409 if context == ErrorContext::Signup => Self::UserExists,
            409 => Self::Conflict(message.unwrap_or_else(|| "Resource already exists".to_string())),
            422 => Self::Validation(message.unwrap_or_else(|| "Invalid data".to_string())),
            429 => Self::RateLimited,
            500 => {
                let text = message.unwrap_or_default();
                if mentions_duplicate(&text) && context == ErrorContext::Signup {
                    Self::UserExists
                } else if mentions_duplicate(&text) {
                    Self::Conflict(text)
                } else if text.is_empty() {
                    Self::Server("HTTP 500".to_string())
                } else {
                    Self::Server(text)
                }
            }
            _ => Self::Server(message.unwrap_or_else(|| format!("HTTP {}", status))),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized | Self::InvalidLogin | Self::InvalidCredential(_) => {
                ErrorKind::Authentication
            }
            Self::AlreadyVoted | Self::UserExists | Self::Conflict(_) => ErrorKind::Conflict,
            Self::Forbidden => ErrorKind::Permission,
            Self::NotFound => ErrorKind::NotFound,
            Self::Validation(_) => ErrorKind::Invalid,
            Self::RateLimited
            | Self::Server(_)
            | Self::Network(_)
            | Self::Timeout
            | Self::Storage(_)
            | Self::Internal(_) => ErrorKind::Transient,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Transient
    }

    pub fn user_message(&self) -> &str {
        match self {
            Self::Unauthorized => "Your session has expired. Please log in again.",
            Self::InvalidLogin => "Wrong username or password.",
            Self::Forbidden => "You don't have permission to do that.",
            Self::NotFound => "That item no longer exists.",
            Self::AlreadyVoted => "You have already voted for this idea.",
            Self::UserExists => "This user already exists. Log in or pick another username.",
            Self::Conflict(_) => "That change conflicts with the current data. Refresh and try again.",
            Self::Validation(_) => "Some of the data is invalid. Check it and try again.",
            Self::RateLimited => "Too many attempts. Try again in a few minutes.",
            Self::Server(_) => "The server had a problem. Try again later.",
            Self::Network(_) => "Connection error. Check your internet and that the backend is running.",
            Self::Timeout => "The request took too long. Try again.",
            Self::Storage(_) => "Could not save data in this browser.",
            Self::InvalidCredential(_) => "Your login could not be read. Please log in again.",
            Self::Internal(_) => "Something unexpected happened. Try again.",
        }
    }
}

fn mentions_duplicate(message: &str) -> bool {
    let lower = message.to_lowercase();
    ["already exists", "duplicate", "conflict"]
        .iter()
        .any(|needle| lower.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_depends_on_context() {
        assert_eq!(
            AppError::from_status(409, None, ErrorContext::Vote),
            AppError::AlreadyVoted
        );
        assert_eq!(
            AppError::from_status(409, Some("taken".into()), ErrorContext::Signup),
            AppError::UserExists
        );
        assert!(matches!(
            AppError::from_status(409, Some("title taken".into()), ErrorContext::Other),
            AppError::Conflict(msg) if msg == "title taken"
        ));
    }

    #[test]
    fn test_only_signup_conflicts_mention_users() {
        let signup = AppError::from_status(409, None, ErrorContext::Signup);
        assert!(signup.user_message().contains("user already exists"));

        let idea = AppError::from_status(409, None, ErrorContext::Other);
        assert!(!idea.user_message().contains("user"));

        let duplicate = AppError::from_status(500, Some("duplicate key".into()), ErrorContext::Other);
        assert_eq!(duplicate, AppError::Conflict("duplicate key".into()));
        assert!(!duplicate.user_message().contains("user"));
    }

    #[test]
    fn test_server_error_with_duplicate_message() {
        let err = AppError::from_status(
            500,
            Some("User Already Exists".into()),
            ErrorContext::Signup,
        );
        assert_eq!(err, AppError::UserExists);
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let err = AppError::from_status(500, None, ErrorContext::Other);
        assert_eq!(err, AppError::Server("HTTP 500".into()));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::from_status(401, None, ErrorContext::Other), AppError::Unauthorized);
        assert_eq!(AppError::from_status(401, None, ErrorContext::Login), AppError::InvalidLogin);
        assert_eq!(AppError::from_status(403, None, ErrorContext::Other), AppError::Forbidden);
        assert_eq!(AppError::from_status(404, None, ErrorContext::Vote), AppError::NotFound);
        assert_eq!(AppError::from_status(429, None, ErrorContext::Other), AppError::RateLimited);
        assert_eq!(
            AppError::from_status(418, None, ErrorContext::Other),
            AppError::Server("HTTP 418".into())
        );
    }

    #[test]
    fn test_kinds() {
        assert!(!AppError::Forbidden.is_retryable());
        assert!(!AppError::AlreadyVoted.is_retryable());
        assert_eq!(AppError::NotFound.kind(), ErrorKind::NotFound);
        assert_eq!(AppError::Timeout.kind(), ErrorKind::Transient);
        assert_eq!(AppError::InvalidCredential("x".into()).kind(), ErrorKind::Authentication);
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&AppError::Validation("title".into())).unwrap();
        let back: AppError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AppError::Validation("title".into()));
    }
}
