use ideaboard_errors::{AppError, ErrorKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A message for the notification area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl From<&AppError> for Notice {
    fn from(error: &AppError) -> Self {
        let message = error.user_message();
        match error.kind() {
            ErrorKind::Conflict if *error == AppError::AlreadyVoted => Self::info(message),
            _ => Self::error(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_voted_is_informational() {
        assert_eq!(Notice::from(&AppError::AlreadyVoted).level, NoticeLevel::Info);
        assert_eq!(Notice::from(&AppError::Forbidden).level, NoticeLevel::Error);
        assert_eq!(
            Notice::from(&AppError::Timeout).message,
            AppError::Timeout.user_message()
        );
    }
}
