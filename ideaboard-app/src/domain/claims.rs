use super::Role;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Claims carried in the access token payload. Timestamps are Unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    pub exp: i64,
}

impl Claims {
    /// Valid only while `exp` is strictly later than `now`.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.exp > now.timestamp()
    }
}

/// Who the stored credential says the caller is. Decoded, never verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub subject_id: String,
    pub display_name: String,
    pub role: Role,
    pub issued_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Owners and admins may edit or delete an idea.
    pub fn can_modify(&self, creator_id: &str) -> bool {
        self.is_admin() || self.subject_id == creator_id
    }
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            subject_id: claims.sub,
            display_name: claims.username,
            role: claims.role,
            issued_at: claims.iat.and_then(|iat| Utc.timestamp_opt(iat, 0).single()),
            expires_at: Utc.timestamp_opt(claims.exp, 0).single(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: Role, exp: i64) -> Claims {
        Claims {
            sub: "7".into(),
            username: "ana".into(),
            role,
            iat: Some(1_700_000_000),
            exp,
        }
    }

    #[test]
    fn test_expiry_is_strict() {
        let now = Utc.timestamp_opt(1_700_000_100, 0).unwrap();
        assert!(claims(Role::User, 1_700_000_101).is_live_at(now));
        assert!(!claims(Role::User, 1_700_000_100).is_live_at(now));
        assert!(!claims(Role::User, 1_600_000_000).is_live_at(now));
    }

    #[test]
    fn test_can_modify() {
        let owner = Identity::from(claims(Role::User, 0));
        assert!(owner.can_modify("7"));
        assert!(!owner.can_modify("8"));

        let admin = Identity::from(claims(Role::Admin, 0));
        assert!(admin.can_modify("8"));
        assert_eq!(admin.display_name, "ana");
        assert_eq!(admin.expires_at.map(|t| t.timestamp()), Some(0));
    }

    #[test]
    fn test_issued_at_is_optional() {
        let parsed: Claims =
            serde_json::from_str(r#"{"sub":"7","username":"ana","role":"user","exp":4000000000}"#)
                .unwrap();
        assert_eq!(parsed.iat, None);

        let identity = Identity::from(parsed);
        assert!(identity.issued_at.is_none());
        assert!(identity.expires_at.is_some());
    }
}
