//! Response types returned by the API.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::auth::AccessToken;

/// The account record as the API reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub is_active: bool,
    /// Raw timestamp as sent by the server.
    pub date_joined: String,
}

impl User {
    /// Parse `date_joined` as RFC 3339, or as a bare `YYYY-MM-DD` date at
    /// midnight UTC. Returns `None` for anything else.
    pub fn joined_at(&self) -> Option<DateTime<FixedOffset>> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(&self.date_joined) {
            return Some(ts);
        }
        let date = NaiveDate::parse_from_str(&self.date_joined, "%Y-%m-%d").ok()?;
        Some(date.and_hms_opt(0, 0, 0)?.and_utc().fixed_offset())
    }
}

/// Result of a successful register, login, or magic-link verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: AccessToken,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Plain acknowledgement body, e.g. `{"message": "Magic link sent"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    fn user(date_joined: &str) -> User {
        User {
            id: 1,
            email: "a@b.com".to_string(),
            first_name: None,
            last_name: None,
            is_active: true,
            date_joined: date_joined.to_string(),
        }
    }

    #[test]
    fn joined_at_parses_rfc3339() {
        let ts = user("2024-03-05T10:20:30.123456+00:00").joined_at().unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2024, 3, 5));
        assert_eq!(ts.hour(), 10);
    }

    #[test]
    fn joined_at_parses_bare_date() {
        let ts = user("2024-01-01").joined_at().unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2024, 1, 1));
    }

    #[test]
    fn joined_at_rejects_garbage() {
        assert!(user("last tuesday").joined_at().is_none());
    }

    #[test]
    fn auth_response_defaults_token_type() {
        let response: AuthResponse = serde_json::from_value(json!({
            "access_token": "T1",
            "user": {"id": 1, "email": "a@b.com", "is_active": true, "date_joined": "2024-01-01"}
        }))
        .unwrap();
        assert_eq!(response.token_type, "bearer");
        assert_eq!(response.access_token.as_str(), "T1");
        assert!(response.user.first_name.is_none());
    }
}
