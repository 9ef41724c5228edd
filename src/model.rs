//! Data exchanged with the messaging backend and between client and server.

use serde::{Deserialize, Serialize};

/// An account as listed by `GET /api/users`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub jid: String,
    /// Credential digest, only present on some backend responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

/// Body of `POST /api/createuser`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct NewUser {
    pub jid: String,
    pub pwd: String,
}

/// One contact of a user's roster
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub item: String,
}

/// Payload of a `log` event on the push channel
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LogMessage {
    pub message: String,
}

/// Where the browser should open the push channel
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PushEndpoint {
    pub url: String,
    pub namespace: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_without_hash() {
        let user: User = serde_json::from_str(r#"{"id": 4, "jid": "demo@localhost"}"#).unwrap();
        assert_eq!(user.id, 4);
        assert_eq!(user.jid, "demo@localhost");
        assert_eq!(user.hash, None);
        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            serde_json::json!({"id": 4, "jid": "demo@localhost"})
        );
    }

    #[test]
    fn test_new_user_body() {
        let body = NewUser {
            jid: "demo".to_string(),
            pwd: "secret".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"jid":"demo","pwd":"secret"}"#
        );
    }

    #[test]
    fn test_roster_list() {
        let roster: Vec<RosterEntry> =
            serde_json::from_str(r#"[{"item": "alice@localhost"}, {"item": "bob@localhost"}]"#)
                .unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[1].item, "bob@localhost");
    }
}
