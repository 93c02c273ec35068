//! Message types shared by the transcript, the archive and the backend contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: u64,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(id: u64, sender: Sender, content: &str) -> Self {
        Self {
            id,
            content: content.to_string(),
            sender,
            timestamp: Utc::now(),
        }
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

/// One turn as stored by the backend's history endpoint.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    #[serde(default)]
    pub role: String,
    pub content: String,
}

impl HistoryEntry {
    pub fn sender(&self) -> Sender {
        if self.role == "user" {
            Sender::User
        } else {
            Sender::Assistant
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_role_mapping() {
        let entry = |role: &str| HistoryEntry {
            role: role.to_string(),
            content: "hi".to_string(),
        };

        assert_eq!(entry("user").sender(), Sender::User);
        assert_eq!(entry("assistant").sender(), Sender::Assistant);
        assert_eq!(entry("system").sender(), Sender::Assistant);
        assert_eq!(entry("User").sender(), Sender::Assistant);
    }

    #[test]
    fn test_history_entry_without_role_is_assistant() {
        let entry: HistoryEntry = serde_json::from_str(r#"{"content":"Welcome back"}"#).unwrap();
        assert_eq!(entry.role, "");
        assert_eq!(entry.sender(), Sender::Assistant);
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        let json = serde_json::to_string(&Sender::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }
}
