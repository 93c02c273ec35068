use auromind_core::HistoryEntry;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
}

/// Body returned by `POST /api/chat`. A missing `response` is a malformed reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub response: Option<String>,
}

/// Body returned by `GET /api/chat/history/{session_id}`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HistoryReply {
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}
