//! HTTP implementation of the AuroMind chat backend.
//!
//! Talks to the companion service's two endpoints:
//!
//! - `POST {base}/api/chat` with `{message, session_id}`, answered by `{response}`
//! - `GET {base}/api/chat/history/{session_id}`, answered by `{history: [{role, content}]}`

pub mod http_client;
pub mod types;

pub use http_client::HttpChatClient;
pub use types::{ChatReply, ChatRequest, HistoryReply};
