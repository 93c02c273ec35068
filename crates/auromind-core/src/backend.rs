use async_trait::async_trait;

use crate::core_types::HistoryEntry;
use crate::errors::ChatError;

/// The remote service that writes the assistant's replies.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Sends one user message and returns the assistant's reply text.
    async fn send_message(&self, message: &str, session_id: &str) -> Result<String, ChatError>;

    /// Fetches the server-side turns recorded for `session_id`.
    async fn fetch_history(&self, session_id: &str) -> Result<Vec<HistoryEntry>, ChatError>;
}

pub type ChatBackendBox = Box<dyn ChatBackend>;
