use async_trait::async_trait;
use auromind_core::{ChatBackend, ChatError, HistoryEntry};
use std::time::Duration;

use crate::types::{ChatReply, ChatRequest, HistoryReply};

/// HTTP client for the companion service
pub struct HttpChatClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl HttpChatClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn apply_timeout(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        }
    }

    fn checked(response: reqwest::Response) -> Result<reqwest::Response, ChatError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Remote {
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

fn network_error(e: reqwest::Error) -> ChatError {
    ChatError::Network(e.to_string())
}

#[async_trait]
impl ChatBackend for HttpChatClient {
    async fn send_message(&self, message: &str, session_id: &str) -> Result<String, ChatError> {
        let url = format!("{}/api/chat", self.base_url);
        let payload = ChatRequest {
            message: message.to_string(),
            session_id: session_id.to_string(),
        };

        let response = self
            .apply_timeout(self.client.post(&url).json(&payload))
            .send()
            .await
            .map_err(network_error)?;
        let response = Self::checked(response)?;

        let body = response.text().await.map_err(network_error)?;
        let reply: ChatReply = serde_json::from_str(&body)
            .map_err(|e| ChatError::MalformedResponse(e.to_string()))?;

        reply
            .response
            .ok_or_else(|| ChatError::MalformedResponse("missing 'response' field".to_string()))
    }

    async fn fetch_history(&self, session_id: &str) -> Result<Vec<HistoryEntry>, ChatError> {
        let url = format!(
            "{}/api/chat/history/{}",
            self.base_url,
            urlencoding::encode(session_id)
        );

        let response = self
            .apply_timeout(self.client.get(&url))
            .send()
            .await
            .map_err(network_error)?;
        let response = Self::checked(response)?;

        let body = response.text().await.map_err(network_error)?;
        let reply: HistoryReply = serde_json::from_str(&body)
            .map_err(|e| ChatError::MalformedResponse(e.to_string()))?;
        log::debug!("Fetched {} history entries for {}", reply.history.len(), session_id);
        Ok(reply.history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_dropped() {
        let client = HttpChatClient::new("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
    }
}
