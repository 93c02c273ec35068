use auromind_client::{ChatRequest, HttpChatClient};
use auromind_core::chat_session::FALLBACK_REPLY;
use auromind_core::session::SESSION_ID_KEY;
use auromind_core::{
    ChatBackend, ChatError, ChatSession, HistoryLoad, KeyValueStore, MemoryKeyValueStore,
    SendOutcome, Sender, SessionContext,
};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
enum MockReply {
    Json(Value),
    Status(u16),
    Raw(&'static str),
    Slow(Duration),
}

impl IntoResponse for MockReply {
    fn into_response(self) -> Response {
        match self {
            MockReply::Json(value) => Json(value).into_response(),
            MockReply::Status(code) => StatusCode::from_u16(code)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
                .into_response(),
            MockReply::Raw(body) => (StatusCode::OK, body).into_response(),
            MockReply::Slow(_) => Json(json!({"response": "too late"})).into_response(),
        }
    }
}

#[derive(Clone, Default)]
struct MockState {
    chat_replies: Arc<Mutex<VecDeque<MockReply>>>,
    histories: Arc<Mutex<HashMap<String, MockReply>>>,
    chat_requests: Arc<Mutex<Vec<ChatRequest>>>,
    history_requests: Arc<Mutex<Vec<String>>>,
}

async fn chat_handler(State(state): State<MockState>, Json(payload): Json<ChatRequest>) -> Response {
    state.chat_requests.lock().unwrap().push(payload);
    let reply = state.chat_replies.lock().unwrap().pop_front();
    match reply {
        Some(MockReply::Slow(delay)) => {
            tokio::time::sleep(delay).await;
            MockReply::Slow(delay).into_response()
        }
        Some(reply) => reply.into_response(),
        None => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}

async fn history_handler(State(state): State<MockState>, Path(session_id): Path<String>) -> Response {
    state.history_requests.lock().unwrap().push(session_id.clone());
    let reply = state.histories.lock().unwrap().get(&session_id).cloned();
    reply
        .unwrap_or_else(|| MockReply::Json(json!({"history": []})))
        .into_response()
}

struct MockChatServer {
    addr: SocketAddr,
    state: MockState,
    shutdown_tx: tokio::sync::oneshot::Sender<()>,
}

impl MockChatServer {
    async fn start(chat_replies: Vec<MockReply>) -> Self {
        let state = MockState::default();
        *state.chat_replies.lock().unwrap() = VecDeque::from(chat_replies);

        let app = Router::new()
            .route("/api/chat", post(chat_handler))
            .route("/api/chat/history/{session_id}", get(history_handler))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .ok();
        });

        Self {
            addr,
            state,
            shutdown_tx,
        }
    }

    fn with_history(self, session_id: &str, reply: MockReply) -> Self {
        self.state
            .histories
            .lock()
            .unwrap()
            .insert(session_id.to_string(), reply);
        self
    }

    fn address(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn chat_requests(&self) -> Vec<ChatRequest> {
        self.state.chat_requests.lock().unwrap().clone()
    }

    fn history_requests(&self) -> Vec<String> {
        self.state.history_requests.lock().unwrap().clone()
    }

    fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
    }
}

fn session_with(id: Option<&str>) -> SessionContext {
    let store = MemoryKeyValueStore::new();
    if let Some(id) = id {
        store.set(SESSION_ID_KEY, id).unwrap();
    }
    SessionContext::new(Box::new(store))
}

#[tokio::test]
async fn test_send_message_posts_message_and_session() {
    let server = MockChatServer::start(vec![MockReply::Json(json!({"response": "I'm here for you."}))]).await;
    let client = HttpChatClient::new(server.address());

    let reply = client.send_message("I feel anxious", "session-1-abc").await.unwrap();
    assert_eq!(reply, "I'm here for you.");

    let requests = server.chat_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].message, "I feel anxious");
    assert_eq!(requests[0].session_id, "session-1-abc");
    server.shutdown();
}

#[tokio::test]
async fn test_send_message_error_mapping() {
    let server = MockChatServer::start(vec![
        MockReply::Status(500),
        MockReply::Status(400),
        MockReply::Json(json!({"reply": "wrong field"})),
        MockReply::Raw("not json"),
    ])
    .await;
    let client = HttpChatClient::new(server.address());

    assert_eq!(
        client.send_message("a", "s").await,
        Err(ChatError::Remote { status: 500 })
    );
    assert_eq!(
        client.send_message("b", "s").await,
        Err(ChatError::Remote { status: 400 })
    );
    assert!(matches!(
        client.send_message("c", "s").await,
        Err(ChatError::MalformedResponse(_))
    ));
    assert!(matches!(
        client.send_message("d", "s").await,
        Err(ChatError::MalformedResponse(_))
    ));
    server.shutdown();
}

#[tokio::test]
async fn test_unreachable_server_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpChatClient::new(format!("http://{}", addr));
    assert!(matches!(
        client.send_message("hello", "s").await,
        Err(ChatError::Network(_))
    ));
    assert!(matches!(
        client.fetch_history("s").await,
        Err(ChatError::Network(_))
    ));
}

#[tokio::test]
async fn test_timeout_is_a_network_error() {
    let server = MockChatServer::start(vec![MockReply::Slow(Duration::from_secs(2))]).await;
    let client = HttpChatClient::new(server.address()).with_timeout(Duration::from_millis(100));

    assert!(matches!(
        client.send_message("hello", "s").await,
        Err(ChatError::Network(_))
    ));
    server.shutdown();
}

#[tokio::test]
async fn test_fetch_history() {
    let server = MockChatServer::start(Vec::new())
        .await
        .with_history(
            "session-9-xyz",
            MockReply::Json(json!({"history": [
                {"role": "user", "content": "Hi"},
                {"role": "assistant", "content": "Hello there"}
            ]})),
        )
        .with_history("no-field", MockReply::Json(json!({"other": 1})))
        .with_history("broken", MockReply::Status(404));
    let client = HttpChatClient::new(server.address());

    let history = client.fetch_history("session-9-xyz").await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].sender(), Sender::User);
    assert_eq!(history[1].content, "Hello there");

    assert!(client.fetch_history("no-field").await.unwrap().is_empty());
    assert_eq!(
        client.fetch_history("broken").await,
        Err(ChatError::Remote { status: 404 })
    );
    server.shutdown();
}

#[tokio::test]
async fn test_session_id_is_encoded_in_path() {
    let server = MockChatServer::start(Vec::new()).await;
    let client = HttpChatClient::new(server.address());

    client.fetch_history("my session").await.unwrap();
    assert_eq!(server.history_requests(), vec!["my session".to_string()]);
    server.shutdown();
}

#[tokio::test]
async fn test_chat_session_over_http() {
    let server = MockChatServer::start(vec![
        MockReply::Json(json!({"response": "Tell me more."})),
        MockReply::Status(500),
    ])
    .await;
    let chat = ChatSession::new(Box::new(HttpChatClient::new(server.address())), session_with(None));

    let first = chat.send("I had a long day").await;
    assert!(matches!(first, SendOutcome::Replied(ref m) if m.content == "Tell me more."));

    let second = chat.send("Still there?").await;
    match second {
        SendOutcome::Fallback { error, message } => {
            assert_eq!(error, ChatError::Remote { status: 500 });
            assert_eq!(message.content, FALLBACK_REPLY);
        }
        other => panic!("expected fallback, got {:?}", other),
    }

    let requests = server.chat_requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].session_id, requests[1].session_id);
    assert!(requests[0].session_id.starts_with("session-"));
    assert_eq!(chat.transcript_len().await, 5);
    assert!(!chat.is_composing());
    server.shutdown();
}

#[tokio::test]
async fn test_chat_session_restores_history_over_http() {
    let server = MockChatServer::start(Vec::new()).await.with_history(
        "session-42-abcdefg",
        MockReply::Json(json!({"history": [
            {"role": "user", "content": "I can't sleep"},
            {"role": "assistant", "content": "Let's try a breathing exercise."}
        ]})),
    );
    let chat = ChatSession::new(
        Box::new(HttpChatClient::new(server.address())),
        session_with(Some("session-42-abcdefg")),
    );

    assert_eq!(chat.load_history().await, HistoryLoad::Restored(2));
    let messages = chat.messages().await;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].sender, Sender::User);
    assert_eq!(messages[1].content, "Let's try a breathing exercise.");
    server.shutdown();
}
