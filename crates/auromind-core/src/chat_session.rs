//! The active chat: transcript, archive and the exchange with the backend.
//!
//! Sends are serialized. A send holds the turn gate from the moment the user
//! message is appended until the reply (or fallback) is appended, so turns never
//! interleave and replies land in request order.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use tokio::sync::Mutex;

use crate::archive::{Conversation, ConversationArchive};
use crate::backend::ChatBackendBox;
use crate::core_types::Message;
use crate::errors::ChatError;
use crate::session::SessionContext;
use crate::transcript::Transcript;

pub const FALLBACK_REPLY: &str =
    "I'm sorry, I couldn't process your request right now. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input; nothing was appended or sent.
    Ignored,
    Replied(Message),
    Fallback { error: ChatError, message: Message },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryLoad {
    NoSession,
    Empty,
    Restored(usize),
    Failed(ChatError),
}

/// Raises the composing flag for as long as it lives.
struct ComposingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> ComposingGuard<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self { flag }
    }
}

impl Drop for ComposingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

pub struct ChatSession {
    backend: ChatBackendBox,
    session: SessionContext,
    transcript: Mutex<Transcript>,
    archive: Mutex<ConversationArchive>,
    composing: AtomicBool,
    turn_gate: Mutex<()>,
}

impl ChatSession {
    pub fn new(backend: ChatBackendBox, session: SessionContext) -> Self {
        Self {
            backend,
            session,
            transcript: Mutex::new(Transcript::with_greeting()),
            archive: Mutex::new(ConversationArchive::new()),
            composing: AtomicBool::new(false),
            turn_gate: Mutex::new(()),
        }
    }

    pub fn with_archive(mut self, archive: ConversationArchive) -> Self {
        self.archive = Mutex::new(archive);
        self
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// True while a request to the backend is in flight.
    pub fn is_composing(&self) -> bool {
        self.composing.load(Ordering::SeqCst)
    }

    pub async fn messages(&self) -> Vec<Message> {
        self.transcript.lock().await.messages().to_vec()
    }

    pub async fn transcript_len(&self) -> usize {
        self.transcript.lock().await.len()
    }

    /// Appends the user's text, asks the backend for a reply and appends it.
    /// Any backend failure is answered with [`FALLBACK_REPLY`].
    pub async fn send(&self, text: &str) -> SendOutcome {
        if text.trim().is_empty() {
            return SendOutcome::Ignored;
        }

        let _turn = self.turn_gate.lock().await;
        self.transcript.lock().await.append_user_message(text);

        let _composing = ComposingGuard::raise(&self.composing);
        let session_id = self.session.get_or_create();
        log::debug!("Sending message for session {}", session_id);

        match self.backend.send_message(text, &session_id).await {
            Ok(reply) => {
                let mut transcript = self.transcript.lock().await;
                SendOutcome::Replied(transcript.append_assistant_message(&reply).clone())
            }
            Err(error) => {
                log::error!("Error sending message: {}", error);
                let mut transcript = self.transcript.lock().await;
                let message = transcript.append_assistant_message(FALLBACK_REPLY).clone();
                SendOutcome::Fallback { error, message }
            }
        }
    }

    /// Replaces the transcript with the server-side history for the stored session.
    /// Failures are logged and leave the transcript untouched.
    pub async fn load_history(&self) -> HistoryLoad {
        let Some(session_id) = self.session.current() else {
            return HistoryLoad::NoSession;
        };

        match self.backend.fetch_history(&session_id).await {
            Ok(history) if history.is_empty() => HistoryLoad::Empty,
            Ok(history) => {
                self.transcript.lock().await.replace_from_history(&history);
                log::info!("Restored {} messages for session {}", history.len(), session_id);
                HistoryLoad::Restored(history.len())
            }
            Err(error) => {
                log::error!("Error loading chat history: {}", error);
                HistoryLoad::Failed(error)
            }
        }
    }

    /// Moves a copy of the active transcript to the front of the archive when
    /// it holds a real exchange. Called when the chat view goes away.
    pub async fn archive_active(&self) -> Option<Conversation> {
        let transcript = self.transcript.lock().await;
        let mut archive = self.archive.lock().await;
        let archived = archive.archive(&transcript, Utc::now()).cloned()?;
        self.persist_archive(&archive);
        Some(archived)
    }

    /// Archives the active transcript and starts over from the greeting.
    pub async fn start_new_conversation(&self) -> Option<Conversation> {
        let _turn = self.turn_gate.lock().await;
        let archived = self.archive_active().await;
        *self.transcript.lock().await = Transcript::with_greeting();
        archived
    }

    /// Loads an archived conversation into the active slot. Whatever was active
    /// before is dropped without being archived.
    pub async fn select_conversation(&self, id: i64) -> bool {
        let _turn = self.turn_gate.lock().await;
        let messages = match self.archive.lock().await.get(id) {
            Some(conversation) => conversation.messages.clone(),
            None => return false,
        };
        self.transcript.lock().await.replace(messages);
        true
    }

    pub async fn toggle_favorite(&self, id: i64) -> Option<bool> {
        let mut archive = self.archive.lock().await;
        let favorite = archive.toggle_favorite(id)?;
        self.persist_archive(&archive);
        Some(favorite)
    }

    // The in-memory archive stays authoritative when the write fails.
    fn persist_archive(&self, archive: &ConversationArchive) {
        if let Err(e) = archive.save(self.session.store()) {
            log::warn!("Failed to save conversation archive: {}", e);
        }
    }

    /// Runs `f` against the archive while it is locked.
    pub async fn with_archive_ref<R>(&self, f: impl FnOnce(&ConversationArchive) -> R) -> R {
        let archive = self.archive.lock().await;
        f(&archive)
    }
}
