//! Core library for the AuroMind mental wellness companion.
//!
//! Holds the state behind the chat screen and the relaxation tools, free of any
//! rendering concerns:
//!
//! - **Chat**: the live transcript, the exchange with the remote companion
//!   service, and the per-install session identifier
//! - **Archive**: past conversations grouped by date label, searchable and
//!   filterable by favorites
//! - **Relaxation tools**: the meditation countdown and the 12-tick breathing
//!   cycle, both driven by a one-second ticker
//! - **Period care**: daily log, cycle calendar, reminder settings and the
//!   self-care content tables
//!
//! The HTTP implementation of [`ChatBackend`] lives in `auromind-client`.

pub mod archive;
pub mod backend;
pub mod breathing;
pub mod chat_session;
pub mod config;
pub mod core_types;
pub mod errors;
pub mod period_care;
pub mod pickers;
pub mod session;
pub mod ticker;
pub mod timer;
pub mod transcript;

pub use archive::{Conversation, ConversationArchive, DateGroup, HistoryView};
pub use backend::{ChatBackend, ChatBackendBox};
pub use breathing::{BreathPhase, BreathingExercise, BreathingState};
pub use chat_session::{ChatSession, HistoryLoad, SendOutcome};
pub use config::{AuroMindConfig, ConfigLoader};
pub use core_types::{HistoryEntry, Message, Sender};
pub use errors::{ChatError, ConfigError, StorageError, TimerError};
pub use session::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, SessionContext};
pub use timer::{CountdownTimer, MeditationTimer, TimerStatus};
pub use transcript::Transcript;
