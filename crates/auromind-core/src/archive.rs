//! Past conversations for the history drawer.
//!
//! The archive is newest-first: archiving prepends. Searches and groupings keep
//! that relative order, and groups appear in the order their label is first seen.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core_types::{Message, Sender};
use crate::errors::StorageError;
use crate::session::KeyValueStore;
use crate::transcript::Transcript;

pub const PREVIEW_CHARS: usize = 50;
pub const TITLE_CHARS: usize = 20;
pub const RECENT_GROUPS: usize = 3;
pub const NEW_CONVERSATION_PREVIEW: &str = "New conversation";
pub const TODAY_LABEL: &str = "Today";
/// Storage key holding the archive as a JSON array.
pub const ARCHIVE_KEY: &str = "chatArchive";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub id: i64,
    pub date_label: String,
    pub preview: String,
    pub messages: Vec<Message>,
    #[serde(default)]
    pub favorite: bool,
}

impl Conversation {
    /// Snapshot of a transcript taken when the chat view closes.
    pub fn from_transcript(transcript: &Transcript, now: DateTime<Utc>) -> Self {
        let preview = match transcript.first_user_message() {
            Some(message) => format!("{}...", truncate_chars(&message.content, PREVIEW_CHARS)),
            None => NEW_CONVERSATION_PREVIEW.to_string(),
        };

        Self {
            id: now.timestamp_millis(),
            date_label: TODAY_LABEL.to_string(),
            preview,
            messages: transcript.messages().to_vec(),
            favorite: false,
        }
    }

    /// Card heading: the opening message, cut to twenty characters.
    pub fn title(&self) -> String {
        match self.messages.first() {
            Some(message) => format!("{}...", truncate_chars(&message.content, TITLE_CHARS)),
            None => "...".to_string(),
        }
    }

    pub fn started_at_label(&self) -> String {
        self.messages
            .first()
            .map(|m| m.timestamp.format("%-I:%M %p").to_string())
            .unwrap_or_default()
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    fn matches(&self, needle_lower: &str) -> bool {
        self.preview.to_lowercase().contains(needle_lower)
            || self.date_label.to_lowercase().contains(needle_lower)
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Conversations sharing one date label, in archive order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateGroup<'a> {
    pub label: String,
    pub conversations: Vec<&'a Conversation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryView {
    #[default]
    Recent,
    Favorites,
    All,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationArchive {
    conversations: Vec<Conversation>,
}

impl ConversationArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_conversations(conversations: Vec<Conversation>) -> Self {
        Self { conversations }
    }

    /// The three example conversations the drawer ships with, dated relative to `now`.
    pub fn with_samples(now: DateTime<Utc>) -> Self {
        let day = Duration::days(1);
        Self::from_conversations(vec![
            sample(
                1,
                "Yesterday",
                "I've been feeling anxious about my upcoming presentation...",
                now - day,
                &[
                    "Hello! How can I help you today?",
                    "I've been feeling anxious about my upcoming presentation at work.",
                    "I understand how that can be stressful. What specifically about the presentation makes you feel anxious?",
                    "I'm worried I'll forget what to say or that people will judge me harshly.",
                    "Those are common concerns. Have you considered practicing your presentation with a friend or recording yourself? This can help build confidence and identify areas to improve.",
                ],
            ),
            sample(
                2,
                "Last Week",
                "I had trouble sleeping last night and feel exhausted...",
                now - day * 7,
                &[
                    "Hello! How are you feeling today?",
                    "I had trouble sleeping last night and feel exhausted today.",
                    "I'm sorry to hear that. Disrupted sleep can definitely affect your mood and energy. Was there something specific keeping you awake?",
                    "I was thinking about work and couldn't shut my mind off.",
                    "That's common. Would you like to try some relaxation techniques that might help you sleep better tonight? I can also suggest some ways to manage work-related stress.",
                ],
            ),
            sample(
                3,
                "Last Month",
                "I've been feeling down lately and don't know why...",
                now - day * 30,
                &[
                    "Hello! How can I assist you today?",
                    "I've been feeling down lately and don't know why.",
                    "I'm sorry to hear you're feeling down. Sometimes our emotions can be complex. Have there been any changes in your life recently?",
                ],
            ),
        ])
    }

    /// Reads a previously saved archive. `None` when nothing was saved yet.
    pub fn load(store: &dyn KeyValueStore) -> Result<Option<Self>, StorageError> {
        match store.get(ARCHIVE_KEY)? {
            Some(raw) => Ok(Some(Self::from_conversations(serde_json::from_str(&raw)?))),
            None => Ok(None),
        }
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        store.set(ARCHIVE_KEY, &serde_json::to_string(&self.conversations)?)
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    /// Archives `transcript` unless it holds nothing beyond the greeting.
    pub fn archive(&mut self, transcript: &Transcript, now: DateTime<Utc>) -> Option<&Conversation> {
        if transcript.len() <= 1 {
            return None;
        }

        let mut conversation = Conversation::from_transcript(transcript, now);
        conversation.id = self.next_id(conversation.id);
        log::debug!(
            "Archiving conversation {} with {} messages",
            conversation.id,
            conversation.messages.len()
        );
        self.conversations.insert(0, conversation);
        self.conversations.first()
    }

    /// `candidate`, bumped past every id already in use.
    fn next_id(&self, candidate: i64) -> i64 {
        match self.conversations.iter().map(|c| c.id).max() {
            Some(max) if max >= candidate => max + 1,
            _ => candidate,
        }
    }

    /// Flips the favorite mark and returns the new value.
    pub fn toggle_favorite(&mut self, id: i64) -> Option<bool> {
        let conversation = self.conversations.iter_mut().find(|c| c.id == id)?;
        conversation.favorite = !conversation.favorite;
        Some(conversation.favorite)
    }

    pub fn search(&self, query: &str) -> Vec<&Conversation> {
        let needle = query.to_lowercase();
        self.conversations
            .iter()
            .filter(|c| c.matches(&needle))
            .collect()
    }

    /// Groups for one drawer tab, after applying the search box.
    pub fn view(&self, view: HistoryView, query: &str) -> Vec<DateGroup<'_>> {
        let mut matches = self.search(query);
        if view == HistoryView::Favorites {
            matches.retain(|c| c.favorite);
        }

        let mut groups = group_by_date_label(&matches);
        if view == HistoryView::Recent {
            groups.truncate(RECENT_GROUPS);
        }
        groups
    }
}

pub fn group_by_date_label<'a>(conversations: &[&'a Conversation]) -> Vec<DateGroup<'a>> {
    let mut groups: Vec<DateGroup<'a>> = Vec::new();
    for &conversation in conversations {
        match groups
            .iter_mut()
            .find(|g| g.label == conversation.date_label)
        {
            Some(group) => group.conversations.push(conversation),
            None => groups.push(DateGroup {
                label: conversation.date_label.clone(),
                conversations: vec![conversation],
            }),
        }
    }
    groups
}

fn sample(
    id: i64,
    date_label: &str,
    preview: &str,
    start: DateTime<Utc>,
    lines: &[&str],
) -> Conversation {
    let messages = lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let sender = if index % 2 == 0 {
                Sender::Assistant
            } else {
                Sender::User
            };
            Message::new(index as u64 + 1, sender, line).at(start + Duration::minutes(index as i64))
        })
        .collect();

    Conversation {
        id,
        date_label: date_label.to_string(),
        preview: preview.to_string(),
        messages,
        favorite: false,
    }
}
