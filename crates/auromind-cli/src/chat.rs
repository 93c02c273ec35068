use anyhow::Result;
use auromind_core::archive::{Conversation, DateGroup, HistoryView};
use auromind_core::{pickers, ChatSession, HistoryLoad, Message, SendOutcome, Sender};
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Commands:
  /history [query]  recent conversations, or search all of them
  /all              every archived conversation
  /favorites        starred conversations
  /open <id>        continue an archived conversation
  /star <id>        star or unstar a conversation
  /new              archive this chat and start over
  /affirmation      a random affirmation
  /joke             a random joke
  /help             this list
  /quit             archive this chat and exit
  //text            send a message that starts with a slash";

#[derive(Debug, Clone, PartialEq, Eq)]
enum ChatCommand {
    Say(String),
    History(Option<String>),
    All,
    Favorites,
    Open(i64),
    Star(i64),
    New,
    Affirmation,
    Joke,
    Help,
    Quit,
    Invalid(String),
}

impl ChatCommand {
    fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return ChatCommand::Say(line.to_string());
        };
        // "//text" sends "/text"; a bare or spaced slash is ordinary text.
        if rest.starts_with('/') {
            return ChatCommand::Say(rest.to_string());
        }
        if rest.is_empty() || rest.starts_with(char::is_whitespace) {
            return ChatCommand::Say(line.to_string());
        }

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match name {
            "history" if arg.is_empty() => ChatCommand::History(None),
            "history" => ChatCommand::History(Some(arg.to_string())),
            "all" => ChatCommand::All,
            "favorites" => ChatCommand::Favorites,
            "open" => Self::with_id(arg, ChatCommand::Open),
            "star" => Self::with_id(arg, ChatCommand::Star),
            "new" => ChatCommand::New,
            "affirmation" => ChatCommand::Affirmation,
            "joke" => ChatCommand::Joke,
            "help" => ChatCommand::Help,
            "quit" | "exit" => ChatCommand::Quit,
            other => ChatCommand::Invalid(format!(
                "Unknown command /{}. Start a message with // to send it as text.",
                other
            )),
        }
    }

    fn with_id(arg: &str, build: fn(i64) -> ChatCommand) -> Self {
        match arg.parse::<i64>() {
            Ok(id) => build(id),
            Err(_) => ChatCommand::Invalid(format!("Expected a conversation id, got '{}'", arg)),
        }
    }
}

pub async fn run(chat: ChatSession) -> Result<()> {
    match chat.load_history().await {
        HistoryLoad::Restored(count) => println!("(restored {} messages from your last session)", count),
        HistoryLoad::Failed(e) => println!("(could not load your previous messages: {})", e),
        HistoryLoad::NoSession | HistoryLoad::Empty => {}
    }
    print_transcript(&chat.messages().await);
    println!("Type /help for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match ChatCommand::parse(&line) {
            ChatCommand::Say(text) => {
                if text.trim().is_empty() {
                    continue;
                }
                println!("AuroMind is typing...");
                match chat.send(&text).await {
                    SendOutcome::Ignored => {}
                    SendOutcome::Replied(message) => print_message(&message),
                    SendOutcome::Fallback { message, .. } => print_message(&message),
                }
            }
            ChatCommand::History(query) => {
                let (view, query) = match query {
                    Some(query) => (HistoryView::All, query),
                    None => (HistoryView::Recent, String::new()),
                };
                chat.with_archive_ref(|archive| print_groups(&archive.view(view, &query)))
                    .await;
            }
            ChatCommand::All => {
                chat.with_archive_ref(|archive| print_groups(&archive.view(HistoryView::All, "")))
                    .await;
            }
            ChatCommand::Favorites => {
                chat.with_archive_ref(|archive| {
                    print_groups(&archive.view(HistoryView::Favorites, ""))
                })
                .await;
            }
            ChatCommand::Open(id) => {
                if chat.select_conversation(id).await {
                    print_transcript(&chat.messages().await);
                } else {
                    println!("No conversation with id {}", id);
                }
            }
            ChatCommand::Star(id) => match chat.toggle_favorite(id).await {
                Some(true) => println!("Starred conversation {}", id),
                Some(false) => println!("Unstarred conversation {}", id),
                None => println!("No conversation with id {}", id),
            },
            ChatCommand::New => {
                if let Some(archived) = chat.start_new_conversation().await {
                    println!("Saved \"{}\" to your history", archived.preview);
                }
                print_transcript(&chat.messages().await);
            }
            ChatCommand::Affirmation => println!("{}", pickers::random_affirmation()),
            ChatCommand::Joke => println!("{}", pickers::random_joke()),
            ChatCommand::Help => println!("{}", HELP),
            ChatCommand::Quit => break,
            ChatCommand::Invalid(reason) => println!("{}", reason),
        }
    }

    if let Some(archived) = chat.archive_active().await {
        log::info!("Archived conversation {} on exit", archived.id);
    }
    Ok(())
}

fn print_message(message: &Message) {
    let speaker = match message.sender {
        Sender::User => "You",
        Sender::Assistant => "AuroMind",
    };
    println!("{}: {}", speaker, message.content);
}

fn print_transcript(messages: &[Message]) {
    for message in messages {
        print_message(message);
    }
}

fn print_groups(groups: &[DateGroup<'_>]) {
    if groups.is_empty() {
        println!("No conversations found");
        return;
    }
    for group in groups {
        println!("{}", group.label);
        for conversation in &group.conversations {
            print_card(conversation);
        }
    }
}

fn print_card(conversation: &Conversation) {
    let star = if conversation.favorite { "*" } else { " " };
    println!(
        "  {} [{}] {}  {}  {} messages",
        star,
        conversation.id,
        conversation.title(),
        conversation.started_at_label(),
        conversation.message_count()
    );
    println!("      {}", conversation.preview);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_sent_verbatim() {
        assert_eq!(
            ChatCommand::parse("  I feel tired "),
            ChatCommand::Say("  I feel tired ".to_string())
        );
        assert_eq!(ChatCommand::parse(""), ChatCommand::Say(String::new()));
    }

    #[test]
    fn test_slash_commands() {
        assert_eq!(ChatCommand::parse("/history"), ChatCommand::History(None));
        assert_eq!(
            ChatCommand::parse("/history  sleep well "),
            ChatCommand::History(Some("sleep well".to_string()))
        );
        assert_eq!(ChatCommand::parse("/all"), ChatCommand::All);
        assert_eq!(ChatCommand::parse("/favorites"), ChatCommand::Favorites);
        assert_eq!(ChatCommand::parse("/open 2"), ChatCommand::Open(2));
        assert_eq!(ChatCommand::parse("/star 3"), ChatCommand::Star(3));
        assert_eq!(ChatCommand::parse("/new"), ChatCommand::New);
        assert_eq!(ChatCommand::parse("/quit"), ChatCommand::Quit);
        assert_eq!(ChatCommand::parse("/exit"), ChatCommand::Quit);
    }

    #[test]
    fn test_slash_messages_can_be_sent() {
        assert_eq!(
            ChatCommand::parse("//shrug"),
            ChatCommand::Say("/shrug".to_string())
        );
        assert_eq!(
            ChatCommand::parse("/ I feel off"),
            ChatCommand::Say("/ I feel off".to_string())
        );
        assert_eq!(ChatCommand::parse("/"), ChatCommand::Say("/".to_string()));
    }

    #[test]
    fn test_invalid_commands() {
        assert!(matches!(ChatCommand::parse("/open"), ChatCommand::Invalid(_)));
        assert!(matches!(ChatCommand::parse("/star abc"), ChatCommand::Invalid(_)));
        assert!(matches!(ChatCommand::parse("/dance"), ChatCommand::Invalid(_)));
    }
}
