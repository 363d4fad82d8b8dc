//! Chat transcript and the simulated "assistant is composing" round trip.
//!
//! Messages are append-only. `clear` bumps the generation, and a reply
//! scheduled under an older generation is dropped on delivery.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::chat::router::ChatRouter;

pub type SharedChat = Arc<Mutex<ChatSession>>;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("The assistant is still composing a reply")]
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    /// Routing topic of an assistant reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

impl ChatMessage {
    fn new(sender: Sender, content: String, topic: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            sender,
            timestamp: Utc::now(),
            topic,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatView {
    pub messages: Vec<ChatMessage>,
    pub composing: bool,
}

/// A user message waiting for its reply.
#[derive(Debug, Clone)]
pub struct PendingReply {
    pub generation: u64,
    pub user_message: ChatMessage,
}

pub struct ChatSession {
    greeting: String,
    messages: Vec<ChatMessage>,
    composing: bool,
    generation: u64,
}

impl ChatSession {
    pub fn new(greeting: impl Into<String>) -> Self {
        let greeting = greeting.into();
        Self {
            messages: vec![ChatMessage::new(Sender::Assistant, greeting.clone(), None)],
            greeting,
            composing: false,
            generation: 0,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_composing(&self) -> bool {
        self.composing
    }

    /// Appends the user's message and turns the composing indicator on.
    pub fn submit(&mut self, content: String) -> Result<PendingReply, ChatError> {
        if content.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if self.composing {
            return Err(ChatError::Busy);
        }

        let message = ChatMessage::new(Sender::User, content, None);
        self.messages.push(message.clone());
        self.composing = true;

        Ok(PendingReply {
            generation: self.generation,
            user_message: message,
        })
    }

    /// Appends the assistant reply for `generation`. Returns `None` (and
    /// leaves the transcript untouched) if the chat was cleared since.
    pub fn deliver(&mut self, generation: u64, topic: &str, body: &str) -> Option<&ChatMessage> {
        if generation != self.generation || !self.composing {
            debug!(generation, current = self.generation, "Dropping stale chat reply");
            return None;
        }
        self.composing = false;
        self.messages.push(ChatMessage::new(
            Sender::Assistant,
            body.to_string(),
            Some(topic.to_string()),
        ));
        self.messages.last()
    }

    /// Back to the greeting alone; any in-flight reply becomes stale.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.composing = false;
        self.messages = vec![ChatMessage::new(Sender::Assistant, self.greeting.clone(), None)];
        info!(generation = self.generation, "Chat transcript cleared");
    }

    pub fn view(&self) -> ChatView {
        ChatView {
            messages: self.messages().to_vec(),
            composing: self.is_composing(),
        }
    }
}

/// Routes the pending message after `delay` and delivers the reply.
pub fn spawn_reply(
    chat: SharedChat,
    catalog: Arc<Catalog>,
    pending: PendingReply,
    delay: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let reply = ChatRouter::new(&catalog.chat).respond(&pending.user_message.content);
        debug!(topic = reply.topic, "Chat message routed");
        let mut session = chat.lock().await;
        session.deliver(pending.generation, reply.topic, reply.body);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared() -> (SharedChat, Arc<Catalog>) {
        let catalog = Arc::new(Catalog::builtin().unwrap());
        let chat = Arc::new(Mutex::new(ChatSession::new(catalog.chat.greeting.clone())));
        (chat, catalog)
    }

    #[test]
    fn test_starts_with_greeting() {
        let session = ChatSession::new("Hi");
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].sender, Sender::Assistant);
        assert_eq!(session.messages()[0].content, "Hi");
        assert!(!session.is_composing());
    }

    #[test]
    fn test_blank_message_rejected() {
        let mut session = ChatSession::new("Hi");
        assert!(matches!(session.submit("   \n".to_string()), Err(ChatError::EmptyMessage)));
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn test_second_message_while_composing_rejected() {
        let mut session = ChatSession::new("Hi");
        session.submit("resume help".to_string()).unwrap();
        assert!(matches!(session.submit("again".to_string()), Err(ChatError::Busy)));
    }

    #[test]
    fn test_deliver_appends_and_clears_indicator() {
        let mut session = ChatSession::new("Hi");
        let pending = session.submit("resume help".to_string()).unwrap();
        let reply = session.deliver(pending.generation, "resume", "tips").unwrap();
        assert_eq!(reply.sender, Sender::Assistant);
        assert_eq!(reply.topic.as_deref(), Some("resume"));
        assert!(!session.is_composing());
        assert_eq!(session.messages().len(), 3);
    }

    #[test]
    fn test_view_mirrors_transcript() {
        let mut session = ChatSession::new("Hi");
        session.submit("salary advice".to_string()).unwrap();
        let view = session.view();
        assert!(view.composing);
        assert_eq!(view.messages.len(), session.messages().len());
        assert_eq!(view.messages[1].content, "salary advice");
    }

    #[test]
    fn test_message_json_shape() {
        let mut session = ChatSession::new("Hi");
        let pending = session.submit("resume help".to_string()).unwrap();
        let user = serde_json::to_value(&pending.user_message).unwrap();
        assert_eq!(user["sender"], "user");
        assert!(user.get("topic").is_none());
        assert!(user.get("kind").is_none());

        let reply = session.deliver(pending.generation, "resume", "tips").unwrap();
        let reply = serde_json::to_value(reply).unwrap();
        assert_eq!(reply["topic"], "resume");
    }

    #[test]
    fn test_stale_delivery_after_clear_is_dropped() {
        let mut session = ChatSession::new("Hi");
        let pending = session.submit("resume help".to_string()).unwrap();
        session.clear();
        assert!(session.deliver(pending.generation, "resume", "tips").is_none());
        assert_eq!(session.messages().len(), 1);
        assert!(!session.is_composing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_arrives_after_delay() {
        let (chat, catalog) = shared();
        let pending = chat.lock().await.submit("How should I prep for an interview?".to_string()).unwrap();
        let handle = spawn_reply(chat.clone(), catalog, pending, Duration::from_millis(1_500));

        tokio::time::sleep(Duration::from_millis(1_000)).await;
        assert!(chat.lock().await.is_composing());
        assert_eq!(chat.lock().await.messages().len(), 2);

        handle.await.unwrap();
        let guard = chat.lock().await;
        assert!(!guard.is_composing());
        let last = guard.messages().last().unwrap();
        assert_eq!(last.topic.as_deref(), Some("interview"));
        assert!(last.content.starts_with("Interview preparation is crucial"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_mid_flight_discards_reply() {
        let (chat, catalog) = shared();
        let pending = chat.lock().await.submit("salary".to_string()).unwrap();
        let handle = spawn_reply(chat.clone(), catalog, pending, Duration::from_millis(1_500));

        chat.lock().await.clear();
        handle.await.unwrap();

        let guard = chat.lock().await;
        assert_eq!(guard.messages().len(), 1);
        assert!(!guard.is_composing());
    }
}
