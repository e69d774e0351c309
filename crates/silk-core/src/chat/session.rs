//! Client-side chat session state.
//!
//! A [`ChatSession`] owns the ordered message log and the single `pending`
//! flag that gates concurrent sends. The gate is cooperative: the session
//! is only ever mutated from the single consumer of the decoder's events,
//! so no locking discipline is needed beyond "one send in flight".
//!
//! Invariants:
//! - at most one message is in progress (receiving deltas) at any time,
//!   and it is always the last element
//! - observers are notified after every message-sequence mutation, both
//!   appends and in-place content replacement

use silk_types::message::{ChatMessage, MessageRole};
use uuid::Uuid;

/// Callback fired after every mutation of the message sequence.
///
/// This stands in for whatever the surrounding UI does on refresh
/// (re-render, scroll-to-latest); the session itself assumes nothing about
/// the UI framework.
pub type SessionObserver = Box<dyn Fn(&[ChatMessage]) + Send>;

/// Ordered message log plus the in-flight gate for one conversation.
pub struct ChatSession {
    conversation_id: Option<Uuid>,
    messages: Vec<ChatMessage>,
    pending: bool,
    observers: Vec<SessionObserver>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            conversation_id: None,
            messages: Vec::new(),
            pending: false,
            observers: Vec::new(),
        }
    }

    /// The persistence-assigned conversation id, once known.
    pub fn conversation_id(&self) -> Option<Uuid> {
        self.conversation_id
    }

    pub fn set_conversation_id(&mut self, id: Uuid) {
        self.conversation_id = Some(id);
    }

    /// Whether a send is currently in flight.
    pub fn pending(&self) -> bool {
        self.pending
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Register an observer; fired after every message-sequence mutation.
    pub fn subscribe(&mut self, observer: SessionObserver) {
        self.observers.push(observer);
    }

    /// Append a message outside of an exchange (e.g. the welcome greeting).
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.notify();
    }

    /// Start an exchange for the given user input.
    ///
    /// Rejected as a no-op (returns `false`) when the input is blank or a
    /// send is already pending. On acceptance the user message and an empty
    /// assistant placeholder are appended and `pending` is set.
    pub fn begin_exchange(&mut self, user_text: &str) -> bool {
        if user_text.trim().is_empty() || self.pending {
            return false;
        }

        self.messages.push(ChatMessage::user(user_text));
        self.notify();

        self.pending = true;
        self.messages.push(ChatMessage::assistant(""));
        self.notify();

        true
    }

    /// Merge one decoded text fragment into the pending assistant message.
    ///
    /// Fragments must be applied strictly in arrival order. Ignored when no
    /// exchange is pending.
    pub fn apply_fragment(&mut self, fragment: &str) {
        if !self.pending {
            return;
        }
        let Some(last) = self.messages.last_mut() else {
            return;
        };
        if last.role != MessageRole::Assistant {
            return;
        }

        last.content.push_str(fragment);
        self.notify();
    }

    /// Finish the exchange successfully, returning the accumulated text.
    pub fn complete_exchange(&mut self) -> String {
        self.pending = false;
        self.messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default()
    }

    /// Finish the exchange after a user-initiated cancellation.
    ///
    /// The partial text already shown is kept in place; only the gate is
    /// released. Returns whatever had accumulated.
    pub fn cancel_exchange(&mut self) -> String {
        self.complete_exchange()
    }

    /// Abort the exchange after a transport failure.
    ///
    /// The in-progress placeholder is retracted -- the only case where a
    /// message is removed after being appended -- and the gate is released.
    pub fn fail_exchange(&mut self) {
        if self.pending {
            self.messages.pop();
            self.notify();
        }
        self.pending = false;
    }

    fn notify(&self) {
        for observer in &self.observers {
            observer(&self.messages);
        }
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
