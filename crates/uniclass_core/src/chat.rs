//! crates/uniclass_core/src/chat.rs
//!
//! Per-subject assistant conversations. The log is keyed by subject id but never
//! reads or writes subject state.

use crate::domain::{ChatMessage, ChatRole};
use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct ChatLog {
    threads: HashMap<String, Vec<ChatMessage>>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message to the subject's thread and returns it.
    pub fn add_message(&mut self, subject_id: &str, content: &str, role: ChatRole) -> ChatMessage {
        let message = ChatMessage {
            id: Uuid::new_v4().simple().to_string(),
            content: content.to_string(),
            role,
            timestamp: Utc::now(),
        };
        self.threads
            .entry(subject_id.to_string())
            .or_default()
            .push(message.clone());
        message
    }

    pub fn messages(&self, subject_id: &str) -> &[ChatMessage] {
        self.threads
            .get(subject_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn clear_messages(&mut self, subject_id: &str) {
        self.threads.remove(subject_id);
    }

    /// Number of subjects with a thread on record.
    pub fn thread_count(&self) -> usize {
        self.threads.len()
    }
}
