//! services/api/src/web/chat_task.rs
//!
//! This module contains the asynchronous "worker" function responsible for
//! a single assistant exchange.

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::info;
use uniclass_core::{
    domain::{ChatMessage, ChatRole},
    ports::PortResult,
    AssistantService, ChatLog,
};

/// Represents the outcome of the `generate_reply` task.
#[derive(Debug, PartialEq)]
pub enum ReplyOutcome {
    /// The assistant answered and its message was appended to the log.
    Replied(ChatMessage),
    /// The caller went away before the assistant answered. Nothing was appended
    /// after the user's prompt.
    Cancelled,
}

/// Records the user's prompt, waits for the assistant and records its answer.
///
/// Only the chat log is touched; subject notes are passed in by value.
pub async fn generate_reply(
    assistant: Arc<dyn AssistantService>,
    chat: Arc<Mutex<ChatLog>>,
    subject_id: String,
    prompt: String,
    subject_notes: String,
    cancellation_token: CancellationToken,
) -> PortResult<ReplyOutcome> {
    let start_time = Instant::now();
    chat.lock()
        .await
        .add_message(&subject_id, &prompt, ChatRole::User);

    let reply = tokio::select! {
        _ = cancellation_token.cancelled() => {
            info!("Assistant reply for subject {} cancelled.", subject_id);
            return Ok(ReplyOutcome::Cancelled);
        }
        reply = assistant.reply(&prompt, &subject_notes) => reply?,
    };

    let message = chat
        .lock()
        .await
        .add_message(&subject_id, &reply, ChatRole::Assistant);
    info!(
        "Assistant replied for subject {} in {:?}.",
        subject_id,
        start_time.elapsed()
    );
    Ok(ReplyOutcome::Replied(message))
}
