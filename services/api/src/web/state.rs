//! services/api/src/web/state.rs
//!
//! Defines the service's shared state.

use std::sync::Arc;
use tokio::sync::Mutex;
use uniclass_core::{AssistantService, ChatLog, SubjectStore};

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
///
/// The store and the chat log sit behind separate locks: an assistant reply in
/// flight never holds the store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<SubjectStore>>,
    pub chat: Arc<Mutex<ChatLog>>,
    pub assistant: Arc<dyn AssistantService>,
}

impl AppState {
    pub fn new(store: SubjectStore, assistant: Arc<dyn AssistantService>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            chat: Arc::new(Mutex::new(ChatLog::new())),
            assistant,
        }
    }
}
