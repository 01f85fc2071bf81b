//! services/api/src/web/chat.rs
//!
//! Handlers for a subject's assistant conversation.

use crate::web::{
    chat_task::{generate_reply, ReplyOutcome},
    extract::ValidJson,
    rest::{store_failure, HandlerError},
    state::AppState,
    views::{ChatMessageView, ChatRequest, ChatResponse, ErrorResponse},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::error;
use uniclass_core::Notice;

fn assistant_failure(message: String) -> HandlerError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message,
            notice: Notice::assistant_failed().into(),
        }),
    )
}

async fn thread_view(app_state: &AppState, subject_id: &str) -> ChatResponse {
    let chat = app_state.chat.lock().await;
    ChatResponse {
        messages: chat
            .messages(subject_id)
            .iter()
            .map(ChatMessageView::from)
            .collect(),
    }
}

/// The conversation so far for one subject.
#[utoipa::path(
    get,
    path = "/subjects/{id}/chat",
    params(("id" = String, Path, description = "Subject id")),
    responses(
        (status = 200, description = "Messages in order", body = ChatResponse),
        (status = 404, description = "Unknown subject", body = ErrorResponse)
    )
)]
pub async fn list_chat_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ChatResponse>, HandlerError> {
    app_state
        .store
        .lock()
        .await
        .get_subject_by_id(&id)
        .map_err(store_failure)?;
    Ok(Json(thread_view(&app_state, &id).await))
}

/// Ask the assistant something about a subject.
///
/// The reply runs as its own task. If the client goes away first, the drop guard
/// cancels it and no assistant message is recorded.
#[utoipa::path(
    post,
    path = "/subjects/{id}/chat",
    params(("id" = String, Path, description = "Subject id")),
    request_body = ChatRequest,
    responses(
        (status = 200, description = "The updated conversation", body = ChatResponse),
        (status = 400, description = "Empty prompt", body = ErrorResponse),
        (status = 404, description = "Unknown subject", body = ErrorResponse),
        (status = 500, description = "The assistant failed", body = ErrorResponse)
    )
)]
pub async fn post_chat_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<ChatRequest>,
) -> Result<Json<ChatResponse>, HandlerError> {
    let prompt = body.prompt.trim().to_string();
    if prompt.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "prompt must not be empty".to_string(),
                notice: Notice::empty_prompt().into(),
            }),
        ));
    }

    // Copy the notes out so the store lock is released before the assistant runs.
    let notes = {
        let store = app_state.store.lock().await;
        store.get_subject_by_id(&id).map_err(store_failure)?.notes.clone()
    };

    let cancellation_token = CancellationToken::new();
    let _guard = cancellation_token.clone().drop_guard();
    let task = tokio::spawn(generate_reply(
        app_state.assistant.clone(),
        app_state.chat.clone(),
        id.clone(),
        prompt,
        notes,
        cancellation_token,
    ));

    match task.await {
        Ok(Ok(ReplyOutcome::Replied(_))) => {
            // The subject may have been deleted while the reply was being written.
            let store = app_state.store.lock().await;
            if let Err(e) = store.get_subject_by_id(&id) {
                app_state.chat.lock().await.clear_messages(&id);
                return Err(store_failure(e));
            }
            drop(store);
            Ok(Json(thread_view(&app_state, &id).await))
        }
        Ok(Ok(ReplyOutcome::Cancelled)) => Err(assistant_failure(
            "the assistant reply was cancelled".to_string(),
        )),
        Ok(Err(e)) => {
            error!("Assistant failed for subject {}: {}", id, e);
            Err(assistant_failure(e.to_string()))
        }
        Err(e) => {
            error!("Assistant task for subject {} did not finish: {}", id, e);
            Err(assistant_failure(e.to_string()))
        }
    }
}

#[utoipa::path(
    delete,
    path = "/subjects/{id}/chat",
    params(("id" = String, Path, description = "Subject id")),
    responses((status = 204, description = "Conversation cleared"))
)]
pub async fn clear_chat_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> StatusCode {
    app_state.chat.lock().await.clear_messages(&id);
    StatusCode::NO_CONTENT
}
