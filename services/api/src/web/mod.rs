pub mod chat;
pub mod chat_task;
pub mod extract;
pub mod rest;
pub mod state;
pub mod views;

use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

pub use chat::{clear_chat_handler, list_chat_handler, post_chat_handler};
pub use rest::{
    create_file_handler, create_grade_handler, create_subject_handler, delete_file_handler,
    delete_grade_handler, delete_subject_handler, get_subject_handler, list_files_handler,
    list_subjects_handler, update_grade_handler, update_subject_handler,
};
use state::AppState;

/// Builds the router for every presentation-layer endpoint.
pub fn api_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/subjects",
            get(list_subjects_handler).post(create_subject_handler),
        )
        .route(
            "/subjects/{id}",
            get(get_subject_handler)
                .patch(update_subject_handler)
                .delete(delete_subject_handler),
        )
        .route("/subjects/{id}/grades", post(create_grade_handler))
        .route(
            "/subjects/{id}/grades/{grade_id}",
            patch(update_grade_handler).delete(delete_grade_handler),
        )
        .route(
            "/subjects/{id}/files",
            get(list_files_handler).post(create_file_handler),
        )
        .route(
            "/subjects/{id}/files/{file_id}",
            axum::routing::delete(delete_file_handler),
        )
        .route(
            "/subjects/{id}/chat",
            get(list_chat_handler)
                .post(post_chat_handler)
                .delete(clear_chat_handler),
        )
        .with_state(app_state)
}
