//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the subject, grade and file endpoints and the
//! master definition for the OpenAPI specification.

use crate::web::{
    extract::ValidJson,
    state::AppState,
    views::{
        ChatMessageView, ChatRequest, ChatResponse, CreateFileRequest, CreateGradeRequest,
        CreateSubjectRequest, DeletedResponse, ErrorResponse, FileCountsView, FileKindBody,
        FileListResponse, FileResponse, FileView, FilesQuery, GradeResponse, GradeView,
        NoticeView, SubjectResponse, SubjectView, UpdateGradeRequest, UpdateSubjectRequest,
    },
};
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{info, warn};
use uniclass_core::{files, Notice, StoreError};
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        list_subjects_handler,
        create_subject_handler,
        get_subject_handler,
        update_subject_handler,
        delete_subject_handler,
        create_grade_handler,
        update_grade_handler,
        delete_grade_handler,
        list_files_handler,
        create_file_handler,
        delete_file_handler,
        crate::web::chat::list_chat_handler,
        crate::web::chat::post_chat_handler,
        crate::web::chat::clear_chat_handler,
    ),
    components(
        schemas(
            SubjectView, GradeView, FileView, FileKindBody, FileCountsView, FileListResponse,
            NoticeView, SubjectResponse, GradeResponse, FileResponse, DeletedResponse, ErrorResponse, ChatMessageView,
            ChatResponse, CreateSubjectRequest, UpdateSubjectRequest, CreateGradeRequest,
            UpdateGradeRequest, CreateFileRequest, ChatRequest
        )
    ),
    tags(
        (name = "UniClass Organizer API", description = "Local endpoints for subjects, grades, files and the study assistant.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Error Mapping
//=========================================================================================

/// The rejection every handler returns: a status plus an error notice.
pub type HandlerError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn store_failure(err: StoreError) -> HandlerError {
    let status = if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::BAD_REQUEST
    };
    warn!("Store operation rejected: {}", err);
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            notice: Notice::from_error(&err).into(),
        }),
    )
}

/// A 400 for input the store never saw: an unreadable body or query.
pub(crate) fn invalid_input(message: String) -> HandlerError {
    warn!("Request rejected: {}", message);
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            notice: Notice::invalid_input(&message).into(),
            error: message,
        }),
    )
}

//=========================================================================================
// Subject Handlers
//=========================================================================================

/// List every subject in collection order.
#[utoipa::path(
    get,
    path = "/subjects",
    responses((status = 200, description = "All subjects", body = [SubjectView]))
)]
pub async fn list_subjects_handler(State(app_state): State<Arc<AppState>>) -> Json<Vec<SubjectView>> {
    let store = app_state.store.lock().await;
    Json(store.list_subjects().iter().map(SubjectView::from).collect())
}

/// Create a subject. The id and creation time are generated.
#[utoipa::path(
    post,
    path = "/subjects",
    request_body = CreateSubjectRequest,
    responses(
        (status = 201, description = "Subject created", body = SubjectResponse),
        (status = 400, description = "Empty name", body = ErrorResponse)
    )
)]
pub async fn create_subject_handler(
    State(app_state): State<Arc<AppState>>,
    ValidJson(body): ValidJson<CreateSubjectRequest>,
) -> Result<(StatusCode, Json<SubjectResponse>), HandlerError> {
    let mut store = app_state.store.lock().await;
    let subject = store.create_subject(body.into()).map_err(store_failure)?;
    Ok((
        StatusCode::CREATED,
        Json(SubjectResponse {
            notice: Notice::subject_created(&subject.name).into(),
            subject: SubjectView::from(&subject),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/subjects/{id}",
    params(("id" = String, Path, description = "Subject id")),
    responses(
        (status = 200, description = "The subject", body = SubjectView),
        (status = 404, description = "Unknown subject", body = ErrorResponse)
    )
)]
pub async fn get_subject_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SubjectView>, HandlerError> {
    let store = app_state.store.lock().await;
    let subject = store.get_subject_by_id(&id).map_err(store_failure)?;
    Ok(Json(SubjectView::from(subject)))
}

/// Merge the given fields into a subject.
#[utoipa::path(
    patch,
    path = "/subjects/{id}",
    params(("id" = String, Path, description = "Subject id")),
    request_body = UpdateSubjectRequest,
    responses(
        (status = 200, description = "Subject updated", body = SubjectResponse),
        (status = 400, description = "Empty name", body = ErrorResponse),
        (status = 404, description = "Unknown subject", body = ErrorResponse)
    )
)]
pub async fn update_subject_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<UpdateSubjectRequest>,
) -> Result<Json<SubjectResponse>, HandlerError> {
    let mut store = app_state.store.lock().await;
    let subject = store.update_subject(&id, body.into()).map_err(store_failure)?;
    Ok(Json(SubjectResponse {
        subject: SubjectView::from(&subject),
        notice: Notice::subject_updated().into(),
    }))
}

/// Delete a subject with all of its grades and files. Its assistant thread goes too.
#[utoipa::path(
    delete,
    path = "/subjects/{id}",
    params(("id" = String, Path, description = "Subject id")),
    responses(
        (status = 200, description = "Subject deleted", body = DeletedResponse),
        (status = 404, description = "Unknown subject", body = ErrorResponse)
    )
)]
pub async fn delete_subject_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, HandlerError> {
    let removed = {
        let mut store = app_state.store.lock().await;
        store.delete_subject(&id).map_err(store_failure)?
    };
    app_state.chat.lock().await.clear_messages(&removed.id);
    info!(
        "Removed subject {} with {} grades and {} files.",
        removed.id,
        removed.grades.len(),
        removed.files.len()
    );
    Ok(Json(DeletedResponse {
        notice: Notice::subject_deleted(&removed.name).into(),
        id: removed.id,
    }))
}

//=========================================================================================
// Grade Handlers
//=========================================================================================

#[utoipa::path(
    post,
    path = "/subjects/{id}/grades",
    params(("id" = String, Path, description = "Subject id")),
    request_body = CreateGradeRequest,
    responses(
        (status = 201, description = "Grade added", body = GradeResponse),
        (status = 400, description = "Invalid grade", body = ErrorResponse),
        (status = 404, description = "Unknown subject", body = ErrorResponse)
    )
)]
pub async fn create_grade_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<CreateGradeRequest>,
) -> Result<(StatusCode, Json<GradeResponse>), HandlerError> {
    let mut store = app_state.store.lock().await;
    let grade = store.create_grade(&id, body.into()).map_err(store_failure)?;
    let subject_average = store.subject_average(&id).map_err(store_failure)?;
    Ok((
        StatusCode::CREATED,
        Json(GradeResponse {
            notice: Notice::grade_added(&grade.name).into(),
            grade: GradeView::from(&grade),
            subject_average,
        }),
    ))
}

#[utoipa::path(
    patch,
    path = "/subjects/{id}/grades/{grade_id}",
    params(
        ("id" = String, Path, description = "Subject id"),
        ("grade_id" = String, Path, description = "Grade id")
    ),
    request_body = UpdateGradeRequest,
    responses(
        (status = 200, description = "Grade updated", body = GradeResponse),
        (status = 400, description = "Invalid grade", body = ErrorResponse),
        (status = 404, description = "Unknown subject or grade", body = ErrorResponse)
    )
)]
pub async fn update_grade_handler(
    State(app_state): State<Arc<AppState>>,
    Path((id, grade_id)): Path<(String, String)>,
    ValidJson(body): ValidJson<UpdateGradeRequest>,
) -> Result<Json<GradeResponse>, HandlerError> {
    let mut store = app_state.store.lock().await;
    let grade = store
        .update_grade(&id, &grade_id, body.into())
        .map_err(store_failure)?;
    let subject_average = store.subject_average(&id).map_err(store_failure)?;
    Ok(Json(GradeResponse {
        grade: GradeView::from(&grade),
        subject_average,
        notice: Notice::grade_updated().into(),
    }))
}

#[utoipa::path(
    delete,
    path = "/subjects/{id}/grades/{grade_id}",
    params(
        ("id" = String, Path, description = "Subject id"),
        ("grade_id" = String, Path, description = "Grade id")
    ),
    responses(
        (status = 200, description = "Grade deleted", body = DeletedResponse),
        (status = 404, description = "Unknown subject or grade", body = ErrorResponse)
    )
)]
pub async fn delete_grade_handler(
    State(app_state): State<Arc<AppState>>,
    Path((id, grade_id)): Path<(String, String)>,
) -> Result<Json<DeletedResponse>, HandlerError> {
    let mut store = app_state.store.lock().await;
    let removed = store.delete_grade(&id, &grade_id).map_err(store_failure)?;
    Ok(Json(DeletedResponse {
        id: removed.id,
        notice: Notice::grade_deleted().into(),
    }))
}

//=========================================================================================
// File Handlers
//=========================================================================================

/// List a subject's files, optionally only those of one type.
#[utoipa::path(
    get,
    path = "/subjects/{id}/files",
    params(
        ("id" = String, Path, description = "Subject id"),
        ("type" = Option<String>, Query, description = "One of notes, lecture, exam or other")
    ),
    responses(
        (status = 200, description = "Matching files and per-type counts", body = FileListResponse),
        (status = 400, description = "Unknown file type", body = ErrorResponse),
        (status = 404, description = "Unknown subject", body = ErrorResponse)
    )
)]
pub async fn list_files_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
    query: Result<Query<FilesQuery>, QueryRejection>,
) -> Result<Json<FileListResponse>, HandlerError> {
    let Query(query) = query.map_err(|rejection| invalid_input(rejection.body_text()))?;

    let store = app_state.store.lock().await;
    let subject = store.get_subject_by_id(&id).map_err(store_failure)?;
    Ok(Json(FileListResponse {
        files: files::files_of_kind(&subject.files, query.kind.map(Into::into))
            .into_iter()
            .map(FileView::from)
            .collect(),
        counts: files::count_by_kind(&subject.files).into(),
    }))
}

#[utoipa::path(
    post,
    path = "/subjects/{id}/files",
    params(("id" = String, Path, description = "Subject id")),
    request_body = CreateFileRequest,
    responses(
        (status = 201, description = "File added", body = FileResponse),
        (status = 400, description = "Empty name", body = ErrorResponse),
        (status = 404, description = "Unknown subject", body = ErrorResponse)
    )
)]
pub async fn create_file_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<CreateFileRequest>,
) -> Result<(StatusCode, Json<FileResponse>), HandlerError> {
    let mut store = app_state.store.lock().await;
    let file = store.create_file(&id, body.into()).map_err(store_failure)?;
    Ok((
        StatusCode::CREATED,
        Json(FileResponse {
            notice: Notice::file_added(&file.name).into(),
            file: FileView::from(&file),
        }),
    ))
}

#[utoipa::path(
    delete,
    path = "/subjects/{id}/files/{file_id}",
    params(
        ("id" = String, Path, description = "Subject id"),
        ("file_id" = String, Path, description = "File id")
    ),
    responses(
        (status = 200, description = "File deleted", body = DeletedResponse),
        (status = 404, description = "Unknown subject or file", body = ErrorResponse)
    )
)]
pub async fn delete_file_handler(
    State(app_state): State<Arc<AppState>>,
    Path((id, file_id)): Path<(String, String)>,
) -> Result<Json<DeletedResponse>, HandlerError> {
    let mut store = app_state.store.lock().await;
    let removed = store.delete_file(&id, &file_id).map_err(store_failure)?;
    Ok(Json(DeletedResponse {
        id: removed.id,
        notice: Notice::file_deleted().into(),
    }))
}
