//! services/api/src/web/views.rs
//!
//! Request and response payloads exchanged with the presentation layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uniclass_core::{
    files, grades, ChatMessage, ChatRole, File, FileKind, Grade, GradePatch, NewFile, NewGrade,
    NewSubject, Notice, NoticeVariant, Subject, SubjectPatch,
};
use utoipa::ToSchema;

//=========================================================================================
// Response Payloads
//=========================================================================================

/// A subject together with its derived grade figures.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub color: String,
    pub professor: Option<String>,
    pub notes: String,
    pub grades: Vec<GradeView>,
    pub files: Vec<FileView>,
    pub created_at: DateTime<Utc>,
    /// Weighted average in percent; `null` while the subject has no grades.
    pub average: Option<f64>,
    /// Display text for the average, e.g. "85.0%" or "No grades".
    pub current_grade: String,
    pub highest_percentage: Option<f64>,
    pub total_weight: f64,
    pub file_counts: FileCountsView,
}

impl From<&Subject> for SubjectView {
    fn from(subject: &Subject) -> Self {
        Self {
            id: subject.id.clone(),
            name: subject.name.clone(),
            description: subject.description.clone(),
            color: subject.color.clone(),
            professor: subject.professor.clone(),
            notes: subject.notes.clone(),
            grades: subject.grades.iter().map(GradeView::from).collect(),
            files: subject.files.iter().map(FileView::from).collect(),
            created_at: subject.created_at,
            average: grades::current_grade(&subject.grades),
            current_grade: grades::format_current_grade(&subject.grades),
            highest_percentage: grades::highest_percentage(&subject.grades),
            total_weight: grades::total_weight(&subject.grades),
            file_counts: files::count_by_kind(&subject.files).into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GradeView {
    pub id: String,
    pub name: String,
    pub score: f64,
    pub total_points: f64,
    pub weight: f64,
    pub percentage: Option<f64>,
    pub weighted_contribution: f64,
}

impl From<&Grade> for GradeView {
    fn from(grade: &Grade) -> Self {
        Self {
            id: grade.id.clone(),
            name: grade.name.clone(),
            score: grade.score,
            total_points: grade.total_points,
            weight: grade.weight,
            percentage: grade.percentage(),
            weighted_contribution: grades::weighted_contribution(grade),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FileKindBody {
    Notes,
    Lecture,
    Exam,
    Other,
}

impl From<FileKind> for FileKindBody {
    fn from(kind: FileKind) -> Self {
        match kind {
            FileKind::Notes => FileKindBody::Notes,
            FileKind::Lecture => FileKindBody::Lecture,
            FileKind::Exam => FileKindBody::Exam,
            FileKind::Other => FileKindBody::Other,
        }
    }
}

impl From<FileKindBody> for FileKind {
    fn from(kind: FileKindBody) -> Self {
        match kind {
            FileKindBody::Notes => FileKind::Notes,
            FileKindBody::Lecture => FileKind::Lecture,
            FileKindBody::Exam => FileKind::Exam,
            FileKindBody::Other => FileKind::Other,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileView {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: FileKindBody,
    pub uploaded_at: DateTime<Utc>,
}

impl From<&File> for FileView {
    fn from(file: &File) -> Self {
        Self {
            id: file.id.clone(),
            name: file.name.clone(),
            url: file.url.clone(),
            kind: file.kind.into(),
            uploaded_at: file.uploaded_at,
        }
    }
}

/// Number of files of each kind, plus the total.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
pub struct FileCountsView {
    pub all: usize,
    pub notes: usize,
    pub lecture: usize,
    pub exam: usize,
    pub other: usize,
}

impl From<files::FileCounts> for FileCountsView {
    fn from(counts: files::FileCounts) -> Self {
        Self {
            all: counts.total(),
            notes: counts.notes,
            lecture: counts.lecture,
            exam: counts.exam,
            other: counts.other,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct FileListResponse {
    pub files: Vec<FileView>,
    pub counts: FileCountsView,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct NoticeView {
    pub title: String,
    pub description: String,
    /// Either "default" or "destructive".
    pub variant: String,
}

impl From<Notice> for NoticeView {
    fn from(notice: Notice) -> Self {
        let variant = match notice.variant {
            NoticeVariant::Default => "default",
            NoticeVariant::Destructive => "destructive",
        };
        Self {
            title: notice.title,
            description: notice.description,
            variant: variant.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct SubjectResponse {
    pub subject: SubjectView,
    pub notice: NoticeView,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GradeResponse {
    pub grade: GradeView,
    /// The parent subject's average after the change.
    pub subject_average: Option<f64>,
    pub notice: NoticeView,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct FileResponse {
    pub file: FileView,
    pub notice: NoticeView,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct DeletedResponse {
    pub id: String,
    pub notice: NoticeView,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub notice: NoticeView,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct ChatMessageView {
    pub id: String,
    pub content: String,
    /// Either "user" or "assistant".
    pub role: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&ChatMessage> for ChatMessageView {
    fn from(message: &ChatMessage) -> Self {
        let role = match message.role {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        };
        Self {
            id: message.id.clone(),
            content: message.content.clone(),
            role: role.to_string(),
            timestamp: message.timestamp,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ChatResponse {
    pub messages: Vec<ChatMessageView>,
}

//=========================================================================================
// Request Payloads
//=========================================================================================

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct CreateSubjectRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub professor: Option<String>,
    #[serde(default)]
    pub notes: String,
}

impl From<CreateSubjectRequest> for NewSubject {
    fn from(body: CreateSubjectRequest) -> Self {
        NewSubject {
            name: body.name.trim().to_string(),
            description: body.description,
            color: body.color,
            professor: body.professor.filter(|p| !p.trim().is_empty()),
            notes: body.notes,
        }
    }
}

/// Fields to change on a subject. Absent fields are left alone; an empty
/// `professor` clears it.
#[derive(Deserialize, Serialize, Debug, Default, ToSchema)]
pub struct UpdateSubjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub professor: Option<String>,
    pub notes: Option<String>,
}

impl From<UpdateSubjectRequest> for SubjectPatch {
    fn from(body: UpdateSubjectRequest) -> Self {
        SubjectPatch {
            name: body.name.map(|n| n.trim().to_string()),
            description: body.description,
            color: body.color,
            professor: body
                .professor
                .map(|p| if p.trim().is_empty() { None } else { Some(p) }),
            notes: body.notes,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGradeRequest {
    pub name: String,
    pub score: f64,
    pub total_points: f64,
    pub weight: f64,
}

impl From<CreateGradeRequest> for NewGrade {
    fn from(body: CreateGradeRequest) -> Self {
        NewGrade {
            name: body.name.trim().to_string(),
            score: body.score,
            total_points: body.total_points,
            weight: body.weight,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGradeRequest {
    pub name: Option<String>,
    pub score: Option<f64>,
    pub total_points: Option<f64>,
    pub weight: Option<f64>,
}

impl From<UpdateGradeRequest> for GradePatch {
    fn from(body: UpdateGradeRequest) -> Self {
        GradePatch {
            name: body.name.map(|n| n.trim().to_string()),
            score: body.score,
            total_points: body.total_points,
            weight: body.weight,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct CreateFileRequest {
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: FileKindBody,
}

impl From<CreateFileRequest> for NewFile {
    fn from(body: CreateFileRequest) -> Self {
        NewFile {
            name: body.name.trim().to_string(),
            url: body.url,
            kind: body.kind.into(),
        }
    }
}

/// Query for `GET /subjects/{id}/files`. Without `type` every file is listed.
#[derive(Deserialize, Debug, Default)]
pub struct FilesQuery {
    #[serde(rename = "type", default)]
    pub kind: Option<FileKindBody>,
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct ChatRequest {
    pub prompt: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uniclass_core::seed::seed_subjects;

    #[test]
    fn subject_view_carries_derived_figures() {
        let subjects = seed_subjects();
        let view = SubjectView::from(&subjects[1]);
        // (78 * 20 + 90 * 10) / 30 = 82.0
        assert!((view.average.unwrap() - 82.0).abs() < 1e-9);
        assert_eq!(view.current_grade, "82.0%");
        assert_eq!(view.highest_percentage, Some(90.0));
        assert_eq!(view.total_weight, 30.0);
        assert!((view.grades[0].weighted_contribution - 15.6).abs() < 1e-9);
        assert_eq!(
            view.file_counts,
            FileCountsView { all: 1, notes: 1, lecture: 0, exam: 0, other: 0 }
        );
    }

    #[test]
    fn blank_professor_in_update_clears_it() {
        let patch: SubjectPatch = UpdateSubjectRequest {
            professor: Some("  ".to_string()),
            ..Default::default()
        }
        .into();
        assert_eq!(patch.professor, Some(None));

        let untouched: SubjectPatch = UpdateSubjectRequest::default().into();
        assert!(untouched.is_empty());
    }

    #[test]
    fn file_request_reads_type_field() {
        let body: CreateFileRequest =
            serde_json::from_str(r#"{"name":"Final.pdf","url":"blob:9","type":"exam"}"#).unwrap();
        let file: NewFile = body.into();
        assert_eq!(file.kind, FileKind::Exam);
        assert!(serde_json::from_str::<CreateFileRequest>(
            r##"{"name":"x","url":"#","type":"video"}"##
        )
        .is_err());
    }
}
