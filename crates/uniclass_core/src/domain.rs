//! crates/uniclass_core/src/domain.rs
//!
//! Defines the pure, core data structures for the organizer.
//! These structs are independent of any storage or serialization format.

use chrono::{DateTime, Utc};

/// A user-defined course container holding grades, files and notes.
#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub description: String,
    pub color: String,
    pub professor: Option<String>,
    pub notes: String,
    pub grades: Vec<Grade>,
    pub files: Vec<File>,
    pub created_at: DateTime<Utc>,
}

/// A single scored assessment with a relative weight toward the subject average.
#[derive(Debug, Clone, PartialEq)]
pub struct Grade {
    pub id: String,
    pub name: String,
    pub score: f64,
    pub total_points: f64,
    pub weight: f64,
}

/// A named reference to course material. `url` is an opaque caller-supplied handle.
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    pub id: String,
    pub name: String,
    pub url: String,
    pub kind: FileKind,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Notes,
    Lecture,
    Exam,
    Other,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Notes => "notes",
            FileKind::Lecture => "lecture",
            FileKind::Exam => "exam",
            FileKind::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "notes" => Some(FileKind::Notes),
            "lecture" => Some(FileKind::Lecture),
            "exam" => Some(FileKind::Exam),
            "other" => Some(FileKind::Other),
            _ => None,
        }
    }
}

//=========================================================================================
// Creation Drafts
//=========================================================================================

/// The user-supplied fields of a new subject. Id and timestamp are generated by the store.
#[derive(Debug, Clone, Default)]
pub struct NewSubject {
    pub name: String,
    pub description: String,
    pub color: String,
    pub professor: Option<String>,
    pub notes: String,
}

#[derive(Debug, Clone)]
pub struct NewGrade {
    pub name: String,
    pub score: f64,
    pub total_points: f64,
    pub weight: f64,
}

#[derive(Debug, Clone)]
pub struct NewFile {
    pub name: String,
    pub url: String,
    pub kind: FileKind,
}

//=========================================================================================
// Patches
//=========================================================================================

/// Named optional fields merged into an existing subject.
///
/// `professor` is doubly optional: `Some(None)` clears it, `None` leaves it alone.
/// Identity, creation time and nested collections are not patchable.
#[derive(Debug, Clone, Default)]
pub struct SubjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub professor: Option<Option<String>>,
    pub notes: Option<String>,
}

impl SubjectPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.color.is_none()
            && self.professor.is_none()
            && self.notes.is_none()
    }

    pub(crate) fn apply_to(self, subject: &mut Subject) {
        if let Some(name) = self.name {
            subject.name = name;
        }
        if let Some(description) = self.description {
            subject.description = description;
        }
        if let Some(color) = self.color {
            subject.color = color;
        }
        if let Some(professor) = self.professor {
            subject.professor = professor;
        }
        if let Some(notes) = self.notes {
            subject.notes = notes;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GradePatch {
    pub name: Option<String>,
    pub score: Option<f64>,
    pub total_points: Option<f64>,
    pub weight: Option<f64>,
}

impl GradePatch {
    /// Returns a copy of `grade` with the present fields replaced.
    pub(crate) fn merged(&self, grade: &Grade) -> Grade {
        Grade {
            id: grade.id.clone(),
            name: self.name.clone().unwrap_or_else(|| grade.name.clone()),
            score: self.score.unwrap_or(grade.score),
            total_points: self.total_points.unwrap_or(grade.total_points),
            weight: self.weight.unwrap_or(grade.weight),
        }
    }
}

//=========================================================================================
// Assistant Chat
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

/// A single entry in a subject's assistant conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub role: ChatRole,
    pub timestamp: DateTime<Utc>,
}
