//! crates/uniclass_core/src/notice.rs
//!
//! User-facing notifications describing the outcome of a store operation.

use crate::store::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    fn new(title: &str, description: String, variant: NoticeVariant) -> Self {
        Self {
            title: title.to_string(),
            description,
            variant,
        }
    }

    pub fn subject_created(name: &str) -> Self {
        Self::new(
            "Subject Created",
            format!("{} has been added to your subjects.", name),
            NoticeVariant::Default,
        )
    }

    pub fn subject_updated() -> Self {
        Self::new(
            "Subject Updated",
            "Your changes have been saved.".to_string(),
            NoticeVariant::Default,
        )
    }

    pub fn subject_deleted(name: &str) -> Self {
        Self::new(
            "Subject Deleted",
            format!("{} has been removed.", name),
            NoticeVariant::Destructive,
        )
    }

    pub fn grade_added(name: &str) -> Self {
        Self::new(
            "Grade Added",
            format!("{} has been added to your grades.", name),
            NoticeVariant::Default,
        )
    }

    pub fn grade_updated() -> Self {
        Self::new(
            "Grade Updated",
            "Your grade has been updated.".to_string(),
            NoticeVariant::Default,
        )
    }

    pub fn grade_deleted() -> Self {
        Self::new(
            "Grade Deleted",
            "The grade has been removed.".to_string(),
            NoticeVariant::Default,
        )
    }

    pub fn file_added(name: &str) -> Self {
        Self::new(
            "File Added",
            format!("{} has been uploaded.", name),
            NoticeVariant::Default,
        )
    }

    pub fn file_deleted() -> Self {
        Self::new(
            "File Deleted",
            "The file has been removed.".to_string(),
            NoticeVariant::Default,
        )
    }

    pub fn assistant_failed() -> Self {
        Self::new(
            "Error",
            "Failed to generate AI response. Please try again.".to_string(),
            NoticeVariant::Destructive,
        )
    }

    pub fn invalid_input(description: &str) -> Self {
        Self::new("Invalid Input", description.to_string(), NoticeVariant::Destructive)
    }

    pub fn empty_prompt() -> Self {
        Self::new(
            "Empty Message",
            "Type a question before sending it to the assistant.".to_string(),
            NoticeVariant::Destructive,
        )
    }

    pub fn from_error(err: &StoreError) -> Self {
        let title = match err {
            StoreError::InvalidInput(_) => "Invalid Input",
            _ => "Not Found",
        };
        Self::new(title, err.to_string(), NoticeVariant::Destructive)
    }
}
