//! crates/uniclass_core/src/files.rs
//!
//! Read-only views over a subject's files: filtering by kind and per-kind counts.

use crate::domain::{File, FileKind};

/// How many files a subject holds of each kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileCounts {
    pub notes: usize,
    pub lecture: usize,
    pub exam: usize,
    pub other: usize,
}

impl FileCounts {
    pub fn total(&self) -> usize {
        self.notes + self.lecture + self.exam + self.other
    }

    pub fn of(&self, kind: FileKind) -> usize {
        match kind {
            FileKind::Notes => self.notes,
            FileKind::Lecture => self.lecture,
            FileKind::Exam => self.exam,
            FileKind::Other => self.other,
        }
    }
}

/// The files of `kind`, in their stored order. `None` keeps every file.
pub fn files_of_kind(files: &[File], kind: Option<FileKind>) -> Vec<&File> {
    files
        .iter()
        .filter(|f| kind.map_or(true, |k| f.kind == k))
        .collect()
}

pub fn count_by_kind(files: &[File]) -> FileCounts {
    files.iter().fold(FileCounts::default(), |mut counts, file| {
        match file.kind {
            FileKind::Notes => counts.notes += 1,
            FileKind::Lecture => counts.lecture += 1,
            FileKind::Exam => counts.exam += 1,
            FileKind::Other => counts.other += 1,
        }
        counts
    })
}
