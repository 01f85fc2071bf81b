//! services/api/src/adapters/slot.rs
//!
//! This module contains the storage adapter, the concrete implementation of the
//! `SubjectSlot` port from the `core` crate. The whole collection lives in one
//! JSON file as an array of subject records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;
use uniclass_core::domain::{File, FileKind, Grade, Subject};
use uniclass_core::ports::{PortError, PortResult, SubjectSlot};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A storage adapter that keeps the subject collection in a JSON file.
#[derive(Clone, Debug)]
pub struct JsonFileSlot {
    path: PathBuf,
}

impl JsonFileSlot {
    /// Creates a new `JsonFileSlot`. The file does not need to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

//=========================================================================================
// Serialized Record Structs
//=========================================================================================

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubjectRecord {
    id: String,
    name: String,
    description: String,
    color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    professor: Option<String>,
    notes: String,
    grades: Vec<GradeRecord>,
    files: Vec<FileRecord>,
    created_at: DateTime<Utc>,
}

impl SubjectRecord {
    fn from_domain(subject: &Subject) -> Self {
        Self {
            id: subject.id.clone(),
            name: subject.name.clone(),
            description: subject.description.clone(),
            color: subject.color.clone(),
            professor: subject.professor.clone(),
            notes: subject.notes.clone(),
            grades: subject.grades.iter().map(GradeRecord::from_domain).collect(),
            files: subject.files.iter().map(FileRecord::from_domain).collect(),
            created_at: subject.created_at,
        }
    }

    fn to_domain(self) -> PortResult<Subject> {
        let files = self
            .files
            .into_iter()
            .map(FileRecord::to_domain)
            .collect::<PortResult<Vec<_>>>()?;
        Ok(Subject {
            id: self.id,
            name: self.name,
            description: self.description,
            color: self.color,
            professor: self.professor,
            notes: self.notes,
            grades: self.grades.into_iter().map(GradeRecord::to_domain).collect(),
            files,
            created_at: self.created_at,
        })
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GradeRecord {
    id: String,
    name: String,
    score: f64,
    total_points: f64,
    weight: f64,
}

impl GradeRecord {
    fn from_domain(grade: &Grade) -> Self {
        Self {
            id: grade.id.clone(),
            name: grade.name.clone(),
            score: grade.score,
            total_points: grade.total_points,
            weight: grade.weight,
        }
    }

    fn to_domain(self) -> Grade {
        Grade {
            id: self.id,
            name: self.name,
            score: self.score,
            total_points: self.total_points,
            weight: self.weight,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileRecord {
    id: String,
    name: String,
    url: String,
    #[serde(rename = "type")]
    kind: String,
    uploaded_at: DateTime<Utc>,
}

impl FileRecord {
    fn from_domain(file: &File) -> Self {
        Self {
            id: file.id.clone(),
            name: file.name.clone(),
            url: file.url.clone(),
            kind: file.kind.as_str().to_string(),
            uploaded_at: file.uploaded_at,
        }
    }

    fn to_domain(self) -> PortResult<File> {
        let kind = FileKind::parse(&self.kind).ok_or_else(|| {
            PortError::Corrupt(format!("file {} has unknown type '{}'", self.id, self.kind))
        })?;
        Ok(File {
            id: self.id,
            name: self.name,
            url: self.url,
            kind,
            uploaded_at: self.uploaded_at,
        })
    }
}

/// Parses the stored text into subjects. Any shape mismatch is reported as `Corrupt`.
pub fn decode_subjects(text: &str) -> PortResult<Vec<Subject>> {
    let records: Vec<SubjectRecord> =
        serde_json::from_str(text).map_err(|e| PortError::Corrupt(e.to_string()))?;
    records.into_iter().map(SubjectRecord::to_domain).collect()
}

pub fn encode_subjects(subjects: &[Subject]) -> PortResult<String> {
    let records: Vec<SubjectRecord> = subjects.iter().map(SubjectRecord::from_domain).collect();
    serde_json::to_string(&records).map_err(|e| PortError::Unexpected(e.to_string()))
}

//=========================================================================================
// `SubjectSlot` Trait Implementation
//=========================================================================================

impl SubjectSlot for JsonFileSlot {
    fn load(&self) -> PortResult<Option<Vec<Subject>>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PortError::Unexpected(e.to_string())),
        };
        decode_subjects(&text).map(Some)
    }

    /// Writes to a sibling temp file, then renames it over the slot so a reader
    /// never sees a half-written collection.
    fn save(&self, subjects: &[Subject]) -> PortResult<()> {
        let text = encode_subjects(subjects)?;
        let temp = self.temp_path();
        fs::write(&temp, text).map_err(|e| PortError::Unexpected(e.to_string()))?;
        fs::rename(&temp, &self.path).map_err(|e| PortError::Unexpected(e.to_string()))?;
        debug!("Saved {} subjects to {}.", subjects.len(), self.path.display());
        Ok(())
    }
}
