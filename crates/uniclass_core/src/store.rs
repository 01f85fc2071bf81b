//! crates/uniclass_core/src/store.rs
//!
//! The single authoritative collection of subjects. Every mutation goes through
//! `SubjectStore`, which writes the whole collection to its slot once the change
//! is complete in memory.

use crate::domain::{File, Grade, GradePatch, NewFile, NewGrade, NewSubject, Subject, SubjectPatch};
use crate::grades;
use crate::ports::SubjectSlot;
use crate::seed::seed_subjects;
use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Why a store operation had no effect.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Subject {0} not found")]
    SubjectNotFound(String),
    #[error("Grade {grade_id} not found in subject {subject_id}")]
    GradeNotFound { subject_id: String, grade_id: String },
    #[error("File {file_id} not found in subject {subject_id}")]
    FileNotFound { subject_id: String, file_id: String },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        !matches!(self, StoreError::InvalidInput(_))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Generates an id that `taken` does not already claim.
fn fresh_id(taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id = Uuid::new_v4().simple().to_string();
        if !taken(&id) {
            return id;
        }
    }
}

pub struct SubjectStore {
    subjects: Vec<Subject>,
    slot: Box<dyn SubjectSlot>,
}

impl SubjectStore {
    /// Builds the store from whatever the slot holds, falling back to the seed
    /// subjects when the slot is empty, unreadable or holds something else.
    pub fn open(slot: Box<dyn SubjectSlot>) -> Self {
        let subjects = match slot.load() {
            Ok(Some(subjects)) => {
                info!("Loaded {} subjects from storage.", subjects.len());
                subjects
            }
            Ok(None) => {
                info!("No saved subjects found. Starting from the sample data.");
                seed_subjects()
            }
            Err(e) => {
                warn!("Saved subjects could not be read ({}). Starting from the sample data.", e);
                seed_subjects()
            }
        };
        Self { subjects, slot }
    }

    /// Builds a store over an explicit collection without reading the slot.
    pub fn with_subjects(slot: Box<dyn SubjectSlot>, subjects: Vec<Subject>) -> Self {
        Self { subjects, slot }
    }

    pub fn list_subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn get_subject_by_id(&self, id: &str) -> StoreResult<&Subject> {
        self.subjects
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::SubjectNotFound(id.to_string()))
    }

    /// The subject's current weighted average, or `None` while it has no grades.
    pub fn subject_average(&self, id: &str) -> StoreResult<Option<f64>> {
        let subject = self.get_subject_by_id(id)?;
        Ok(grades::current_grade(&subject.grades))
    }

    //=====================================================================================
    // Subjects
    //=====================================================================================

    pub fn create_subject(&mut self, fields: NewSubject) -> StoreResult<Subject> {
        if fields.name.trim().is_empty() {
            return Err(StoreError::InvalidInput(
                "subject name must not be empty".to_string(),
            ));
        }

        let id = fresh_id(|candidate| self.subjects.iter().any(|s| s.id == candidate));
        let subject = Subject {
            id,
            name: fields.name,
            description: fields.description,
            color: fields.color,
            professor: fields.professor,
            notes: fields.notes,
            grades: Vec::new(),
            files: Vec::new(),
            created_at: Utc::now(),
        };
        self.subjects.push(subject.clone());
        self.persist();
        info!("Created subject {} ('{}').", subject.id, subject.name);
        Ok(subject)
    }

    pub fn update_subject(&mut self, id: &str, patch: SubjectPatch) -> StoreResult<Subject> {
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(StoreError::InvalidInput(
                    "subject name must not be empty".to_string(),
                ));
            }
        }

        let subject = self.subject_mut(id)?;
        patch.apply_to(subject);
        let updated = subject.clone();
        self.persist();
        Ok(updated)
    }

    /// Removes the subject together with all of its grades and files.
    pub fn delete_subject(&mut self, id: &str) -> StoreResult<Subject> {
        let index = self
            .subjects
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| StoreError::SubjectNotFound(id.to_string()))?;
        let removed = self.subjects.remove(index);
        self.persist();
        info!("Deleted subject {} ('{}').", removed.id, removed.name);
        Ok(removed)
    }

    //=====================================================================================
    // Grades
    //=====================================================================================

    pub fn create_grade(&mut self, subject_id: &str, fields: NewGrade) -> StoreResult<Grade> {
        fields.validate().map_err(StoreError::InvalidInput)?;

        let subject = self.subject_mut(subject_id)?;
        let id = fresh_id(|candidate| subject.grades.iter().any(|g| g.id == candidate));
        let grade = Grade {
            id,
            name: fields.name,
            score: fields.score,
            total_points: fields.total_points,
            weight: fields.weight,
        };
        subject.grades.push(grade.clone());
        self.persist();
        Ok(grade)
    }

    pub fn update_grade(
        &mut self,
        subject_id: &str,
        grade_id: &str,
        patch: GradePatch,
    ) -> StoreResult<Grade> {
        let subject = self.subject_mut(subject_id)?;
        let grade = subject
            .grades
            .iter_mut()
            .find(|g| g.id == grade_id)
            .ok_or_else(|| StoreError::GradeNotFound {
                subject_id: subject_id.to_string(),
                grade_id: grade_id.to_string(),
            })?;

        let merged = patch.merged(grade);
        merged.validate().map_err(StoreError::InvalidInput)?;
        *grade = merged.clone();
        self.persist();
        Ok(merged)
    }

    pub fn delete_grade(&mut self, subject_id: &str, grade_id: &str) -> StoreResult<Grade> {
        let subject = self.subject_mut(subject_id)?;
        let index = subject
            .grades
            .iter()
            .position(|g| g.id == grade_id)
            .ok_or_else(|| StoreError::GradeNotFound {
                subject_id: subject_id.to_string(),
                grade_id: grade_id.to_string(),
            })?;
        let removed = subject.grades.remove(index);
        self.persist();
        Ok(removed)
    }

    //=====================================================================================
    // Files
    //=====================================================================================

    pub fn create_file(&mut self, subject_id: &str, fields: NewFile) -> StoreResult<File> {
        if fields.name.trim().is_empty() {
            return Err(StoreError::InvalidInput(
                "file name must not be empty".to_string(),
            ));
        }

        let subject = self.subject_mut(subject_id)?;
        let id = fresh_id(|candidate| subject.files.iter().any(|f| f.id == candidate));
        let file = File {
            id,
            name: fields.name,
            url: fields.url,
            kind: fields.kind,
            uploaded_at: Utc::now(),
        };
        subject.files.push(file.clone());
        self.persist();
        Ok(file)
    }

    pub fn delete_file(&mut self, subject_id: &str, file_id: &str) -> StoreResult<File> {
        let subject = self.subject_mut(subject_id)?;
        let index = subject
            .files
            .iter()
            .position(|f| f.id == file_id)
            .ok_or_else(|| StoreError::FileNotFound {
                subject_id: subject_id.to_string(),
                file_id: file_id.to_string(),
            })?;
        let removed = subject.files.remove(index);
        self.persist();
        Ok(removed)
    }

    //=====================================================================================
    // Internals
    //=====================================================================================

    fn subject_mut(&mut self, id: &str) -> StoreResult<&mut Subject> {
        self.subjects
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::SubjectNotFound(id.to_string()))
    }

    /// Writes the full collection. A failed write is logged and otherwise ignored;
    /// the in-memory collection stays authoritative.
    fn persist(&self) {
        if let Err(e) = self.slot.save(&self.subjects) {
            error!("Failed to save {} subjects: {}", self.subjects.len(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FileKind;
    use crate::memory::MemorySlot;
    use crate::ports::{PortError, PortResult};
    use std::collections::HashSet;
    use std::sync::Mutex;

    fn empty_store() -> (SubjectStore, MemorySlot) {
        let slot = MemorySlot::new();
        let store = SubjectStore::with_subjects(Box::new(slot.clone()), Vec::new());
        (store, slot)
    }

    fn new_subject(name: &str) -> NewSubject {
        NewSubject {
            name: name.to_string(),
            description: "desc".to_string(),
            color: "#000000".to_string(),
            professor: None,
            notes: String::new(),
        }
    }

    fn new_grade(score: f64, total_points: f64, weight: f64) -> NewGrade {
        NewGrade {
            name: "Quiz".to_string(),
            score,
            total_points,
            weight,
        }
    }

    struct FailingSlot;

    impl SubjectSlot for FailingSlot {
        fn load(&self) -> PortResult<Option<Vec<Subject>>> {
            Err(PortError::Corrupt("not json".to_string()))
        }

        fn save(&self, _subjects: &[Subject]) -> PortResult<()> {
            Err(PortError::Unexpected("disk full".to_string()))
        }
    }

    /// Rejects the first save, then behaves like a `MemorySlot`.
    struct FailsOnceSlot {
        inner: MemorySlot,
        failed: Mutex<bool>,
    }

    impl SubjectSlot for FailsOnceSlot {
        fn load(&self) -> PortResult<Option<Vec<Subject>>> {
            self.inner.load()
        }

        fn save(&self, subjects: &[Subject]) -> PortResult<()> {
            let mut failed = self.failed.lock().unwrap();
            if !*failed {
                *failed = true;
                return Err(PortError::Unexpected("disk full".to_string()));
            }
            self.inner.save(subjects)
        }
    }

    #[test]
    fn open_uses_seed_when_slot_is_empty() {
        let store = SubjectStore::open(Box::new(MemorySlot::new()));
        let names: Vec<&str> = store.list_subjects().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Introduction to Computer Science", "Calculus II"]);
    }

    #[test]
    fn open_uses_seed_when_slot_is_unreadable() {
        let store = SubjectStore::open(Box::new(FailingSlot));
        assert_eq!(store.list_subjects().len(), 2);
    }

    #[test]
    fn saved_empty_collection_is_not_replaced_by_seed() {
        let store = SubjectStore::open(Box::new(MemorySlot::with_saved(Vec::new())));
        assert!(store.list_subjects().is_empty());
    }

    #[test]
    fn open_prefers_saved_subjects() {
        let (mut store, slot) = empty_store();
        store.create_subject(new_subject("Chemistry")).unwrap();

        let reopened = SubjectStore::open(Box::new(slot));
        assert_eq!(reopened.list_subjects().len(), 1);
        assert_eq!(reopened.list_subjects()[0].name, "Chemistry");
    }

    #[test]
    fn create_subject_rejects_blank_name_without_writing() {
        let (mut store, slot) = empty_store();
        let err = store.create_subject(new_subject("   ")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));
        assert!(store.list_subjects().is_empty());
        assert_eq!(slot.write_count(), 0);
    }

    #[test]
    fn every_mutation_writes_the_whole_collection() {
        let (mut store, slot) = empty_store();
        let assert_written = |store: &SubjectStore, writes: usize| {
            assert_eq!(slot.write_count(), writes);
            assert_eq!(slot.saved().unwrap(), store.list_subjects().to_vec());
        };

        let a = store.create_subject(new_subject("A")).unwrap();
        assert_written(&store, 1);
        let b = store.create_subject(new_subject("B")).unwrap();
        assert_written(&store, 2);
        store
            .update_subject(&a.id, SubjectPatch { notes: Some("ch. 1".to_string()), ..Default::default() })
            .unwrap();
        assert_written(&store, 3);

        let g = store.create_grade(&a.id, new_grade(1.0, 2.0, 3.0)).unwrap();
        assert_written(&store, 4);
        store
            .update_grade(&a.id, &g.id, GradePatch { weight: Some(4.0), ..Default::default() })
            .unwrap();
        assert_written(&store, 5);
        store.delete_grade(&a.id, &g.id).unwrap();
        assert_written(&store, 6);

        let f = store
            .create_file(
                &a.id,
                NewFile { name: "a.pdf".to_string(), url: "#".to_string(), kind: FileKind::Notes },
            )
            .unwrap();
        assert_written(&store, 7);
        assert_eq!(slot.saved().unwrap()[0].files.len(), 1);
        store.delete_file(&a.id, &f.id).unwrap();
        assert_written(&store, 8);
        assert!(slot.saved().unwrap()[0].files.is_empty());

        store.delete_subject(&b.id).unwrap();
        assert_written(&store, 9);
        assert_eq!(slot.saved().unwrap().len(), 1);
    }

    #[test]
    fn write_after_a_failed_one_saves_everything() {
        let slot = FailsOnceSlot { inner: MemorySlot::new(), failed: Mutex::new(false) };
        let memory = slot.inner.clone();
        let mut store = SubjectStore::with_subjects(Box::new(slot), Vec::new());

        let first = store.create_subject(new_subject("Lost write")).unwrap();
        assert_eq!(memory.write_count(), 0);
        assert!(memory.saved().is_none());

        store.create_subject(new_subject("Next write")).unwrap();
        let saved = memory.saved().unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].id, first.id);
        assert_eq!(saved, store.list_subjects().to_vec());
    }

    #[test]
    fn empty_patch_leaves_subject_unchanged() {
        let (mut store, _slot) = empty_store();
        let created = store.create_subject(new_subject("History")).unwrap();
        let updated = store.update_subject(&created.id, SubjectPatch::default()).unwrap();
        assert_eq!(updated, created);
    }

    #[test]
    fn update_subject_merges_fields_and_keeps_identity() {
        let (mut store, _slot) = empty_store();
        let created = store.create_subject(new_subject("History")).unwrap();
        let updated = store
            .update_subject(
                &created.id,
                SubjectPatch {
                    name: Some("World History".to_string()),
                    professor: Some(Some("Dr. Bloch".to_string())),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.name, "World History");
        assert_eq!(updated.description, "desc");
        assert_eq!(updated.professor.as_deref(), Some("Dr. Bloch"));
    }

    #[test]
    fn update_subject_rejects_blank_name() {
        let (mut store, _slot) = empty_store();
        let created = store.create_subject(new_subject("History")).unwrap();
        let err = store
            .update_subject(
                &created.id,
                SubjectPatch { name: Some(String::new()), ..Default::default() },
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));
        assert_eq!(store.get_subject_by_id(&created.id).unwrap().name, "History");
    }

    #[test]
    fn unknown_ids_report_not_found_and_change_nothing() {
        let (mut store, slot) = empty_store();
        let s = store.create_subject(new_subject("Art")).unwrap();
        let writes = slot.write_count();

        assert_eq!(
            store.update_subject("nope", SubjectPatch::default()).unwrap_err(),
            StoreError::SubjectNotFound("nope".to_string())
        );
        assert!(store.delete_subject("nope").unwrap_err().is_not_found());
        assert!(store.create_grade("nope", new_grade(1.0, 1.0, 1.0)).is_err());
        assert!(matches!(
            store.update_grade(&s.id, "nope", GradePatch::default()),
            Err(StoreError::GradeNotFound { .. })
        ));
        assert!(matches!(
            store.delete_grade(&s.id, "nope"),
            Err(StoreError::GradeNotFound { .. })
        ));
        assert!(matches!(
            store.delete_file(&s.id, "nope"),
            Err(StoreError::FileNotFound { .. })
        ));
        assert_eq!(slot.write_count(), writes);
    }

    #[test]
    fn delete_subject_cascades() {
        let (mut store, slot) = empty_store();
        let s = store.create_subject(new_subject("Biology")).unwrap();
        store.create_grade(&s.id, new_grade(8.0, 10.0, 50.0)).unwrap();
        store
            .create_file(
                &s.id,
                NewFile { name: "cells.pdf".to_string(), url: "blob:1".to_string(), kind: FileKind::Notes },
            )
            .unwrap();

        let removed = store.delete_subject(&s.id).unwrap();
        assert_eq!(removed.grades.len(), 1);
        assert_eq!(removed.files.len(), 1);
        assert!(store.get_subject_by_id(&s.id).unwrap_err().is_not_found());
        assert!(slot.saved().unwrap().is_empty());
    }

    #[test]
    fn thousand_grades_get_distinct_ids() {
        let (mut store, _slot) = empty_store();
        let s = store.create_subject(new_subject("Stats")).unwrap();
        for _ in 0..1000 {
            store.create_grade(&s.id, new_grade(1.0, 1.0, 1.0)).unwrap();
        }
        let ids: HashSet<String> = store
            .get_subject_by_id(&s.id)
            .unwrap()
            .grades
            .iter()
            .map(|g| g.id.clone())
            .collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn grade_mutations_keep_parent_identity() {
        let (mut store, _slot) = empty_store();
        let s = store.create_subject(new_subject("Music")).unwrap();
        let g = store.create_grade(&s.id, new_grade(3.0, 4.0, 10.0)).unwrap();
        store
            .update_grade(&s.id, &g.id, GradePatch { score: Some(4.0), ..Default::default() })
            .unwrap();
        let after = store.get_subject_by_id(&s.id).unwrap();
        assert_eq!(after.id, s.id);
        assert_eq!(after.created_at, s.created_at);
        assert_eq!(after.grades[0].score, 4.0);
    }

    #[test]
    fn invalid_grades_are_rejected_at_the_boundary() {
        let (mut store, _slot) = empty_store();
        let s = store.create_subject(new_subject("Law")).unwrap();
        assert!(matches!(
            store.create_grade(&s.id, new_grade(5.0, 0.0, 10.0)),
            Err(StoreError::InvalidInput(_))
        ));
        let g = store.create_grade(&s.id, new_grade(5.0, 10.0, 10.0)).unwrap();
        assert!(matches!(
            store.update_grade(&s.id, &g.id, GradePatch { total_points: Some(-1.0), ..Default::default() }),
            Err(StoreError::InvalidInput(_))
        ));
        assert_eq!(store.get_subject_by_id(&s.id).unwrap().grades[0].total_points, 10.0);
    }

    #[test]
    fn subject_average_distinguishes_no_grades() {
        let (mut store, _slot) = empty_store();
        let s = store.create_subject(new_subject("Calc II")).unwrap();
        assert_eq!(store.subject_average(&s.id).unwrap(), None);
        assert_eq!(grades::aggregate(&store.get_subject_by_id(&s.id).unwrap().grades), 0.0);

        store.create_grade(&s.id, new_grade(50.0, 100.0, 10.0)).unwrap();
        store.create_grade(&s.id, new_grade(100.0, 100.0, 10.0)).unwrap();
        assert_eq!(store.subject_average(&s.id).unwrap(), Some(75.0));
    }

    #[test]
    fn failed_writes_keep_memory_authoritative() {
        let mut store = SubjectStore::with_subjects(Box::new(FailingSlot), Vec::new());
        let s = store.create_subject(new_subject("Geo")).unwrap();
        assert_eq!(store.get_subject_by_id(&s.id).unwrap().name, "Geo");
    }

    #[test]
    fn files_get_id_and_timestamp() {
        let (mut store, _slot) = empty_store();
        let s = store.create_subject(new_subject("Drama")).unwrap();
        let before = Utc::now();
        let f = store
            .create_file(
                &s.id,
                NewFile { name: "script.pdf".to_string(), url: "#".to_string(), kind: FileKind::Exam },
            )
            .unwrap();
        assert!(!f.id.is_empty());
        assert!(f.uploaded_at >= before);
        let removed = store.delete_file(&s.id, &f.id).unwrap();
        assert_eq!(removed, f);
        assert!(store.get_subject_by_id(&s.id).unwrap().files.is_empty());
    }
}
