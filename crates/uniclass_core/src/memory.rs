//! crates/uniclass_core/src/memory.rs
//!
//! An in-process `SubjectSlot` used when no durable file is wanted (tests, previews).

use crate::domain::Subject;
use crate::ports::{PortError, PortResult, SubjectSlot};
use std::sync::{Arc, Mutex};

/// Holds the last saved collection in memory. Clones share the same backing slot,
/// so a test can keep one handle while the store owns another.
#[derive(Clone, Default)]
pub struct MemorySlot {
    saved: Arc<Mutex<Option<Vec<Subject>>>>,
    writes: Arc<Mutex<usize>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot that already holds `subjects`, as if a previous run had saved them.
    pub fn with_saved(subjects: Vec<Subject>) -> Self {
        let slot = Self::default();
        if let Ok(mut saved) = slot.saved.lock() {
            *saved = Some(subjects);
        }
        slot
    }

    /// The collection as it was last written.
    pub fn saved(&self) -> Option<Vec<Subject>> {
        self.saved.lock().ok().and_then(|saved| saved.clone())
    }

    /// Number of successful `save` calls.
    pub fn write_count(&self) -> usize {
        self.writes.lock().map(|w| *w).unwrap_or(0)
    }
}

impl SubjectSlot for MemorySlot {
    fn load(&self) -> PortResult<Option<Vec<Subject>>> {
        let saved = self
            .saved
            .lock()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(saved.clone())
    }

    fn save(&self, subjects: &[Subject]) -> PortResult<()> {
        let mut saved = self
            .saved
            .lock()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        *saved = Some(subjects.to_vec());
        let mut writes = self
            .writes
            .lock()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        *writes += 1;
        Ok(())
    }
}
