pub mod chat;
pub mod domain;
pub mod files;
pub mod grades;
pub mod memory;
pub mod notice;
pub mod ports;
pub mod seed;
pub mod store;

pub use chat::ChatLog;
pub use domain::{
    ChatMessage, ChatRole, File, FileKind, Grade, GradePatch, NewFile, NewGrade, NewSubject,
    Subject, SubjectPatch,
};
pub use files::{count_by_kind, files_of_kind, FileCounts};
pub use grades::aggregate;
pub use memory::MemorySlot;
pub use notice::{Notice, NoticeVariant};
pub use ports::{AssistantService, PortError, PortResult, SubjectSlot};
pub use store::{StoreError, StoreResult, SubjectStore};
