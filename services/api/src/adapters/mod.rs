pub mod assistant;
pub mod slot;

pub use assistant::ScriptedAssistant;
pub use slot::JsonFileSlot;
