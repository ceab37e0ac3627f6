// Internal domain types, never serialized directly
pub mod item_changes;

pub use item_changes::{FieldChange, ItemChanges};
