pub mod editor;
pub mod submission;

pub use editor::{apply_edit, EditOp};
pub use submission::{validate_event_fields, AddEventForm, AddEventRequest};
