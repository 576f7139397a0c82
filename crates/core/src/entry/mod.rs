mod error;
mod normalize;
mod types;

pub use error::ValidationError;
pub use normalize::{split_tags, EntryForm};
pub use types::{EntryDraft, PracticeEntry};
