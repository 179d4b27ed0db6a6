pub mod dataset;
pub mod entry;
pub mod log_event;

pub use dataset::Dataset;
pub use entry::{Entry, EntryDraft};
pub use log_event::{LogEvent, LogType};
