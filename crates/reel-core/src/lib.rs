pub mod audit;
pub mod error;
pub mod facet;
pub mod filter;
pub mod folder;
pub mod lifecycle;
pub mod migrate;
pub mod session;
pub mod store;
pub mod transfer;

pub use audit::DayGroup;
pub use error::TrackerError;
pub use facet::FacetField;
pub use filter::FacetFilter;
pub use migrate::NormalizedDataset;
pub use session::Session;
pub use store::{FileStore, MemoryStore, StateStore};
