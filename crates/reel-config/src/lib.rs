pub mod paths;

pub use paths::{base_path_override, PathManager};
