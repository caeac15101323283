pub mod types;
pub mod text;
pub mod data;
pub mod collect;
pub mod config;
pub mod errors;
pub mod logging;

pub use collect::*;
pub use config::CollectConfig;
pub use errors::{CollectError, Result};
pub use types::{FragmentCode, ObjectId, Tag, WritingSystem};
