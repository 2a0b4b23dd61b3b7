pub mod errors;
pub mod id;
pub mod types;

pub use errors::{ConfigError, DomError, FinderError};
pub use id::{new_id, SessionId};
pub use types::{Rect, ScrollBlock};

pub type Result<T> = std::result::Result<T, FinderError>;
