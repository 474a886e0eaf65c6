//! Application layer: loading, script reading and export
//!
//! This layer turns persisted navigation data into domain objects and depends
//! on the [`source::ScriptSource`] I/O boundary.

pub mod error;
pub mod error_ext;
pub mod export;
pub mod global;
pub mod loader;
pub mod script;
pub mod source;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use loader::{load_path, load_script, load_tree, NavTreeLoader};
pub use source::{DirectorySource, MemorySource, ScriptSource};
