//! Domain layer: the navigation tree read model
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod document;
pub mod error;
pub mod index;

pub(crate) use arena::NavTreeBuilder;
pub use arena::{ChildSlot, Flatten, NavTree, NodeData, NodeRef};
pub use document::{NavDocument, SyncMessages};
pub use error::{DomainError, DomainResult};
pub use index::NavIndex;
