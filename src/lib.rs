//! Read model, loader and renderers for generated documentation navigation trees.
//!
//! A documentation generator ships its sidebar as a script declaring a nested
//! `[label, target, children]` forest (`NAVTREE`) and a page index
//! (`NAVTREEINDEX`). This crate loads that data into an immutable [`NavTree`],
//! answers lookups over it and renders it as text or HTML.
//!
//! ```ignore
//! let tree = navtree::load_tree(r#"[["Classes", "annotated.html", null]]"#)?;
//! assert_eq!(tree.find_by_target("annotated.html").map(|n| n.label()), Some("Classes"));
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod render;
pub mod util;

pub use application::{load_path, load_script, load_tree, NavTreeLoader};
pub use domain::{NavDocument, NavIndex, NavTree, NodeRef};
