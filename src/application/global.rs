//! Process-wide navigation document.
//!
//! A document may be installed once; it then lives for the rest of the process.

use std::sync::OnceLock;

use tracing::debug;

use crate::domain::{DomainError, DomainResult, NavDocument};

static DOCUMENT: OnceLock<NavDocument> = OnceLock::new();

/// Install `document` as the process-wide document.
///
/// Fails with [`DomainError::AlreadyInstalled`] on every call after the first.
pub fn install(document: NavDocument) -> DomainResult<&'static NavDocument> {
    let mut installed = false;
    let current = DOCUMENT.get_or_init(|| {
        installed = true;
        document
    });
    if !installed {
        return Err(DomainError::AlreadyInstalled);
    }
    debug!("Installed process-wide navigation document");
    Ok(current)
}

/// The installed document, if any.
pub fn document() -> Option<&'static NavDocument> {
    DOCUMENT.get()
}
