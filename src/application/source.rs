//! I/O boundary for deferred child scripts
//!
//! A generated tree may name a child script instead of listing children
//! inline. The loader fetches those scripts through [`ScriptSource`] so it can
//! be exercised without touching the filesystem.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

/// Provider of child scripts by name (without the `.js` extension).
pub trait ScriptSource: Send + Sync {
    /// Text of script `name`, or `None` when no such script exists.
    fn read_script(&self, name: &str) -> io::Result<Option<String>>;
}

/// Scripts stored as `<root>/<name>.js`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn script_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.js", name))
    }
}

impl ScriptSource for DirectorySource {
    #[instrument(level = "debug", skip(self))]
    fn read_script(&self, name: &str) -> io::Result<Option<String>> {
        let path = self.script_path(name);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No script at {}", path.display());
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// In-memory scripts, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    scripts: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(name, text);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.scripts.insert(name.into(), text.into());
    }
}

impl ScriptSource for MemorySource {
    fn read_script(&self, name: &str) -> io::Result<Option<String>> {
        Ok(self.scripts.get(name).cloned())
    }
}
