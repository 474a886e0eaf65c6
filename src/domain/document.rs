use crate::domain::arena::NavTree;
use crate::domain::index::NavIndex;

/// Tooltips of the panel synchronisation toggle shipped with the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncMessages {
    pub on: String,
    pub off: String,
}

/// Everything a generated navigation script exports.
#[derive(Debug, PartialEq, Eq)]
pub struct NavDocument {
    pub tree: NavTree,
    pub index: NavIndex,
    pub sync: Option<SyncMessages>,
}

impl NavDocument {
    pub fn new(tree: NavTree, index: NavIndex) -> Self {
        Self {
            tree,
            index,
            sync: None,
        }
    }

    pub fn with_sync(mut self, sync: SyncMessages) -> Self {
        self.sync = Some(sync);
        self
    }
}
