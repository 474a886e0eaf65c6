//! Flat page index of a generated navigation tree.

/// Ordered list of URI fragments. Entry `i` is the first page held by index
/// chunk `i` (`navtreeindex<i>.js`), so the entries are sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavIndex {
    entries: Vec<String>,
}

impl NavIndex {
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&str> {
        self.entries.get(position).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Chunk that would contain `page`: the last entry sorting at or before it.
    ///
    /// None when the index is empty or `page` sorts before the first entry.
    pub fn chunk_for(&self, page: &str) -> Option<usize> {
        self.entries
            .partition_point(|entry| entry.as_str() <= page)
            .checked_sub(1)
    }
}

impl From<Vec<String>> for NavIndex {
    fn from(entries: Vec<String>) -> Self {
        Self::new(entries)
    }
}
