use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

/// Data payload for navigation tree nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    /// Text shown in the sidebar
    pub label: String,
    /// Relative URI fragment (`page.html` or `page.html#anchor`), None for pure groups
    pub target: Option<String>,
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            Some(target) => write!(f, "{} ({})", self.label, target),
            None => write!(f, "{}", self.label),
        }
    }
}

/// Shape of the children slot as it was persisted.
///
/// `Null` and an empty `Inline` both describe a leaf; they are kept apart so
/// that serializing a loaded tree reproduces its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildSlot {
    Null,
    Inline,
    /// Children live in a separate script that was not loaded
    Deferred(String),
}

/// Tree node in the arena-based forest.
#[derive(Debug)]
pub(crate) struct TreeNode {
    pub(crate) data: NodeData,
    /// Index of parent node in the arena, None for top-level nodes
    pub(crate) parent: Option<Index>,
    /// Indices of child nodes in display order
    pub(crate) children: Vec<Index>,
    pub(crate) slot: ChildSlot,
}

/// Immutable, ordered forest of navigation nodes.
///
/// Built once by the loader; every public operation is a read.
#[derive(Debug)]
pub struct NavTree {
    arena: Arena<TreeNode>,
    roots: Vec<Index>,
}

impl NavTree {
    /// Top-level nodes in load order.
    pub fn get_root(&self) -> Vec<NodeRef<'_>> {
        self.roots.iter().map(|&idx| self.node_ref(idx)).collect()
    }

    /// Number of nodes in the whole forest.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Pre-order traversal annotated with nesting depth (top level is 0).
    ///
    /// Each call starts a fresh traversal.
    pub fn flatten(&self) -> Flatten<'_> {
        Flatten::new(self)
    }

    /// First node in pre-order whose target equals `uri`.
    #[instrument(level = "debug", skip(self))]
    pub fn find_by_target(&self, uri: &str) -> Option<NodeRef<'_>> {
        self.flatten()
            .map(|(_, node)| node)
            .find(|node| node.target() == Some(uri))
    }

    /// First node in pre-order with the given label.
    #[instrument(level = "debug", skip(self))]
    pub fn find_by_label(&self, label: &str) -> Option<NodeRef<'_>> {
        self.flatten()
            .map(|(_, node)| node)
            .find(|node| node.label() == label)
    }

    /// Follow child positions starting at the top level: `[1, 0]` is the first
    /// child of the second root.
    pub fn node_at_path(&self, path: &[usize]) -> Option<NodeRef<'_>> {
        let (first, rest) = path.split_first()?;
        let mut idx = *self.roots.get(*first)?;
        for &pos in rest {
            idx = *self.arena.get(idx)?.children.get(pos)?;
        }
        Some(self.node_ref(idx))
    }

    /// Height of the deepest branch; 0 for an empty forest.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.flatten()
            .map(|(depth, _)| depth + 1)
            .max()
            .unwrap_or(0)
    }

    /// Targets of all leaf nodes in pre-order. Leaves without a target are skipped.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_targets(&self) -> Vec<String> {
        self.flatten()
            .filter(|(_, node)| node.is_leaf())
            .filter_map(|(_, node)| node.target().map(str::to_string))
            .collect()
    }

    /// Names of child scripts that were referenced but not loaded, in pre-order.
    pub fn deferred_refs(&self) -> Vec<&str> {
        self.flatten()
            .filter_map(|(_, node)| node.deferred())
            .collect()
    }

    fn node_ref(&self, idx: Index) -> NodeRef<'_> {
        NodeRef { tree: self, idx }
    }
}

impl PartialEq for NavTree {
    fn eq(&self, other: &Self) -> bool {
        self.get_root() == other.get_root()
    }
}

impl Eq for NavTree {}

/// Borrowed view of one node.
///
/// Equality is by value: label, target, child slot shape and children, recursively.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a NavTree,
    idx: Index,
}

impl<'a> NodeRef<'a> {
    pub fn data(&self) -> &'a NodeData {
        &self.node().data
    }

    pub fn label(&self) -> &'a str {
        &self.node().data.label
    }

    pub fn target(&self) -> Option<&'a str> {
        self.node().data.target.as_deref()
    }

    pub fn slot(&self) -> &'a ChildSlot {
        &self.node().slot
    }

    /// Name of the unloaded child script, if the children were deferred.
    pub fn deferred(&self) -> Option<&'a str> {
        match &self.node().slot {
            ChildSlot::Deferred(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.node().children.is_empty() && self.deferred().is_none()
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        self.node()
            .children
            .iter()
            .map(move |&idx| tree.node_ref(idx))
    }

    pub fn child_count(&self) -> usize {
        self.node().children.len()
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.node().parent.map(|idx| self.tree.node_ref(idx))
    }

    /// Labels from the top-level ancestor down to this node.
    pub fn label_path(&self) -> Vec<&'a str> {
        let mut labels = vec![self.label()];
        let mut current = self.parent();
        while let Some(node) = current {
            labels.push(node.label());
            current = node.parent();
        }
        labels.reverse();
        labels
    }

    fn node(&self) -> &'a TreeNode {
        // Indices handed out by a NavTree always point into its own arena and
        // nodes are never removed.
        &self.tree.arena[self.idx]
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.data() == other.data()
            && self.slot() == other.slot()
            && self.child_count() == other.child_count()
            && self.children().zip(other.children()).all(|(a, b)| a == b)
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Node");
        s.field("label", &self.label()).field("target", &self.target());
        match self.slot() {
            ChildSlot::Deferred(name) => s.field("deferred", name),
            _ => s.field("children", &self.children().collect::<Vec<_>>()),
        };
        s.finish()
    }
}

impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.data(), f)
    }
}

/// Lazy pre-order iterator over `(depth, node)` pairs.
#[derive(Clone)]
pub struct Flatten<'a> {
    tree: &'a NavTree,
    stack: Vec<(usize, Index)>,
}

impl<'a> Flatten<'a> {
    fn new(tree: &'a NavTree) -> Self {
        // Reverse so the first root is popped first
        let stack = tree.roots.iter().rev().map(|&idx| (0, idx)).collect();
        Self { tree, stack }
    }
}

impl<'a> Iterator for Flatten<'a> {
    type Item = (usize, NodeRef<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, idx) = self.stack.pop()?;
        let node = self.tree.arena.get(idx)?;
        for &child in node.children.iter().rev() {
            self.stack.push((depth + 1, child));
        }
        Some((depth, self.tree.node_ref(idx)))
    }
}

/// Incremental construction of a [`NavTree`]; only the loader uses it so a
/// partially built forest never escapes a failed load.
#[derive(Debug, Default)]
pub(crate) struct NavTreeBuilder {
    arena: Arena<TreeNode>,
    roots: Vec<Index>,
}

impl NavTreeBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[instrument(level = "trace", skip(self))]
    pub(crate) fn insert_node(
        &mut self,
        data: NodeData,
        slot: ChildSlot,
        parent: Option<Index>,
    ) -> Index {
        let node = TreeNode {
            data,
            parent,
            children: Vec::new(),
            slot,
        };
        let node_idx = self.arena.insert(node);

        match parent.and_then(|p| self.arena.get_mut(p)) {
            Some(parent) => parent.children.push(node_idx),
            None => self.roots.push(node_idx),
        }

        node_idx
    }

    pub(crate) fn build(self) -> NavTree {
        NavTree {
            arena: self.arena,
            roots: self.roots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(label: &str, target: Option<&str>) -> NodeData {
        NodeData {
            label: label.to_string(),
            target: target.map(str::to_string),
        }
    }

    /// A(B, C(D)) plus a second root E
    fn sample() -> NavTree {
        let mut b = NavTreeBuilder::new();
        let a = b.insert_node(data("A", Some("a.html")), ChildSlot::Inline, None);
        b.insert_node(data("B", Some("b.html")), ChildSlot::Null, Some(a));
        let c = b.insert_node(data("C", None), ChildSlot::Inline, Some(a));
        b.insert_node(data("D", Some("a.html")), ChildSlot::Null, Some(c));
        b.insert_node(data("E", None), ChildSlot::Deferred("e_dup".into()), None);
        b.build()
    }

    #[test]
    fn given_forest_when_flatten_then_yields_preorder_with_depth() {
        let tree = sample();
        let flat: Vec<_> = tree
            .flatten()
            .map(|(d, n)| (d, n.label().to_string()))
            .collect();
        assert_eq!(
            flat,
            vec![
                (0, "A".to_string()),
                (1, "B".to_string()),
                (1, "C".to_string()),
                (2, "D".to_string()),
                (0, "E".to_string()),
            ]
        );
    }

    #[test]
    fn given_flatten_iterator_when_cloned_then_restarts_independently() {
        let tree = sample();
        let mut first = tree.flatten();
        first.next();
        let second = first.clone();
        assert_eq!(first.count(), second.count());
        assert_eq!(tree.flatten().count(), tree.len());
    }

    #[test]
    fn given_duplicate_targets_when_find_by_target_then_returns_first_in_preorder() {
        let tree = sample();
        let found = tree.find_by_target("a.html").expect("node");
        assert_eq!(found.label(), "A");
        assert!(tree.find_by_target("missing.html").is_none());
    }

    #[test]
    fn given_forest_when_querying_shape_then_reports_depth_and_leaves() {
        let tree = sample();
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.leaf_targets(), vec!["b.html", "a.html"]);
        assert_eq!(tree.deferred_refs(), vec!["e_dup"]);
    }

    #[test]
    fn given_path_when_node_at_path_then_follows_child_positions() {
        let tree = sample();
        let d = tree.node_at_path(&[0, 1, 0]).expect("node");
        assert_eq!(d.label(), "D");
        assert_eq!(d.label_path(), vec!["A", "C", "D"]);
        assert_eq!(d.parent().map(|p| p.label()), Some("C"));
        assert!(tree.node_at_path(&[]).is_none());
        assert!(tree.node_at_path(&[0, 5]).is_none());
    }

    #[test]
    fn given_two_builds_of_same_input_when_compared_then_equal() {
        assert_eq!(sample(), sample());
        assert_eq!(sample().get_root(), sample().get_root());
    }

    #[test]
    fn given_null_and_empty_children_when_compared_then_differ() {
        let mut left = NavTreeBuilder::new();
        left.insert_node(data("A", None), ChildSlot::Null, None);
        let mut right = NavTreeBuilder::new();
        right.insert_node(data("A", None), ChildSlot::Inline, None);
        assert_ne!(left.build(), right.build());
    }

    #[test]
    fn given_empty_builder_when_built_then_tree_is_empty() {
        let tree = NavTreeBuilder::new().build();
        assert!(tree.is_empty());
        assert_eq!(tree.depth(), 0);
        assert!(tree.get_root().is_empty());
    }
}
