//! Renderings of a navigation tree for terminals and HTML sidebars.

use std::fmt::Write;

use askama::Template;
use termtree::Tree;
use tracing::instrument;

use crate::domain::{NavTree, NodeRef};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for NodeRef<'_> {
    fn to_tree_string(&self) -> Tree<String> {
        let leaves: Vec<_> = self.children().map(|c| c.to_tree_string()).collect();
        let mut tree = Tree::new(node_caption(self)).with_leaves(leaves);
        if let Some(name) = self.deferred() {
            tree.push(Tree::new(format!("<{}>", name)));
        }
        tree
    }
}

/// Text tree of a forest under a synthetic `title` root.
#[instrument(level = "debug", skip(tree))]
pub fn to_termtree(tree: &NavTree, title: &str) -> Tree<String> {
    let leaves: Vec<_> = tree
        .get_root()
        .iter()
        .map(|root| root.to_tree_string())
        .collect();
    Tree::new(title.to_string()).with_leaves(leaves)
}

/// One line per node, indented `indent` spaces per level.
/// Nodes deeper than `max_depth` (0 = top level) are skipped.
pub fn to_indented(tree: &NavTree, indent: usize, max_depth: Option<usize>) -> String {
    let mut out = String::new();
    for (depth, node) in tree.flatten() {
        if max_depth.is_some_and(|max| depth > max) {
            continue;
        }
        // Writing to a String cannot fail
        let _ = writeln!(out, "{:width$}{}", "", node_caption(&node), width = depth * indent);
    }
    out
}

/// Nested `<ul>` list, one `<li>` per node.
#[instrument(level = "debug", skip(tree))]
pub fn to_html(tree: &NavTree) -> askama::Result<String> {
    let mut lines = Vec::with_capacity(tree.len() * 2 + 2);
    push_list(&mut lines, tree.get_root().into_iter(), 0);
    NavListTemplate { lines }.render()
}

#[derive(Template)]
#[template(path = "navlist.html")]
struct NavListTemplate<'a> {
    lines: Vec<Line<'a>>,
}

/// One output line; `pad` is the indentation of the enclosing `<ul>`.
struct Line<'a> {
    pad: String,
    kind: LineKind<'a>,
}

enum LineKind<'a> {
    ListOpen,
    Item(NavItem<'a>),
    ItemClose,
    ListClose,
}

struct NavItem<'a> {
    label: &'a str,
    target: Option<&'a str>,
    deferred: Option<&'a str>,
    has_children: bool,
}

fn push_list<'a>(
    lines: &mut Vec<Line<'a>>,
    nodes: impl Iterator<Item = NodeRef<'a>>,
    level: usize,
) {
    let pad = "  ".repeat(level * 2);
    let line = |kind: LineKind<'a>| Line {
        pad: pad.clone(),
        kind,
    };
    lines.push(line(LineKind::ListOpen));
    for node in nodes {
        let has_children = node.child_count() > 0;
        lines.push(line(LineKind::Item(NavItem {
            label: node.label(),
            target: node.target(),
            deferred: node.deferred(),
            has_children,
        })));
        if has_children {
            push_list(lines, node.children(), level + 1);
            lines.push(line(LineKind::ItemClose));
        }
    }
    lines.push(line(LineKind::ListClose));
}

fn node_caption(node: &NodeRef<'_>) -> String {
    node.data().to_string()
}
