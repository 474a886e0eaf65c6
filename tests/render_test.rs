//! Text and HTML renderings of a navigation tree

use serde_json::json;

use navtree::load_tree;
use navtree::render::{to_html, to_indented, to_termtree};

fn sample() -> navtree::NavTree {
    load_tree(
        &json!([
            ["Classes", "annotated.html", [
                ["Class List", "annotated.html", "annotated_dup"],
                ["Members", null, [
                    ["All", "functions.html", null]
                ]]
            ]],
            ["Files", "files.html", null]
        ])
        .to_string(),
    )
    .unwrap()
}

#[test]
fn given_tree_when_to_indented_then_one_line_per_node() {
    let text = to_indented(&sample(), 2, None);

    assert_eq!(
        text,
        "Classes (annotated.html)\n  Class List (annotated.html)\n  Members\n    All (functions.html)\nFiles (files.html)\n"
    );
}

#[test]
fn given_max_depth_when_to_indented_then_deeper_nodes_skipped() {
    let text = to_indented(&sample(), 4, Some(0));
    assert_eq!(text, "Classes (annotated.html)\nFiles (files.html)\n");
}

#[test]
fn given_tree_when_to_termtree_then_contains_labels_and_deferred_marker() {
    let rendered = to_termtree(&sample(), "navtreedata.js").to_string();

    assert!(rendered.starts_with("navtreedata.js\n"));
    assert!(rendered.contains("Classes (annotated.html)"));
    assert!(rendered.contains("All (functions.html)"));
    assert!(rendered.contains("<annotated_dup>"));
}

#[test]
fn given_tree_when_to_html_then_nested_lists_with_links() {
    let html = to_html(&sample()).unwrap();

    let expected = "\
<ul>
  <li><a href=\"annotated.html\">Classes</a>
    <ul>
      <li class=\"deferred\" data-script=\"annotated_dup\"><a href=\"annotated.html\">Class List</a></li>
      <li>Members
        <ul>
          <li><a href=\"functions.html\">All</a></li>
        </ul>
      </li>
    </ul>
  </li>
  <li><a href=\"files.html\">Files</a></li>
</ul>
";
    assert_eq!(html, expected);
}

#[test]
fn given_markup_in_label_when_to_html_then_escaped() {
    let tree = load_tree(r#"[["a < b & \"c\"", "p.html?x=1&y=2", null]]"#).unwrap();

    let html = to_html(&tree).unwrap();

    assert!(html.contains("<a href=\"p.html?x=1&amp;y=2\">a &lt; b &amp; &quot;c&quot;</a>"));
}

#[test]
fn given_markup_in_deferred_script_and_apostrophe_when_to_html_then_attributes_escaped() {
    let tree = load_tree(r#"[["Bob's page", null, "a_dup"], ["x", "q.html", []]]"#).unwrap();

    let html = to_html(&tree).unwrap();

    assert!(html.contains("<li class=\"deferred\" data-script=\"a_dup\">Bob&"));
    assert!(!html.contains("Bob's"));
    assert!(html.contains("<li><a href=\"q.html\">x</a></li>"));
}

#[test]
fn given_empty_tree_when_to_html_then_empty_list() {
    let tree = load_tree("[]").unwrap();

    assert_eq!(to_html(&tree).unwrap(), "<ul>\n</ul>\n");
}
