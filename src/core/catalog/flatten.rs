//! Menu tree flattening

use super::types::{MenuNode, Page};

/// Flatten a menu tree into pages in depth-first pre-order.
///
/// A parent is immediately followed by all of its descendants before any sibling subtree.
/// Rendering relies on this order.
pub fn flatten(tree: &[MenuNode]) -> Vec<Page> {
    let mut pages = Vec::new();
    flatten_into(tree, 0, None, &mut pages);
    pages
}

fn flatten_into(nodes: &[MenuNode], depth: usize, parent: Option<&str>, out: &mut Vec<Page>) {
    for node in nodes {
        out.push(Page {
            id: node.path.clone(),
            label: node.label.clone(),
            depth,
            parent_id: parent.map(str::to_string),
        });
        flatten_into(&node.children, depth + 1, Some(&node.path), out);
    }
}
