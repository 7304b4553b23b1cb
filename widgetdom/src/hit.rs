use crate::document::tree::{Tree, ROOT_ID};

/// Find the deepest visible node whose bounds contain the point.
///
/// Nodes without bounds are transparent: their children are still searched
/// but the node itself is never returned. Hidden nodes hide their whole
/// subtree.
pub(crate) fn hit_test(tree: &Tree, x: u16, y: u16) -> Option<String> {
    hit_test_node(tree, ROOT_ID, x, y)
}

fn hit_test_node(tree: &Tree, id: &str, x: u16, y: u16) -> Option<String> {
    let node = tree.get(id).ok()?;
    if node.hidden {
        return None;
    }

    let inside = node.bounds.map(|rect| rect.contains(x, y));
    if inside == Some(false) {
        return None;
    }

    // Check children in reverse order (last rendered = on top)
    for child in node.children.iter().rev() {
        if let Some(hit) = hit_test_node(tree, child, x, y) {
            return Some(hit);
        }
    }

    if inside == Some(true) {
        Some(id.to_string())
    } else {
        None
    }
}
