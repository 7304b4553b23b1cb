//! Serialising mounted subtrees back to markup.

use std::fmt::Write;

use crate::document::tree::{Node, Tree};

/// Escape a value for use inside a double-quoted attribute.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text so it renders literally.
pub fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub(crate) fn inner(tree: &Tree, node: &Node) -> String {
    if let Some(markup) = &node.markup {
        return markup.clone();
    }
    let mut out = String::new();
    for child in &node.children {
        if let Ok(child_node) = tree.get(child) {
            outer_into(tree, child, child_node, &mut out);
        }
    }
    out
}

pub(crate) fn outer(tree: &Tree, id: &str, node: &Node) -> String {
    let mut out = String::new();
    outer_into(tree, id, node, &mut out);
    out
}

fn outer_into(tree: &Tree, id: &str, node: &Node, out: &mut String) {
    let _ = write!(out, "<{} id=\"{}\"", node.tag, escape_attr(id));
    if !node.classes.is_empty() {
        let _ = write!(out, " class=\"{}\"", escape_attr(&node.classes.join(" ")));
    }
    for (name, value) in &node.attrs {
        let _ = write!(out, " {}=\"{}\"", name, escape_attr(value));
    }
    if node.hidden {
        out.push_str(" hidden");
    }
    out.push('>');
    out.push_str(&inner(tree, node));
    let _ = write!(out, "</{}>", node.tag);
}
