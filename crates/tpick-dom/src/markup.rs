#![forbid(unsafe_code)]

//! Deterministic markup serialization.
//!
//! Output is indented two spaces per level. Attribute order is fixed: `id`,
//! `class`, then the remaining attributes by name, then boolean state
//! (`open`, `checked`). `COLLAPSED` and `SELECTED` render as the classes
//! `collapsed` and `selected` so that the output reads like the styled DOM.

use std::fmt::Write as _;

use crate::node::{Document, NodeFlags, NodeId};

/// Serialize `root` and its subtree.
#[must_use]
pub fn to_markup(doc: &Document, root: NodeId) -> String {
    let mut out = String::new();
    write_node(doc, root, 0, &mut out);
    out
}

fn write_node(doc: &Document, id: NodeId, depth: usize, out: &mut String) {
    let Some(el) = doc.get(id) else { return };
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{indent}<{}", el.tag());
    if let Some(id) = el.id() {
        let _ = write!(out, " id=\"{}\"", escape(id));
    }
    let mut classes: Vec<&str> = el.classes().iter().map(String::as_str).collect();
    if el.has_flag(NodeFlags::COLLAPSED) {
        classes.push("collapsed");
    }
    if el.has_flag(NodeFlags::SELECTED) {
        classes.push("selected");
    }
    if !classes.is_empty() {
        let _ = write!(out, " class=\"{}\"", escape(&classes.join(" ")));
    }
    for (name, value) in el.attributes() {
        let _ = write!(out, " {name}=\"{}\"", escape(value));
    }
    if el.has_flag(NodeFlags::OPEN) {
        out.push_str(" open");
    }
    if el.has_flag(NodeFlags::CHECKED) {
        out.push_str(" checked");
    }
    out.push('>');

    if el.children().is_empty() {
        let _ = writeln!(out, "{}</{}>", escape(el.text()), el.tag());
        return;
    }
    out.push('\n');
    if !el.text().is_empty() {
        let _ = writeln!(out, "{indent}  {}", escape(el.text()));
    }
    for &child in el.children() {
        write_node(doc, child, depth + 1, out);
    }
    let _ = writeln!(out, "{indent}</{}>", el.tag());
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}
