#![forbid(unsafe_code)]

//! Node arena.
//!
//! # Design Invariants
//!
//! 1. **Stable ids**: a [`NodeId`] is an index into the arena and is never
//!    reused. Removing a node leaves a tombstone, so a stale id resolves to
//!    `None` instead of aliasing a newer node.
//! 2. **Tree shape**: every live node has at most one parent and appears
//!    exactly once in that parent's child list.
//! 3. **Subtree removal**: removing a node removes all of its descendants.
//!
//! Native behaviour that the picker relies on lives in
//! [`Document::default_action`]: checkboxes toggle on click and dialogs close
//! on cancel.

use std::collections::BTreeMap;

use bitflags::bitflags;
use tpick_core::EventKind;

/// Index of a node in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

bitflags! {
    /// Boolean state carried by an element.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u8 {
        /// Panel content is hidden.
        const COLLAPSED = 1 << 0;
        /// Dialog is shown as a modal.
        const OPEN = 1 << 1;
        /// Checkbox is checked.
        const CHECKED = 1 << 2;
        /// Entry is the active selection.
        const SELECTED = 1 << 3;
    }
}

/// One element of the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    flags: NodeFlags,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Lowercase tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Element id, if any.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Set the element id.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// Classes in insertion order.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Whether the element has `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add `class` if absent.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Remove `class` if present.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute, returning the previous value.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) -> Option<String> {
        self.attributes.insert(name.to_string(), value.into())
    }

    /// Remove an attribute, returning the previous value.
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    /// Attributes in name order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The element's own text (not including descendants).
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the element's own text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// State flags.
    #[must_use]
    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    /// Whether all of `flag` is set.
    #[must_use]
    pub fn has_flag(&self, flag: NodeFlags) -> bool {
        self.flags.contains(flag)
    }

    /// Set or clear `flag`.
    pub fn set_flag(&mut self, flag: NodeFlags, on: bool) {
        self.flags.set(flag, on);
    }

    /// Parent node.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether this is an `<input type="checkbox">`.
    #[must_use]
    pub fn is_checkbox(&self) -> bool {
        self.tag == "input" && self.attribute("type") == Some("checkbox")
    }

    /// Whether this is a `<dialog>`.
    #[must_use]
    pub fn is_dialog(&self) -> bool {
        self.tag == "dialog"
    }
}

/// Arena of elements.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<Option<Element>>,
    live: usize,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(Some(Element::new(tag)));
        self.live += 1;
        id
    }

    /// Create an element and append it to `parent`.
    pub fn append_new(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let child = self.create_element(tag);
        self.append_child(parent, child);
        child
    }

    /// Append `child` to `parent`, moving it from any previous parent.
    ///
    /// Returns `false` (and changes nothing) if either node is gone, if they
    /// are the same node, or if `parent` is inside `child`'s subtree.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if parent == child || !self.contains(parent) || !self.contains(child) {
            return false;
        }
        if self.ancestors(parent).any(|a| a == child) {
            return false;
        }
        self.unlink(child);
        if let Some(el) = self.get_mut(child) {
            el.parent = Some(parent);
        }
        if let Some(el) = self.get_mut(parent) {
            el.children.push(child);
        }
        true
    }

    /// Element for `id`, if live.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    /// Mutable element for `id`, if live.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Whether `id` is live.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Children of `id` (empty if gone).
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(Element::children).unwrap_or_default()
    }

    /// Ancestors of `id`, nearest first. `id` itself is not included.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut next = self.get(id).and_then(Element::parent);
        std::iter::from_fn(move || {
            let current = next?;
            next = self.get(current).and_then(Element::parent);
            Some(current)
        })
    }

    /// `root` and its descendants in document (pre-)order.
    #[must_use]
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(el) = self.get(id) else { continue };
            out.push(id);
            stack.extend(el.children.iter().rev().copied());
        }
        out
    }

    /// First node under `root` (inclusive) whose id is `id`.
    #[must_use]
    pub fn find_by_id(&self, root: NodeId, id: &str) -> Option<NodeId> {
        self.descendants(root)
            .into_iter()
            .find(|&n| self.get(n).and_then(Element::id) == Some(id))
    }

    /// All nodes under `root` (inclusive) carrying `class`, in document order.
    #[must_use]
    pub fn find_all_by_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|&n| self.get(n).is_some_and(|el| el.has_class(class)))
            .collect()
    }

    /// Concatenated text of `id` and its descendants.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .into_iter()
            .filter_map(|n| self.get(n).map(Element::text))
            .collect()
    }

    /// Replace the text of `id`. No-op if gone.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let Some(el) = self.get_mut(id) {
            el.set_text(text);
        }
    }

    /// Set or clear a flag on `id`. No-op if gone.
    pub fn set_flag(&mut self, id: NodeId, flag: NodeFlags, on: bool) {
        if let Some(el) = self.get_mut(id) {
            el.set_flag(flag, on);
        }
    }

    /// Whether `id` is live and has `flag`.
    #[must_use]
    pub fn has_flag(&self, id: NodeId, flag: NodeFlags) -> bool {
        self.get(id).is_some_and(|el| el.has_flag(flag))
    }

    /// Remove `id` and its subtree. Returns the number of nodes removed.
    pub fn remove(&mut self, id: NodeId) -> usize {
        if !self.contains(id) {
            return 0;
        }
        self.unlink(id);
        self.drop_subtree(id)
    }

    /// Remove every child subtree of `id`. Returns the number of nodes removed.
    pub fn clear_children(&mut self, id: NodeId) -> usize {
        let children = match self.get_mut(id) {
            Some(el) => std::mem::take(&mut el.children),
            None => return 0,
        };
        children.into_iter().map(|child| self.drop_subtree(child)).sum()
    }

    /// Show a dialog modally. Returns `false` if `id` is not a dialog.
    pub fn show_modal(&mut self, id: NodeId) -> bool {
        match self.get_mut(id) {
            Some(el) if el.is_dialog() => {
                el.set_flag(NodeFlags::OPEN, true);
                true
            }
            _ => false,
        }
    }

    /// Close a dialog. Returns `true` if it was open.
    pub fn close_modal(&mut self, id: NodeId) -> bool {
        match self.get_mut(id) {
            Some(el) if el.is_dialog() && el.has_flag(NodeFlags::OPEN) => {
                el.set_flag(NodeFlags::OPEN, false);
                true
            }
            _ => false,
        }
    }

    /// Apply the native default action of `kind` on `target`.
    ///
    /// Returns the follow-up event the host would fire next:
    /// - click on a checkbox flips `CHECKED` and is followed by `Change`;
    /// - cancel on an open dialog closes it and is followed by `Close`.
    pub fn default_action(&mut self, target: NodeId, kind: EventKind) -> Option<EventKind> {
        let el = self.get_mut(target)?;
        match kind {
            EventKind::Click if el.is_checkbox() => {
                let checked = el.has_flag(NodeFlags::CHECKED);
                el.set_flag(NodeFlags::CHECKED, !checked);
                Some(EventKind::Change)
            }
            EventKind::Cancel if el.is_dialog() && el.has_flag(NodeFlags::OPEN) => {
                el.set_flag(NodeFlags::OPEN, false);
                Some(EventKind::Close)
            }
            _ => None,
        }
    }

    fn unlink(&mut self, id: NodeId) {
        let parent = self.get_mut(id).and_then(|el| el.parent.take());
        if let Some(parent) = parent
            && let Some(el) = self.get_mut(parent)
        {
            el.children.retain(|&c| c != id);
        }
    }

    fn drop_subtree(&mut self, root: NodeId) -> usize {
        let mut removed = 0;
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(el) = self.nodes.get_mut(id.index()).and_then(Option::take) {
                stack.extend(el.children);
                removed += 1;
            }
        }
        self.live -= removed;
        removed
    }
}
