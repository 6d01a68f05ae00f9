#![forbid(unsafe_code)]

//! Structural templates.
//!
//! A [`Template`] is a `const` description of a subtree: tags, ids, classes,
//! static attributes, and text. It carries no data; instantiating it creates
//! fresh nodes every time.
//!
//! ```
//! use tpick_dom::{Document, Template, TemplateNode};
//!
//! const CARD_BODY: &[TemplateNode] = &[
//!     TemplateNode::new("h2").text("Title"),
//!     TemplateNode::new("button").id("ok").classes(&["primary"]),
//! ];
//! const CARD: Template = Template::new(TemplateNode::new("div").id("card").children(CARD_BODY));
//!
//! let mut doc = Document::new();
//! let root = CARD.instantiate(&mut doc);
//! assert!(doc.find_by_id(root, "ok").is_some());
//! ```

use crate::node::{Document, NodeId};

/// One node of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateNode {
    /// Tag name.
    pub tag: &'static str,
    /// Optional id.
    pub id: Option<&'static str>,
    /// Classes.
    pub classes: &'static [&'static str],
    /// Static attributes.
    pub attrs: &'static [(&'static str, &'static str)],
    /// Text content.
    pub text: Option<&'static str>,
    /// Children in order.
    pub children: &'static [TemplateNode],
}

impl TemplateNode {
    /// A bare node with the given tag.
    #[must_use]
    pub const fn new(tag: &'static str) -> Self {
        Self {
            tag,
            id: None,
            classes: &[],
            attrs: &[],
            text: None,
            children: &[],
        }
    }

    /// Set the id (builder).
    #[must_use]
    pub const fn id(mut self, id: &'static str) -> Self {
        self.id = Some(id);
        self
    }

    /// Set classes (builder).
    #[must_use]
    pub const fn classes(mut self, classes: &'static [&'static str]) -> Self {
        self.classes = classes;
        self
    }

    /// Set static attributes (builder).
    #[must_use]
    pub const fn attrs(mut self, attrs: &'static [(&'static str, &'static str)]) -> Self {
        self.attrs = attrs;
        self
    }

    /// Set text (builder).
    #[must_use]
    pub const fn text(mut self, text: &'static str) -> Self {
        self.text = Some(text);
        self
    }

    /// Set children (builder).
    #[must_use]
    pub const fn children(mut self, children: &'static [TemplateNode]) -> Self {
        self.children = children;
        self
    }

    fn build(&self, doc: &mut Document) -> NodeId {
        let node = doc.create_element(self.tag);
        if let Some(el) = doc.get_mut(node) {
            if let Some(id) = self.id {
                el.set_id(id);
            }
            for class in self.classes {
                el.add_class(class);
            }
            for (name, value) in self.attrs {
                el.set_attribute(name, *value);
            }
            if let Some(text) = self.text {
                el.set_text(text);
            }
        }
        for child in self.children {
            let child = child.build(doc);
            doc.append_child(node, child);
        }
        node
    }

    fn count(&self) -> usize {
        1 + self.children.iter().map(TemplateNode::count).sum::<usize>()
    }
}

/// A complete template rooted at one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    root: TemplateNode,
}

impl Template {
    /// Wrap a root node.
    #[must_use]
    pub const fn new(root: TemplateNode) -> Self {
        Self { root }
    }

    /// The root node description.
    #[must_use]
    pub const fn root(&self) -> &TemplateNode {
        &self.root
    }

    /// Number of nodes one instantiation creates.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.root.count()
    }

    /// Create the subtree in `doc`, returning the new (detached) root.
    pub fn instantiate(&self, doc: &mut Document) -> NodeId {
        self.root.build(doc)
    }
}
