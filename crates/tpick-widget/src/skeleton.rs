#![forbid(unsafe_code)]

//! Static structure of the control.
//!
//! The skeleton carries no catalog data; the list container is filled by
//! [`list::build`](crate::list::build) at attach time.

use tpick_dom::{Document, NodeId, Template, TemplateNode};

use crate::error::PickerError;

/// Id of the trigger button.
pub const TRIGGER_ID: &str = "trigger";
/// Id of the modal dialog.
pub const MODAL_ID: &str = "modal";
/// Id of the dismiss button.
pub const CLOSE_ID: &str = "close";
/// Id of the "more info" checkbox.
pub const TOGGLE_ID: &str = "more-info";
/// Id of the list container.
pub const LIST_ID: &str = "list";

const TOGGLE_LABEL: &[TemplateNode] = &[
    TemplateNode::new("input")
        .id(TOGGLE_ID)
        .attrs(&[("type", "checkbox")]),
    TemplateNode::new("span").text("More info"),
];

const HEADER: &[TemplateNode] = &[
    TemplateNode::new("h2")
        .classes(&["modal-title"])
        .text("Choose a theme"),
    TemplateNode::new("label")
        .classes(&["more-info-toggle"])
        .children(TOGGLE_LABEL),
    TemplateNode::new("button")
        .id(CLOSE_ID)
        .classes(&["close"])
        .attrs(&[("aria-label", "Close"), ("type", "button")])
        .text("×"),
];

const MODAL: &[TemplateNode] = &[
    TemplateNode::new("header")
        .classes(&["modal-header"])
        .children(HEADER),
    TemplateNode::new("div").id(LIST_ID).classes(&["theme-list"]),
];

const ROOT: &[TemplateNode] = &[
    TemplateNode::new("button")
        .id(TRIGGER_ID)
        .classes(&["trigger"])
        .attrs(&[("style", "padding: var(--trigger-padding)"), ("type", "button")]),
    TemplateNode::new("dialog")
        .id(MODAL_ID)
        .classes(&["modal"])
        .children(MODAL),
];

/// The picker's default structure.
pub const SKELETON: Template = Template::new(
    TemplateNode::new("div")
        .classes(&["theme-picker"])
        .children(ROOT),
);

/// Resolved handles to the skeleton's required parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parts {
    /// Skeleton root.
    pub root: NodeId,
    /// Button that opens the modal and shows the label.
    pub trigger: NodeId,
    /// The modal dialog.
    pub modal: NodeId,
    /// Dismiss button.
    pub close: NodeId,
    /// "More info" checkbox.
    pub toggle: NodeId,
    /// Container the list builder fills.
    pub list: NodeId,
}

impl Parts {
    /// Find every required part under `root`.
    ///
    /// # Errors
    ///
    /// [`PickerError::MissingStructure`] naming the first part not found.
    pub fn resolve(doc: &Document, root: NodeId) -> Result<Self, PickerError> {
        let find = |id: &'static str, part: &'static str| {
            doc.find_by_id(root, id)
                .ok_or(PickerError::MissingStructure { part })
        };
        let modal = find(MODAL_ID, "modal")?;
        if !doc.get(modal).is_some_and(|el| el.is_dialog()) {
            return Err(PickerError::MissingStructure { part: "modal" });
        }
        let toggle = find(TOGGLE_ID, "toggle")?;
        if !doc.get(toggle).is_some_and(|el| el.is_checkbox()) {
            return Err(PickerError::MissingStructure { part: "toggle" });
        }
        Ok(Self {
            root,
            trigger: find(TRIGGER_ID, "trigger")?,
            modal,
            close: find(CLOSE_ID, "close")?,
            toggle,
            list: find(LIST_ID, "list")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skeleton_resolves() {
        let mut doc = Document::new();
        let root = SKELETON.instantiate(&mut doc);
        let parts = Parts::resolve(&doc, root).unwrap();
        assert_eq!(doc.get(parts.trigger).unwrap().tag(), "button");
        assert!(doc.get(parts.list).unwrap().children().is_empty());
        assert_eq!(doc.live_count(), SKELETON.node_count());
    }

    #[test]
    fn missing_part_is_named() {
        let mut doc = Document::new();
        let root = SKELETON.instantiate(&mut doc);
        let list = doc.find_by_id(root, LIST_ID).unwrap();
        doc.remove(list);
        assert_eq!(
            Parts::resolve(&doc, root),
            Err(PickerError::MissingStructure { part: "list" })
        );
    }

    #[test]
    fn modal_must_be_a_dialog() {
        let mut doc = Document::new();
        let root = doc.create_element("div");
        for id in [TRIGGER_ID, MODAL_ID, CLOSE_ID, LIST_ID] {
            let node = doc.append_new(root, "div");
            doc.get_mut(node).unwrap().set_id(id);
        }
        assert_eq!(
            Parts::resolve(&doc, root),
            Err(PickerError::MissingStructure { part: "modal" })
        );
    }
}
