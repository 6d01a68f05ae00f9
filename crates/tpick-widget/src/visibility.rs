#![forbid(unsafe_code)]

//! "More info" visibility toggle.
//!
//! One boolean for every detail panel. Changing it is a broadcast over the
//! panels passed to [`VisibilityToggle::apply`]; there is no per-panel state.

use tpick_dom::{Document, NodeFlags, NodeId};

/// Shared expanded/collapsed state of the detail panels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibilityToggle {
    expanded: bool,
}

impl VisibilityToggle {
    /// Create a toggle; panels start collapsed unless `expanded`.
    #[must_use]
    pub const fn new(expanded: bool) -> Self {
        Self { expanded }
    }

    /// Whether panels are currently shown.
    #[must_use]
    pub const fn expanded(&self) -> bool {
        self.expanded
    }

    /// Record a new value. Returns `true` if it differs from the old one.
    pub fn set(&mut self, expanded: bool) -> bool {
        let changed = self.expanded != expanded;
        self.expanded = expanded;
        changed
    }

    /// Apply the current value to every panel in `panels`.
    pub fn apply(&self, doc: &mut Document, panels: &[NodeId]) {
        for &panel in panels {
            doc.set_flag(panel, NodeFlags::COLLAPSED, !self.expanded);
        }
        tracing::debug!(expanded = self.expanded, panels = panels.len(), "more info toggled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn panels(n: usize) -> (Document, Vec<NodeId>) {
        let mut doc = Document::new();
        let root = doc.create_element("div");
        let ids = (0..n)
            .map(|_| {
                let p = doc.append_new(root, "div");
                doc.set_flag(p, NodeFlags::COLLAPSED, true);
                p
            })
            .collect();
        (doc, ids)
    }

    #[test]
    fn set_reports_changes() {
        let mut toggle = VisibilityToggle::default();
        assert!(!toggle.set(false));
        assert!(toggle.set(true));
        assert!(toggle.expanded());
    }

    #[test]
    fn apply_broadcasts() {
        let (mut doc, ids) = panels(5);
        let mut toggle = VisibilityToggle::default();
        toggle.set(true);
        toggle.apply(&mut doc, &ids);
        assert!(ids.iter().all(|&p| !doc.has_flag(p, NodeFlags::COLLAPSED)));
    }

    proptest! {
        #[test]
        fn toggle_sequence_leaves_last_value(values in proptest::collection::vec(any::<bool>(), 1..20)) {
            let (mut doc, ids) = panels(4);
            let mut toggle = VisibilityToggle::default();
            for &v in &values {
                toggle.set(v);
                toggle.apply(&mut doc, &ids);
            }
            let last = *values.last().unwrap();
            for &p in &ids {
                prop_assert_eq!(doc.has_flag(p, NodeFlags::COLLAPSED), !last);
            }
        }
    }
}
