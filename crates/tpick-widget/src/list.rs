#![forbid(unsafe_code)]

//! List builder.
//!
//! Fills the list container from the catalog: one block per group in
//! declared order, one entry per theme in declared order. Every build starts
//! from an empty container; there is no incremental diffing.
//!
//! ```text
//! section.group[data-group]
//!   h3.group-name              click: toggle description
//!   p.group-description        collapsed
//!   ul.themes
//!     li.theme-entry[data-key] click: choose
//!       span.theme-name
//!       div.more-info          collapsed unless the toggle is on
//!         dl > (dt, dd)*
//! ```

use tpick_catalog::{Catalog, Theme, ThemeKey};
use tpick_core::{CancelToken, EventKind};
use tpick_dom::{Document, ListenerSet, NodeFlags, NodeId};

use crate::action::Action;

/// Node handles recorded by one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListIndex {
    entries: Vec<(ThemeKey, NodeId)>,
    panels: Vec<NodeId>,
    descriptions: Vec<NodeId>,
    groups: Vec<NodeId>,
}

impl ListIndex {
    /// Entry node for `key`.
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<NodeId> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|&(_, node)| node)
    }

    /// Entries in list order.
    #[must_use]
    pub fn entries(&self) -> &[(ThemeKey, NodeId)] {
        &self.entries
    }

    /// "More info" panels, one per entry.
    #[must_use]
    pub fn panels(&self) -> &[NodeId] {
        &self.panels
    }

    /// Group description panels, one per group.
    #[must_use]
    pub fn descriptions(&self) -> &[NodeId] {
        &self.descriptions
    }

    /// Group blocks.
    #[must_use]
    pub fn groups(&self) -> &[NodeId] {
        &self.groups
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Rebuild `container` from `catalog`.
///
/// Click listeners for group headings and entries are registered under
/// `token`. Detail panels are created collapsed unless `expanded`.
pub fn build(
    doc: &mut Document,
    container: NodeId,
    catalog: &Catalog,
    expanded: bool,
    listeners: &mut ListenerSet<Action>,
    token: &CancelToken,
) -> ListIndex {
    let removed = doc.clear_children(container);
    let mut index = ListIndex::default();

    for group in catalog.groups() {
        let block = doc.append_new(container, "section");
        if let Some(el) = doc.get_mut(block) {
            el.add_class("group");
            el.set_attribute("data-group", group.key().as_str());
        }

        let heading = element(doc, block, "h3", "group-name");
        doc.set_text(heading, group.meta().name.as_str());

        let description = element(doc, block, "p", "group-description");
        doc.set_text(description, group.meta().description.as_str());
        doc.set_flag(description, NodeFlags::COLLAPSED, true);
        listeners.add(
            heading,
            EventKind::Click,
            Action::ToggleDescription(description),
            token,
        );

        let themes = element(doc, block, "ul", "themes");
        for (key, theme) in group.themes() {
            let entry = element(doc, themes, "li", "theme-entry");
            if let Some(el) = doc.get_mut(entry) {
                el.set_attribute("data-key", key.as_str());
                el.set_attribute("role", "option");
            }
            let name = element(doc, entry, "span", "theme-name");
            doc.set_text(name, theme.name.as_str());

            let panel = element(doc, entry, "div", "more-info");
            doc.set_flag(panel, NodeFlags::COLLAPSED, !expanded);
            details(doc, panel, theme);

            listeners.add(entry, EventKind::Click, Action::Choose(key.clone()), token);
            index.entries.push((key.clone(), entry));
            index.panels.push(panel);
        }

        index.groups.push(block);
        index.descriptions.push(description);
    }

    tracing::debug!(
        groups = index.groups.len(),
        entries = index.entries.len(),
        removed,
        "theme list built"
    );
    index
}

fn element(doc: &mut Document, parent: NodeId, tag: &str, class: &str) -> NodeId {
    let node = doc.append_new(parent, tag);
    if let Some(el) = doc.get_mut(node) {
        el.add_class(class);
    }
    node
}

fn details(doc: &mut Document, panel: NodeId, theme: &Theme) {
    let list = doc.append_new(panel, "dl");
    let rows = [
        ("Also known as", theme.alt_names.join(", ")),
        ("Type", theme.types.join(", ")),
        ("Character", theme.characteristics.join(", ")),
        ("Pattern", pattern_text(theme)),
        ("Degrees", theme.degrees.join(" ")),
        ("Example", theme.example.join(" ")),
    ];
    for (label, value) in rows {
        if value.is_empty() {
            continue;
        }
        let term = doc.append_new(list, "dt");
        doc.set_text(term, label);
        let data = doc.append_new(list, "dd");
        doc.set_text(data, value);
    }
}

/// `2-2-1 (W W H)`: numeric steps followed by their symbols.
fn pattern_text(theme: &Theme) -> String {
    if theme.pattern.is_empty() {
        return String::new();
    }
    let steps: Vec<String> = theme.pattern.iter().map(u8::to_string).collect();
    let steps = steps.join("-");
    if theme.pattern_short.is_empty() {
        steps
    } else {
        format!("{steps} ({})", theme.pattern_short.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tpick_catalog::GroupMeta;
    use tpick_core::CancelTrigger;

    fn catalog() -> Catalog {
        Catalog::builder()
            .group("first", GroupMeta::new("First", "the first group"), |g| {
                g.theme(
                    "one",
                    Theme::builder("One")
                        .alt_names(&["Uno"])
                        .pattern(&[2, 2, 1])
                        .example(&["C", "D", "E"]),
                )
                .theme("two", Theme::builder("Two"));
            })
            .group("second", GroupMeta::new("Second", "another"), |g| {
                g.theme("three", Theme::builder("Three").pattern(&[3, 4]));
            })
            .build()
            .unwrap()
    }

    struct Built {
        doc: Document,
        container: NodeId,
        index: ListIndex,
        listeners: ListenerSet<Action>,
        _scope: CancelTrigger,
    }

    fn built(expanded: bool) -> Built {
        let mut doc = Document::new();
        let container = doc.create_element("div");
        let mut listeners = ListenerSet::new();
        let (token, scope) = CancelToken::new();
        let index = build(&mut doc, container, &catalog(), expanded, &mut listeners, &token);
        Built {
            doc,
            container,
            index,
            listeners,
            _scope: scope,
        }
    }

    #[test]
    fn groups_and_entries_in_declared_order() {
        let Built {
            doc,
            container,
            index,
            ..
        } = built(false);
        let groups: Vec<&str> = doc
            .children(container)
            .iter()
            .filter_map(|&n| doc.get(n)?.attribute("data-group"))
            .collect();
        assert_eq!(groups, vec!["first", "second"]);
        let keys: Vec<&str> = index.entries().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["one", "two", "three"]);
        assert_eq!(index.panels().len(), 3);
        assert_eq!(index.descriptions().len(), 2);
    }

    #[test]
    fn panels_follow_expanded_flag() {
        let Built { doc, index, .. } = built(false);
        assert!(index.panels().iter().all(|&p| doc.has_flag(p, NodeFlags::COLLAPSED)));
        assert!(
            index
                .descriptions()
                .iter()
                .all(|&p| doc.has_flag(p, NodeFlags::COLLAPSED))
        );
        let Built { doc, index, .. } = built(true);
        assert!(index.panels().iter().all(|&p| !doc.has_flag(p, NodeFlags::COLLAPSED)));
    }

    #[test]
    fn entry_click_yields_choose() {
        let Built {
            doc,
            index,
            listeners,
            _scope,
            ..
        } = built(false);
        let entry = index.entry("two").unwrap();
        assert_eq!(
            listeners.dispatch(&doc, entry, EventKind::Click),
            vec![Action::Choose("two".into())]
        );
        let name = doc.children(entry)[0];
        assert_eq!(
            listeners.dispatch(&doc, name, EventKind::Click),
            vec![Action::Choose("two".into())]
        );
    }

    #[test]
    fn details_list_filled_fields_only() {
        let Built { doc, index, .. } = built(false);
        let panel = index.panels()[0];
        assert_eq!(
            doc.text_content(panel),
            "Also known asUnoPattern2-2-1 (W W H)ExampleC D E"
        );
        assert_eq!(doc.text_content(index.panels()[1]), "");
        assert_eq!(doc.text_content(index.panels()[2]), "Pattern3-4 (W+H 2W)");
    }

    #[test]
    fn rebuild_replaces_content() {
        let Built {
            mut doc,
            container,
            index: first,
            mut listeners,
            _scope,
        } = built(false);
        let live = doc.live_count();
        let (token, _trigger) = CancelToken::new();
        let second = build(&mut doc, container, &catalog(), false, &mut listeners, &token);
        assert_eq!(doc.live_count(), live);
        assert!(doc.get(first.entries()[0].1).is_none());
        assert_eq!(second.len(), 3);
        listeners.prune(&doc);
        assert_eq!(listeners.live_count(), 5);
    }
}
