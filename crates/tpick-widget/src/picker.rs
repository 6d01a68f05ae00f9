#![forbid(unsafe_code)]

//! Host integration.
//!
//! [`ThemePicker`] is driven entirely by its host: the host attaches and
//! detaches it, writes attributes, assigns properties, and delivers
//! interaction events. Nothing runs on its own.
//!
//! Design goals:
//! - **One mutation path**: attribute writes, property writes, entry clicks
//!   and random selection all go through the selection controller's setter;
//!   side effects run only when it reports a change.
//! - **No feedback loop**: reflection writes the attribute store directly and
//!   never routes back through attribute observation.
//! - **O(1) detach**: every listener bound during an attach shares one
//!   cancellation scope.
//!
//! # Lifecycle
//!
//! ```text
//! Detached --attach ok--> Attached --detach--> Detached
//!     \--attach missing structure--> Inert --attach ok--> Attached
//! ```

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::Arc;

use tpick_catalog::{Catalog, Theme, ThemeKey};
use tpick_core::{CancelToken, CancelTrigger, EventKind};
use tpick_dom::{Document, ListenerSet, NodeFlags, NodeId, Template, to_markup};

use crate::action::Action;
use crate::config::PickerConfig;
use crate::error::PickerError;
use crate::list::{self, ListIndex};
use crate::notify::Notification;
use crate::random::SeededRng;
use crate::selection::{ChangeSource, Selection, SelectionController, Transition};
use crate::skeleton::{Parts, SKELETON};
use crate::visibility::VisibilityToggle;

/// Host attribute that mirrors the selected key.
pub const OBSERVED_ATTRIBUTE: &str = "theme-key";

/// Style variable controlling the trigger's padding.
pub const TRIGGER_PADDING_VAR: &str = "--trigger-padding";

/// Host lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Not attached; no listeners can fire.
    Detached,
    /// Attached with listeners bound and the list built.
    Attached,
    /// The last attach found missing structure; no listeners are bound.
    Inert,
}

/// The theme picker control.
#[derive(Debug)]
pub struct ThemePicker {
    config: PickerConfig,
    doc: Document,
    root: NodeId,
    parts: Option<Parts>,
    list: ListIndex,
    controller: SelectionController,
    visibility: VisibilityToggle,
    listeners: ListenerSet<Action>,
    scope: Option<CancelTrigger>,
    lifecycle: Lifecycle,
    attributes: BTreeMap<String, String>,
    style_vars: BTreeMap<String, String>,
    outbox: Vec<Notification>,
    builds: usize,
}

impl ThemePicker {
    /// Create a detached picker over `catalog` with default configuration.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_config(catalog, PickerConfig::default())
    }

    /// Create a detached picker with explicit configuration.
    #[must_use]
    pub fn with_config(catalog: Arc<Catalog>, config: PickerConfig) -> Self {
        Self::with_template(catalog, config, &SKELETON)
    }

    /// Create a detached picker from a custom structure.
    ///
    /// The structure is validated at [`attach`](Self::attach), not here.
    #[must_use]
    pub fn with_template(catalog: Arc<Catalog>, config: PickerConfig, template: &Template) -> Self {
        let mut doc = Document::new();
        let root = template.instantiate(&mut doc);
        let parts = Parts::resolve(&doc, root).ok();
        let rng = config.seed.map_or_else(SeededRng::from_clock, SeededRng::new);
        let mut style_vars = BTreeMap::new();
        style_vars.insert(TRIGGER_PADDING_VAR.to_string(), config.trigger_padding.clone());
        let mut picker = Self {
            config,
            doc,
            root,
            parts,
            list: ListIndex::default(),
            controller: SelectionController::new(catalog, rng),
            visibility: VisibilityToggle::default(),
            listeners: ListenerSet::new(),
            scope: None,
            lifecycle: Lifecycle::Detached,
            attributes: BTreeMap::new(),
            style_vars,
            outbox: Vec::new(),
            builds: 0,
        };
        picker.render();
        picker
    }

    // --- lifecycle ---

    /// Attach to the host.
    ///
    /// Binds every listener under a fresh cancellation scope, rebuilds the
    /// list, and primes the label, entry marking and attribute from the
    /// current selection. Attach never emits a notification. Calling it
    /// while attached does nothing.
    ///
    /// # Errors
    ///
    /// [`PickerError::MissingStructure`] when a required part is absent. The
    /// error is also logged and the picker is left [`Lifecycle::Inert`].
    pub fn attach(&mut self) -> Result<(), PickerError> {
        if self.lifecycle == Lifecycle::Attached {
            return Ok(());
        }
        let parts = match Parts::resolve(&self.doc, self.root) {
            Ok(parts) => parts,
            Err(err) => {
                tracing::error!(error = %err, "theme picker left inert");
                self.parts = None;
                self.lifecycle = Lifecycle::Inert;
                return Err(err);
            }
        };
        self.parts = Some(parts);
        self.listeners.prune(&self.doc);

        let (token, scope) = CancelToken::new();
        self.listeners.add(parts.trigger, EventKind::Click, Action::Open, &token);
        self.listeners.add(parts.close, EventKind::Click, Action::Close, &token);
        self.listeners
            .add(parts.toggle, EventKind::Change, Action::MoreInfoChanged, &token);

        self.visibility
            .set(self.doc.has_flag(parts.toggle, NodeFlags::CHECKED));
        self.list = list::build(
            &mut self.doc,
            parts.list,
            self.controller.catalog(),
            self.visibility.expanded(),
            &mut self.listeners,
            &token,
        );
        self.builds += 1;
        self.scope = Some(scope);
        self.lifecycle = Lifecycle::Attached;

        self.render();
        self.reflect();
        tracing::info!(
            entries = self.list.len(),
            builds = self.builds,
            listeners = self.listeners.live_count(),
            "theme picker attached"
        );
        Ok(())
    }

    /// Detach from the host. Every listener is silenced at once.
    pub fn detach(&mut self) {
        if let Some(scope) = self.scope.take() {
            scope.cancel();
        }
        if self.lifecycle != Lifecycle::Detached {
            tracing::info!("theme picker detached");
        }
        self.lifecycle = Lifecycle::Detached;
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Whether the picker is attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.lifecycle == Lifecycle::Attached
    }

    /// Number of list builds so far.
    #[must_use]
    pub fn build_count(&self) -> usize {
        self.builds
    }

    // --- attribute surface ---

    /// Host attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Host writes an attribute.
    ///
    /// Writing [`OBSERVED_ATTRIBUTE`] selects its value; rewriting the
    /// current value does nothing.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        let old = self.attributes.insert(name.to_string(), value.clone());
        if name == OBSERVED_ATTRIBUTE {
            self.attribute_changed(old.as_deref(), Some(&value));
        }
    }

    /// Host removes an attribute. Removing [`OBSERVED_ATTRIBUTE`] clears the
    /// selection.
    pub fn remove_attribute(&mut self, name: &str) {
        let old = self.attributes.remove(name);
        if name == OBSERVED_ATTRIBUTE {
            self.attribute_changed(old.as_deref(), None);
        }
    }

    fn attribute_changed(&mut self, old: Option<&str>, new: Option<&str>) {
        if old == new {
            tracing::trace!(value = ?new, "observed attribute rewritten with same value");
            return;
        }
        self.commit(new, ChangeSource::Attribute);
    }

    // --- property surface ---

    /// Assign the selected key; `None` clears. Returns whether the selection
    /// changed.
    pub fn set_theme_key(&mut self, key: Option<&str>) -> bool {
        self.commit(key, ChangeSource::Property)
    }

    /// Selected key, including one the catalog does not know.
    #[must_use]
    pub fn theme_key(&self) -> Option<&ThemeKey> {
        self.controller.current().key()
    }

    /// Catalog record of the selection.
    #[must_use]
    pub fn theme(&self) -> Option<&Arc<Theme>> {
        self.controller.current().theme()
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        self.controller.current()
    }

    /// Select a uniformly random theme from the whole catalog.
    ///
    /// Returns the drawn key, or `None` for an empty catalog.
    pub fn select_random(&mut self) -> Option<ThemeKey> {
        let key = self.controller.random_key()?;
        self.commit(Some(key.as_str()), ChangeSource::Random);
        Some(key)
    }

    /// The injected catalog.
    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        self.controller.catalog()
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    // --- selection effects ---

    fn commit(&mut self, key: Option<&str>, source: ChangeSource) -> bool {
        let previous = match self.controller.set(key) {
            Transition::Unchanged => {
                tracing::trace!(theme_key = ?key, %source, "selection unchanged");
                return false;
            }
            Transition::Changed { previous } => previous,
        };
        if let Selection::Unresolved { key } = self.controller.current() {
            tracing::warn!(theme_key = %key, %source, "theme key not in catalog");
        }
        tracing::debug!(
            theme_key = ?self.controller.current().key(),
            previous = ?previous,
            %source,
            "selection changed"
        );
        self.render();
        self.reflect();
        self.notify();
        true
    }

    fn render(&mut self) {
        let Some(parts) = self.parts else { return };
        let current = self.controller.current();
        self.doc
            .set_text(parts.trigger, current.label(&self.config.placeholder));
        let selected = current.key().map(ThemeKey::as_str);
        for (key, entry) in self.list.entries() {
            self.doc
                .set_flag(*entry, NodeFlags::SELECTED, Some(key.as_str()) == selected);
        }
    }

    fn reflect(&mut self) {
        match self.controller.current().key() {
            Some(key) => {
                self.attributes
                    .insert(OBSERVED_ATTRIBUTE.to_string(), key.to_string());
            }
            None => {
                self.attributes.remove(OBSERVED_ATTRIBUTE);
            }
        }
    }

    fn notify(&mut self) {
        let current = self.controller.current();
        if *current == Selection::Unselected {
            return;
        }
        match Notification::theme_selected(current.key(), current.theme()) {
            Ok(notification) => {
                tracing::debug!(
                    theme_key = %notification.detail.theme_key,
                    event = notification.name,
                    "notification emitted"
                );
                self.outbox.push(notification);
            }
            Err(err) => tracing::warn!(error = %err, "selection notification suppressed"),
        }
    }

    /// Drain emitted notifications, oldest first.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.outbox)
    }

    /// Notifications not yet drained.
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.outbox
    }

    // --- interaction ---

    /// Deliver an event to `target`.
    ///
    /// Listener actions run first, then the native default action; a
    /// follow-up event (checkbox `Change`, dialog `Close`) is delivered the
    /// same way.
    pub fn dispatch(&mut self, target: NodeId, kind: EventKind) {
        let actions = self.listeners.dispatch(&self.doc, target, kind);
        tracing::trace!(?target, %kind, actions = actions.len(), "event dispatched");
        for action in actions {
            self.run(action);
        }
        if let Some(next) = self.doc.default_action(target, kind) {
            self.dispatch(target, next);
        }
    }

    fn run(&mut self, action: Action) {
        let Some(parts) = self.parts else { return };
        match action {
            Action::Open => {
                self.doc.show_modal(parts.modal);
            }
            Action::Close => {
                self.doc.close_modal(parts.modal);
            }
            Action::Choose(key) => {
                self.commit(Some(key.as_str()), ChangeSource::Click);
                self.doc.close_modal(parts.modal);
            }
            Action::MoreInfoChanged => {
                let checked = self.doc.has_flag(parts.toggle, NodeFlags::CHECKED);
                self.visibility.set(checked);
                self.visibility.apply(&mut self.doc, self.list.panels());
            }
            Action::ToggleDescription(panel) => {
                let collapsed = self.doc.has_flag(panel, NodeFlags::COLLAPSED);
                self.doc.set_flag(panel, NodeFlags::COLLAPSED, !collapsed);
            }
        }
    }

    /// Click `target`.
    pub fn click(&mut self, target: NodeId) {
        self.dispatch(target, EventKind::Click);
    }

    /// Click the trigger.
    pub fn open(&mut self) {
        if let Some(parts) = self.parts {
            self.click(parts.trigger);
        }
    }

    /// Click the dismiss button.
    pub fn close(&mut self) {
        if let Some(parts) = self.parts {
            self.click(parts.close);
        }
    }

    /// Press escape on the modal.
    pub fn cancel_modal(&mut self) {
        if let Some(parts) = self.parts {
            self.dispatch(parts.modal, EventKind::Cancel);
        }
    }

    /// Click the entry for `key`. Returns `false` if the list has no such
    /// entry.
    pub fn choose(&mut self, key: &str) -> bool {
        match self.list.entry(key) {
            Some(entry) => {
                self.click(entry);
                true
            }
            None => false,
        }
    }

    /// Click the "more info" checkbox if its state differs from `on`.
    pub fn set_more_info(&mut self, on: bool) {
        if let Some(parts) = self.parts
            && self.doc.has_flag(parts.toggle, NodeFlags::CHECKED) != on
        {
            self.click(parts.toggle);
        }
    }

    /// Whether detail panels are shown.
    #[must_use]
    pub fn more_info(&self) -> bool {
        self.visibility.expanded()
    }

    /// Whether the modal is showing.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.parts
            .is_some_and(|parts| self.doc.has_flag(parts.modal, NodeFlags::OPEN))
    }

    /// Text of the trigger button.
    #[must_use]
    pub fn trigger_label(&self) -> Option<String> {
        self.parts.map(|parts| self.doc.text_content(parts.trigger))
    }

    // --- styling ---

    /// Set a host style variable.
    pub fn set_style_variable(&mut self, name: &str, value: impl Into<String>) {
        self.style_vars.insert(name.to_string(), value.into());
    }

    /// Host style variable value.
    #[must_use]
    pub fn style_variable(&self, name: &str) -> Option<&str> {
        self.style_vars.get(name).map(String::as_str)
    }

    // --- inspection ---

    /// The control's element tree.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Mutable element tree, for hosts that restyle or restructure the
    /// control before attaching it.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// Skeleton root.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Resolved parts, once resolution succeeded.
    #[must_use]
    pub fn parts(&self) -> Option<Parts> {
        self.parts
    }

    /// Node handles from the last list build.
    #[must_use]
    pub fn list_index(&self) -> &ListIndex {
        &self.list
    }

    /// Listener registrations that can still fire.
    #[must_use]
    pub fn live_listeners(&self) -> usize {
        self.listeners.live_count()
    }

    /// Markup of the host element and its structure.
    #[must_use]
    pub fn markup(&self) -> String {
        let mut host = String::from("<theme-picker");
        for (name, value) in &self.attributes {
            let _ = write!(host, " {name}=\"{}\"", quote(value));
        }
        if !self.style_vars.is_empty() {
            let style: Vec<String> = self
                .style_vars
                .iter()
                .map(|(name, value)| format!("{name}: {value}"))
                .collect();
            let _ = write!(host, " style=\"{}\"", quote(&style.join("; ")));
        }
        host.push_str(">\n");
        for line in to_markup(&self.doc, self.root).lines() {
            host.push_str("  ");
            host.push_str(line);
            host.push('\n');
        }
        host.push_str("</theme-picker>\n");
        host
    }
}

fn quote(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tpick_catalog::GroupMeta;

    fn catalog() -> Arc<Catalog> {
        let catalog = Catalog::builder()
            .group("diatonic", GroupMeta::new("Diatonic", "Seven-note modes"), |g| {
                g.theme(
                    "ionian",
                    Theme::builder("Ionian").pattern(&[2, 2, 1, 2, 2, 2, 1]),
                )
                .theme(
                    "dorian",
                    Theme::builder("Dorian").pattern(&[2, 1, 2, 2, 2, 1, 2]),
                );
            })
            .build()
            .unwrap();
        Arc::new(catalog)
    }

    fn attached() -> ThemePicker {
        let mut picker = ThemePicker::with_config(catalog(), PickerConfig::default().with_seed(1));
        picker.attach().unwrap();
        picker
    }

    #[test]
    fn starts_detached_with_placeholder() {
        let picker = ThemePicker::new(catalog());
        assert_eq!(picker.lifecycle(), Lifecycle::Detached);
        assert_eq!(picker.trigger_label().as_deref(), Some("Select a theme"));
        assert_eq!(picker.attribute(OBSERVED_ATTRIBUTE), None);
        assert_eq!(picker.live_listeners(), 0);
        assert_eq!(picker.style_variable(TRIGGER_PADDING_VAR), Some("0.5rem"));
    }

    #[test]
    fn ionian_then_clear() {
        let mut picker = attached();
        assert!(picker.set_theme_key(Some("ionian")));
        assert_eq!(picker.attribute(OBSERVED_ATTRIBUTE), Some("ionian"));
        assert_eq!(picker.trigger_label().as_deref(), Some("Ionian"));
        let sent = picker.take_notifications();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].detail.theme_key, "ionian");

        assert!(picker.set_theme_key(None));
        assert_eq!(picker.attribute(OBSERVED_ATTRIBUTE), None);
        assert_eq!(picker.trigger_label().as_deref(), Some("Select a theme"));
        assert!(picker.take_notifications().is_empty());
    }

    #[test]
    fn attribute_write_selects_and_rewrite_is_noop() {
        let mut picker = attached();
        picker.set_attribute(OBSERVED_ATTRIBUTE, "dorian");
        assert_eq!(picker.theme().map(|t| t.name.as_str()), Some("Dorian"));
        assert_eq!(picker.take_notifications().len(), 1);
        picker.set_attribute(OBSERVED_ATTRIBUTE, "dorian");
        assert!(picker.take_notifications().is_empty());
        assert_eq!(picker.build_count(), 1);
        picker.remove_attribute(OBSERVED_ATTRIBUTE);
        assert_eq!(picker.selection(), &Selection::Unselected);
    }

    #[test]
    fn other_attributes_are_plain() {
        let mut picker = attached();
        picker.set_attribute("title", "scales");
        assert_eq!(picker.attribute("title"), Some("scales"));
        assert_eq!(picker.selection(), &Selection::Unselected);
    }

    #[test]
    fn entry_click_selects_and_closes() {
        let mut picker = attached();
        picker.open();
        assert!(picker.is_open());
        assert!(picker.choose("dorian"));
        assert!(!picker.is_open());
        assert_eq!(picker.attribute(OBSERVED_ATTRIBUTE), Some("dorian"));
        let entry = picker.list_index().entry("dorian").unwrap();
        assert!(picker.document().has_flag(entry, NodeFlags::SELECTED));
        assert!(!picker.choose("lydian"));
    }

    #[test]
    fn click_on_current_entry_only_closes() {
        let mut picker = attached();
        picker.set_theme_key(Some("ionian"));
        picker.take_notifications();
        picker.open();
        picker.choose("ionian");
        assert!(!picker.is_open());
        assert!(picker.take_notifications().is_empty());
    }

    #[test]
    fn cancel_and_close_dismiss() {
        let mut picker = attached();
        picker.open();
        picker.cancel_modal();
        assert!(!picker.is_open());
        picker.open();
        picker.close();
        assert!(!picker.is_open());
    }

    #[test]
    fn more_info_broadcasts() {
        let mut picker = attached();
        picker.set_more_info(true);
        assert!(picker.more_info());
        let doc = picker.document();
        assert!(
            picker
                .list_index()
                .panels()
                .iter()
                .all(|&p| !doc.has_flag(p, NodeFlags::COLLAPSED))
        );
    }

    #[test]
    fn group_heading_toggles_description() {
        let mut picker = attached();
        let description = picker.list_index().descriptions()[0];
        let heading = picker.document().children(picker.list_index().groups()[0])[0];
        picker.click(heading);
        assert!(!picker.document().has_flag(description, NodeFlags::COLLAPSED));
        picker.click(heading);
        assert!(picker.document().has_flag(description, NodeFlags::COLLAPSED));
    }

    #[test]
    fn detach_silences_and_reattach_rebuilds() {
        let mut picker = attached();
        let live = picker.live_listeners();
        assert!(live > 0);
        picker.detach();
        assert_eq!(picker.live_listeners(), 0);
        picker.open();
        assert!(!picker.is_open());

        picker.attach().unwrap();
        assert_eq!(picker.build_count(), 2);
        assert_eq!(picker.live_listeners(), live);
    }

    #[test]
    fn attach_is_idempotent() {
        let mut picker = attached();
        picker.attach().unwrap();
        assert_eq!(picker.build_count(), 1);
    }

    #[test]
    fn random_is_seeded() {
        let mut a = attached();
        let mut b = attached();
        for _ in 0..10 {
            assert_eq!(a.select_random(), b.select_random());
        }
    }

    #[test]
    fn markup_wraps_host_element() {
        let mut picker = attached();
        picker.set_theme_key(Some("ionian"));
        let markup = picker.markup();
        assert!(markup.starts_with(
            "<theme-picker theme-key=\"ionian\" style=\"--trigger-padding: 0.5rem\">\n"
        ));
        assert!(markup.contains("data-key=\"ionian\""));
        assert!(markup.ends_with("</theme-picker>\n"));
    }
}
