#![forbid(unsafe_code)]

//! Selection state machine.
//!
//! Every surface (attribute write, property write, entry click, random
//! selection) funnels through [`SelectionController::set`]. The controller
//! only decides *what* the new state is and whether it changed; the picker
//! applies the side effects (label, reflection, notification) for
//! [`Transition::Changed`] only.
//!
//! # Invariants
//!
//! 1. `Selected { key, theme }` holds the catalog's own record for `key`
//!    (same `Arc`), never a copy or an outside value.
//! 2. A key absent from the catalog yields `Unresolved { key }`: the key is
//!    kept and the record is `None`.
//! 3. Setting the key that is already current is `Unchanged`.

use std::fmt;
use std::sync::Arc;

use tpick_catalog::{Catalog, Theme, ThemeKey};

use crate::random::SeededRng;

/// Current selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    /// Nothing selected.
    #[default]
    Unselected,
    /// A catalog theme is selected.
    Selected {
        /// Catalog key.
        key: ThemeKey,
        /// The catalog's record for `key`.
        theme: Arc<Theme>,
    },
    /// A key that the catalog does not know.
    Unresolved {
        /// The requested key.
        key: ThemeKey,
    },
}

impl Selection {
    /// Selected key, if any (including an unresolved one).
    #[must_use]
    pub fn key(&self) -> Option<&ThemeKey> {
        match self {
            Self::Unselected => None,
            Self::Selected { key, .. } | Self::Unresolved { key } => Some(key),
        }
    }

    /// Selected record, if the key resolved.
    #[must_use]
    pub fn theme(&self) -> Option<&Arc<Theme>> {
        match self {
            Self::Selected { theme, .. } => Some(theme),
            _ => None,
        }
    }

    /// Whether a catalog theme is selected.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Selected { .. })
    }

    /// Trigger label for this state.
    #[must_use]
    pub fn label<'a>(&'a self, placeholder: &'a str) -> &'a str {
        match self {
            Self::Selected { theme, .. } => &theme.name,
            _ => placeholder,
        }
    }
}

/// Which surface requested a change. Used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeSource {
    /// Host wrote the observed attribute.
    Attribute,
    /// Programmatic property assignment.
    Property,
    /// User clicked a list entry.
    Click,
    /// Random selection.
    Random,
}

impl fmt::Display for ChangeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Attribute => "attribute",
            Self::Property => "property",
            Self::Click => "click",
            Self::Random => "random",
        })
    }
}

/// Outcome of [`SelectionController::set`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Requested key equals the current key.
    Unchanged,
    /// State changed.
    Changed {
        /// Key before the change.
        previous: Option<ThemeKey>,
    },
}

impl Transition {
    /// Whether state changed.
    #[must_use]
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }
}

/// Owns the selection and resolves keys against an injected catalog.
#[derive(Debug, Clone)]
pub struct SelectionController {
    catalog: Arc<Catalog>,
    current: Selection,
    rng: SeededRng,
}

impl SelectionController {
    /// Create an unselected controller over `catalog`.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, rng: SeededRng) -> Self {
        Self {
            catalog,
            current: Selection::Unselected,
            rng,
        }
    }

    /// The injected catalog.
    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Current selection.
    #[must_use]
    pub fn current(&self) -> &Selection {
        &self.current
    }

    /// The single mutation entry point.
    pub fn set(&mut self, key: Option<&str>) -> Transition {
        if self.current.key().map(ThemeKey::as_str) == key {
            return Transition::Unchanged;
        }
        let next = match key {
            None => Selection::Unselected,
            Some(key) => match self.catalog.resolve(key) {
                Some((key, theme)) => Selection::Selected {
                    key: key.clone(),
                    theme: Arc::clone(theme),
                },
                None => Selection::Unresolved {
                    key: ThemeKey::new(key),
                },
            },
        };
        let previous = std::mem::replace(&mut self.current, next);
        Transition::Changed {
            previous: previous.key().cloned(),
        }
    }

    /// Draw a key uniformly from the whole catalog. `None` if it is empty.
    pub fn random_key(&mut self) -> Option<ThemeKey> {
        let index = self.rng.below(self.catalog.len())?;
        self.catalog.key_at(index).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tpick_catalog::GroupMeta;

    fn catalog() -> Arc<Catalog> {
        let catalog = Catalog::builder()
            .group("g", GroupMeta::new("G", "test group"), |g| {
                g.theme("a", Theme::builder("Alpha").pattern(&[2, 2]))
                    .theme("b", Theme::builder("Beta").pattern(&[1, 3]));
            })
            .build()
            .unwrap();
        Arc::new(catalog)
    }

    fn controller() -> SelectionController {
        SelectionController::new(catalog(), SeededRng::new(3))
    }

    #[test]
    fn resolves_to_catalog_record() {
        let mut ctl = controller();
        assert_eq!(ctl.set(Some("a")), Transition::Changed { previous: None });
        let theme = ctl.current().theme().unwrap();
        assert!(Arc::ptr_eq(theme, ctl.catalog().get("a").unwrap()));
        assert_eq!(ctl.current().label("none"), "Alpha");
    }

    #[test]
    fn same_key_is_unchanged() {
        let mut ctl = controller();
        ctl.set(Some("a"));
        assert_eq!(ctl.set(Some("a")), Transition::Unchanged);
        assert_eq!(ctl.set(None), Transition::Changed { previous: Some("a".into()) });
        assert_eq!(ctl.set(None), Transition::Unchanged);
    }

    #[test]
    fn unknown_key_is_kept_without_record() {
        let mut ctl = controller();
        assert!(ctl.set(Some("zeta")).is_changed());
        assert_eq!(ctl.current(), &Selection::Unresolved { key: "zeta".into() });
        assert_eq!(ctl.current().key().map(ThemeKey::as_str), Some("zeta"));
        assert!(ctl.current().theme().is_none());
        assert_eq!(ctl.current().label("none"), "none");
    }

    #[test]
    fn random_key_is_member() {
        let mut ctl = controller();
        for _ in 0..100 {
            let key = ctl.random_key().unwrap();
            assert!(ctl.catalog().contains(key.as_str()));
        }
    }

    #[test]
    fn random_on_empty_catalog_is_none() {
        let mut ctl = SelectionController::new(Arc::new(Catalog::empty()), SeededRng::new(0));
        assert_eq!(ctl.random_key(), None);
    }

    #[test]
    fn source_names() {
        assert_eq!(ChangeSource::Attribute.to_string(), "attribute");
        assert_eq!(ChangeSource::Random.to_string(), "random");
    }
}
