#![forbid(unsafe_code)]

//! The immutable, ordered catalog and its builder.
//!
//! # Invariants
//!
//! 1. **Declared order**: groups, and themes within a group, iterate in the
//!    order they were added. Nothing is re-sorted.
//! 2. **Unique keys**: a theme key appears in exactly one group, so the
//!    flattened index is unambiguous. Group keys are unique as well.
//! 3. **Shared records**: every theme is stored once as an `Arc<Theme>`;
//!    lookups hand out that same `Arc`.

use core::fmt;
use std::collections::HashMap;
use std::sync::Arc;

use crate::key::{GroupKey, ThemeKey};
use crate::theme::Theme;

/// Display metadata for a group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupMeta {
    /// Group heading.
    pub name: String,
    /// Longer description, shown in a collapsible panel.
    pub description: String,
}

impl GroupMeta {
    /// Create group metadata.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// One group of themes, in declared order.
#[derive(Debug, Clone)]
pub struct Group {
    key: GroupKey,
    meta: GroupMeta,
    themes: Vec<(ThemeKey, Arc<Theme>)>,
}

impl Group {
    /// The group's key.
    #[must_use]
    pub fn key(&self) -> &GroupKey {
        &self.key
    }

    /// The group's display metadata.
    #[must_use]
    pub fn meta(&self) -> &GroupMeta {
        &self.meta
    }

    /// Themes of this group in declared order.
    pub fn themes(&self) -> impl ExactSizeIterator<Item = (&ThemeKey, &Arc<Theme>)> {
        self.themes.iter().map(|(key, theme)| (key, theme))
    }

    /// Number of themes in the group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// Whether the group has no themes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    group: usize,
    theme: usize,
}

/// Immutable catalog of grouped themes.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    groups: Vec<Group>,
    /// Flattened declared order.
    order: Vec<Slot>,
    index: HashMap<ThemeKey, Slot>,
}

impl Catalog {
    /// Start building a catalog.
    #[must_use]
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// A catalog with no groups.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Groups in declared order.
    pub fn groups(&self) -> impl ExactSizeIterator<Item = &Group> {
        self.groups.iter()
    }

    /// Look up a group by key.
    #[must_use]
    pub fn group(&self, key: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.key.as_str() == key)
    }

    /// Number of groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Look up a theme record by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Arc<Theme>> {
        self.resolve(key).map(|(_, theme)| theme)
    }

    /// Look up a theme, returning the catalog's own key and record.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<(&ThemeKey, &Arc<Theme>)> {
        self.index.get(key).map(|&slot| self.at(slot))
    }

    /// Whether `key` names a theme.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Key of the theme group containing `key`.
    #[must_use]
    pub fn group_of(&self, key: &str) -> Option<&GroupKey> {
        self.index.get(key).map(|slot| &self.groups[slot.group].key)
    }

    /// All theme keys, flattened across groups in declared order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &ThemeKey> {
        self.order.iter().map(|&slot| self.at(slot).0)
    }

    /// The `index`-th key in flattened declared order.
    #[must_use]
    pub fn key_at(&self, index: usize) -> Option<&ThemeKey> {
        self.order.get(index).map(|&slot| self.at(slot).0)
    }

    /// Total number of themes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the catalog has no themes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn at(&self, slot: Slot) -> (&ThemeKey, &Arc<Theme>) {
        let (key, theme) = &self.groups[slot.group].themes[slot.theme];
        (key, theme)
    }
}

/// Catalog construction error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Two groups share a key.
    DuplicateGroup(GroupKey),
    /// A theme key appears twice.
    DuplicateTheme {
        /// The repeated key.
        key: ThemeKey,
        /// Group holding the first occurrence.
        first: GroupKey,
        /// Group holding the repeat.
        second: GroupKey,
    },
    /// A group or theme key is empty.
    EmptyKey,
    /// A serialized catalog could not be parsed.
    Parse(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateGroup(key) => write!(f, "duplicate group key: {key}"),
            Self::DuplicateTheme { key, first, second } => {
                write!(f, "duplicate theme key {key} in groups {first} and {second}")
            }
            Self::EmptyKey => f.write_str("empty catalog key"),
            Self::Parse(msg) => write!(f, "catalog parse error: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Builder for one group's themes, handed to [`CatalogBuilder::group`].
#[derive(Debug, Default)]
pub struct GroupBuilder {
    themes: Vec<(ThemeKey, Theme)>,
}

impl GroupBuilder {
    /// Append a theme.
    pub fn theme(&mut self, key: impl Into<ThemeKey>, theme: impl Into<Theme>) -> &mut Self {
        self.themes.push((key.into(), theme.into()));
        self
    }
}

/// Builder for [`Catalog`]. Validation happens in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    groups: Vec<(GroupKey, GroupMeta, Vec<(ThemeKey, Theme)>)>,
}

impl CatalogBuilder {
    /// Append a group whose themes are added by `fill`.
    #[must_use]
    pub fn group<F>(mut self, key: impl Into<GroupKey>, meta: GroupMeta, fill: F) -> Self
    where
        F: FnOnce(&mut GroupBuilder),
    {
        let mut group = GroupBuilder::default();
        fill(&mut group);
        self.groups.push((key.into(), meta, group.themes));
        self
    }

    /// Append a group from an already collected theme list.
    pub fn push_group(
        &mut self,
        key: impl Into<GroupKey>,
        meta: GroupMeta,
        themes: Vec<(ThemeKey, Theme)>,
    ) -> &mut Self {
        self.groups.push((key.into(), meta, themes));
        self
    }

    /// Validate and freeze the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on an empty key or a duplicate group or theme key.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        let mut groups: Vec<Group> = Vec::with_capacity(self.groups.len());
        let mut order = Vec::new();
        let mut index: HashMap<ThemeKey, Slot> = HashMap::new();

        for (group_idx, (key, meta, themes)) in self.groups.into_iter().enumerate() {
            if key.is_empty() {
                return Err(CatalogError::EmptyKey);
            }
            if groups.iter().any(|g| g.key == key) {
                return Err(CatalogError::DuplicateGroup(key));
            }
            let mut stored = Vec::with_capacity(themes.len());
            for (theme_idx, (theme_key, mut theme)) in themes.into_iter().enumerate() {
                if theme_key.is_empty() {
                    return Err(CatalogError::EmptyKey);
                }
                if let Some(prev) = index.get(&theme_key) {
                    let first = if prev.group == group_idx {
                        key.clone()
                    } else {
                        groups[prev.group].key.clone()
                    };
                    return Err(CatalogError::DuplicateTheme {
                        key: theme_key,
                        first,
                        second: key,
                    });
                }
                theme.normalize();
                let slot = Slot {
                    group: group_idx,
                    theme: theme_idx,
                };
                index.insert(theme_key.clone(), slot);
                order.push(slot);
                stored.push((theme_key, Arc::new(theme)));
            }
            groups.push(Group {
                key,
                meta,
                themes: stored,
            });
        }

        Ok(Catalog {
            groups,
            order,
            index,
        })
    }
}
