#![forbid(unsafe_code)]

//! Selection notifications.
//!
//! A notification is only ever built from a complete selection: both a key
//! and the catalog record. Anything else is a [`NotifyError`], which the
//! picker logs and drops.

use std::fmt;
use std::sync::Arc;

use tpick_catalog::{Theme, ThemeKey};

/// Event name of the selection notification.
pub const SELECT_EVENT: &str = "theme-select";

/// Payload of a selection notification.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ThemeSelected {
    /// Selected key.
    pub theme_key: ThemeKey,
    /// Full catalog record for the key.
    pub theme: Arc<Theme>,
}

/// A dispatched event, as the host would observe it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Event name; always [`SELECT_EVENT`].
    pub name: &'static str,
    /// Propagates to ancestors of the host element.
    pub bubbles: bool,
    /// Crosses encapsulation boundaries.
    pub composed: bool,
    /// Payload.
    pub detail: ThemeSelected,
}

impl Notification {
    /// Build a selection notification.
    ///
    /// # Errors
    ///
    /// [`NotifyError`] when either the key or the record is absent.
    pub fn theme_selected(
        key: Option<&ThemeKey>,
        theme: Option<&Arc<Theme>>,
    ) -> Result<Self, NotifyError> {
        let key = key.ok_or(NotifyError::MissingKey)?;
        let theme = theme.ok_or_else(|| NotifyError::MissingTheme(key.clone()))?;
        Ok(Self {
            name: SELECT_EVENT,
            bubbles: true,
            composed: true,
            detail: ThemeSelected {
                theme_key: key.clone(),
                theme: Arc::clone(theme),
            },
        })
    }

    /// Payload as JSON (`{"themeKey": ..., "theme": {...}}`).
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    #[cfg(feature = "serde")]
    pub fn detail_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.detail)
    }
}

/// Why a notification could not be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// No key is selected.
    MissingKey,
    /// The key did not resolve to a catalog record.
    MissingTheme(ThemeKey),
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKey => f.write_str("no theme key is selected"),
            Self::MissingTheme(key) => write!(f, "theme key {key:?} has no catalog record"),
        }
    }
}

impl std::error::Error for NotifyError {}
