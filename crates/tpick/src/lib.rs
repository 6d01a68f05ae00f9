#![forbid(unsafe_code)]

//! Theme picker public facade crate.
//!
//! Re-exports the types most hosts need from the internal crates and offers
//! a small prelude.
//!
//! ```
//! use tpick::prelude::*;
//!
//! let mut picker = ThemePicker::new(builtin());
//! picker.attach()?;
//! picker.set_attribute(OBSERVED_ATTRIBUTE, "dorian");
//! assert_eq!(picker.theme().map(|t| t.name.as_str()), Some("Dorian"));
//! # Ok::<(), tpick::Error>(())
//! ```

use std::fmt;

// --- Catalog re-exports ----------------------------------------------------

pub use tpick_catalog::{
    Catalog, CatalogBuilder, CatalogError, Group, GroupKey, GroupMeta, Theme, ThemeBuilder,
    ThemeKey, builtin, step_symbol,
};

// --- Core re-exports -------------------------------------------------------

pub use tpick_core::logging::{LogConfig, LogError, LogFormat};
pub use tpick_core::{CancelToken, CancelTrigger, EventKind};

// --- Widget re-exports -----------------------------------------------------

pub use tpick_widget::{
    ChangeSource, Lifecycle, Notification, NotifyError, OBSERVED_ATTRIBUTE, PickerConfig,
    PickerError, SELECT_EVENT, Selection, ThemePicker, ThemeSelected,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for theme picker hosts.
#[derive(Debug)]
pub enum Error {
    /// Catalog construction or parsing failed.
    Catalog(CatalogError),
    /// The picker could not attach.
    Picker(PickerError),
    /// Reading a catalog failed.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog(err) => write!(f, "catalog: {err}"),
            Self::Picker(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Catalog(err) => Some(err),
            Self::Picker(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<CatalogError> for Error {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}

impl From<PickerError> for Error {
    fn from(err: PickerError) -> Self {
        Self::Picker(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Standard result type for tpick APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Load a JSON catalog from `path`.
///
/// # Errors
///
/// [`Error::Io`] if the file cannot be opened, [`Error::Catalog`] if it does
/// not describe a valid catalog.
#[cfg(feature = "serde")]
pub fn load_catalog(path: impl AsRef<std::path::Path>) -> Result<Catalog> {
    let file = std::fs::File::open(path)?;
    Ok(Catalog::from_reader(std::io::BufReader::new(file))?)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Catalog, Error, EventKind, Notification, OBSERVED_ATTRIBUTE, PickerConfig, Result,
        Selection, Theme, ThemeKey, ThemePicker, builtin,
    };

    pub use crate::{catalog, core, dom, widget};
}

pub use tpick_catalog as catalog;
pub use tpick_core as core;
pub use tpick_dom as dom;
pub use tpick_widget as widget;
