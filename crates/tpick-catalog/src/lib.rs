#![forbid(unsafe_code)]

//! Catalog of selectable musical themes.
//!
//! A [`Catalog`] is an ordered list of groups, each holding an ordered list
//! of [`Theme`] records, plus a flattened index from [`ThemeKey`] to record.
//! It is built once, shared as `Arc<Catalog>`, and never mutated.
//!
//! ```
//! use tpick_catalog::{Catalog, GroupMeta, Theme};
//!
//! let catalog = Catalog::builder()
//!     .group("diatonic", GroupMeta::new("Diatonic", "Seven-note modes"), |g| {
//!         g.theme("ionian", Theme::builder("Ionian").pattern(&[2, 2, 1, 2, 2, 2, 1]));
//!     })
//!     .build()
//!     .unwrap();
//! assert_eq!(catalog.get("ionian").unwrap().name, "Ionian");
//! ```

pub mod builtin;
pub mod catalog;
#[cfg(feature = "serde")]
pub mod json;
pub mod key;
pub mod theme;

pub use builtin::builtin;
pub use catalog::{Catalog, CatalogBuilder, CatalogError, Group, GroupBuilder, GroupMeta};
pub use key::{GroupKey, ThemeKey};
pub use theme::{Theme, ThemeBuilder, step_symbol};
