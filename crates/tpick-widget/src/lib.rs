#![forbid(unsafe_code)]

//! Theme picker control.
//!
//! [`ThemePicker`] is a host-driven control: a trigger button that opens a
//! modal listing every theme of a [`Catalog`](tpick_catalog::Catalog),
//! grouped, each with a collapsible "more info" panel.
//!
//! # Components
//!
//! - [`selection`]: the selection state machine and its single setter.
//! - [`skeleton`]: the static structure built once per control.
//! - [`list`]: populates the list container from the catalog.
//! - [`visibility`]: the "more info" broadcast toggle.
//! - [`picker`]: lifecycle, attribute/property surfaces, reflection, and
//!   notifications.
//!
//! # Example
//!
//! ```
//! use tpick_widget::ThemePicker;
//!
//! let mut picker = ThemePicker::new(tpick_catalog::builtin());
//! picker.attach().unwrap();
//! picker.set_theme_key(Some("ionian"));
//! assert_eq!(picker.attribute("theme-key"), Some("ionian"));
//! assert_eq!(picker.trigger_label().as_deref(), Some("Ionian"));
//! assert_eq!(picker.take_notifications().len(), 1);
//! ```

pub mod action;
pub mod config;
pub mod error;
pub mod list;
pub mod notify;
pub mod picker;
pub mod random;
pub mod selection;
pub mod skeleton;
pub mod visibility;

pub use action::Action;
pub use config::PickerConfig;
pub use error::PickerError;
pub use list::ListIndex;
pub use notify::{Notification, NotifyError, SELECT_EVENT, ThemeSelected};
pub use picker::{Lifecycle, OBSERVED_ATTRIBUTE, TRIGGER_PADDING_VAR, ThemePicker};
pub use random::SeededRng;
pub use selection::{ChangeSource, Selection, SelectionController, Transition};
pub use skeleton::{Parts, SKELETON};
pub use visibility::VisibilityToggle;
