#![forbid(unsafe_code)]

//! Core: interaction event kinds, listener cancellation scopes, and logging.

pub mod cancel;
pub mod event;
pub mod logging;

pub use cancel::{CancelToken, CancelTrigger};
pub use event::EventKind;
