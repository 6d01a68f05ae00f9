#![forbid(unsafe_code)]

//! Canonical interaction event kinds.
//!
//! The picker is host-driven: the embedding environment reports what the
//! user did (a click, a checkbox change, an Escape on the modal) and the
//! control reacts synchronously. This module names those interactions.
//!
//! # Design Notes
//!
//! - `Click` and `Change` bubble from the target through its ancestors.
//! - `Cancel` and `Close` are dialog-only and do not bubble.
//! - There is no pointer position or key code: the control only cares
//!   *which* node was activated.

use core::fmt;
use core::str::FromStr;

/// Kind of interaction event delivered to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Activation of a node (pointer click or keyboard activation).
    Click,
    /// A form control's value changed (fires after the value is updated).
    Change,
    /// The user asked a modal to go away (Escape). Fires before `Close`.
    Cancel,
    /// A modal was closed.
    Close,
}

impl EventKind {
    /// All event kinds, in a stable order.
    pub const ALL: [Self; 4] = [Self::Click, Self::Change, Self::Cancel, Self::Close];

    /// Whether the event propagates from the target to its ancestors.
    #[must_use]
    pub const fn bubbles(self) -> bool {
        matches!(self, Self::Click | Self::Change)
    }

    /// Lowercase event name as a host would spell it.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Change => "change",
            Self::Cancel => "cancel",
            Self::Close => "close",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown event name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEventKind(pub String);

impl fmt::Display for UnknownEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown event kind: {}", self.0)
    }
}

impl std::error::Error for UnknownEventKind {}

impl FromStr for EventKind {
    type Err = UnknownEventKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownEventKind(s.to_string()))
    }
}
