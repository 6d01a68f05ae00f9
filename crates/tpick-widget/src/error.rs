#![forbid(unsafe_code)]

use std::fmt;

/// Errors raised by the picker's lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerError {
    /// A required skeleton part was not found at attach time.
    ///
    /// The picker is left inert: no listeners are bound.
    MissingStructure {
        /// Name of the missing part (`"trigger"`, `"modal"`, ...).
        part: &'static str,
    },
}

impl fmt::Display for PickerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStructure { part } => {
                write!(f, "theme picker structure is missing its {part}")
            }
        }
    }
}

impl std::error::Error for PickerError {}
