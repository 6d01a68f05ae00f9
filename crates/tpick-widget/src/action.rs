#![forbid(unsafe_code)]

//! Actions yielded by listener dispatch.

use tpick_catalog::ThemeKey;
use tpick_dom::NodeId;

/// What a fired listener asks the picker to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Show the modal.
    Open,
    /// Dismiss the modal.
    Close,
    /// Select the entry's theme, then dismiss.
    Choose(ThemeKey),
    /// The "more info" checkbox changed; re-broadcast its state.
    MoreInfoChanged,
    /// Expand or collapse one group description panel.
    ToggleDescription(NodeId),
}
