#![forbid(unsafe_code)]

//! Picker configuration.
//!
//! Defaults can be overridden from the environment:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `TPICK_PLACEHOLDER` | [`PickerConfig::placeholder`] |
//! | `TPICK_TRIGGER_PADDING` | [`PickerConfig::trigger_padding`] |
//! | `TPICK_SEED` | [`PickerConfig::seed`] |

/// Trigger text while nothing is selected.
pub const DEFAULT_PLACEHOLDER: &str = "Select a theme";

/// Default value of the trigger padding style variable.
pub const DEFAULT_TRIGGER_PADDING: &str = "0.5rem";

/// Configuration for a [`ThemePicker`](crate::ThemePicker).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerConfig {
    /// Trigger label shown when nothing (or an unknown key) is selected.
    pub placeholder: String,
    /// Initial value of the `--trigger-padding` style variable.
    pub trigger_padding: String,
    /// Seed for random selection. `None` seeds from the wall clock.
    pub seed: Option<u64>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            trigger_padding: DEFAULT_TRIGGER_PADDING.to_string(),
            seed: None,
        }
    }
}

impl PickerConfig {
    /// Read overrides from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Read overrides using a custom environment lookup (for tests).
    ///
    /// Empty values and an unparseable seed are ignored.
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(val) = get_env("TPICK_PLACEHOLDER")
            && !val.is_empty()
        {
            config.placeholder = val;
        }
        if let Some(val) = get_env("TPICK_TRIGGER_PADDING")
            && !val.is_empty()
        {
            config.trigger_padding = val;
        }
        if let Some(val) = get_env("TPICK_SEED")
            && let Ok(seed) = val.trim().parse()
        {
            config.seed = Some(seed);
        }
        config
    }

    /// Set the placeholder label (builder).
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the trigger padding (builder).
    #[must_use]
    pub fn with_trigger_padding(mut self, padding: impl Into<String>) -> Self {
        self.trigger_padding = padding.into();
        self
    }

    /// Fix the random seed (builder).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
