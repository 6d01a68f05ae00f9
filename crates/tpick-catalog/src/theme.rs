#![forbid(unsafe_code)]

//! Theme records: one selectable note sequence with its descriptive metadata.

/// Abbreviated symbol for a step of `semitones`.
///
/// `1` → `H` (half step), `2` → `W` (whole step), `3` → `W+H`,
/// `4` → `2W`; anything else is written as the number itself.
#[must_use]
pub fn step_symbol(semitones: u8) -> String {
    match semitones {
        1 => "H".to_string(),
        2 => "W".to_string(),
        3 => "W+H".to_string(),
        4 => "2W".to_string(),
        n => n.to_string(),
    }
}

/// An immutable theme record.
///
/// All fields are supplied by the catalog; the picker only reads them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Theme {
    /// Primary display name, shown on the trigger once selected.
    pub name: String,
    /// Alternate names ("Major" for Ionian).
    #[cfg_attr(feature = "serde", serde(default))]
    pub alt_names: Vec<String>,
    /// Type tags ("heptatonic", "mode").
    #[cfg_attr(feature = "serde", serde(default))]
    pub types: Vec<String>,
    /// Characteristic descriptors ("bright", "stable").
    #[cfg_attr(feature = "serde", serde(default))]
    pub characteristics: Vec<String>,
    /// Step sizes in semitones between consecutive notes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub pattern: Vec<u8>,
    /// Abbreviated step symbols, one per entry of `pattern`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub pattern_short: Vec<String>,
    /// Scale-degree labels ("1", "b3", "#4").
    #[cfg_attr(feature = "serde", serde(default))]
    pub degrees: Vec<String>,
    /// Example note names.
    #[cfg_attr(feature = "serde", serde(default))]
    pub example: Vec<String>,
}

impl Theme {
    /// Start building a theme with the given display name.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ThemeBuilder {
        ThemeBuilder::new(name)
    }

    /// Total span of the step pattern in semitones (12 for an octave scale).
    #[must_use]
    pub fn span(&self) -> u32 {
        self.pattern.iter().map(|&s| u32::from(s)).sum()
    }

    /// Number of notes the pattern describes.
    #[must_use]
    pub fn note_count(&self) -> usize {
        self.pattern.len()
    }

    /// Fill `pattern_short` from `pattern` when it was not supplied.
    pub(crate) fn normalize(&mut self) {
        if self.pattern_short.is_empty() && !self.pattern.is_empty() {
            self.pattern_short = self.pattern.iter().map(|&s| step_symbol(s)).collect();
        }
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Builder for [`Theme`].
#[derive(Debug, Clone)]
pub struct ThemeBuilder {
    theme: Theme,
}

impl ThemeBuilder {
    /// Create a builder with the display name set.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            theme: Theme {
                name: name.into(),
                ..Theme::default()
            },
        }
    }

    /// Set alternate names (builder).
    #[must_use]
    pub fn alt_names(mut self, names: &[&str]) -> Self {
        self.theme.alt_names = owned(names);
        self
    }

    /// Set type tags (builder).
    #[must_use]
    pub fn types(mut self, types: &[&str]) -> Self {
        self.theme.types = owned(types);
        self
    }

    /// Set characteristic descriptors (builder).
    #[must_use]
    pub fn characteristics(mut self, characteristics: &[&str]) -> Self {
        self.theme.characteristics = owned(characteristics);
        self
    }

    /// Set the step pattern in semitones (builder).
    #[must_use]
    pub fn pattern(mut self, steps: &[u8]) -> Self {
        self.theme.pattern = steps.to_vec();
        self
    }

    /// Set abbreviated step symbols explicitly (builder).
    ///
    /// When omitted they are derived from the pattern with [`step_symbol`].
    #[must_use]
    pub fn pattern_short(mut self, symbols: &[&str]) -> Self {
        self.theme.pattern_short = owned(symbols);
        self
    }

    /// Set scale-degree labels (builder).
    #[must_use]
    pub fn degrees(mut self, degrees: &[&str]) -> Self {
        self.theme.degrees = owned(degrees);
        self
    }

    /// Set example note names (builder).
    #[must_use]
    pub fn example(mut self, notes: &[&str]) -> Self {
        self.theme.example = owned(notes);
        self
    }

    /// Finish the record.
    #[must_use]
    pub fn build(mut self) -> Theme {
        self.theme.normalize();
        self.theme
    }
}

impl From<ThemeBuilder> for Theme {
    fn from(builder: ThemeBuilder) -> Self {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_symbols() {
        let symbols: Vec<String> = [1, 2, 3, 4, 5].into_iter().map(step_symbol).collect();
        assert_eq!(symbols, ["H", "W", "W+H", "2W", "5"]);
    }

    #[test]
    fn builder_derives_short_pattern() {
        let theme = Theme::builder("Ionian").pattern(&[2, 2, 1, 2, 2, 2, 1]).build();
        assert_eq!(theme.pattern_short, ["W", "W", "H", "W", "W", "W", "H"]);
        assert_eq!(theme.span(), 12);
        assert_eq!(theme.note_count(), 7);
    }

    #[test]
    fn explicit_short_pattern_wins() {
        let theme = Theme::builder("Odd")
            .pattern(&[3, 3])
            .pattern_short(&["m3", "m3"])
            .build();
        assert_eq!(theme.pattern_short, ["m3", "m3"]);
    }

    #[test]
    fn empty_pattern_stays_empty() {
        let theme = Theme::builder("Drone").build();
        assert!(theme.pattern.is_empty());
        assert!(theme.pattern_short.is_empty());
        assert_eq!(theme.span(), 0);
    }
}
