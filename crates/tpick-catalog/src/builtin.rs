#![forbid(unsafe_code)]

//! Built-in production catalog.
//!
//! Examples are spelled from C. Degrees are relative to the major scale.

use std::sync::{Arc, OnceLock};

use crate::catalog::{Catalog, GroupMeta};
use crate::theme::Theme;

/// The shared built-in catalog, built on first use.
#[must_use]
pub fn builtin() -> Arc<Catalog> {
    static CATALOG: OnceLock<Arc<Catalog>> = OnceLock::new();
    Arc::clone(CATALOG.get_or_init(|| Arc::new(build())))
}

fn build() -> Catalog {
    Catalog::builder()
        .group(
            "diatonic",
            GroupMeta::new(
                "Diatonic Modes",
                "The seven rotations of the major scale. Each mode keeps the same \
                 interval set and shifts the tonal centre.",
            ),
            |g| {
                g.theme(
                    "ionian",
                    Theme::builder("Ionian")
                        .alt_names(&["Major"])
                        .types(&["heptatonic", "mode", "diatonic"])
                        .characteristics(&["bright", "stable", "resolved"])
                        .pattern(&[2, 2, 1, 2, 2, 2, 1])
                        .degrees(&["1", "2", "3", "4", "5", "6", "7"])
                        .example(&["C", "D", "E", "F", "G", "A", "B"]),
                )
                .theme(
                    "dorian",
                    Theme::builder("Dorian")
                        .types(&["heptatonic", "mode", "diatonic"])
                        .characteristics(&["minor", "jazzy", "bittersweet"])
                        .pattern(&[2, 1, 2, 2, 2, 1, 2])
                        .degrees(&["1", "2", "b3", "4", "5", "6", "b7"])
                        .example(&["C", "D", "Eb", "F", "G", "A", "Bb"]),
                )
                .theme(
                    "phrygian",
                    Theme::builder("Phrygian")
                        .types(&["heptatonic", "mode", "diatonic"])
                        .characteristics(&["dark", "exotic", "tense"])
                        .pattern(&[1, 2, 2, 2, 1, 2, 2])
                        .degrees(&["1", "b2", "b3", "4", "5", "b6", "b7"])
                        .example(&["C", "Db", "Eb", "F", "G", "Ab", "Bb"]),
                )
                .theme(
                    "lydian",
                    Theme::builder("Lydian")
                        .types(&["heptatonic", "mode", "diatonic"])
                        .characteristics(&["bright", "dreamy", "floating"])
                        .pattern(&[2, 2, 2, 1, 2, 2, 1])
                        .degrees(&["1", "2", "3", "#4", "5", "6", "7"])
                        .example(&["C", "D", "E", "F#", "G", "A", "B"]),
                )
                .theme(
                    "mixolydian",
                    Theme::builder("Mixolydian")
                        .alt_names(&["Dominant"])
                        .types(&["heptatonic", "mode", "diatonic"])
                        .characteristics(&["bluesy", "bright", "unresolved"])
                        .pattern(&[2, 2, 1, 2, 2, 1, 2])
                        .degrees(&["1", "2", "3", "4", "5", "6", "b7"])
                        .example(&["C", "D", "E", "F", "G", "A", "Bb"]),
                )
                .theme(
                    "aeolian",
                    Theme::builder("Aeolian")
                        .alt_names(&["Natural Minor"])
                        .types(&["heptatonic", "mode", "diatonic"])
                        .characteristics(&["sad", "dark", "stable"])
                        .pattern(&[2, 1, 2, 2, 1, 2, 2])
                        .degrees(&["1", "2", "b3", "4", "5", "b6", "b7"])
                        .example(&["C", "D", "Eb", "F", "G", "Ab", "Bb"]),
                )
                .theme(
                    "locrian",
                    Theme::builder("Locrian")
                        .types(&["heptatonic", "mode", "diatonic"])
                        .characteristics(&["unstable", "dissonant", "dark"])
                        .pattern(&[1, 2, 2, 1, 2, 2, 2])
                        .degrees(&["1", "b2", "b3", "4", "b5", "b6", "b7"])
                        .example(&["C", "Db", "Eb", "F", "Gb", "Ab", "Bb"]),
                );
            },
        )
        .group(
            "pentatonic",
            GroupMeta::new(
                "Pentatonic",
                "Five-note scales without half-step clashes, plus two Japanese \
                 pentatonics that use them deliberately.",
            ),
            |g| {
                g.theme(
                    "major_pentatonic",
                    Theme::builder("Major Pentatonic")
                        .types(&["pentatonic"])
                        .characteristics(&["open", "bright", "folk"])
                        .pattern(&[2, 2, 3, 2, 3])
                        .degrees(&["1", "2", "3", "5", "6"])
                        .example(&["C", "D", "E", "G", "A"]),
                )
                .theme(
                    "minor_pentatonic",
                    Theme::builder("Minor Pentatonic")
                        .types(&["pentatonic"])
                        .characteristics(&["bluesy", "rock", "earthy"])
                        .pattern(&[3, 2, 2, 3, 2])
                        .degrees(&["1", "b3", "4", "5", "b7"])
                        .example(&["C", "Eb", "F", "G", "Bb"]),
                )
                .theme(
                    "egyptian",
                    Theme::builder("Egyptian")
                        .alt_names(&["Suspended Pentatonic"])
                        .types(&["pentatonic"])
                        .characteristics(&["ambiguous", "open"])
                        .pattern(&[2, 3, 2, 3, 2])
                        .degrees(&["1", "2", "4", "5", "b7"])
                        .example(&["C", "D", "F", "G", "Bb"]),
                )
                .theme(
                    "hirajoshi",
                    Theme::builder("Hirajoshi")
                        .types(&["pentatonic", "japanese"])
                        .characteristics(&["melancholic", "sparse"])
                        .pattern(&[2, 1, 4, 1, 4])
                        .degrees(&["1", "2", "b3", "5", "b6"])
                        .example(&["C", "D", "Eb", "G", "Ab"]),
                )
                .theme(
                    "in_sen",
                    Theme::builder("In Sen")
                        .types(&["pentatonic", "japanese"])
                        .characteristics(&["austere", "tense"])
                        .pattern(&[1, 4, 2, 3, 2])
                        .degrees(&["1", "b2", "4", "5", "b7"])
                        .example(&["C", "Db", "F", "G", "Bb"]),
                );
            },
        )
        .group(
            "blues",
            GroupMeta::new(
                "Blues",
                "Pentatonic scales with an added chromatic passing tone.",
            ),
            |g| {
                g.theme(
                    "blues_minor",
                    Theme::builder("Minor Blues")
                        .alt_names(&["Blues"])
                        .types(&["hexatonic", "blues"])
                        .characteristics(&["gritty", "expressive"])
                        .pattern(&[3, 2, 1, 1, 3, 2])
                        .degrees(&["1", "b3", "4", "b5", "5", "b7"])
                        .example(&["C", "Eb", "F", "Gb", "G", "Bb"]),
                )
                .theme(
                    "blues_major",
                    Theme::builder("Major Blues")
                        .types(&["hexatonic", "blues"])
                        .characteristics(&["sweet", "country"])
                        .pattern(&[2, 1, 1, 3, 2, 3])
                        .degrees(&["1", "2", "b3", "3", "5", "6"])
                        .example(&["C", "D", "Eb", "E", "G", "A"]),
                );
            },
        )
        .group(
            "harmonic_minor",
            GroupMeta::new(
                "Harmonic Minor Family",
                "Natural minor with a raised seventh, and scales that share its \
                 augmented second.",
            ),
            |g| {
                g.theme(
                    "harmonic_minor",
                    Theme::builder("Harmonic Minor")
                        .types(&["heptatonic"])
                        .characteristics(&["dramatic", "classical"])
                        .pattern(&[2, 1, 2, 2, 1, 3, 1])
                        .degrees(&["1", "2", "b3", "4", "5", "b6", "7"])
                        .example(&["C", "D", "Eb", "F", "G", "Ab", "B"]),
                )
                .theme(
                    "phrygian_dominant",
                    Theme::builder("Phrygian Dominant")
                        .alt_names(&["Spanish Phrygian", "Freygish"])
                        .types(&["heptatonic", "mode"])
                        .characteristics(&["flamenco", "exotic", "intense"])
                        .pattern(&[1, 3, 1, 2, 1, 2, 2])
                        .degrees(&["1", "b2", "3", "4", "5", "b6", "b7"])
                        .example(&["C", "Db", "E", "F", "G", "Ab", "Bb"]),
                )
                .theme(
                    "double_harmonic",
                    Theme::builder("Double Harmonic")
                        .alt_names(&["Byzantine"])
                        .types(&["heptatonic"])
                        .characteristics(&["ornate", "exotic", "symmetric"])
                        .pattern(&[1, 3, 1, 2, 1, 3, 1])
                        .degrees(&["1", "b2", "3", "4", "5", "b6", "7"])
                        .example(&["C", "Db", "E", "F", "G", "Ab", "B"]),
                );
            },
        )
        .group(
            "melodic_minor",
            GroupMeta::new(
                "Melodic Minor Family",
                "The jazz melodic minor and its most used modes.",
            ),
            |g| {
                g.theme(
                    "melodic_minor",
                    Theme::builder("Melodic Minor")
                        .alt_names(&["Jazz Minor"])
                        .types(&["heptatonic"])
                        .characteristics(&["smooth", "sophisticated"])
                        .pattern(&[2, 1, 2, 2, 2, 2, 1])
                        .degrees(&["1", "2", "b3", "4", "5", "6", "7"])
                        .example(&["C", "D", "Eb", "F", "G", "A", "B"]),
                )
                .theme(
                    "lydian_dominant",
                    Theme::builder("Lydian Dominant")
                        .alt_names(&["Acoustic", "Overtone"])
                        .types(&["heptatonic", "mode"])
                        .characteristics(&["bright", "bluesy", "floating"])
                        .pattern(&[2, 2, 2, 1, 2, 1, 2])
                        .degrees(&["1", "2", "3", "#4", "5", "6", "b7"])
                        .example(&["C", "D", "E", "F#", "G", "A", "Bb"]),
                )
                .theme(
                    "altered",
                    Theme::builder("Altered")
                        .alt_names(&["Super Locrian"])
                        .types(&["heptatonic", "mode"])
                        .characteristics(&["tense", "chromatic", "outside"])
                        .pattern(&[1, 2, 1, 2, 2, 2, 2])
                        .degrees(&["1", "b2", "b3", "b4", "b5", "b6", "b7"])
                        .example(&["C", "Db", "Eb", "Fb", "Gb", "Ab", "Bb"]),
                );
            },
        )
        .group(
            "symmetric",
            GroupMeta::new(
                "Symmetric",
                "Scales built from a repeating interval cell; they map onto \
                 themselves under transposition.",
            ),
            |g| {
                g.theme(
                    "whole_tone",
                    Theme::builder("Whole Tone")
                        .types(&["hexatonic", "symmetric"])
                        .characteristics(&["dreamy", "ambiguous"])
                        .pattern(&[2, 2, 2, 2, 2, 2])
                        .degrees(&["1", "2", "3", "#4", "#5", "b7"])
                        .example(&["C", "D", "E", "F#", "G#", "Bb"]),
                )
                .theme(
                    "diminished_half_whole",
                    Theme::builder("Half-Whole Diminished")
                        .alt_names(&["Dominant Diminished"])
                        .types(&["octatonic", "symmetric"])
                        .characteristics(&["tense", "angular"])
                        .pattern(&[1, 2, 1, 2, 1, 2, 1, 2])
                        .degrees(&["1", "b2", "#2", "3", "#4", "5", "6", "b7"])
                        .example(&["C", "Db", "D#", "E", "F#", "G", "A", "Bb"]),
                )
                .theme(
                    "diminished_whole_half",
                    Theme::builder("Whole-Half Diminished")
                        .types(&["octatonic", "symmetric"])
                        .characteristics(&["dark", "suspenseful"])
                        .pattern(&[2, 1, 2, 1, 2, 1, 2, 1])
                        .degrees(&["1", "2", "b3", "4", "b5", "b6", "6", "7"])
                        .example(&["C", "D", "Eb", "F", "Gb", "Ab", "A", "B"]),
                )
                .theme(
                    "chromatic",
                    Theme::builder("Chromatic")
                        .types(&["dodecatonic", "symmetric"])
                        .characteristics(&["complete", "atonal"])
                        .pattern(&[1; 12])
                        .degrees(&[
                            "1", "b2", "2", "b3", "3", "4", "#4", "5", "b6", "6", "b7", "7",
                        ])
                        .example(&[
                            "C", "Db", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "B",
                        ]),
                );
            },
        )
        .build()
        .expect("built-in catalog keys are unique and non-empty")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_ionian() {
        let catalog = builtin();
        let ionian = catalog.get("ionian").unwrap();
        assert_eq!(ionian.name, "Ionian");
        assert_eq!(ionian.pattern, [2, 2, 1, 2, 2, 2, 1]);
        assert_eq!(catalog.group_of("ionian").map(|g| g.as_str()), Some("diatonic"));
    }

    #[test]
    fn every_theme_spans_an_octave() {
        for (key, theme) in builtin().groups().flat_map(|g| g.themes()) {
            assert_eq!(theme.span(), 12, "{key} does not span an octave");
        }
    }

    #[test]
    fn per_note_fields_line_up() {
        for (key, theme) in builtin().groups().flat_map(|g| g.themes()) {
            let n = theme.note_count();
            assert_eq!(theme.pattern_short.len(), n, "{key} short pattern");
            assert_eq!(theme.degrees.len(), n, "{key} degrees");
            assert_eq!(theme.example.len(), n, "{key} example");
            assert_eq!(theme.degrees[0], "1", "{key} starts on the root");
        }
    }

    #[test]
    fn shared_instance() {
        assert!(Arc::ptr_eq(&builtin(), &builtin()));
    }

    #[test]
    fn group_order() {
        let catalog = builtin();
        let groups: Vec<&str> = catalog.groups().map(|g| g.key().as_str()).collect();
        assert_eq!(
            groups,
            [
                "diatonic",
                "pentatonic",
                "blues",
                "harmonic_minor",
                "melodic_minor",
                "symmetric"
            ]
        );
        assert_eq!(catalog.len(), 24);
    }
}
