#![forbid(unsafe_code)]

//! JSON catalog documents.
//!
//! Arrays keep declared order, so the document shape is:
//!
//! ```json
//! {
//!   "groups": [
//!     {
//!       "key": "diatonic",
//!       "name": "Diatonic Modes",
//!       "description": "...",
//!       "themes": [
//!         { "key": "ionian", "name": "Ionian", "pattern": [2, 2, 1, 2, 2, 2, 1] }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Theme fields use camelCase (`altNames`, `patternShort`). Everything except
//! `key` and `name` may be omitted. Documents go through the same validation
//! as [`CatalogBuilder`](crate::CatalogBuilder).

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, CatalogError, GroupMeta};
use crate::key::{GroupKey, ThemeKey};
use crate::theme::Theme;

#[derive(Debug, Serialize, Deserialize)]
struct CatalogDoc {
    groups: Vec<GroupDoc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GroupDoc {
    key: GroupKey,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    themes: Vec<ThemeDoc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ThemeDoc {
    key: ThemeKey,
    #[serde(flatten)]
    theme: Theme,
}

impl Catalog {
    /// Parse and validate a JSON catalog document.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Parse`] for malformed JSON, otherwise the builder's
    /// validation errors.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDoc =
            serde_json::from_str(json).map_err(|err| CatalogError::Parse(err.to_string()))?;
        Self::from_doc(doc)
    }

    /// Parse and validate a JSON catalog document from a reader.
    ///
    /// # Errors
    ///
    /// Same as [`from_json_str`](Self::from_json_str); read failures are
    /// reported as [`CatalogError::Parse`].
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let doc: CatalogDoc =
            serde_json::from_reader(reader).map_err(|err| CatalogError::Parse(err.to_string()))?;
        Self::from_doc(doc)
    }

    /// Serialize the catalog back to a JSON document.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Parse`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String, CatalogError> {
        let doc = CatalogDoc {
            groups: self
                .groups()
                .map(|group| GroupDoc {
                    key: group.key().clone(),
                    name: group.meta().name.clone(),
                    description: group.meta().description.clone(),
                    themes: group
                        .themes()
                        .map(|(key, theme)| ThemeDoc {
                            key: key.clone(),
                            theme: Theme::clone(theme),
                        })
                        .collect(),
                })
                .collect(),
        };
        serde_json::to_string_pretty(&doc).map_err(|err| CatalogError::Parse(err.to_string()))
    }

    fn from_doc(doc: CatalogDoc) -> Result<Self, CatalogError> {
        let mut builder = Catalog::builder();
        for group in doc.groups {
            let themes = group
                .themes
                .into_iter()
                .map(|doc| (doc.key, doc.theme))
                .collect();
            builder.push_group(group.key, GroupMeta::new(group.name, group.description), themes);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOC: &str = r#"{
        "groups": [
            {
                "key": "diatonic",
                "name": "Diatonic",
                "description": "Modes of the major scale",
                "themes": [
                    {
                        "key": "ionian",
                        "name": "Ionian",
                        "altNames": ["Major"],
                        "pattern": [2, 2, 1, 2, 2, 2, 1],
                        "degrees": ["1", "2", "3", "4", "5", "6", "7"]
                    },
                    { "key": "dorian", "name": "Dorian" }
                ]
            },
            { "key": "empty", "name": "Nothing here" }
        ]
    }"#;

    #[test]
    fn parses_in_declared_order() {
        let catalog = Catalog::from_json_str(DOC).unwrap();
        let keys: Vec<&str> = catalog.keys().map(ThemeKey::as_str).collect();
        assert_eq!(keys, vec!["ionian", "dorian"]);
        assert_eq!(catalog.group_count(), 2);
        assert!(catalog.group("empty").unwrap().is_empty());
        let ionian = catalog.get("ionian").unwrap();
        assert_eq!(ionian.alt_names, vec!["Major".to_string()]);
        assert_eq!(ionian.pattern_short.len(), 7);
        assert!(catalog.get("dorian").unwrap().pattern.is_empty());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Catalog::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn missing_name_is_a_parse_error() {
        let err = Catalog::from_json_str(r#"{"groups":[{"key":"g","name":"G","themes":[{"key":"x"}]}]}"#)
            .unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let err = Catalog::from_json_str(
            r#"{"groups":[
                {"key":"a","name":"A","themes":[{"key":"x","name":"X"}]},
                {"key":"b","name":"B","themes":[{"key":"x","name":"X again"}]}
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateTheme { .. }));
    }

    #[test]
    fn builtin_survives_serialization() {
        let original = crate::builtin();
        let json = original.to_json_string().unwrap();
        let reparsed = Catalog::from_json_str(&json).unwrap();
        assert_eq!(
            reparsed.keys().collect::<Vec<_>>(),
            original.keys().collect::<Vec<_>>()
        );
        for key in original.keys() {
            assert_eq!(**reparsed.get(key.as_str()).unwrap(), **original.get(key.as_str()).unwrap());
        }
    }

    #[test]
    fn reader_input() {
        let catalog = Catalog::from_reader(DOC.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 2);
    }
}
