#![forbid(unsafe_code)]

use std::error::Error as _;

use pretty_assertions::assert_eq;
use tpick::prelude::*;
use tpick::{CatalogError, PickerError};

#[test]
fn prelude_drives_a_picker() {
    let mut picker = ThemePicker::new(builtin());
    picker.attach().unwrap();
    picker.set_theme_key(Some("lydian"));
    assert_eq!(picker.attribute(OBSERVED_ATTRIBUTE), Some("lydian"));
    let sent: Vec<Notification> = picker.take_notifications();
    assert_eq!(sent[0].name, tpick::SELECT_EVENT);
}

#[test]
fn errors_convert_and_chain() {
    let err: Error = PickerError::MissingStructure { part: "trigger" }.into();
    assert_eq!(err.to_string(), "theme picker structure is missing its trigger");
    assert!(err.source().is_some());

    let err: Error = CatalogError::EmptyKey.into();
    assert!(err.to_string().starts_with("catalog: "));

    let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(err, Error::Io(_)));
}

#[cfg(feature = "serde")]
#[test]
fn missing_catalog_file_is_io_error() {
    let result = tpick::load_catalog("/definitely/not/here/catalog.json");
    assert!(matches!(result, Err(Error::Io(_))));
}
