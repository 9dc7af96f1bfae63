//! Integration tests for blossom-common crate.

use std::io;
use std::path::Path;

use blossom_common::{display_file_name, error_chain, normalize_indentation, BlossomError};

#[test]
fn test_normalize_indentation_removes_every_tab() {
    let rendered = "{\n\t\"audio\": {\n\t\t\"volume\": 50,\n\t},\n}";
    let normalized = normalize_indentation(rendered);

    assert!(!normalized.contains('\t'));
    assert!(normalized.contains("    \"volume\": 50,"));
}

#[test]
fn test_display_file_name_uses_last_segment() {
    assert_eq!(
        display_file_name(Path::new("/etc/blossom/settings.json5")),
        "settings.json5"
    );
    assert_eq!(display_file_name(Path::new("cfg")), "cfg");
}

#[test]
fn test_error_chain_walks_sources() {
    let root = io::Error::new(io::ErrorKind::PermissionDenied, "read-only file system");
    let error = BlossomError::Config {
        message: "could not save".to_string(),
        source: Some(Box::new(root)),
    };

    assert_eq!(
        error_chain(&error),
        "Configuration error: could not save: read-only file system"
    );
}
