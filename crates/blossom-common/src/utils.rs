//! Shared string and path helpers.

use std::error::Error;
use std::path::Path;

/// Replaces every tab character with two spaces.
pub fn normalize_indentation(input: &str) -> String {
    input.replace('\t', "  ")
}

/// Returns the final path segment for display, or the whole path when there is none.
pub fn display_file_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Renders an error and all of its sources as `outer: inner: root`.
pub fn error_chain(error: &(dyn Error + 'static)) -> String {
    let mut rendered = error.to_string();
    let mut current = error.source();
    while let Some(source) = current {
        rendered.push_str(": ");
        rendered.push_str(&source.to_string());
        current = source.source();
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BlossomError;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_normalize_indentation() {
        assert_eq!(normalize_indentation("{\n\t\"a\": 1\n}"), "{\n  \"a\": 1\n}");
        assert_eq!(normalize_indentation("\t\t"), "    ");
        assert_eq!(normalize_indentation("no tabs"), "no tabs");
    }

    #[test]
    fn test_display_file_name() {
        let path = PathBuf::from("config").join("settings.json5");
        assert_eq!(display_file_name(&path), "settings.json5");
        assert_eq!(display_file_name(Path::new("/")), "/");
    }

    #[test]
    fn test_error_chain() {
        let root = io::Error::new(io::ErrorKind::NotFound, "missing");
        let error = BlossomError::Config {
            message: "load failed".to_string(),
            source: Some(Box::new(root)),
        };
        assert_eq!(
            error_chain(&error),
            "Configuration error: load failed: missing"
        );
    }
}
