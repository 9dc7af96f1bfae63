//! Test utilities and shared test helpers for Blossom Bridge.
//!
//! This module provides logging setup, scratch directories, JSON5 fixtures and
//! proptest strategies shared by the unit and integration tests of every crate
//! in the workspace.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        // Another harness may already own the global subscriber.
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// JSON5 documents used by configuration tests.
pub mod config_fixtures {
    /// A settings file using comments, unquoted keys and a trailing comma.
    pub fn commented_settings_json5() -> &'static str {
        concat!(
            "// Audio settings\n",
            "{\n",
            "  /* playback volume */\n",
            "  volume: 75,\n",
            "  name: 'living room',\n",
            "}\n",
        )
    }

    /// A settings file whose volume is above the allowed maximum.
    pub fn out_of_range_settings_json5() -> &'static str {
        "{volume: 200}"
    }

    /// Text that is not valid JSON5.
    pub fn malformed_json5() -> &'static str {
        "{ volume: 50, name: \"unterminated }"
    }

    /// Valid JSON5 whose field type does not match an integer volume.
    pub fn mistyped_settings_json5() -> &'static str {
        "{ volume: \"loud\" }"
    }
}

/// Property-based testing utilities using proptest.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use proptest::prelude::*;

    /// Strategy for file names that do not end with `.json5`.
    pub fn non_json5_file_name_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            r"[a-z][a-z0-9_]{0,12}",
            r"[a-z][a-z0-9_]{0,12}\.(json|toml|yaml|json4|js0n5)",
            r"[a-z][a-z0-9_]{0,12}\.json5\.(bak|old|tmp)",
        ]
        .prop_filter("must not end with .json5", |name| {
            !name.ends_with(".json5")
        })
    }

    /// Strategy for file names that end with `.json5`.
    pub fn json5_file_name_strategy() -> impl Strategy<Value = String> {
        r"[a-z][a-z0-9_\-]{0,12}".prop_map(|stem| format!("{stem}.json5"))
    }

    /// Characters that need escaping or end a line somewhere in JSON5 text.
    const AWKWARD_CHARS: [char; 16] = [
        '"', '\'', '\\', '/', '*', '\n', '\r', '\t', '\0', '\u{8}', '\u{1f}', '\u{7f}',
        '\u{2028}', '\u{2029}', '\u{feff}', '\u{1f338}',
    ];

    /// Strategy for arbitrary strings.
    ///
    /// Mixes `any::<String>()` with strings built from quotes, backslashes,
    /// control characters and line separators, which `any::<String>()` only
    /// rarely produces.
    pub fn config_text_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            any::<String>(),
            prop::collection::vec(
                prop_oneof![prop::sample::select(AWKWARD_CHARS.to_vec()), any::<char>()],
                0..16,
            )
            .prop_map(String::from_iter),
        ]
    }
}
