//! Formatting switches for rendering configuration documents.

/// Controls how a configuration value is rendered as JSON5 text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonGrammar {
    /// Emit field comments supplied by the schema.
    pub comments: bool,
    /// Put every entry on its own tab-indented line.
    pub newlines: bool,
    /// Follow the last entry of a multi-line object or array with a comma.
    pub trailing_commas: bool,
    /// Leave keys that are plain identifiers unquoted.
    pub unquoted_keys: bool,
}

impl JsonGrammar {
    /// Commented, multi-line output with trailing commas and quoted keys.
    pub const JANKSON: Self = Self {
        comments: true,
        newlines: true,
        trailing_commas: true,
        unquoted_keys: false,
    };

    /// Like [`JsonGrammar::JANKSON`] but with bare identifier keys.
    pub const JSON5: Self = Self {
        comments: true,
        newlines: true,
        trailing_commas: true,
        unquoted_keys: true,
    };

    /// Multi-line output that any JSON parser accepts.
    pub const STRICT: Self = Self {
        comments: false,
        newlines: true,
        trailing_commas: false,
        unquoted_keys: false,
    };

    /// Single-line output without comments.
    pub const COMPACT: Self = Self {
        comments: false,
        newlines: false,
        trailing_commas: false,
        unquoted_keys: false,
    };

    /// Returns a copy with comments switched on or off.
    #[must_use]
    pub const fn with_comments(self, comments: bool) -> Self {
        Self { comments, ..self }
    }

    /// Returns a copy with line breaks switched on or off.
    #[must_use]
    pub const fn with_newlines(self, newlines: bool) -> Self {
        Self { newlines, ..self }
    }
}

impl Default for JsonGrammar {
    fn default() -> Self {
        Self::JANKSON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_jankson() {
        assert_eq!(JsonGrammar::default(), JsonGrammar::JANKSON);
    }

    #[test]
    fn test_toggles_keep_other_flags() {
        let grammar = JsonGrammar::JSON5.with_comments(false).with_newlines(false);
        assert!(!grammar.comments);
        assert!(!grammar.newlines);
        assert!(grammar.trailing_commas);
        assert!(grammar.unquoted_keys);
    }
}
