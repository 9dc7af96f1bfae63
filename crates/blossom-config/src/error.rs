//! Configuration file errors.

use crate::codec::Json5Error;
use blossom_common::BlossomError;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while binding, loading, rendering or saving a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file name lacks the `.json5` extension, or the file contents could
    /// not be read, parsed, deserialized or validated.
    #[error("{message}: {file_name}")]
    InvalidConfigFile {
        /// What went wrong.
        message: String,
        /// Final path segment of the offending file.
        file_name: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<BoxError>,
    },

    /// The default factory failed to produce a configuration.
    #[error("Failed to create default config of type {type_name}")]
    Instantiation {
        /// Rust type name of the schema.
        type_name: &'static str,
        /// Factory failure.
        #[source]
        source: BoxError,
    },

    /// Writing the config file failed.
    #[error("Failed to write config file: {file_name}")]
    Io {
        /// Final path segment of the file.
        file_name: String,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The configuration has no JSON5 form, e.g. a map keyed by tuples.
    #[error("Failed to serialize config for {file_name}")]
    Serialization {
        /// Final path segment of the file.
        file_name: String,
        /// Serializer failure.
        #[source]
        source: Json5Error,
    },

    /// The operation needs a loaded configuration and none is held.
    #[error("No config loaded for {file_name}")]
    NotLoaded {
        /// Final path segment of the file.
        file_name: String,
    },
}

impl ConfigError {
    /// Error for a file name that does not end with `.json5`.
    pub fn invalid_extension(file_name: impl Into<String>) -> Self {
        Self::InvalidConfigFile {
            message: "Config file must have a .json5 extension".to_string(),
            file_name: file_name.into(),
            source: None,
        }
    }

    /// Error for a file whose contents could not be turned into a valid config.
    pub fn invalid_contents(
        file_name: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::InvalidConfigFile {
            message: "Invalid config file".to_string(),
            file_name: file_name.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether this is the `InvalidConfigFile` kind surfaced by construction and loading.
    pub const fn is_invalid_config_file(&self) -> bool {
        matches!(self, Self::InvalidConfigFile { .. })
    }

    fn into_source(self) -> Option<BoxError> {
        match self {
            Self::InvalidConfigFile { source, .. } => source,
            Self::Instantiation { source, .. } => Some(source),
            Self::Io { source, .. } => Some(Box::new(source)),
            Self::Serialization { source, .. } => Some(Box::new(source)),
            Self::NotLoaded { .. } => None,
        }
    }
}

impl From<ConfigError> for BlossomError {
    fn from(err: ConfigError) -> Self {
        let message = err.to_string();
        Self::Config {
            message,
            source: err.into_source(),
        }
    }
}
