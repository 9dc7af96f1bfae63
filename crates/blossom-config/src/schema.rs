//! The capability a type needs to be managed as a configuration file.

use crate::validation::ValidationError;
use serde::{de::DeserializeOwned, Serialize};

/// A configuration schema bound to a [`ConfigManager`](crate::ConfigManager).
///
/// Implementors describe their fields through serde. `instantiate` produces the
/// value written when no file exists yet, `validate` runs after every
/// successful parse and may rewrite fields in place, and `comments` supplies the
/// explanatory text emitted by comment-enabled grammars.
pub trait ConfigClass: Serialize + DeserializeOwned + Clone + Default {
    /// Builds the default configuration.
    ///
    /// # Errors
    ///
    /// Implementations that construct defaults from fallible sources may fail;
    /// the manager logs such failures and leaves the configuration unset.
    fn instantiate() -> anyhow::Result<Self> {
        Ok(Self::default())
    }

    /// Normalizes fields and rejects values that cannot be normalized.
    ///
    /// # Errors
    ///
    /// Returns the first field that violates the schema rules.
    fn validate(&mut self) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Comments keyed by dotted field path, e.g. `("audio.volume", "0 to 100")`.
    ///
    /// The empty path `""` annotates the whole document.
    fn comments() -> &'static [(&'static str, &'static str)] {
        &[]
    }
}
