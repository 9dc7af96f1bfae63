//! # Blossom Config
//!
//! Typed configuration files stored as JSON5.
//!
//! A [`ConfigManager`] is bound to one [`ConfigClass`] and one `.json5` path.
//! Loading creates the file from defaults when it is missing, otherwise parses
//! and validates it. Saving and [`ConfigManager::get_config_json_as_string`]
//! render through [`JsonGrammar`], which can emit field comments. The
//! [`codec`] module reads and converts the JSON5 text itself.
//!
//! ```no_run
//! use blossom_config::{clamp_range, ConfigClass, ConfigManager, ValidationError};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! #[serde(default)]
//! struct Settings {
//!     volume: u32,
//!     name: String,
//! }
//!
//! impl Default for Settings {
//!     fn default() -> Self {
//!         Self { volume: 50, name: "default".to_string() }
//!     }
//! }
//!
//! impl ConfigClass for Settings {
//!     fn validate(&mut self) -> Result<(), ValidationError> {
//!         self.volume = clamp_range("volume", self.volume, 0, 100);
//!         Ok(())
//!     }
//!
//!     fn comments() -> &'static [(&'static str, &'static str)] {
//!         &[("volume", "Playback volume from 0 to 100")]
//!     }
//! }
//!
//! # fn main() -> Result<(), blossom_config::ConfigError> {
//! let mut manager = ConfigManager::<Settings>::new("config/settings.json5")?;
//! manager.load_config()?;
//! println!("{}", manager.get_config_json_as_string(true, true));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod codec;
pub mod error;
pub mod grammar;
pub mod manager;
pub mod schema;
pub mod validation;
pub mod writer;

pub use codec::Json5Error;
pub use error::ConfigError;
pub use grammar::JsonGrammar;
pub use manager::{ConfigFactory, ConfigManager, CONFIG_EXTENSION};
pub use schema::ConfigClass;
pub use validation::{clamp_range, ensure_non_empty, ensure_one_of, ValidationError};
pub use writer::Json5Writer;
