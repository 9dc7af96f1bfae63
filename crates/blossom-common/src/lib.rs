//! # Blossom Common
//!
//! Shared types, utilities, and common functionality for Blossom Bridge.
//!
//! This crate provides the workspace-wide error type, logging setup and the
//! small helpers the configuration crate builds on.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{BlossomError, Result};
pub use logging::{init_logging, LoggingConfig};
pub use utils::*;
