//! JSON5 value model, reader and serde bridge.
//!
//! Documents are read into an ordered [`Value`] tree and converted to and from
//! schema types through serde. The tree keeps integers exact and floats
//! non-finite, and object keys are text on both sides, so any record the
//! writer saves reads back to an equal record.

mod de;
mod error;
mod read;
mod ser;
mod value;

pub use de::{from_str, from_value};
pub use error::Json5Error;
pub use read::parse;
pub use ser::to_value;
pub use value::{Number, Value};
