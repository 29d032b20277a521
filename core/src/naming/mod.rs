//! BIDS name composition
//!
//! Turns a [`NamingConfiguration`] into validated tags and filenames.

mod composer;
mod config;
mod format;

pub use composer::{TagComposer, TAG_SEPARATOR};
pub use config::{FieldValue, NamingConfiguration, NamingField};
pub use format::{format_index, parse_index, LabelFormatter, DEFAULT_PRECISION};
