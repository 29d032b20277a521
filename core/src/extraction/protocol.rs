//! Siemens protocol text
//!
//! Siemens scanners embed the acquisition protocol as plain text
//! (`key\t = \tvalue` lines) inside every DICOM file. The DICOM attributes
//! alone don't say how many repetitions or echoes were planned.

use crate::error::Result;
use regex::bytes::Regex;
use std::path::Path;

/// Planned number of volumes
pub const REPETITIONS_KEY: &str = "lRepetitions";

/// Planned number of echoes
pub const CONTRASTS_KEY: &str = "lContrasts";

/// Finds the integer value of `key` in raw file contents
///
/// Only a line starting with `key`, followed by `=`, matches. Returns `None`
/// if the key is absent or its value is not a non-negative integer.
pub fn parse_protocol_value(contents: &[u8], key: &str) -> Option<u32> {
    let pattern = format!(r"(?m)^{}[ \t]*=[ \t]*([^\r\n]*)", regex::escape(key));
    let regex = Regex::new(&pattern).ok()?;
    let captures = regex.captures(contents)?;
    let value = std::str::from_utf8(captures.get(1)?.as_bytes()).ok()?;
    value.trim().parse().ok()
}

/// Planned acquisition counts found in a file's protocol text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProtocolCounts {
    pub repetitions: Option<u32>,
    pub contrasts: Option<u32>,
}

impl ProtocolCounts {
    pub fn parse(contents: &[u8]) -> Self {
        Self {
            repetitions: parse_protocol_value(contents, REPETITIONS_KEY),
            contrasts: parse_protocol_value(contents, CONTRASTS_KEY),
        }
    }
}

/// Reads the repetition and contrast counts from the protocol text of a file
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read. Missing keys are `None`.
pub fn read_protocol_counts(path: &Path) -> Result<ProtocolCounts> {
    let contents = std::fs::read(path)?;
    Ok(ProtocolCounts::parse(&contents))
}
