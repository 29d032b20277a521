use crate::error::{Dac2BidsError, Result};

/// Zero-padding width used when none is configured
pub const DEFAULT_PRECISION: usize = 2;

/// Zero-padded index formatter
///
/// ```
/// use dac2bids_core::naming::LabelFormatter;
///
/// assert_eq!(LabelFormatter::new(2).format(Some(3)), "03");
/// assert_eq!(LabelFormatter::new(5).format(Some(3)), "00003");
/// assert_eq!(LabelFormatter::new(2).format(None), "");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelFormatter {
    precision: usize,
}

impl LabelFormatter {
    /// Creates a formatter padding to `precision` digits
    ///
    /// A precision of 0 falls back to [`DEFAULT_PRECISION`].
    pub fn new(precision: usize) -> Self {
        let precision = if precision == 0 {
            DEFAULT_PRECISION
        } else {
            precision
        };
        Self { precision }
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Formats an index, leaving the empty placeholder empty
    pub fn format(&self, value: Option<u32>) -> String {
        match value {
            Some(v) => format!("{:0width$}", v, width = self.precision),
            None => String::new(),
        }
    }

    /// Formats a textual index
    ///
    /// # Errors
    ///
    /// Returns [`Dac2BidsError::InvalidNumber`] if `value` is neither empty
    /// nor a non-negative integer.
    pub fn format_str(&self, value: &str) -> Result<String> {
        parse_index(value).map(|index| self.format(index))
    }
}

impl Default for LabelFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION)
    }
}

/// Shorthand for `LabelFormatter::new(precision).format(value)`
pub fn format_index(precision: usize, value: Option<u32>) -> String {
    LabelFormatter::new(precision).format(value)
}

/// Parses a textual index; the empty string is the empty placeholder
pub fn parse_index(value: &str) -> Result<Option<u32>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u32>()
        .map(Some)
        .map_err(|_| Dac2BidsError::InvalidNumber(value.to_string()))
}
