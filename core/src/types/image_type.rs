use super::ImageComponent;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw DICOM ImageType values of a series
///
/// Siemens writes the magnitude/phase flag as a standalone value,
/// e.g. `ORIGINAL\PRIMARY\M\ND` or `ORIGINAL\PRIMARY\P\ND`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageType {
    pub values: Vec<String>,
}

impl ImageType {
    /// Creates a new ImageType from its values
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    /// Parses a backslash-separated ImageType string
    pub fn parse(raw: &str) -> Self {
        Self::new(
            raw.split('\\')
                .map(|part| part.trim().to_string())
                .collect(),
        )
    }

    /// Checks if one of the values equals `val`
    pub fn contains(&self, val: &str) -> bool {
        self.values.iter().any(|v| v == val)
    }

    /// Derives the magnitude/phase component
    ///
    /// `M` is checked before `P`, so an ImageType carrying both reads as magnitude.
    pub fn component(&self) -> ImageComponent {
        if self.contains("M") {
            ImageComponent::Magnitude
        } else if self.contains("P") {
            ImageComponent::Phase
        } else {
            ImageComponent::Unknown
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(|v| v.is_empty())
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.values.join("\\"))
    }
}
