use std::path::PathBuf;
use thiserror::Error;

/// Result type for dac2bids operations
pub type Result<T> = std::result::Result<T, Dac2BidsError>;

/// Error types for dac2bids operations
#[derive(Error, Debug)]
pub enum Dac2BidsError {
    /// Input root is missing or is not a directory
    #[error("\"{}\" doesn't exist or is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// A leaf folder contains further (non-hidden) subfolders
    #[error("Directory {} contains subdirectories", .0.display())]
    ImproperStructure(PathBuf),

    /// A BIDS label contains a non-alphanumeric character
    #[error("Following label contains illegal character: {0}")]
    MalformedLabel(String),

    /// An obligatory BIDS label is missing
    #[error("Inconsistent BIDS naming: {0}")]
    InconsistentNaming(String),

    /// A value meant as a zero-padded index is not a non-negative integer
    #[error("Not a valid index: {0:?}")]
    InvalidNumber(String),

    /// A filename suffix is not a canonical ending for its directory
    #[error("\"{suffix}\" is not a canonical ending for {directory}")]
    InvalidEnding { suffix: String, directory: String },

    /// Metadata could not be read from a folder's representative file
    #[error("Metadata unavailable for {}: {reason}", .path.display())]
    MetadataUnavailable { path: PathBuf, reason: String },

    /// Manifest serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl Dac2BidsError {
    /// Structural errors abort the whole run; everything else only affects one folder.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Dac2BidsError::NotADirectory(_) | Dac2BidsError::ImproperStructure(_)
        )
    }
}

impl From<serde_yaml::Error> for Dac2BidsError {
    fn from(e: serde_yaml::Error) -> Self {
        Dac2BidsError::SerializationError(format!("{}", e))
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for Dac2BidsError {
    fn from(e: serde_json::Error) -> Self {
        Dac2BidsError::SerializationError(format!("{}", e))
    }
}
