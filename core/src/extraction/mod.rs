//! Reading folder metadata
//!
//! [`MetadataSource`] is the seam between the orchestrator and the files on
//! disk; [`DicomMetadataSource`] is the implementation used by the CLI.

pub mod dicom_source;
pub mod protocol;
pub mod tags;

pub use dicom_source::{extract_folder_metadata, DicomMetadataSource};
pub use protocol::{parse_protocol_value, read_protocol_counts, ProtocolCounts};

use crate::error::Result;
use crate::folders::LeafFolder;
use crate::types::FolderMetadata;

/// Produces a [`FolderMetadata`] snapshot for a leaf folder
pub trait MetadataSource {
    /// # Errors
    ///
    /// Returns [`crate::Dac2BidsError::MetadataUnavailable`] if the folder's
    /// representative file is unreadable or not a scan-data container.
    fn read_metadata(&self, folder: &LeafFolder) -> Result<FolderMetadata>;
}
