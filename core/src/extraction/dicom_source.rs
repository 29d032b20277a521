use super::protocol::read_protocol_counts;
use super::tags::{
    get_int_value, get_multi_string_value, get_string_value, ECHO_NUMBERS, IMAGE_TYPE,
    PIXEL_DATA, SCANNING_SEQUENCE, SEQUENCE_NAME, SERIES_DESCRIPTION,
};
use super::MetadataSource;
use crate::error::{Dac2BidsError, Result};
use crate::folders::LeafFolder;
use crate::types::{FolderMetadata, ImageType};
use dicom_object::{InMemDicomObject, OpenFileOptions};
use log::debug;

/// Reads folder metadata from DICOM files on disk
///
/// Only the header of the representative file is parsed; reading stops at
/// the pixel data.
#[derive(Debug, Clone, Copy, Default)]
pub struct DicomMetadataSource;

impl DicomMetadataSource {
    pub fn new() -> Self {
        Self
    }
}

impl MetadataSource for DicomMetadataSource {
    fn read_metadata(&self, folder: &LeafFolder) -> Result<FolderMetadata> {
        let file = folder
            .representative()
            .ok_or_else(|| Dac2BidsError::MetadataUnavailable {
                path: folder.path.clone(),
                reason: "folder contains no files".to_string(),
            })?;

        debug!("Reading {}", file.display());

        let dcm = OpenFileOptions::new()
            .read_until(PIXEL_DATA)
            .open_file(file)
            .map_err(|e| Dac2BidsError::MetadataUnavailable {
                path: file.to_path_buf(),
                reason: e.to_string(),
            })?;

        let mut meta = extract_folder_metadata(&dcm, &folder.name);

        let counts = read_protocol_counts(file)?;
        meta.repetitions = counts.repetitions;
        meta.contrasts = counts.contrasts;
        meta.file_count = folder.file_count();

        Ok(meta)
    }
}

/// Extracts the classification attributes of a DICOM object
///
/// Protocol counts and the file count are left unset.
pub fn extract_folder_metadata(dcm: &InMemDicomObject, folder_name: &str) -> FolderMetadata {
    FolderMetadata {
        folder_name: folder_name.to_string(),
        scanning_sequence: get_multi_string_value(dcm, SCANNING_SEQUENCE),
        echo_number: get_int_value(dcm, ECHO_NUMBERS).and_then(|e| u32::try_from(e).ok()),
        series_description: get_string_value(dcm, SERIES_DESCRIPTION),
        image_type: get_multi_string_value(dcm, IMAGE_TYPE).map(ImageType::new),
        sequence_name: get_string_value(dcm, SEQUENCE_NAME),
        ..Default::default()
    }
}
