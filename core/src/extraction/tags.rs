use dicom_core::Tag;
use dicom_dictionary_std::tags;
use dicom_object::InMemDicomObject;

// Classification Tags
pub const IMAGE_TYPE: Tag = tags::IMAGE_TYPE;
pub const SCANNING_SEQUENCE: Tag = tags::SCANNING_SEQUENCE;
pub const SEQUENCE_NAME: Tag = tags::SEQUENCE_NAME;
pub const ECHO_NUMBERS: Tag = tags::ECHO_NUMBERS;

// Description Tags
pub const SERIES_DESCRIPTION: Tag = tags::SERIES_DESCRIPTION;

// Reading stops here; the header is all we need
pub const PIXEL_DATA: Tag = tags::PIXEL_DATA;

/// Helper to get string value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to string
pub fn get_string_value(dcm: &InMemDicomObject, tag: Tag) -> Option<String> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_str().ok())
        .map(|s| s.trim().to_string())
}

/// Helper to get integer value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to i32
pub fn get_int_value(dcm: &InMemDicomObject, tag: Tag) -> Option<i32> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_int::<i32>().ok())
}

/// Helper to get multi-string value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to Vec<String>
pub fn get_multi_string_value(dcm: &InMemDicomObject, tag: Tag) -> Option<Vec<String>> {
    dcm.element(tag).ok().and_then(|elem| {
        if let Ok(strs) = elem.to_multi_str() {
            Some(strs.iter().map(|s| s.trim().to_string()).collect())
        } else {
            // Fallback: split a single string on the DICOM value separator
            elem.to_str()
                .ok()
                .map(|s| s.split('\\').map(|part| part.trim().to_string()).collect())
        }
    })
}
