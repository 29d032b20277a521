use super::ImageType;
use serde::{Deserialize, Serialize};

/// Facts about one leaf folder, read from its representative file
///
/// Every DICOM-derived attribute is optional: `None` means the attribute was
/// absent from the file. The protocol counts come from the embedded Siemens
/// protocol text and are `None` when the key is missing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FolderMetadata {
    /// Name of the leaf folder (last path component)
    pub folder_name: String,

    /// ScanningSequence values (e.g. `EP`, `GR`, `IR`)
    pub scanning_sequence: Option<Vec<String>>,

    /// EchoNumbers
    pub echo_number: Option<u32>,

    /// SeriesDescription
    pub series_description: Option<String>,

    /// ImageType values
    pub image_type: Option<ImageType>,

    /// SequenceName (e.g. `*fm2d2r`)
    pub sequence_name: Option<String>,

    /// `lRepetitions` from the protocol text
    pub repetitions: Option<u32>,

    /// `lContrasts` from the protocol text
    pub contrasts: Option<u32>,

    /// Number of image files in the folder
    pub file_count: usize,
}

impl FolderMetadata {
    /// Creates an empty snapshot for a named folder
    pub fn new(folder_name: impl Into<String>) -> Self {
        Self {
            folder_name: folder_name.into(),
            ..Default::default()
        }
    }

    pub fn with_scanning_sequence(mut self, codes: &[&str]) -> Self {
        self.scanning_sequence = Some(codes.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn with_echo_number(mut self, echo: u32) -> Self {
        self.echo_number = Some(echo);
        self
    }

    pub fn with_series_description(mut self, desc: impl Into<String>) -> Self {
        self.series_description = Some(desc.into());
        self
    }

    pub fn with_image_type(mut self, raw: &str) -> Self {
        self.image_type = Some(ImageType::parse(raw));
        self
    }

    pub fn with_sequence_name(mut self, name: impl Into<String>) -> Self {
        self.sequence_name = Some(name.into());
        self
    }

    pub fn with_repetitions(mut self, repetitions: u32) -> Self {
        self.repetitions = Some(repetitions);
        self
    }

    pub fn with_contrasts(mut self, contrasts: u32) -> Self {
        self.contrasts = Some(contrasts);
        self
    }

    pub fn with_file_count(mut self, file_count: usize) -> Self {
        self.file_count = file_count;
        self
    }

    /// Checks whether any ScanningSequence value equals `code`
    pub fn has_sequence_code(&self, code: &str) -> bool {
        self.scanning_sequence
            .as_ref()
            .is_some_and(|codes| codes.iter().any(|c| c == code))
    }

    /// Returns true if every attribute the classifier relies on is present
    pub fn has_required_attributes(&self) -> bool {
        self.scanning_sequence.is_some()
            && self.echo_number.is_some()
            && self.series_description.is_some()
            && self.image_type.is_some()
            && self.sequence_name.is_some()
    }

    /// Checks the protocol repetition count against the files on disk
    ///
    /// A scan aborted mid-run still lands in the PACS, with fewer files than
    /// the protocol asked for. Without a repetition count the folder counts
    /// as complete.
    pub fn is_complete(&self) -> bool {
        match self.repetitions {
            Some(reps) => (reps as i64) <= self.file_count as i64 - 1,
            None => true,
        }
    }

    /// Multi-echo when the protocol declares more than one contrast
    pub fn is_multiecho(&self) -> bool {
        self.contrasts.is_some_and(|c| c > 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_codes() {
        let meta = FolderMetadata::new("t1").with_scanning_sequence(&["GR", "IR"]);
        assert!(meta.has_sequence_code("GR"));
        assert!(meta.has_sequence_code("IR"));
        assert!(!meta.has_sequence_code("EP"));
        assert!(!FolderMetadata::new("empty").has_sequence_code("EP"));
    }

    #[test]
    fn test_completeness() {
        let incomplete = FolderMetadata::new("bold")
            .with_repetitions(20)
            .with_file_count(15);
        assert!(!incomplete.is_complete());

        let complete = FolderMetadata::new("bold")
            .with_repetitions(20)
            .with_file_count(21);
        assert!(complete.is_complete());

        let no_protocol = FolderMetadata::new("bold").with_file_count(0);
        assert!(no_protocol.is_complete());

        let empty_folder = FolderMetadata::new("bold").with_repetitions(0);
        assert!(!empty_folder.is_complete());
    }

    #[test]
    fn test_multiecho() {
        assert!(FolderMetadata::new("me").with_contrasts(4).is_multiecho());
        assert!(!FolderMetadata::new("se").with_contrasts(1).is_multiecho());
        assert!(!FolderMetadata::new("none").is_multiecho());
    }

    #[test]
    fn test_required_attributes() {
        let meta = FolderMetadata::new("t1")
            .with_scanning_sequence(&["IR"])
            .with_echo_number(1)
            .with_series_description("t1_mprage")
            .with_image_type("ORIGINAL\\PRIMARY\\M\\ND")
            .with_sequence_name("*tfl3d1_16ns");
        assert!(meta.has_required_attributes());

        let physio = FolderMetadata::new("physio").with_image_type("ORIGINAL\\PRIMARY\\RAWDATA");
        assert!(!physio.has_required_attributes());
    }
}
