//! End-to-end pipeline over an input tree
//!
//! The input root holds one subfolder per acquisition. Each of those leaf
//! folders is read, classified and named; the result is a [`ConversionPlan`]
//! listing the accepted [`OutputRecord`]s and the excluded folders.

mod record;

pub use record::OutputRecord;

use crate::classify::{AcquisitionClassifier, ClassifierSettings, Decision};
use crate::error::{Dac2BidsError, Result};
use crate::extraction::MetadataSource;
use crate::folders::{has_subdirectory, list_subdirectories, LeafFolder};
use crate::naming::{NamingConfiguration, DEFAULT_PRECISION};
use crate::types::{Category, ExclusionReason};
use log::{debug, info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Options for a run over one input tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorOptions {
    /// Subject index; `None` falls back to 1
    pub subject_index: Option<u32>,

    /// Session index; `None` falls back to 1
    pub session_index: Option<u32>,

    /// Prefer indices found in the input path over the explicit ones
    pub auto_detect: bool,

    /// Drop folders holding fewer files than the protocol planned
    pub skip_incomplete: bool,

    /// Drop field maps
    pub skip_fieldmap: bool,

    /// Folder names to leave out
    pub ignore_dirs: Vec<String>,

    /// Zero-padding of subject and session indices
    pub precision: usize,

    pub classifier: ClassifierSettings,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            subject_index: None,
            session_index: None,
            auto_detect: false,
            skip_incomplete: true,
            skip_fieldmap: false,
            ignore_dirs: Vec::new(),
            precision: DEFAULT_PRECISION,
            classifier: ClassifierSettings::default(),
        }
    }
}

impl OrchestratorOptions {
    pub fn with_subject_index(mut self, index: u32) -> Self {
        self.subject_index = Some(index);
        self
    }

    pub fn with_session_index(mut self, index: u32) -> Self {
        self.session_index = Some(index);
        self
    }

    pub fn auto_detect(mut self, enabled: bool) -> Self {
        self.auto_detect = enabled;
        self
    }

    pub fn skip_incomplete(mut self, enabled: bool) -> Self {
        self.skip_incomplete = enabled;
        self
    }

    pub fn skip_fieldmap(mut self, enabled: bool) -> Self {
        self.skip_fieldmap = enabled;
        self
    }

    pub fn ignore_dir(mut self, name: impl Into<String>) -> Self {
        self.ignore_dirs.push(name.into());
        self
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_classifier(mut self, settings: ClassifierSettings) -> Self {
        self.classifier = settings;
        self
    }

    /// Checks whether the last component of `dir` is on the ignore list
    pub fn is_ignored(&self, dir: &Path) -> bool {
        dir.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.ignore_dirs.iter().any(|d| d == name))
    }
}

/// A folder left out of the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exclusion {
    pub folder: PathBuf,
    pub reason: ExclusionReason,
}

/// Result of a run: accepted records plus excluded folders
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionPlan {
    /// Sorted by destination directory, then filename
    pub records: Vec<OutputRecord>,

    /// In folder order
    pub exclusions: Vec<Exclusion>,
}

impl ConversionPlan {
    pub fn records(&self) -> &[OutputRecord] {
        &self.records
    }

    pub fn exclusions(&self) -> &[Exclusion] {
        &self.exclusions
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Drives classification and naming over every leaf folder of an input root
#[derive(Debug)]
pub struct FolderOrchestrator {
    input_dir: PathBuf,
    output_dir: PathBuf,
    options: OrchestratorOptions,
    classifier: AcquisitionClassifier,
    leaf_dirs: Vec<PathBuf>,
}

impl FolderOrchestrator {
    /// Verifies the input tree and lists its leaf folders
    ///
    /// # Errors
    ///
    /// - [`Dac2BidsError::NotADirectory`] if `input_dir` is missing or not a directory
    /// - [`Dac2BidsError::ImproperStructure`] if a leaf folder has subfolders;
    ///   ignored folders are not checked
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        options: OrchestratorOptions,
    ) -> Result<Self> {
        let input_dir = input_dir.into();
        if !input_dir.is_dir() {
            return Err(Dac2BidsError::NotADirectory(input_dir));
        }

        let leaf_dirs = list_subdirectories(&input_dir)?;
        for dir in leaf_dirs.iter().filter(|d| !options.is_ignored(d)) {
            if has_subdirectory(dir)? {
                return Err(Dac2BidsError::ImproperStructure(dir.clone()));
            }
        }

        let classifier = AcquisitionClassifier::new(options.classifier.clone());

        Ok(Self {
            input_dir,
            output_dir: output_dir.into(),
            options,
            classifier,
            leaf_dirs,
        })
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn options(&self) -> &OrchestratorOptions {
        &self.options
    }

    /// Leaf folders, sorted by name
    pub fn leaf_dirs(&self) -> &[PathBuf] {
        &self.leaf_dirs
    }

    /// Subject index from the scheduler naming convention (`sub-x<digits>`)
    pub fn autocheck_subject(&self) -> Option<u32> {
        static REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = REGEX.get_or_init(|| {
            Regex::new(r"sub-x(\d+)").expect("Failed to compile regex")
        });
        detect_index(regex, &self.input_dir)
    }

    /// Session index from the scheduler naming convention (`ses-mri-X<digits>`)
    pub fn autocheck_session(&self) -> Option<u32> {
        static REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = REGEX.get_or_init(|| {
            Regex::new(r"ses-mri-X(\d+)").expect("Failed to compile regex")
        });
        detect_index(regex, &self.input_dir)
    }

    /// Subject index used for naming
    pub fn subject_index(&self) -> u32 {
        self.resolve(self.autocheck_subject(), self.options.subject_index)
    }

    /// Session index used for naming
    pub fn session_index(&self) -> u32 {
        self.resolve(self.autocheck_session(), self.options.session_index)
    }

    fn resolve(&self, detected: Option<u32>, explicit: Option<u32>) -> u32 {
        let detected = detected.filter(|_| self.options.auto_detect);
        detected.or(explicit).unwrap_or(1)
    }

    /// Subject and session entities shared by every record of the run
    pub fn base_naming(&self) -> NamingConfiguration {
        NamingConfiguration::default()
            .with_subject_index(self.subject_index())
            .with_session_index(self.session_index())
    }

    /// Classifies and names every leaf folder
    ///
    /// Per-folder problems never fail the run; they end up in
    /// [`ConversionPlan::exclusions`]. Errors only come from listing a folder.
    pub fn run<S: MetadataSource>(&self, source: &S) -> Result<ConversionPlan> {
        let base = self.base_naming();
        let mut plan = ConversionPlan::default();

        info!(
            "Processing {} folders in {}",
            self.leaf_dirs.len(),
            self.input_dir.display()
        );

        for dir in &self.leaf_dirs {
            if self.options.is_ignored(dir) {
                info!("Ignoring {}", dir.display());
                plan.exclusions.push(Exclusion {
                    folder: dir.clone(),
                    reason: ExclusionReason::Ignored,
                });
                continue;
            }

            let leaf = LeafFolder::scan(dir)?;
            match self.process_folder(&leaf, source, &base) {
                Ok(record) => {
                    info!("{} -> {}", leaf.name, record.filename);
                    plan.records.push(record);
                }
                Err(reason) => {
                    warn!("Skipping {}: {}", leaf.name, reason);
                    plan.exclusions.push(Exclusion {
                        folder: leaf.path.clone(),
                        reason,
                    });
                }
            }
        }

        plan.records.sort_by(|a, b| {
            a.out_dir
                .cmp(&b.out_dir)
                .then_with(|| a.filename.cmp(&b.filename))
        });

        info!(
            "{} folders accepted, {} excluded",
            plan.records.len(),
            plan.exclusions.len()
        );

        Ok(plan)
    }

    fn process_folder<S: MetadataSource>(
        &self,
        leaf: &LeafFolder,
        source: &S,
        base: &NamingConfiguration,
    ) -> std::result::Result<OutputRecord, ExclusionReason> {
        let meta = source
            .read_metadata(leaf)
            .map_err(|e| ExclusionReason::Failed(e.to_string()))?;

        let classification = match self.classifier.classify(&meta) {
            Decision::Accept(classification) => classification,
            Decision::Exclude(reason) => return Err(reason),
        };
        debug!("{}: {:?}", leaf.name, classification);

        if classification.category == Category::Unknown {
            return Err(ExclusionReason::UnknownCategory);
        }
        if self.options.skip_incomplete && !classification.is_complete {
            return Err(ExclusionReason::Incomplete);
        }
        if self.options.skip_fieldmap && classification.category == Category::FieldMap {
            return Err(ExclusionReason::SkippedFieldMap);
        }

        OutputRecord::build(
            &classification,
            base,
            self.options.precision,
            &leaf.path,
            &self.output_dir,
        )
        .map_err(|e| ExclusionReason::Failed(e.to_string()))
    }
}

fn detect_index(regex: &Regex, path: &Path) -> Option<u32> {
    let text = path.to_string_lossy();
    regex
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FolderMetadata;
    use std::collections::HashMap;
    use std::fs::{self, File};
    use tempfile::TempDir;

    /// Metadata keyed by folder name; unknown folders are unreadable
    struct FakeSource(HashMap<String, FolderMetadata>);

    impl MetadataSource for FakeSource {
        fn read_metadata(&self, folder: &LeafFolder) -> Result<FolderMetadata> {
            self.0
                .get(&folder.name)
                .cloned()
                .map(|meta| meta.with_file_count(folder.file_count()))
                .ok_or_else(|| Dac2BidsError::MetadataUnavailable {
                    path: folder.path.clone(),
                    reason: "not a dicom".to_string(),
                })
        }
    }

    fn make_leaf(root: &Path, name: &str, files: usize) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        for i in 0..files {
            File::create(dir.join(format!("IM_{:04}.dcm", i))).unwrap();
        }
    }

    fn t1(folder: &str) -> FolderMetadata {
        FolderMetadata::new(folder)
            .with_scanning_sequence(&["GR", "IR"])
            .with_echo_number(1)
            .with_series_description("t1_mprage_sag")
            .with_image_type("ORIGINAL\\PRIMARY\\M\\ND")
            .with_sequence_name("*tfl3d1_16ns")
            .with_repetitions(0)
    }

    fn rest(folder: &str, repetitions: u32) -> FolderMetadata {
        FolderMetadata::new(folder)
            .with_scanning_sequence(&["EP"])
            .with_echo_number(1)
            .with_series_description("Resting_State")
            .with_image_type("ORIGINAL\\PRIMARY\\M\\ND")
            .with_sequence_name("epfid2d1_64")
            .with_repetitions(repetitions)
    }

    fn fieldmap(folder: &str) -> FolderMetadata {
        FolderMetadata::new(folder)
            .with_scanning_sequence(&["GR"])
            .with_echo_number(2)
            .with_series_description("gre_field_mapping")
            .with_image_type("ORIGINAL\\PRIMARY\\P\\ND")
            .with_sequence_name("*fm2d2r")
    }

    fn source(entries: Vec<FolderMetadata>) -> FakeSource {
        FakeSource(
            entries
                .into_iter()
                .map(|m| (m.folder_name.clone(), m))
                .collect(),
        )
    }

    #[test]
    fn test_inexistent_input_dir() {
        let result = FolderOrchestrator::new(
            "blabasfjdhkjshdf",
            "ulalala",
            OrchestratorOptions::default(),
        );
        assert!(matches!(result, Err(Dac2BidsError::NotADirectory(_))));
    }

    #[test]
    fn test_input_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("file.dcm");
        File::create(&file).unwrap();
        let result = FolderOrchestrator::new(&file, "out", OrchestratorOptions::default());
        assert!(matches!(result, Err(Dac2BidsError::NotADirectory(_))));
    }

    #[test]
    fn test_nested_folder_is_improper_structure() {
        let temp_dir = TempDir::new().unwrap();
        make_leaf(temp_dir.path(), "05_t1", 2);
        make_leaf(temp_dir.path(), "10_rest/echo1", 2);

        let root = temp_dir.path();
        let result = FolderOrchestrator::new(root, "out", OrchestratorOptions::default());
        match result {
            Err(Dac2BidsError::ImproperStructure(dir)) => {
                assert_eq!(dir, root.join("10_rest"))
            }
            other => panic!("expected ImproperStructure, got {:?}", other),
        }
    }

    #[test]
    fn test_hidden_subfolders_are_allowed() {
        let temp_dir = TempDir::new().unwrap();
        make_leaf(temp_dir.path(), "05_t1/.thumbs", 1);

        let root = temp_dir.path();
        let orchestrator =
            FolderOrchestrator::new(root, "out", OrchestratorOptions::default()).unwrap();
        assert_eq!(orchestrator.leaf_dirs(), &[root.join("05_t1")]);
    }

    #[test]
    fn test_hidden_top_level_dir_with_nested_children_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        make_leaf(temp_dir.path(), "05_t1", 2);
        make_leaf(temp_dir.path(), ".git/objects/pack", 1);
        make_leaf(temp_dir.path(), ".Trash/10_rest/echo1", 1);

        let root = temp_dir.path();
        let orchestrator =
            FolderOrchestrator::new(root, "out", OrchestratorOptions::default()).unwrap();
        assert_eq!(orchestrator.leaf_dirs(), &[root.join("05_t1")]);

        let plan = orchestrator.run(&source(vec![t1("05_t1")])).unwrap();
        assert_eq!(plan.records().len(), 1);
        assert!(plan.exclusions().is_empty());
    }

    #[test]
    fn test_ignored_nested_folder_does_not_abort() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("input");
        make_leaf(&input, "05_t1", 2);
        make_leaf(&input, "90_exports/dicomdir", 1);

        let result = FolderOrchestrator::new(&input, "out", OrchestratorOptions::default());
        assert!(matches!(result, Err(Dac2BidsError::ImproperStructure(_))));

        let orchestrator = FolderOrchestrator::new(
            &input,
            "out",
            OrchestratorOptions::default().ignore_dir("90_exports"),
        )
        .unwrap();
        let plan = orchestrator.run(&source(vec![t1("05_t1")])).unwrap();
        assert_eq!(plan.records().len(), 1);
        assert_eq!(plan.exclusions().len(), 1);
        assert_eq!(plan.exclusions()[0].folder, input.join("90_exports"));
        assert_eq!(plan.exclusions()[0].reason, ExclusionReason::Ignored);
    }

    #[test]
    fn test_autochecks() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("sub-x005").join("ses-mri-X5");
        fs::create_dir_all(&input).unwrap();

        let orchestrator = FolderOrchestrator::new(
            &input,
            temp_dir.path().join("out"),
            OrchestratorOptions::default(),
        )
        .unwrap();
        assert_eq!(orchestrator.autocheck_subject(), Some(5));
        assert_eq!(orchestrator.autocheck_session(), Some(5));
    }

    #[test]
    fn test_index_resolution() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("sub-x012").join("ses-mri-X3");
        fs::create_dir_all(&input).unwrap();

        let explicit = OrchestratorOptions::default()
            .with_subject_index(7)
            .with_session_index(2);

        let orchestrator = FolderOrchestrator::new(&input, "out", explicit.clone()).unwrap();
        assert_eq!(orchestrator.subject_index(), 7);
        assert_eq!(orchestrator.session_index(), 2);

        let orchestrator =
            FolderOrchestrator::new(&input, "out", explicit.auto_detect(true)).unwrap();
        assert_eq!(orchestrator.subject_index(), 12);
        assert_eq!(orchestrator.session_index(), 3);

        let plain = temp_dir.path().join("plain");
        fs::create_dir_all(&plain).unwrap();
        let options = OrchestratorOptions::default()
            .with_subject_index(4)
            .auto_detect(true);
        let orchestrator = FolderOrchestrator::new(&plain, "out", options).unwrap();
        assert_eq!(orchestrator.subject_index(), 4);
        assert_eq!(orchestrator.session_index(), 1);
    }

    #[test]
    fn test_run_builds_sorted_records() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("input");
        make_leaf(&input, "10_rest", 21);
        make_leaf(&input, "05_t1", 3);
        make_leaf(&input, "01_localizer", 3);

        let orchestrator = FolderOrchestrator::new(
            &input,
            temp_dir.path().join("out"),
            OrchestratorOptions::default(),
        )
        .unwrap();
        let folders = source(vec![t1("05_t1"), rest("10_rest", 20), t1("01_localizer")]);
        let plan = orchestrator.run(&folders).unwrap();

        let names: Vec<_> = plan.records().iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "sub-01_ses-01_T1w",
                "sub-01_ses-01_task-rest_acq-mb01_bold_magnitude01"
            ]
        );
        assert_eq!(plan.exclusions().len(), 1);
        assert_eq!(plan.exclusions()[0].reason, ExclusionReason::Localizer);
    }

    #[test]
    fn test_incomplete_acquisition_excluded() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("input");
        make_leaf(&input, "10_rest", 15);

        let orchestrator =
            FolderOrchestrator::new(&input, "out", OrchestratorOptions::default()).unwrap();
        let folders = source(vec![rest("10_rest", 20)]);
        let plan = orchestrator.run(&folders).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.exclusions()[0].reason, ExclusionReason::Incomplete);

        let keep = FolderOrchestrator::new(
            &input,
            "out",
            OrchestratorOptions::default().skip_incomplete(false),
        )
        .unwrap();
        let plan = keep.run(&folders).unwrap();
        assert_eq!(plan.records().len(), 1);
    }

    #[test]
    fn test_skip_fieldmap() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("input");
        make_leaf(&input, "20_fmap", 2);

        let keep = FolderOrchestrator::new(&input, "out", OrchestratorOptions::default()).unwrap();
        let plan = keep.run(&source(vec![fieldmap("20_fmap")])).unwrap();
        assert_eq!(plan.records()[0].filename, "sub-01_ses-01_phasediff");

        let skip = FolderOrchestrator::new(
            &input,
            "out",
            OrchestratorOptions::default().skip_fieldmap(true),
        )
        .unwrap();
        let plan = skip.run(&source(vec![fieldmap("20_fmap")])).unwrap();
        assert!(plan.is_empty());
        assert_eq!(
            plan.exclusions()[0].reason,
            ExclusionReason::SkippedFieldMap
        );
    }

    #[test]
    fn test_per_folder_failures_do_not_abort() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("input");
        make_leaf(&input, "05_t1", 2);
        make_leaf(&input, "90_report", 1);
        make_leaf(&input, "91_ignored", 1);

        let orchestrator = FolderOrchestrator::new(
            &input,
            "out",
            OrchestratorOptions::default().ignore_dir("91_ignored"),
        )
        .unwrap();
        let plan = orchestrator.run(&source(vec![t1("05_t1")])).unwrap();

        assert_eq!(plan.records().len(), 1);
        assert_eq!(plan.exclusions().len(), 2);
        assert!(matches!(plan.exclusions()[0].reason, ExclusionReason::Failed(_)));
        assert_eq!(plan.exclusions()[1].reason, ExclusionReason::Ignored);
    }

    #[test]
    fn test_precision_applies_to_subject_and_session() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("input");
        make_leaf(&input, "05_t1", 2);

        let orchestrator = FolderOrchestrator::new(
            &input,
            temp_dir.path().join("out"),
            OrchestratorOptions::default()
                .with_subject_index(3)
                .with_precision(3),
        )
        .unwrap();
        let plan = orchestrator.run(&source(vec![t1("05_t1")])).unwrap();
        let record = &plan.records()[0];
        assert_eq!(record.filename, "sub-003_ses-001_T1w");
        assert!(record.out_dir.ends_with("out/sub-003/ses-001/anat"));
    }
}
