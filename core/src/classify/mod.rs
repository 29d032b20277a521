//! Acquisition classification
//!
//! Decides from a [`FolderMetadata`] snapshot what a folder contains. The
//! heuristics live in an ordered rule table (see [`default_rules`]); the
//! first rule that matches decides.

mod rules;

pub use rules::{default_rules, Rule};

use crate::types::{AcquisitionClassification, ExclusionReason, FolderMetadata};
use log::debug;
use serde::{Deserialize, Serialize};

/// Markers and sequence identifiers the rules match against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    /// Substring marking scout scans (folder name or series description)
    pub localizer_pattern: String,

    /// Series description marker of resting-state runs
    pub resting_marker: String,

    /// Series description marker of task runs
    pub task_marker: String,

    /// Task label given to task runs
    pub task_name: String,

    /// Siemens sequence name of the gradient echo field map
    pub fieldmap_sequence: String,

    /// Siemens sequence name of the T2* mapping sequence
    pub t2star_sequence: String,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            localizer_pattern: "localizer".to_string(),
            resting_marker: "Resting".to_string(),
            task_marker: "Task".to_string(),
            task_name: "stroop".to_string(),
            fieldmap_sequence: "*fm2d2r".to_string(),
            t2star_sequence: "*fl3d11r".to_string(),
        }
    }
}

impl ClassifierSettings {
    pub fn with_task_name(mut self, task_name: impl Into<String>) -> Self {
        self.task_name = task_name.into();
        self
    }

    pub fn with_localizer_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.localizer_pattern = pattern.into();
        self
    }
}

/// What the classifier decided about a folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Classified; the category may still be unknown
    Accept(AcquisitionClassification),
    /// Not emitted to the manifest
    Exclude(ExclusionReason),
}

/// Rule-based classifier over folder metadata
///
/// # Example
///
/// ```
/// use dac2bids_core::classify::{AcquisitionClassifier, Decision};
/// use dac2bids_core::{Category, FolderMetadata};
///
/// let meta = FolderMetadata::new("05_t1_mprage")
///     .with_scanning_sequence(&["GR", "IR"])
///     .with_echo_number(1)
///     .with_series_description("t1_mprage_sag")
///     .with_image_type("ORIGINAL\\PRIMARY\\M\\ND")
///     .with_sequence_name("*tfl3d1_16ns");
///
/// let classifier = AcquisitionClassifier::default();
/// match classifier.classify(&meta) {
///     Decision::Accept(c) => assert_eq!(c.category, Category::Anatomical),
///     Decision::Exclude(reason) => panic!("excluded: {}", reason),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AcquisitionClassifier {
    settings: ClassifierSettings,
    rules: Vec<Rule>,
}

impl AcquisitionClassifier {
    /// Creates a classifier using the default rule table
    pub fn new(settings: ClassifierSettings) -> Self {
        Self::with_rules(settings, default_rules())
    }

    /// Creates a classifier with a custom rule table
    pub fn with_rules(settings: ClassifierSettings, rules: Vec<Rule>) -> Self {
        Self { settings, rules }
    }

    pub fn settings(&self) -> &ClassifierSettings {
        &self.settings
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Classifies one folder
    ///
    /// Never fails: folders no rule recognizes come back as unknown.
    pub fn classify(&self, meta: &FolderMetadata) -> Decision {
        for rule in &self.rules {
            if (rule.matches)(meta, &self.settings) {
                let decision = (rule.decide)(meta, &self.settings);
                debug!(
                    "{}: rule {} decided {:?}",
                    meta.folder_name, rule.name, decision
                );
                return decision;
            }
        }

        debug!("{}: no rule matched", meta.folder_name);
        Decision::Accept(AcquisitionClassification::unknown())
    }
}

impl Default for AcquisitionClassifier {
    fn default() -> Self {
        Self::new(ClassifierSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, ContrastType, ImageComponent};
    use rstest::rstest;

    fn siemens(folder: &str, seq: &[&str], desc: &str, seqname: &str) -> FolderMetadata {
        FolderMetadata::new(folder)
            .with_scanning_sequence(seq)
            .with_echo_number(1)
            .with_series_description(desc)
            .with_image_type("ORIGINAL\\PRIMARY\\M\\ND")
            .with_sequence_name(seqname)
            .with_file_count(10)
    }

    fn accept(decision: Decision) -> AcquisitionClassification {
        match decision {
            Decision::Accept(c) => c,
            Decision::Exclude(reason) => panic!("unexpected exclusion: {}", reason),
        }
    }

    #[test]
    fn test_localizer_excluded() {
        let meta = siemens("01_localizer", &["GR"], "localizer", "*fl2d1");
        assert_eq!(
            AcquisitionClassifier::default().classify(&meta),
            Decision::Exclude(ExclusionReason::Localizer)
        );
    }

    #[test]
    fn test_localizer_wins_over_everything() {
        let meta = siemens("02_localizer_ep", &["EP"], "Resting", "*epfid2d1_64");
        assert_eq!(
            AcquisitionClassifier::default().classify(&meta),
            Decision::Exclude(ExclusionReason::Localizer)
        );
    }

    #[rstest]
    #[case("Resting_State", "rest")]
    #[case("Task_Stroop_run1", "stroop")]
    #[case("cmrr_mbep2d_bold", "unknown")]
    fn test_functional(#[case] desc: &str, #[case] task: &str) {
        let meta = siemens("10_func", &["EP"], desc, "epfid2d1_64");
        let c = accept(AcquisitionClassifier::default().classify(&meta));
        assert_eq!(c.category, Category::Functional);
        assert_eq!(c.contrast, ContrastType::Bold);
        assert_eq!(c.task.as_deref(), Some(task));
        assert!(!c.is_multiecho);
        assert_eq!(c.acquisition_label(), Some("mb"));
    }

    #[test]
    fn test_functional_multiecho() {
        let meta = siemens("11_func_me", &["EP"], "Resting", "epfid2d1_64").with_contrasts(4);
        let c = accept(AcquisitionClassifier::default().classify(&meta));
        assert!(c.is_multiecho);
        assert_eq!(c.acquisition_label(), Some("mbme"));
    }

    #[test]
    fn test_custom_task_name() {
        let classifier =
            AcquisitionClassifier::new(ClassifierSettings::default().with_task_name("nback"));
        let meta = siemens("12_func", &["EP"], "Task_WM", "epfid2d1_64");
        let c = accept(classifier.classify(&meta));
        assert_eq!(c.task.as_deref(), Some("nback"));
    }

    #[rstest]
    #[case("*fm2d2r", Category::FieldMap, ContrastType::FieldMap)]
    #[case("*fl3d11r", Category::Anatomical, ContrastType::T2star)]
    #[case("*fl2d1", Category::Unknown, ContrastType::Unknown)]
    fn test_gradient_echo(
        #[case] seqname: &str,
        #[case] category: Category,
        #[case] contrast: ContrastType,
    ) {
        let meta = siemens("20_gre", &["GR"], "gre", seqname);
        let c = accept(AcquisitionClassifier::default().classify(&meta));
        assert_eq!(c.category, category);
        assert_eq!(c.contrast, contrast);
    }

    #[test]
    fn test_inversion_recovery() {
        let meta = siemens("05_t1", &["GR", "IR"], "t1_mprage", "*tfl3d1_16ns");
        let c = accept(AcquisitionClassifier::default().classify(&meta));
        assert_eq!(c.category, Category::Anatomical);
        assert_eq!(c.contrast, ContrastType::T1w);
    }

    #[test]
    fn test_spin_echo_is_unknown() {
        let meta = siemens("30_tse", &["SE"], "t2_tse", "*tse2d1_15");
        let c = accept(AcquisitionClassifier::default().classify(&meta));
        assert!(c.category.is_unknown());
    }

    #[test]
    fn test_physiological() {
        let meta = FolderMetadata::new("40_physio")
            .with_image_type("ORIGINAL\\PRIMARY\\RAWDATA\\PHYSIO")
            .with_echo_number(2)
            .with_file_count(1);
        let c = accept(AcquisitionClassifier::default().classify(&meta));
        assert_eq!(c.category, Category::Physiological);
        assert_eq!(c.contrast, ContrastType::Physio);
        assert_eq!(c.echo, 0);
    }

    #[test]
    fn test_unrecognized() {
        let meta = FolderMetadata::new("50_report").with_series_description("PhoenixZIPReport");
        assert_eq!(
            AcquisitionClassifier::default().classify(&meta),
            Decision::Exclude(ExclusionReason::Unrecognized)
        );
    }

    #[test]
    fn test_component_and_echo() {
        let meta = FolderMetadata::new("21_t2s")
            .with_scanning_sequence(&["GR"])
            .with_echo_number(3)
            .with_series_description("t2star")
            .with_image_type("ORIGINAL\\PRIMARY\\P\\ND")
            .with_sequence_name("*fl3d11r");
        let c = accept(AcquisitionClassifier::default().classify(&meta));
        assert_eq!(c.echo, 3);
        assert_eq!(c.component, ImageComponent::Phase);
    }

    #[test]
    fn test_incomplete_is_flagged_not_excluded() {
        let meta = siemens("13_func", &["EP"], "Resting", "epfid2d1_64")
            .with_repetitions(20)
            .with_file_count(15);
        let c = accept(AcquisitionClassifier::default().classify(&meta));
        assert!(!c.is_complete);
    }

    #[test]
    fn test_empty_rule_table_yields_unknown() {
        let classifier = AcquisitionClassifier::with_rules(ClassifierSettings::default(), vec![]);
        let meta = siemens("05_t1", &["IR"], "t1", "*tfl3d1_16ns");
        let c = accept(classifier.classify(&meta));
        assert!(c.category.is_unknown());
    }

    #[test]
    fn test_extending_rule_table() {
        let mut rules = vec![Rule {
            name: "diffusion",
            matches: |meta, _| {
                meta.sequence_name
                    .as_deref()
                    .is_some_and(|s| s.starts_with("*ep_b"))
            },
            decide: |_, _| {
                Decision::Accept(AcquisitionClassification::new(
                    Category::Diffusion,
                    ContrastType::Unknown,
                ))
            },
        }];
        rules.extend(default_rules());
        let classifier = AcquisitionClassifier::with_rules(ClassifierSettings::default(), rules);

        let meta = siemens("60_dwi", &["EP"], "dwi_64dir", "*ep_b1000#1");
        let c = accept(classifier.classify(&meta));
        assert_eq!(c.category, Category::Diffusion);
    }
}
