use crate::error::{Dac2BidsError, Result};
use crate::naming::{NamingConfiguration, TagComposer};
use crate::types::{AcquisitionClassification, Category, ContrastType, ImageComponent};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One accepted folder: where it comes from, where it goes, what it is called
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRecord {
    /// Absolute source directory
    pub in_dir: PathBuf,

    /// Absolute destination directory
    pub out_dir: PathBuf,

    /// Filename stem without extension
    pub filename: String,

    /// Canonical ending the filename was validated against
    pub suffix: String,

    pub category: Category,
}

impl OutputRecord {
    /// Composes the record of a classified folder
    ///
    /// `base` carries the subject and session entities; the task and
    /// acquisition entities are filled in from the classification.
    ///
    /// # Errors
    ///
    /// Naming errors from the composer: malformed labels, a missing task
    /// label, an unknown category or a suffix outside the canonical endings.
    pub fn build(
        classification: &AcquisitionClassification,
        base: &NamingConfiguration,
        precision: usize,
        in_dir: &Path,
        output_root: &Path,
    ) -> Result<Self> {
        let config = naming_for(classification, base);
        let composer = TagComposer::for_category(classification.category, config, precision)?;

        let (suffix, part) = suffix_and_part(classification);
        let filename = composer.filename(&suffix, part.as_deref())?;

        let mut out_dir = output_root.to_path_buf();
        for segment in [composer.subject_tag(), composer.session_tag()] {
            if !segment.is_empty() {
                out_dir.push(segment);
            }
        }
        let directory = composer.canonical_directory().ok_or_else(|| {
            Dac2BidsError::InconsistentNaming(format!(
                "no BIDS directory for {}",
                classification.category
            ))
        })?;
        out_dir.push(directory);

        Ok(Self {
            in_dir: std::path::absolute(in_dir)?,
            out_dir: std::path::absolute(out_dir)?,
            filename,
            suffix,
            category: classification.category,
        })
    }
}

/// Naming entities for a classified folder
fn naming_for(
    classification: &AcquisitionClassification,
    base: &NamingConfiguration,
) -> NamingConfiguration {
    let mut config = base.clone();

    if classification.category == Category::Functional {
        if let Some(task) = &classification.task {
            config.task.label = task.clone();
        }
        if let Some(acq) = classification.acquisition_label() {
            config.acquisition.label = acq.to_string();
            config.acquisition.index = Some(classification.echo);
        }
    }

    config
}

/// Canonical ending and optional trailing part
///
/// Functional and T2* images keep magnitude and phase of every echo apart
/// with a `<component><echo>` part after the suffix.
fn suffix_and_part(classification: &AcquisitionClassification) -> (String, Option<String>) {
    let echo_part = || {
        format!(
            "{}{:02}",
            classification.component.simple_name(),
            classification.echo
        )
    };

    match (classification.category, classification.contrast) {
        (Category::Functional, _) => ("bold".to_string(), Some(echo_part())),
        (Category::Anatomical, ContrastType::T2star) => ("T2star".to_string(), Some(echo_part())),
        (Category::Anatomical, contrast) => (contrast.simple_name().to_string(), None),
        (Category::FieldMap, _) => {
            let suffix = match classification.component {
                ImageComponent::Magnitude => format!("magnitude{}", classification.echo),
                ImageComponent::Phase => "phasediff".to_string(),
                ImageComponent::Unknown => "fieldmap".to_string(),
            };
            (suffix, None)
        }
        (Category::Physiological, _) => ("physio".to_string(), None),
        (Category::Diffusion, _) => ("dwi".to_string(), None),
        (Category::Unknown, _) => ("unknown".to_string(), None),
    }
}
