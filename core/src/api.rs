use crate::error::Result;
use crate::extraction::{DicomMetadataSource, MetadataSource};
use crate::manifest::Manifest;
use crate::orchestrator::{ConversionPlan, FolderOrchestrator, OrchestratorOptions};
use std::path::PathBuf;

/// High-level entry point: input tree in, dcm2niibatch manifest out
///
/// # Example
///
/// ```no_run
/// use dac2bids_core::{Dac2Bids, OrchestratorOptions};
///
/// let options = OrchestratorOptions::default()
///     .with_subject_index(5)
///     .with_session_index(1);
/// let yaml = Dac2Bids::create_yaml("/data/dicom/sub-x005", "/data/bids", options).unwrap();
/// std::fs::write("sub-5_ses-1.yaml", yaml).unwrap();
/// ```
pub struct Dac2Bids;

impl Dac2Bids {
    /// Classifies and names every series under `input_dir`
    ///
    /// # Errors
    ///
    /// Only structural problems with the input tree are errors; folders that
    /// cannot be converted are listed in the plan's exclusions.
    pub fn plan(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        options: OrchestratorOptions,
    ) -> Result<ConversionPlan> {
        Self::plan_with_source(input_dir, output_dir, options, &DicomMetadataSource::new())
    }

    /// Same as [`Dac2Bids::plan`] with a custom metadata source
    pub fn plan_with_source<S: MetadataSource>(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        options: OrchestratorOptions,
        source: &S,
    ) -> Result<ConversionPlan> {
        let orchestrator = FolderOrchestrator::new(input_dir, output_dir, options)?;
        orchestrator.run(source)
    }

    /// Builds the manifest for `input_dir`
    pub fn create_manifest(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        options: OrchestratorOptions,
    ) -> Result<Manifest> {
        let plan = Self::plan(input_dir, output_dir, options)?;
        Ok(Manifest::from_records(plan.records()))
    }

    /// Builds the manifest for `input_dir` as YAML text
    pub fn create_yaml(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        options: OrchestratorOptions,
    ) -> Result<String> {
        let manifest = Self::create_manifest(input_dir, output_dir, options)?;
        manifest.to_yaml()
    }
}
