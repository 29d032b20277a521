//! dcm2niibatch manifest
//!
//! The batch converter reads a YAML document with two keys: `Options`
//! (conversion flags) and `Files` (one entry per series to convert).

use crate::error::Result;
use crate::orchestrator::OutputRecord;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Conversion flags understood by dcm2niibatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestOptions {
    /// Compress output with gzip
    #[serde(rename = "isGz")]
    pub is_gz: bool,

    #[serde(rename = "isFlipY")]
    pub is_flip_y: bool,

    #[serde(rename = "isVerbose")]
    pub is_verbose: bool,

    /// Write BIDS sidecar JSON
    #[serde(rename = "isCreateBIDS")]
    pub is_create_bids: bool,

    #[serde(rename = "isOnlySingleFile")]
    pub is_only_single_file: bool,
}

impl Default for ManifestOptions {
    fn default() -> Self {
        Self {
            is_gz: true,
            is_flip_y: false,
            is_verbose: false,
            is_create_bids: true,
            is_only_single_file: false,
        }
    }
}

/// One series for the converter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestFile {
    pub in_dir: PathBuf,
    pub out_dir: PathBuf,
    pub filename: String,
}

impl From<&OutputRecord> for ManifestFile {
    fn from(record: &OutputRecord) -> Self {
        Self {
            in_dir: record.in_dir.clone(),
            out_dir: record.out_dir.clone(),
            filename: record.filename.clone(),
        }
    }
}

/// Complete dcm2niibatch document
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(rename = "Options")]
    pub options: ManifestOptions,

    #[serde(rename = "Files")]
    pub files: Vec<ManifestFile>,
}

impl Manifest {
    /// Manifest with default options listing `records` in order
    pub fn from_records(records: &[OutputRecord]) -> Self {
        Self {
            options: ManifestOptions::default(),
            files: records.iter().map(ManifestFile::from).collect(),
        }
    }

    /// Conventional manifest name for a subject and session
    pub fn default_file_name(subject: u32, session: u32) -> String {
        format!("sub-{}_ses-{}.yaml", subject, session)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    #[cfg(feature = "json")]
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the YAML document to `path`
    pub fn write_yaml(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_yaml()?)?;
        Ok(())
    }
}
