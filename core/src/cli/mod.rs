pub mod report;

use crate::classify::ClassifierSettings;
use crate::orchestrator::OrchestratorOptions;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for dac2bids
#[derive(Parser, Debug)]
#[command(name = "dac2bids")]
#[command(about = "Generate a dcm2niibatch BIDS manifest from folders of DICOM series")]
#[command(version)]
pub struct Cli {
    /// Input folder of DICOM series (one subfolder per series)
    #[arg(short = 'i', long = "inputfolder", default_value = ".")]
    pub input_folder: PathBuf,

    /// Output folder for NIfTIs
    #[arg(short = 'o', long = "outputfolder", default_value = "./out/")]
    pub output_folder: PathBuf,

    /// The subject number
    #[arg(short = 's', long = "sub", default_value_t = 1)]
    pub subject: u32,

    /// The session number
    #[arg(short = 'e', long = "ses", default_value_t = 1)]
    pub session: u32,

    /// Skips fieldmaps
    #[arg(short = 'f', long = "skipfmap")]
    pub skip_fieldmap: bool,

    /// Detect subject and session from sub-x<N>/ses-mri-X<N> in the input path
    #[arg(long)]
    pub auto_detect: bool,

    /// Keep series with fewer volumes than the protocol planned
    #[arg(long)]
    pub keep_incomplete: bool,

    /// Folder names to ignore (repeatable)
    #[arg(long = "ignore", value_name = "DIR")]
    pub ignore_dirs: Vec<String>,

    /// Zero-padding of subject and session numbers
    #[arg(long, default_value_t = 2)]
    pub precision: usize,

    /// Task label for series whose description contains "Task"
    #[arg(long, default_value = "stroop")]
    pub task_name: String,

    /// Manifest path (default: sub-<N>_ses-<N>.yaml in the working directory)
    #[arg(short = 'm', long = "manifest", value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Manifest format
    #[arg(long, default_value = "yaml")]
    pub format: OutputFormat,

    /// Print the manifest instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Manifest format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// dcm2niibatch YAML
    Yaml,
    /// JSON (for inspection)
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Yaml => "yaml",
            OutputFormat::Json => "json",
        }
    }
}

impl Cli {
    /// Orchestrator options described by the arguments
    pub fn orchestrator_options(&self) -> OrchestratorOptions {
        OrchestratorOptions {
            subject_index: Some(self.subject),
            session_index: Some(self.session),
            auto_detect: self.auto_detect,
            skip_incomplete: !self.keep_incomplete,
            skip_fieldmap: self.skip_fieldmap,
            ignore_dirs: self.ignore_dirs.clone(),
            precision: self.precision,
            classifier: ClassifierSettings::default().with_task_name(self.task_name.clone()),
        }
    }

    /// Where the manifest goes for the resolved subject and session
    pub fn manifest_path(&self, subject: u32, session: u32) -> PathBuf {
        self.manifest.clone().unwrap_or_else(|| {
            PathBuf::from(format!(
                "./sub-{}_ses-{}.{}",
                subject,
                session,
                self.format.extension()
            ))
        })
    }
}
