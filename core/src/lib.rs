pub mod api;
pub mod classify;
pub mod cli;
pub mod error;
pub mod extraction;
pub mod folders;
pub mod manifest;
pub mod naming;
pub mod orchestrator;
pub mod types;

pub use api::Dac2Bids;
pub use classify::{AcquisitionClassifier, ClassifierSettings, Decision};
pub use cli::report::TextReport;
pub use error::{Dac2BidsError, Result};
pub use extraction::{DicomMetadataSource, MetadataSource};
pub use folders::LeafFolder;
pub use manifest::{Manifest, ManifestOptions};
pub use naming::{LabelFormatter, NamingConfiguration, TagComposer};
pub use orchestrator::{ConversionPlan, FolderOrchestrator, OrchestratorOptions, OutputRecord};
pub use types::*;
