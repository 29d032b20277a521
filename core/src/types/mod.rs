//! Core type definitions for folder classification
//!
//! This module provides the fundamental types used throughout the dac2bids library:
//! - [`Category`]: Acquisition category (anatomical, functional, field map, ...)
//! - [`ContrastType`]: Contrast subtype within a category (T1w, bold, ...)
//! - [`ImageComponent`]: Magnitude or phase image
//! - [`ImageType`]: Raw DICOM ImageType values
//! - [`FolderMetadata`]: Per-folder facts consumed by the classifier
//! - [`AcquisitionClassification`]: What the classifier decided about a folder
//! - [`ExclusionReason`]: Why a folder produced no output

mod classification;
mod enums;
mod image_type;
mod metadata;

pub use classification::{AcquisitionClassification, ExclusionReason};
pub use enums::{Category, ContrastType, ImageComponent};
pub use image_type::ImageType;
pub use metadata::FolderMetadata;
