use serde::{Deserialize, Serialize};
use std::fmt;

/// Acquisition category of a leaf folder
///
/// A closed set: every classified folder ends up in exactly one of these.
/// `Unknown` is a valid outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Anatomical,
    Functional,
    Diffusion,
    Physiological,
    FieldMap,
    Unknown,
}

const ANATOMICAL_ENDINGS: &[&str] = &[
    "T1w",
    "T2w",
    "T1rho",
    "T1map",
    "T2map",
    "T2star",
    "FLAIR",
    "FLASH",
    "PD",
    "PDmap",
    "PDT2",
    "inplaneT1",
    "inplaneT2",
    "angio",
    "defacemask",
    "SWImag",
    "SWIphase",
];
const FUNCTIONAL_ENDINGS: &[&str] = &["bold", "sbref"];
const PHYSIOLOGICAL_ENDINGS: &[&str] = &["physio"];
const DIFFUSION_ENDINGS: &[&str] = &["dwi"];
const FIELD_MAP_ENDINGS: &[&str] = &[
    "phasediff",
    "magnitude1",
    "magnitude2",
    "phase1",
    "phase2",
    "magnitude",
    "fieldmap",
];

impl Category {
    /// Returns whether this category is unknown
    pub fn is_unknown(&self) -> bool {
        matches!(self, Category::Unknown)
    }

    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            Category::Anatomical => "anatomical",
            Category::Functional => "functional",
            Category::Diffusion => "diffusion",
            Category::Physiological => "physiological",
            Category::FieldMap => "field-map",
            Category::Unknown => "unknown",
        }
    }

    /// BIDS directory the converted files of this category land in
    ///
    /// Physiological recordings share the functional directory.
    pub fn canonical_directory(&self) -> Option<&'static str> {
        match self {
            Category::Anatomical => Some("anat"),
            Category::Functional | Category::Physiological => Some("func"),
            Category::Diffusion => Some("dwi"),
            Category::FieldMap => Some("fmap"),
            Category::Unknown => None,
        }
    }

    /// Closed set of filename endings valid for this category
    pub fn canonical_endings(&self) -> &'static [&'static str] {
        match self {
            Category::Anatomical => ANATOMICAL_ENDINGS,
            Category::Functional => FUNCTIONAL_ENDINGS,
            Category::Physiological => PHYSIOLOGICAL_ENDINGS,
            Category::Diffusion => DIFFUSION_ENDINGS,
            Category::FieldMap => FIELD_MAP_ENDINGS,
            Category::Unknown => &[],
        }
    }

    /// Checks whether `suffix` is one of the canonical endings
    pub fn is_canonical_ending(&self, suffix: &str) -> bool {
        self.canonical_endings().contains(&suffix)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Contrast subtype within a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContrastType {
    /// T1-weighted anatomical (MPRAGE and friends)
    T1w,
    /// T2*-weighted anatomical
    T2star,
    /// Blood-oxygen-level-dependent functional
    Bold,
    /// Gradient echo field map (magnitude or phase difference)
    FieldMap,
    /// Physiological log (pulse, respiration)
    Physio,
    Unknown,
}

impl ContrastType {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            ContrastType::T1w => "T1w",
            ContrastType::T2star => "T2star",
            ContrastType::Bold => "bold",
            ContrastType::FieldMap => "fieldmap",
            ContrastType::Physio => "physio",
            ContrastType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ContrastType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Whether an image holds magnitude or phase data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageComponent {
    Magnitude,
    Phase,
    Unknown,
}

impl ImageComponent {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            ImageComponent::Magnitude => "magnitude",
            ImageComponent::Phase => "phase",
            ImageComponent::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ImageComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}
