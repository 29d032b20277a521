use super::{Category, ContrastType, ImageComponent};
use serde::{Deserialize, Serialize};

/// Outcome of classifying one leaf folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquisitionClassification {
    /// Acquisition category
    pub category: Category,

    /// Contrast subtype within the category
    pub contrast: ContrastType,

    /// Echo index (0 when the series has none, e.g. physiological logs)
    pub echo: u32,

    /// Magnitude or phase image
    pub component: ImageComponent,

    /// Task label, functional acquisitions only
    pub task: Option<String>,

    /// Whether the protocol records several echoes per repetition
    pub is_multiecho: bool,

    /// Whether the folder holds every repetition the protocol asked for
    pub is_complete: bool,
}

impl AcquisitionClassification {
    /// Creates a classification with no task, single echo and complete data
    pub fn new(category: Category, contrast: ContrastType) -> Self {
        Self {
            category,
            contrast,
            echo: 0,
            component: ImageComponent::Unknown,
            task: None,
            is_multiecho: false,
            is_complete: true,
        }
    }

    /// Classification for folders no rule recognizes
    pub fn unknown() -> Self {
        Self::new(Category::Unknown, ContrastType::Unknown)
    }

    /// Acquisition label for functional series
    ///
    /// `mbme` for multiband multi-echo, `mb` for plain multiband.
    pub fn acquisition_label(&self) -> Option<&'static str> {
        match self.category {
            Category::Functional if self.is_multiecho => Some("mbme"),
            Category::Functional => Some("mb"),
            _ => None,
        }
    }
}

/// Why a folder produced no output record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExclusionReason {
    /// Scout scan
    Localizer,
    /// Fewer files than the protocol's repetition count
    Incomplete,
    /// Representative file lacks the attributes needed to classify it
    Unrecognized,
    /// No rule matched
    UnknownCategory,
    /// Field maps were skipped on request
    SkippedFieldMap,
    /// Directory listed in the ignore list
    Ignored,
    /// Metadata or naming failed for this folder
    Failed(String),
}

impl ExclusionReason {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &str {
        match self {
            ExclusionReason::Localizer => "localizer",
            ExclusionReason::Incomplete => "incomplete acquisition",
            ExclusionReason::Unrecognized => "unrecognized metadata",
            ExclusionReason::UnknownCategory => "unknown category",
            ExclusionReason::SkippedFieldMap => "field map skipped",
            ExclusionReason::Ignored => "ignored",
            ExclusionReason::Failed(msg) => msg,
        }
    }
}

impl std::fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}
