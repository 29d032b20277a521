use super::config::{NamingConfiguration, NamingField};
use super::format::{LabelFormatter, DEFAULT_PRECISION};
use crate::error::{Dac2BidsError, Result};
use crate::types::Category;

/// Separator between entities of a tag
pub const TAG_SEPARATOR: &str = "_";

/// Composes BIDS tags and filenames from a [`NamingConfiguration`]
///
/// A composer is validated once, at construction: an illegal label or a
/// missing mandatory entity means no composer exists, so a malformed tag
/// can never be produced.
///
/// A composer is either generic or bound to a [`Category`]. A category
/// composer knows the BIDS directory of its category and which filename
/// endings are allowed there; the functional one also requires a task label.
///
/// # Example
///
/// ```
/// use dac2bids_core::naming::{NamingConfiguration, TagComposer};
/// use dac2bids_core::Category;
///
/// let config = NamingConfiguration::default()
///     .with_session_index(2)
///     .with_task_label("rest");
/// let composer = TagComposer::for_category(Category::Functional, config, 2).unwrap();
///
/// assert_eq!(composer.tag(), "sub-01_ses-02_task-rest");
/// assert_eq!(composer.canonical_directory(), Some("func"));
/// assert_eq!(composer.filename("bold", None).unwrap(), "sub-01_ses-02_task-rest_bold");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagComposer {
    config: NamingConfiguration,
    formatter: LabelFormatter,
    category: Option<Category>,
}

impl TagComposer {
    /// Creates a generic composer
    ///
    /// `precision` is the zero-padding of subject and session indices.
    ///
    /// # Errors
    ///
    /// - [`Dac2BidsError::MalformedLabel`] if any label has a non-alphanumeric character
    /// - [`Dac2BidsError::InconsistentNaming`] if the subject entity is empty
    pub fn new(config: NamingConfiguration, precision: usize) -> Result<Self> {
        for (_, label) in config.labels() {
            Self::check_label(label)?;
        }

        let composer = Self {
            config,
            formatter: LabelFormatter::new(precision),
            category: None,
        };

        if composer.subject_tag().is_empty() {
            return Err(Dac2BidsError::InconsistentNaming(
                "a subject index or label is mandatory".to_string(),
            ));
        }

        Ok(composer)
    }

    /// Creates a composer bound to `category`
    ///
    /// # Errors
    ///
    /// Everything [`TagComposer::new`] rejects, plus
    /// [`Dac2BidsError::InconsistentNaming`] for a functional composer without
    /// a task label or for the unknown category, which has no BIDS directory.
    pub fn for_category(
        category: Category,
        config: NamingConfiguration,
        precision: usize,
    ) -> Result<Self> {
        let mut composer = Self::new(config, precision)?;

        match category {
            Category::Unknown => {
                return Err(Dac2BidsError::InconsistentNaming(
                    "unknown acquisitions have no BIDS directory".to_string(),
                ));
            }
            Category::Functional if composer.config.task.label.is_empty() => {
                return Err(Dac2BidsError::InconsistentNaming(
                    "functional data require a proper task label".to_string(),
                ));
            }
            _ => {}
        }

        composer.category = Some(category);
        Ok(composer)
    }

    /// Checks a label for BIDS consistency
    ///
    /// Labels may only contain ASCII letters and digits. The empty label is
    /// the "not set" placeholder and always passes.
    pub fn check_label(label: &str) -> Result<()> {
        if label.chars().all(|c| c.is_ascii_alphanumeric()) {
            Ok(())
        } else {
            Err(Dac2BidsError::MalformedLabel(label.to_string()))
        }
    }

    pub fn config(&self) -> &NamingConfiguration {
        &self.config
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn precision(&self) -> usize {
        self.formatter.precision()
    }

    /// Sub-tag of one entity, empty when the entity is not set
    pub fn field_tag(&self, field: NamingField) -> String {
        let value = self.config.field(field);
        let label = if field.takes_label() {
            value.label.as_str()
        } else {
            ""
        };
        let index = if field.takes_index() {
            value.index
        } else {
            None
        };

        if label.is_empty() && index.is_none() {
            return String::new();
        }

        let formatter = if field.uses_global_precision() {
            self.formatter
        } else {
            LabelFormatter::new(DEFAULT_PRECISION)
        };

        format!(
            "{}-{}{}",
            field.abbreviation(),
            label,
            formatter.format(index)
        )
    }

    /// Subject tag, e.g. `sub-control03`
    pub fn subject_tag(&self) -> String {
        self.field_tag(NamingField::Subject)
    }

    /// Session tag, e.g. `ses-pre08` or `ses-pre`
    pub fn session_tag(&self) -> String {
        self.field_tag(NamingField::Session)
    }

    /// Task tag, e.g. `task-rest`
    pub fn task_tag(&self) -> String {
        self.field_tag(NamingField::Task)
    }

    /// Acquisition tag, e.g. `acq-mbme02`
    pub fn acquisition_tag(&self) -> String {
        self.field_tag(NamingField::Acquisition)
    }

    /// Phase-encoding direction tag, e.g. `dir-reverse`
    pub fn pe_direction_tag(&self) -> String {
        self.field_tag(NamingField::PeDirection)
    }

    /// Run tag, e.g. `run-08`
    pub fn run_tag(&self) -> String {
        self.field_tag(NamingField::Run)
    }

    /// Full tag without scan type or extension
    pub fn tag(&self) -> String {
        NamingField::ALL
            .iter()
            .map(|field| self.field_tag(*field))
            .filter(|tag| !tag.is_empty())
            .collect::<Vec<_>>()
            .join(TAG_SEPARATOR)
    }

    /// BIDS directory of the bound category
    pub fn canonical_directory(&self) -> Option<&'static str> {
        self.category.and_then(|c| c.canonical_directory())
    }

    /// Filename endings allowed for the bound category
    pub fn canonical_endings(&self) -> &'static [&'static str] {
        self.category.map(|c| c.canonical_endings()).unwrap_or(&[])
    }

    /// Filename stem: the tag, the suffix and an optional trailing part
    ///
    /// # Errors
    ///
    /// - [`Dac2BidsError::InvalidEnding`] if a category composer gets a suffix
    ///   outside its canonical endings
    /// - [`Dac2BidsError::MalformedLabel`] if the suffix or part is not alphanumeric
    pub fn filename(&self, suffix: &str, part: Option<&str>) -> Result<String> {
        if suffix.is_empty() {
            return Err(Dac2BidsError::MalformedLabel(suffix.to_string()));
        }
        Self::check_label(suffix)?;

        if let Some(category) = self.category {
            if !category.is_canonical_ending(suffix) {
                return Err(Dac2BidsError::InvalidEnding {
                    suffix: suffix.to_string(),
                    directory: self.canonical_directory().unwrap_or_default().to_string(),
                });
            }
        }

        let mut name = self.tag();
        name.push_str(TAG_SEPARATOR);
        name.push_str(suffix);

        if let Some(part) = part.filter(|p| !p.is_empty()) {
            Self::check_label(part)?;
            name.push_str(TAG_SEPARATOR);
            name.push_str(part);
        }

        Ok(name)
    }
}
