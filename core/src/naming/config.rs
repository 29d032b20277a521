use serde::{Deserialize, Serialize};
use std::fmt;

/// Naming entities a BIDS tag is built from, in tag order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamingField {
    Subject,
    Session,
    Task,
    Acquisition,
    PeDirection,
    Run,
}

impl NamingField {
    /// Fixed order of entities inside a tag
    pub const ALL: [NamingField; 6] = [
        NamingField::Subject,
        NamingField::Session,
        NamingField::Task,
        NamingField::Acquisition,
        NamingField::PeDirection,
        NamingField::Run,
    ];

    /// BIDS key written before the `-`
    pub fn abbreviation(&self) -> &'static str {
        match self {
            NamingField::Subject => "sub",
            NamingField::Session => "ses",
            NamingField::Task => "task",
            NamingField::Acquisition => "acq",
            NamingField::PeDirection => "dir",
            NamingField::Run => "run",
        }
    }

    /// Whether the entity accepts a textual label
    pub fn takes_label(&self) -> bool {
        !matches!(self, NamingField::Run)
    }

    /// Whether the entity accepts a numeric index
    pub fn takes_index(&self) -> bool {
        matches!(
            self,
            NamingField::Subject
                | NamingField::Session
                | NamingField::Acquisition
                | NamingField::Run
        )
    }

    /// Whether the index width follows the configured precision
    ///
    /// Run and acquisition indices are always two digits wide.
    pub fn uses_global_precision(&self) -> bool {
        matches!(self, NamingField::Subject | NamingField::Session)
    }
}

impl fmt::Display for NamingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NamingField::Subject => "subject",
            NamingField::Session => "session",
            NamingField::Task => "task",
            NamingField::Acquisition => "acquisition",
            NamingField::PeDirection => "pe_direction",
            NamingField::Run => "run",
        };
        write!(f, "{}", name)
    }
}

/// Label and optional index of one naming entity
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldValue {
    pub label: String,
    pub index: Option<u32>,
}

impl FieldValue {
    pub fn new(label: impl Into<String>, index: Option<u32>) -> Self {
        Self {
            label: label.into(),
            index,
        }
    }

    /// Neither label nor index
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.label.is_empty() && self.index.is_none()
    }
}

/// Values for every naming entity
///
/// The subject defaults to index 1; everything else starts empty.
///
/// # Example
///
/// ```
/// use dac2bids_core::naming::NamingConfiguration;
///
/// let config = NamingConfiguration::default()
///     .with_subject_index(3)
///     .with_subject_label("control")
///     .with_session_label("pre");
///
/// assert_eq!(config.subject.index, Some(3));
/// assert_eq!(config.session.index, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfiguration {
    pub subject: FieldValue,
    pub session: FieldValue,
    pub task: FieldValue,
    pub acquisition: FieldValue,
    pub pe_direction: FieldValue,
    pub run: FieldValue,
}

impl Default for NamingConfiguration {
    fn default() -> Self {
        Self {
            subject: FieldValue::new("", Some(1)),
            session: FieldValue::empty(),
            task: FieldValue::empty(),
            acquisition: FieldValue::empty(),
            pe_direction: FieldValue::empty(),
            run: FieldValue::empty(),
        }
    }
}

impl NamingConfiguration {
    /// Returns the value configured for `field`
    pub fn field(&self, field: NamingField) -> &FieldValue {
        match field {
            NamingField::Subject => &self.subject,
            NamingField::Session => &self.session,
            NamingField::Task => &self.task,
            NamingField::Acquisition => &self.acquisition,
            NamingField::PeDirection => &self.pe_direction,
            NamingField::Run => &self.run,
        }
    }

    /// Every non-empty label, paired with its entity
    pub fn labels(&self) -> impl Iterator<Item = (NamingField, &str)> {
        NamingField::ALL
            .into_iter()
            .map(move |f| (f, self.field(f).label.as_str()))
            .filter(|(_, label)| !label.is_empty())
    }

    pub fn with_subject_index(mut self, index: u32) -> Self {
        self.subject.index = Some(index);
        self
    }

    pub fn without_subject_index(mut self) -> Self {
        self.subject.index = None;
        self
    }

    pub fn with_subject_label(mut self, label: impl Into<String>) -> Self {
        self.subject.label = label.into();
        self
    }

    pub fn with_session_index(mut self, index: u32) -> Self {
        self.session.index = Some(index);
        self
    }

    pub fn with_session_label(mut self, label: impl Into<String>) -> Self {
        self.session.label = label.into();
        self
    }

    pub fn with_task_label(mut self, label: impl Into<String>) -> Self {
        self.task.label = label.into();
        self
    }

    pub fn with_acquisition_index(mut self, index: u32) -> Self {
        self.acquisition.index = Some(index);
        self
    }

    pub fn with_acquisition_label(mut self, label: impl Into<String>) -> Self {
        self.acquisition.label = label.into();
        self
    }

    pub fn with_pe_direction_label(mut self, label: impl Into<String>) -> Self {
        self.pe_direction.label = label.into();
        self
    }

    pub fn with_run_index(mut self, index: u32) -> Self {
        self.run.index = Some(index);
        self
    }
}
