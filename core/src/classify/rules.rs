use super::{ClassifierSettings, Decision};
use crate::types::{
    AcquisitionClassification, Category, ContrastType, ExclusionReason, FolderMetadata,
    ImageComponent,
};

/// One entry of the classifier's decision table
///
/// A rule applies when `matches` returns true; `decide` then produces the
/// final decision for the folder.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub matches: fn(&FolderMetadata, &ClassifierSettings) -> bool,
    pub decide: fn(&FolderMetadata, &ClassifierSettings) -> Decision,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// Default decision table, in evaluation order
///
/// 1. localizer → excluded
/// 2. required attributes missing → physiological, or excluded
/// 3. echo planar → functional
/// 4. gradient echo without inversion recovery → field map / T2* / unknown
/// 5. inversion recovery → T1w
/// 6. anything else → unknown
pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule {
            name: "localizer",
            matches: is_localizer,
            decide: |_, _| Decision::Exclude(ExclusionReason::Localizer),
        },
        Rule {
            name: "missing-attributes",
            matches: |meta, _| !meta.has_required_attributes(),
            decide: physiological_or_unrecognized,
        },
        Rule {
            name: "echo-planar",
            matches: |meta, _| meta.has_sequence_code("EP"),
            decide: functional,
        },
        Rule {
            name: "gradient-echo",
            matches: |meta, _| meta.has_sequence_code("GR") && !meta.has_sequence_code("IR"),
            decide: gradient_echo,
        },
        Rule {
            name: "inversion-recovery",
            matches: |meta, _| meta.has_sequence_code("IR"),
            decide: inversion_recovery,
        },
        Rule {
            name: "fallback",
            matches: |_, _| true,
            decide: unknown,
        },
    ]
}

/// Classification with the per-folder facts every rule shares
fn base(
    meta: &FolderMetadata,
    category: Category,
    contrast: ContrastType,
) -> AcquisitionClassification {
    let mut classification = AcquisitionClassification::new(category, contrast);
    classification.echo = meta.echo_number.unwrap_or(0);
    classification.component = meta
        .image_type
        .as_ref()
        .map(|t| t.component())
        .unwrap_or(ImageComponent::Unknown);
    classification.is_complete = meta.is_complete();
    classification
}

fn is_localizer(meta: &FolderMetadata, settings: &ClassifierSettings) -> bool {
    let pattern = settings.localizer_pattern.as_str();
    meta.folder_name.contains(pattern)
        || meta
            .series_description
            .as_ref()
            .is_some_and(|desc| desc.contains(pattern))
}

/// Physiological logs lack the imaging attributes but still carry an ImageType
fn physiological_or_unrecognized(meta: &FolderMetadata, _: &ClassifierSettings) -> Decision {
    if meta.image_type.is_some() {
        let mut classification = base(meta, Category::Physiological, ContrastType::Physio);
        classification.echo = 0;
        Decision::Accept(classification)
    } else {
        Decision::Exclude(ExclusionReason::Unrecognized)
    }
}

fn functional(meta: &FolderMetadata, settings: &ClassifierSettings) -> Decision {
    let mut classification = base(meta, Category::Functional, ContrastType::Bold);
    classification.task = Some(task_label(meta, settings));
    classification.is_multiecho = meta.is_multiecho();
    Decision::Accept(classification)
}

/// Task label from the series description
fn task_label(meta: &FolderMetadata, settings: &ClassifierSettings) -> String {
    let desc = meta.series_description.as_deref().unwrap_or_default();
    if desc.contains(&settings.resting_marker) {
        "rest".to_string()
    } else if desc.contains(&settings.task_marker) {
        settings.task_name.clone()
    } else {
        "unknown".to_string()
    }
}

fn gradient_echo(meta: &FolderMetadata, settings: &ClassifierSettings) -> Decision {
    let seqname = meta.sequence_name.as_deref().unwrap_or_default();
    let classification = if seqname == settings.fieldmap_sequence {
        base(meta, Category::FieldMap, ContrastType::FieldMap)
    } else if seqname == settings.t2star_sequence {
        base(meta, Category::Anatomical, ContrastType::T2star)
    } else {
        base(meta, Category::Unknown, ContrastType::Unknown)
    };
    Decision::Accept(classification)
}

fn inversion_recovery(meta: &FolderMetadata, _: &ClassifierSettings) -> Decision {
    Decision::Accept(base(meta, Category::Anatomical, ContrastType::T1w))
}

fn unknown(meta: &FolderMetadata, _: &ClassifierSettings) -> Decision {
    Decision::Accept(base(meta, Category::Unknown, ContrastType::Unknown))
}
