use crate::orchestrator::ConversionPlan;
use std::fmt;

/// Text report formatter for a conversion plan
pub struct TextReport<'a> {
    plan: &'a ConversionPlan,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(plan: &'a ConversionPlan) -> Self {
        Self { plan }
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BIDS Conversion Plan")?;
        writeln!(f, "====================")?;
        writeln!(f)?;

        for record in self.plan.records() {
            writeln!(f, "{}", record.filename)?;
            writeln!(f, "  Category: {}", record.category)?;
            writeln!(f, "  From:     {}", record.in_dir.display())?;
            writeln!(f, "  To:       {}", record.out_dir.display())?;
        }
        writeln!(f)?;

        if !self.plan.exclusions().is_empty() {
            writeln!(f, "Excluded")?;
            writeln!(f, "--------")?;
            for exclusion in self.plan.exclusions() {
                writeln!(f, "{}: {}", exclusion.folder.display(), exclusion.reason)?;
            }
            writeln!(f)?;
        }

        write!(
            f,
            "Accepted: {}  Excluded: {}",
            self.plan.records().len(),
            self.plan.exclusions().len()
        )
    }
}
