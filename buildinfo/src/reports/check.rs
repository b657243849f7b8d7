//! Check command report data structures.

use super::output::{Output, Report};

/// One synthesized builder.
#[derive(Debug)]
pub struct BuilderSummary {
    pub name: String,
    /// Setter descriptions, `with_x (Shape)`.
    pub setters: Vec<String>,
}

/// Report data from model validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Where the model came from.
    pub source: String,
    pub builders: Vec<BuilderSummary>,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!("✓ {} is valid", self.source));
        out.newline();

        let count = self.builders.len();
        out.section(&format!(
            "  {} builder{}",
            count,
            if count == 1 { "" } else { "s" }
        ));
        for builder in &self.builders {
            out.list_item(&builder.name);
            for setter in &builder.setters {
                out.sub_item(setter);
            }
        }
    }
}
