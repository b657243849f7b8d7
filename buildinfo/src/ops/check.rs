//! Check operation - model validation summary.

use buildinfo_builder::BuilderRegistry;

use crate::reports::{BuilderSummary, CheckReport};

/// Summarize the builders synthesized for a model that parsed and validated.
pub fn check(registry: &BuilderRegistry, source: String) -> CheckReport {
    let builders = registry
        .builder_types()
        .iter()
        .map(|builder| BuilderSummary {
            name: builder.name().to_string(),
            setters: builder
                .setters()
                .map(|s| format!("{} ({:?})", s.method(), s.shape()))
                .collect(),
        })
        .collect();

    CheckReport { source, builders }
}
