//! The build-info model shipped with the crate.

use buildinfo_core::Model;

use crate::{Result, parse_str_with_filename};

/// Source of the embedded build-info model.
pub const BUILTIN_MODEL: &str = include_str!("../models/buildinfo.toml");

/// Parse the embedded build-info model.
pub fn builtin() -> Result<Model> {
    parse_str_with_filename(BUILTIN_MODEL, "buildinfo.toml")
}

#[cfg(test)]
mod tests {
    use buildinfo_core::TypeExpr;

    use super::*;

    #[test]
    fn test_builtin_parses() {
        let model = builtin().unwrap();

        let names: Vec<_> = model.iter().map(|r| r.name()).collect();
        assert_eq!(
            names,
            [
                "BuildInfo",
                "Agent",
                "BuildAgent",
                "Module",
                "Artifact",
                "Dependency",
                "Issues",
                "Tracker",
                "AffectedIssue",
                "Vcs",
            ]
        );
    }

    #[test]
    fn test_builtin_build_info_fields() {
        let model = builtin().unwrap();
        let build_info = model.get("BuildInfo").unwrap();

        assert!(build_info.get_field("name").unwrap().required);
        assert!(!build_info.get_field("agent").unwrap().required);
        assert_eq!(
            build_info.get_field("properties").unwrap().ty,
            TypeExpr::optional(TypeExpr::map(TypeExpr::String))
        );
        assert_eq!(
            build_info.get_field("vcs").unwrap().ty,
            TypeExpr::optional(TypeExpr::list(TypeExpr::named("Vcs")))
        );
    }

    #[test]
    fn test_builtin_requested_by() {
        let model = builtin().unwrap();
        let dependency = model.get("Dependency").unwrap();

        assert_eq!(
            dependency.get_field("requestedBy").unwrap().ty,
            TypeExpr::optional(TypeExpr::list(TypeExpr::list(TypeExpr::String)))
        );
    }
}
