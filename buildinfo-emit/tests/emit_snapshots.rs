//! Snapshot tests for emitted stubs and docs.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use std::sync::Arc;

use buildinfo_builder::BuilderRegistry;
use buildinfo_core::GeneratedFile;
use buildinfo_emit::{DocsFile, DocsFormat, StubFile};

const MODEL: &str = r#"
[[record]]
name = "Build"
doc = "A build."

[[record.field]]
name = "name"
type = "string"
doc = "Build name."

[[record.field]]
name = "agent"
type = "Agent?"

[[record.field]]
name = "modules"
type = "list<Module>?"

[[record.field]]
name = "properties"
type = "map<string>?"

[[record]]
name = "Agent"

[[record.field]]
name = "name"
type = "string"

[[record]]
name = "Module"

[[record.field]]
name = "id"
type = "string"

[[record.field]]
name = "requestedBy"
type = "list<list<string>>?"
"#;

fn registry() -> BuilderRegistry {
    let model = buildinfo_model::parse_str(MODEL).expect("Failed to parse model");
    BuilderRegistry::from_model(Arc::new(model))
}

#[test]
fn test_stub_file() {
    let stub = StubFile::new(&registry()).render();
    insta::assert_snapshot!("stub_file", stub);
}

#[test]
fn test_docs_markdown() {
    let docs = DocsFile::new(&registry()).render();
    insta::assert_snapshot!("docs_markdown", docs);
}

#[test]
fn test_docs_json_matches_markdown_classes() {
    let registry = registry();
    let markdown = DocsFile::new(&registry);
    let json = DocsFile::new(&registry).with_format(DocsFormat::Json);

    let parsed: serde_json::Value = serde_json::from_str(&json.render()).unwrap();
    let names: Vec<_> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    let expected: Vec<_> = markdown.classes().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, expected);
}

#[test]
fn test_builtin_stub_declares_every_builder() {
    let model = buildinfo_model::builtin().unwrap();
    let registry = BuilderRegistry::from_model(Arc::new(model));
    let stub = StubFile::new(&registry).render();

    for builder in registry.builder_types() {
        assert!(
            stub.contains(&format!("pub trait {}: Sized {{", builder.name())),
            "{} missing",
            builder.name()
        );
    }
    assert!(stub.contains("fn with_properties(self, values: impl IntoIterator<Item = (String, String)>) -> Self;"));
    assert!(stub.contains("fn build(self) -> Result<BuildInfo, ConstructionError>;"));
}
