//! Tests for writing emitted files to disk.

use std::{fs, sync::Arc};

use buildinfo_builder::BuilderRegistry;
use buildinfo_core::GeneratedFile;
use buildinfo_emit::{DocsFile, DocsFormat, StubFile, StubOptions, preview};
use tempfile::TempDir;

fn registry() -> BuilderRegistry {
    let model = buildinfo_model::builtin().expect("Failed to parse builtin model");
    BuilderRegistry::from_model(Arc::new(model))
}

#[test]
fn test_write_stub_and_docs() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let registry = registry();

    let stub = StubFile::new(&registry).with_options(StubOptions {
        file_name: "src/builders.rs".to_string(),
        ..StubOptions::default()
    });
    stub.write(temp_dir.path()).unwrap();

    let docs = DocsFile::new(&registry).with_format(DocsFormat::Json);
    docs.write(temp_dir.path()).unwrap();

    let written = fs::read_to_string(temp_dir.path().join("src/builders.rs")).unwrap();
    assert_eq!(written, stub.render());
    assert!(temp_dir.path().join("builders.json").exists());
}

#[test]
fn test_regenerated_files_are_overwritten() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("builders.md");
    fs::write(&path, "stale").unwrap();

    let docs = DocsFile::new(&registry());
    docs.write(temp_dir.path()).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("# Builders\n"));
}

#[test]
fn test_preview_does_not_write() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let docs = DocsFile::new(&registry()).with_file_stem("api");

    let file = preview(&docs, temp_dir.path()).unwrap();

    assert!(file.path.ends_with("api.md"));
    assert!(file.content.contains("## BuildInfoBuilder"));
    assert!(!temp_dir.path().join("api.md").exists());
}
