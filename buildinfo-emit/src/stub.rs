//! Rust trait declarations for synthesized builders.
//!
//! The stub file is for editors and static analysis only: it declares one
//! trait per builder type with the same method names and call shapes the
//! runtime builders accept.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use buildinfo_builder::{BuilderRegistry, BuilderType, MethodSignature};
use buildinfo_core::{GeneratedFile, is_snake_case};

use crate::{CodeBuilder, GENERATED_HEADER, RustTypeMapper, TypeMapper};

/// Options for the stub file.
#[derive(Debug, Clone)]
pub struct StubOptions {
    /// Output file, relative to the output directory.
    pub file_name: String,
    /// Module the record types (and `Value`) are imported from.
    pub record_path: String,
    /// Module `ConstructionError` is imported from.
    pub error_path: String,
}

impl Default for StubOptions {
    fn default() -> Self {
        Self {
            file_name: "builders.rs".to_string(),
            record_path: "crate::model".to_string(),
            error_path: "crate::model".to_string(),
        }
    }
}

/// The generated stub file.
pub struct StubFile {
    builders: Vec<Arc<BuilderType>>,
    options: StubOptions,
}

impl StubFile {
    /// Stubs for every builder type synthesized so far.
    pub fn new(registry: &BuilderRegistry) -> Self {
        Self::from_builders(registry.builder_types())
    }

    pub fn from_builders(builders: Vec<Arc<BuilderType>>) -> Self {
        Self {
            builders,
            options: StubOptions::default(),
        }
    }

    pub fn with_options(mut self, options: StubOptions) -> Self {
        self.options = options;
        self
    }

    fn imports(&self) -> Vec<String> {
        let mut records: Vec<&str> = self.builders.iter().map(|b| b.record().name()).collect();
        let setters = move || self.builders.iter().flat_map(|b| b.setters());
        // Named types without a builder are passed through as-is.
        records.extend(
            setters()
                .filter(|setter| setter.nested().is_none())
                .flat_map(|setter| setter.param_type().named_refs()),
        );
        if setters().any(|setter| RustTypeMapper::uses_value(setter.param_type())) {
            records.push(RustTypeMapper::VALUE);
        }

        let mut uses = Vec::new();
        if self.options.record_path == self.options.error_path {
            records.push(RustTypeMapper::ERROR);
            uses.push(use_stmt(&self.options.record_path, records));
        } else {
            uses.push(use_stmt(&self.options.record_path, records));
            uses.push(use_stmt(&self.options.error_path, vec![RustTypeMapper::ERROR]));
        }
        uses
    }
}

impl GeneratedFile for StubFile {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(&self.options.file_name)
    }

    fn render(&self) -> String {
        let mut code = CodeBuilder::rust();
        code.push_comment(GENERATED_HEADER).push_comment("");
        if self.builders.is_empty() {
            code.push_comment("No builders.");
        } else {
            code.push_comment("Builders:");
            for builder in &self.builders {
                code.push_comment(&format!("  - {}", builder.name()));
            }
            code.push_blank();
            for import in self.imports() {
                code.push_line(&import);
            }
        }

        for builder in &self.builders {
            code.push_blank();
            render_builder(&mut code, builder);
        }

        tracing::debug!(builders = self.builders.len(), "rendered stubs");
        code.build()
    }
}

fn render_builder(code: &mut CodeBuilder, builder: &BuilderType) {
    let mapper = RustTypeMapper;
    let record = builder.record();

    let mut doc = format!("Builder for [`{}`].", record.name());
    if let Some(description) = record.description() {
        doc.push_str("\n\n");
        doc.push_str(description);
    }
    code.push_rust_doc(&doc);
    code.push_line(&format!("pub trait {}: Sized {{", builder.name()))
        .push_indent();

    for (i, signature) in builder.signatures().iter().enumerate() {
        if i > 0 {
            code.push_blank();
        }
        render_method(code, &mapper, builder.name(), signature);
    }

    code.push_dedent().push_line("}");
}

fn render_method(
    code: &mut CodeBuilder,
    mapper: &impl TypeMapper,
    builder: &str,
    signature: &MethodSignature,
) {
    if let Some(doc) = &signature.doc {
        code.push_rust_doc(doc);
    }
    if !is_snake_case(&signature.name) {
        code.push_line("#[allow(non_snake_case)]");
    }

    let mut params = vec!["self".to_string()];
    params.extend(
        signature
            .params
            .iter()
            .map(|param| format!("{}: {}", param.name, mapper.map_param(param))),
    );
    code.push_line(&format!(
        "fn {}({}) -> {};",
        signature.name,
        params.join(", "),
        mapper.map_return(&signature.returns, builder)
    ));
}

fn use_stmt(module: &str, mut symbols: Vec<&str>) -> String {
    symbols.sort_unstable();
    symbols.dedup();
    match symbols.as_slice() {
        [symbol] => format!("use {}::{};", module, symbol),
        _ => format!("use {}::{{{}}};", module, symbols.join(", ")),
    }
}
