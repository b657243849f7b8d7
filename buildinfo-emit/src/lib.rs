//! Offline emitters for synthesized builders.
//!
//! - [`StubFile`] renders Rust trait declarations for static analysis.
//! - [`DocsFile`] renders Markdown or JSON documentation.
//!
//! Both read builders only through their method signatures.

mod code_builder;
mod docs;
mod indent;
mod stub;
mod type_mapper;

use std::path::Path;

use buildinfo_core::GeneratedFile;

pub use code_builder::CodeBuilder;
pub use docs::{
    ClassDoc, DocsFile, DocsFormat, MethodDoc, ParamDoc, ReturnDoc, render_json, render_markdown,
};
pub use indent::Indent;
pub use stub::{StubFile, StubOptions};
pub use type_mapper::{DocTypeMapper, RustTypeMapper, TypeMapper};

/// First line of every emitted source file.
pub const GENERATED_HEADER: &str = "@generated by buildinfo-om. Do not edit.";

/// A rendered file that has not been written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

/// Render a file without writing it.
pub fn preview(file: &impl GeneratedFile, base: &Path) -> eyre::Result<PreviewFile> {
    Ok(PreviewFile {
        path: file.path(base).display().to_string(),
        content: file.render_checked()?,
    })
}
