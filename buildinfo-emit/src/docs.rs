//! Documentation for synthesized builders.
//!
//! Documents are built from the same method signatures the runtime builders
//! expose, so documented parameters and return types always match the
//! synthesized methods rather than anything declared in source.

use std::{
    fmt::Write as _,
    path::{Path, PathBuf},
    str::FromStr,
};

use buildinfo_builder::{BuilderRegistry, BuilderType, MethodSignature, ParamKind, ReturnType};
use buildinfo_core::GeneratedFile;
use eyre::Context;
use serde::Serialize;

use crate::{DocTypeMapper, TypeMapper};

/// Documentation of one builder type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassDoc {
    pub name: String,
    pub record: String,
    pub description: Option<String>,
    pub methods: Vec<MethodDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDoc {
    pub name: String,
    pub description: Option<String>,
    pub params: Vec<ParamDoc>,
    pub returns: ReturnDoc,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamDoc {
    pub name: String,
    pub kind: ParamKind,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnDoc {
    #[serde(rename = "type")]
    pub ty: String,
    pub description: String,
}

impl ClassDoc {
    /// Document a builder type. Builders named with a leading `_` are
    /// private and get no document.
    pub fn from_builder(builder: &BuilderType) -> Option<Self> {
        if builder.name().starts_with('_') {
            return None;
        }

        let methods = builder
            .signatures()
            .iter()
            .filter(|s| !s.name.starts_with('_'))
            .map(|s| MethodDoc::from_signature(s, builder.name()))
            .collect();

        Some(Self {
            name: builder.name().to_string(),
            record: builder.record().name().to_string(),
            description: builder.record().description().map(str::to_string),
            methods,
        })
    }
}

impl MethodDoc {
    fn from_signature(signature: &MethodSignature, builder: &str) -> Self {
        let mapper = DocTypeMapper;
        let params = signature
            .params
            .iter()
            .map(|param| ParamDoc {
                name: param.name.clone(),
                kind: param.kind,
                ty: mapper.map_param(param),
            })
            .collect();

        let description = match &signature.returns {
            ReturnType::SelfType => "The builder, for chaining.".to_string(),
            ReturnType::Record(record) => format!("The constructed `{}`.", record),
        };

        Self {
            name: signature.name.clone(),
            description: signature.doc.clone(),
            params,
            returns: ReturnDoc {
                ty: mapper.map_return(&signature.returns, builder),
                description,
            },
        }
    }
}

/// Output format of the documentation file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocsFormat {
    #[default]
    Markdown,
    Json,
}

impl DocsFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            DocsFormat::Markdown => "md",
            DocsFormat::Json => "json",
        }
    }
}

impl FromStr for DocsFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(DocsFormat::Markdown),
            "json" => Ok(DocsFormat::Json),
            other => Err(format!("unknown docs format '{}'", other)),
        }
    }
}

/// The generated documentation file.
pub struct DocsFile {
    classes: Vec<ClassDoc>,
    format: DocsFormat,
    file_stem: String,
}

impl DocsFile {
    /// Documents every builder type synthesized so far.
    pub fn new(registry: &BuilderRegistry) -> Self {
        let classes = registry
            .builder_types()
            .iter()
            .filter_map(|b| ClassDoc::from_builder(b))
            .collect();
        Self {
            classes,
            format: DocsFormat::default(),
            file_stem: "builders".to_string(),
        }
    }

    pub fn with_format(mut self, format: DocsFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_file_stem(mut self, stem: impl Into<String>) -> Self {
        self.file_stem = stem.into();
        self
    }

    pub fn classes(&self) -> &[ClassDoc] {
        &self.classes
    }
}

impl GeneratedFile for DocsFile {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(format!("{}.{}", self.file_stem, self.format.extension()))
    }

    fn render(&self) -> String {
        match self.render_checked() {
            Ok(content) => content,
            Err(err) => {
                tracing::error!(%err, "failed to render docs");
                String::new()
            }
        }
    }

    fn render_checked(&self) -> eyre::Result<String> {
        tracing::debug!(classes = self.classes.len(), format = ?self.format, "rendered docs");
        match self.format {
            DocsFormat::Markdown => Ok(render_markdown(&self.classes)),
            DocsFormat::Json => render_json(&self.classes).wrap_err("Failed to serialize docs"),
        }
    }
}

/// Render documents as pretty JSON with a trailing newline.
pub fn render_json(classes: &[ClassDoc]) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(classes)?;
    json.push('\n');
    Ok(json)
}

/// Render documents as Markdown, one section per builder.
pub fn render_markdown(classes: &[ClassDoc]) -> String {
    let mut blocks = vec!["# Builders".to_string()];
    for class in classes {
        blocks.push(format!("## {}", class.name));
        let mut intro = format!("Builds `{}` records.", class.record);
        if let Some(description) = &class.description {
            intro.push_str("\n\n");
            intro.push_str(description);
        }
        blocks.push(intro);

        for method in &class.methods {
            blocks.push(format!("### `{}`", method.name));
            if let Some(description) = &method.description {
                blocks.push(description.clone());
            }
            if !method.params.is_empty() {
                blocks.push(param_table(&method.params));
            }
            blocks.push(format!(
                "Returns `{}`: {}",
                method.returns.ty, method.returns.description
            ));
        }
    }

    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

fn param_table(params: &[ParamDoc]) -> String {
    let mut table = String::from("| Parameter | Kind | Type |\n| --- | --- | --- |");
    for param in params {
        let _ = write!(
            table,
            "\n| `{}{}` | {} | `{}` |",
            param.kind.prefix(),
            param.name,
            kind_label(param.kind),
            param.ty
        );
    }
    table
}

fn kind_label(kind: ParamKind) -> &'static str {
    match kind {
        ParamKind::Positional => "positional",
        ParamKind::VarPositional => "variadic",
        ParamKind::VarKeyword => "keyword",
    }
}
