//! Model parsing from files and strings.

use std::path::Path;

use buildinfo_core::Model;

use crate::{Error, ModelFile, Result, error::SourceContext, validate::validate_model};

/// Parse a model file from the given path.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Model> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Box::new(Error::Io {
            path: path.to_path_buf(),
            source: e,
        })
    })?;
    parse_str_with_filename(&content, &path.display().to_string())
}

/// Parse a model from a string (uses "model.toml" as default filename)
pub fn parse_str(content: &str) -> Result<Model> {
    parse_str_with_filename(content, "model.toml")
}

/// Parse a model from a string with a custom filename for error reporting
pub fn parse_str_with_filename(content: &str, filename: &str) -> Result<Model> {
    let source_ctx = SourceContext::new(content, filename);
    let file: ModelFile = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_model(&file, &source_ctx)?;

    Ok(file
        .records
        .iter()
        .fold(Model::new(), |model, record| model.with(record.to_record())))
}
