//! Emit operation - write or preview one generated file.

use std::path::Path;

use buildinfo_core::GeneratedFile;
use buildinfo_emit::preview;
use eyre::{Context, Result};

use crate::reports::EmitReport;

/// Write `file` under `output`, or only render it when `dry_run` is set.
pub fn emit(file: &impl GeneratedFile, output: &Path, dry_run: bool) -> Result<EmitReport> {
    if dry_run {
        return Ok(EmitReport::Preview(preview(file, output)?));
    }

    let path = file.path(output);
    file.write(output)
        .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
    Ok(EmitReport::Written { path })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    struct Unrenderable;

    impl GeneratedFile for Unrenderable {
        fn path(&self, base: &Path) -> PathBuf {
            base.join("builders.json")
        }

        fn render(&self) -> String {
            String::new()
        }

        fn render_checked(&self) -> Result<String> {
            Err(eyre::eyre!("Failed to serialize docs"))
        }
    }

    #[test]
    fn test_render_error_propagates() {
        let temp = tempfile::TempDir::new().unwrap();

        assert!(emit(&Unrenderable, temp.path(), true).is_err());
        let err = emit(&Unrenderable, temp.path(), false).unwrap_err();

        assert!(err.to_string().starts_with("Failed to write"));
        assert!(!temp.path().join("builders.json").exists());
    }
}
