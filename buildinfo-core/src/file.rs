use std::path::{Path, PathBuf};

use eyre::Result;

/// Trait for types that represent a generated file
///
/// Emitted files are regenerated artifacts: writing always replaces what is
/// on disk.
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Render the file content
    fn render(&self) -> String;

    /// Render the file content, failing instead of producing a broken file.
    fn render_checked(&self) -> Result<String> {
        Ok(self.render())
    }

    /// Write the file to disk
    fn write(&self, base: &Path) -> Result<()> {
        let path = self.path(base);
        write_file(&path, &self.render_checked()?)?;
        tracing::debug!(path = %path.display(), "generated file");
        Ok(())
    }
}

pub(crate) fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}
