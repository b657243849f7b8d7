//! Emit command report data structures.

use std::path::PathBuf;

use buildinfo_emit::PreviewFile;

use super::output::{Output, Report};

/// Outcome of emitting one file.
#[derive(Debug)]
pub enum EmitReport {
    /// The file was written.
    Written { path: PathBuf },
    /// Dry-run preview.
    Preview(PreviewFile),
}

impl Report for EmitReport {
    fn render(&self, out: &mut dyn Output) {
        match self {
            EmitReport::Written { path } => {
                out.section("Generated");
                out.added_item(&path.display().to_string());
            }
            EmitReport::Preview(file) => {
                out.divider(&file.path);
                out.preformatted(&file.content);
                out.divider("Summary");
                out.preformatted("1 file would be generated");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_preview_report() {
        let report = EmitReport::Preview(PreviewFile {
            path: "out/builders.rs".to_string(),
            content: "// stub".to_string(),
        });
        let mut out = BufferOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.lines,
            [
                "── out/builders.rs ──",
                "// stub",
                "── Summary ──",
                "1 file would be generated"
            ]
        );
    }

    #[test]
    fn test_written_report() {
        let report = EmitReport::Written {
            path: PathBuf::from("out/builders.md"),
        };
        let mut out = BufferOutput::default();
        report.render(&mut out);
        assert_eq!(out.lines, ["Generated:", "  + out/builders.md"]);
    }
}
