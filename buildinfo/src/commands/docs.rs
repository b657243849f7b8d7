use std::path::PathBuf;

use buildinfo_emit::{DocsFile, DocsFormat};
use clap::Args;
use eyre::Result;

use super::ModelArgs;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct DocsCommand {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Output directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Output format: markdown or json
    #[arg(short, long, default_value = "markdown")]
    pub format: DocsFormat,

    /// File name without extension
    #[arg(long, default_value = "builders")]
    pub name: String,

    /// Preview the documentation without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl DocsCommand {
    pub fn run(&self) -> Result<()> {
        let registry = self.model.registry();
        let docs = DocsFile::new(&registry)
            .with_format(self.format)
            .with_file_stem(&self.name);

        let report = ops::emit(&docs, &self.output, self.dry_run)?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
