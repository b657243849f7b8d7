use std::path::PathBuf;

use buildinfo_emit::{StubFile, StubOptions};
use clap::Args;
use eyre::Result;

use super::ModelArgs;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct StubsCommand {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Output directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Stub file name, relative to the output directory
    #[arg(long, default_value = "builders.rs")]
    pub file_name: String,

    /// Module the record types are imported from
    #[arg(long, default_value = "crate::model")]
    pub record_path: String,

    /// Module the construction error is imported from (defaults to --record-path)
    #[arg(long)]
    pub error_path: Option<String>,

    /// Preview the stub file without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl StubsCommand {
    pub fn run(&self) -> Result<()> {
        let registry = self.model.registry();
        let stub = StubFile::new(&registry).with_options(StubOptions {
            file_name: self.file_name.clone(),
            record_path: self.record_path.clone(),
            error_path: self
                .error_path
                .clone()
                .unwrap_or_else(|| self.record_path.clone()),
        });

        let report = ops::emit(&stub, &self.output, self.dry_run)?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
