use clap::Args;
use eyre::Result;

use super::ModelArgs;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub model: ModelArgs,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let registry = self.model.registry();
        let report = ops::check(&registry, self.model.source());
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
