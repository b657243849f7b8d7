use std::{io, path::PathBuf};

use buildinfo_builder::BUILD_INFO;
use buildinfo_core::Value;
use clap::Args;
use eyre::{Context, Result};

use super::ModelArgs;
use crate::ops::{self, BuildOptions};

#[derive(Args)]
pub struct BuildCommand {
    #[command(flatten)]
    pub model: ModelArgs,

    /// JSON object with the record's fields (`-` reads stdin)
    pub input: PathBuf,

    /// Record type to build
    #[arg(short, long, default_value = BUILD_INFO)]
    pub record: String,

    /// Merge the process environment into `properties` (BuildInfo only)
    #[arg(long)]
    pub collect_env: bool,

    /// Environment keys to leave out of `properties`
    #[arg(long = "exclude", value_name = "KEY", requires = "collect_env")]
    pub exclude: Vec<String>,
}

impl BuildCommand {
    pub fn run(&self) -> Result<()> {
        let input = if self.input.as_os_str() == "-" {
            io::read_to_string(io::stdin()).wrap_err("Failed to read stdin")?
        } else {
            std::fs::read_to_string(&self.input)
                .wrap_err_with(|| format!("Failed to read {}", self.input.display()))?
        };
        let input: serde_json::Value =
            serde_json::from_str(&input).wrap_err("Input is not valid JSON")?;

        let registry = self.model.registry();
        let record = ops::build(
            &registry,
            &input,
            &BuildOptions {
                record: &self.record,
                collect_env: self.collect_env,
                exclude: &self.exclude,
            },
        )?;

        println!("{}", serde_json::to_string_pretty(&Value::Record(record))?);
        Ok(())
    }
}
