mod build;
mod check;
mod completions;
mod docs;
mod stubs;

use std::{path::PathBuf, sync::Arc};

use build::BuildCommand;
use buildinfo_builder::BuilderRegistry;
use buildinfo_core::Model;
use check::CheckCommand;
use clap::{Args, Parser, Subcommand};
use completions::CompletionsCommand;
use docs::DocsCommand;
use eyre::Result;
use stubs::StubsCommand;

/// Extension trait for exiting on model errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for buildinfo_model::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "buildinfo-om")]
#[command(version)]
#[command(about = "Builder stubs and documentation for build-info record models")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Stubs(cmd) => cmd.run(),
            Commands::Docs(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Build(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Emit Rust trait stubs for every builder
    Stubs(StubsCommand),

    /// Emit builder documentation
    Docs(DocsCommand),

    /// Validate a model file and list its builders
    Check(CheckCommand),

    /// Build a record from JSON input
    Build(BuildCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Where the record model comes from.
#[derive(Args)]
pub(crate) struct ModelArgs {
    /// Path to a model file (defaults to the built-in build-info model)
    #[arg(short, long)]
    pub model: Option<PathBuf>,
}

impl ModelArgs {
    pub fn load(&self) -> Model {
        let model = match &self.model {
            Some(path) => buildinfo_model::parse_file(path).unwrap_or_exit(),
            None => buildinfo_model::builtin().unwrap_or_exit(),
        };
        tracing::debug!(source = %self.source(), records = model.len(), "loaded model");
        model
    }

    /// Display name of the model source.
    pub fn source(&self) -> String {
        match &self.model {
            Some(path) => path.display().to_string(),
            None => "built-in build-info model".to_string(),
        }
    }

    /// Load the model and synthesize every builder.
    pub fn registry(&self) -> BuilderRegistry {
        BuilderRegistry::from_model(Arc::new(self.load()))
    }
}
