//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod check;
mod emit;
mod output;

pub use check::{BuilderSummary, CheckReport};
pub use emit::EmitReport;
pub use output::{Report, TerminalOutput};
