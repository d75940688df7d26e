//! Command-line interface layer.
//!
//! Everything user-facing lives here: argument parsing, command dispatch,
//! output rendering, and exit codes. The extraction core below this layer
//! never prints; it hands back data or a typed error.

mod args;
mod exit_status;
mod report;
mod run;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;
pub use run::run_cli;
