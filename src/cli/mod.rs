//! CLI command handling module
//!
//! Handles all CLI subcommands and argument parsing.

mod commands;
mod eval;
mod logging;
mod version;
mod wait;

pub use commands::{ConfigSubcommand, handle_config_command, handle_kinds_command};
pub use eval::{EvalReport, OutputFormat, exit_code, handle_eval_command};
pub use logging::*;
pub use version::display_version;
pub use wait::{WaitArgs, handle_wait_command};
