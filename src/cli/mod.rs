//! CLI module for urban-stress
//!
//! - Argument parsing (`args`)
//! - Runtime setup (`setup`)

pub mod args;
pub mod setup;

pub use args::{parse_args, Cli, Commands, InterventionArgs};
pub use setup::{create_formatting_config, init_logging};
