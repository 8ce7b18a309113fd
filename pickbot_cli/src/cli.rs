//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "pickbot", version, about = "Robot dispatch CLI")]
pub struct Cli {
    /// Path to config TOML (typed)
    #[arg(long, value_name = "FILE", default_value = "etc/pickbot.toml")]
    pub config: PathBuf,

    /// Log as JSON lines instead of pretty
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile and send the pick-to-shipment program for one slot
    Dispatch {
        /// 1-based slot id along the bin row
        #[arg(long)]
        slot: i64,
        /// Controller IPv4 address (overrides controller.host from the config)
        #[arg(long, value_name = "ADDR")]
        host: Option<String>,
        /// Print the compiled program to stdout before sending it
        #[arg(long, action = ArgAction::SetTrue)]
        print_program: bool,
    },
    /// Compile and print the program for a slot without touching the network
    Preview {
        /// 1-based slot id along the bin row
        #[arg(long)]
        slot: i64,
    },
    /// Validate the configuration and compile a reference program (no network)
    SelfCheck,
}
