#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! `pickbot` binary: parse args, wire logging, run one command.

mod cli;
mod dispatch;
mod error_fmt;

use clap::Parser;
use cli::{Cli, Commands, FILE_GUARD, JSON_MODE};
use eyre::WrapErr;
use std::ffi::OsStr;
use std::path::Path;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

fn main() {
    let code = match run() {
        Ok(()) => 0,
        Err(err) => {
            if JSON_MODE.get().copied().unwrap_or(false) {
                eprintln!("{}", error_fmt::format_error_json(&err));
            } else {
                eprintln!("{}", error_fmt::humanize(&err));
            }
            error_fmt::exit_code_for_error(&err)
        }
    };
    std::process::exit(code);
}

fn run() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    let content = std::fs::read_to_string(&cli.config)
        .wrap_err_with(|| format!("failed to read config file {}", cli.config.display()))?;
    let cfg = pickbot_config::load_toml(&content)
        .wrap_err_with(|| format!("failed to parse config file {}", cli.config.display()))?;

    init_logging(&cli, &cfg.logging);

    cfg.validate().wrap_err("invalid configuration")?;

    match &cli.cmd {
        Commands::Dispatch {
            slot,
            host,
            print_program,
        } => dispatch::run_dispatch(&cfg, *slot, host.as_deref(), *print_program),
        Commands::Preview { slot } => dispatch::run_preview(&cfg, *slot),
        Commands::SelfCheck => dispatch::run_self_check(&cfg),
    }
}

/// Console layer always; JSON-lines file layer when `[logging] file` is set.
/// `RUST_LOG` wins over everything; `--log-level` wins over the config.
fn init_logging(cli: &Cli, logging: &pickbot_config::Logging) {
    let requested = if cli.log_level == "info" {
        logging.level.clone().unwrap_or_else(|| cli.log_level.clone())
    } else {
        cli.log_level.clone()
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&requested))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let console = if cli.json {
        fmt::layer().json().with_target(false).boxed()
    } else {
        fmt::layer().with_target(false).boxed()
    };

    let file_layer = logging.file.as_deref().map(|raw| {
        let path = Path::new(raw);
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let name = path
            .file_name()
            .unwrap_or_else(|| OsStr::new("pickbot.log"));
        let appender = match logging.rotation.as_deref() {
            Some("daily") => tracing_appender::rolling::daily(dir, name),
            Some("hourly") => tracing_appender::rolling::hourly(dir, name),
            _ => tracing_appender::rolling::never(dir, name),
        };
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let _ = FILE_GUARD.set(guard);
        fmt::layer()
            .json()
            .with_ansi(false)
            .with_writer(writer)
            .boxed()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .init();
}
