mod cli;
mod commands;
mod config;
mod display;
mod logging;
mod output;

use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::Result;

use cli::{Cli, Commands};
use commands::show::ShowOptions;
use config::{LogLevel, UserConfig};
use logging::LogMode;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = UserConfig::load();

    let log_level_override = cli.log_level.as_deref().map(LogLevel::from_str);
    let _log_guard = logging::init(
        config.log_level,
        LogMode::from_config(config.log_to_file),
        log_level_override,
    );

    match cli.command {
        Some(Commands::Config { path, reset, edit }) => {
            commands::config::run(path, reset, edit)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Debug) => {
            commands::debug::run(&config)?;
            Ok(ExitCode::SUCCESS)
        }
        None => commands::show::run(
            ShowOptions {
                format: cli.format.unwrap_or(config.format),
                export: cli.export.as_deref(),
                quiet: cli.quiet,
            },
            &config,
        ),
    }
}
