//! Tenta CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tenta_cli::exit::ExitStatus;
use tenta_cli::logging::{LogConfig, LogFormat, init_logging};
use tenta_cli::settings::load_settings;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    run_backup, run_edit, run_import, run_import_legacy, run_merge, run_search, run_settings,
    run_show,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    };
    let result = match &cli.command {
        Command::Merge(args) => run_merge(args, &settings).map(|()| ExitStatus::Success),
        Command::Import(args) => run_import(args, &settings),
        Command::Search(args) => run_search(args, &settings).map(|()| ExitStatus::Success),
        Command::Show(args) => run_show(args, &settings).map(|()| ExitStatus::Success),
        Command::Edit(args) => run_edit(args, &settings).map(|()| ExitStatus::Success),
        Command::Backup(args) => run_backup(args, &settings).map(|()| ExitStatus::Success),
        Command::ImportLegacy(args) => run_import_legacy(args, &settings),
        Command::Settings(args) => run_settings(args, &settings).map(|()| ExitStatus::Success),
    };
    let exit_code = match result {
        Ok(status) => status.code(),
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
