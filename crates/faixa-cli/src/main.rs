//! Schedule sheet macros CLI.

use clap::{ColorChoice, Parser};
use faixa_cli::logging::{LogConfig, LogFormat, init_logging};
use serde::Serialize;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod prompt;
mod summary;
mod types;

use faixa_core::MacroKind;

use crate::cli::{Cli, ClearArgs, Command, LogFormatArg, LogLevelArg, WorkbookArgs};
use crate::commands::{run_action, run_export, run_show};
use crate::prompt::TerminalInteraction;
use crate::summary::{print_action, print_show};
use crate::types::ActionResult;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::AddBands(args) => action(MacroKind::AddTimeBands, &args, false),
        Command::AddOrders(args) => action(MacroKind::AddServiceOrders, &args, false),
        Command::ClearOrders(ClearArgs { workbook, yes }) => {
            action(MacroKind::ClearServiceOrders, &workbook, yes)
        }
        Command::ClearBands(ClearArgs { workbook, yes }) => {
            action(MacroKind::ClearTimeBands, &workbook, yes)
        }
        Command::Export(args) => {
            let mut ui = TerminalInteraction::new(false, args.workbook.json);
            finish_action(run_export(&args, &mut ui), args.workbook.json)
        }
        Command::Show(args) => match run_show(&args) {
            Ok(result) => {
                if args.json {
                    print_json(&result)
                } else {
                    print_show(&result);
                    0
                }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

fn action(kind: MacroKind, args: &WorkbookArgs, assume_yes: bool) -> i32 {
    // The summary table shows the outcome message; JSON output does not.
    let mut ui = TerminalInteraction::new(assume_yes, args.json);
    finish_action(run_action(kind, args, &mut ui), args.json)
}

fn finish_action(result: anyhow::Result<ActionResult>, json: bool) -> i32 {
    match result {
        Ok(result) => {
            let printed = if json {
                print_json(&result)
            } else {
                print_action(&result);
                0
            };
            if result.has_errors() { 1 } else { printed }
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            0
        }
        Err(error) => {
            eprintln!("error: failed to serialize result: {error}");
            1
        }
    }
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
