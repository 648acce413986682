mod cli;
mod dispatch;
mod logging;
mod output;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use paydesk_client::ClientError;
use stdout_io::write_stdout_text;

const ROOT_HELP: &str = "Paydesk - payment operations desk

Usage:
  paydesk <command>

Start here:
  paydesk dashboard
  paydesk payments --help
  paydesk merchants --help
";

const TOP_LEVEL_HELP: &str = "Paydesk - payment operations desk

USAGE: paydesk [--data-dir <DIR>] <command>

Overview:
  paydesk dashboard                                       Summary cards, daily totals, breakdowns, top merchants
  paydesk dashboard --today 2024-01-31                    Pin the day used for day-over-day comparison

Browse payments:
  paydesk payments                                        Newest payments first, 10 per page
  paydesk payments --status SUCCESS --from 2024-01-01     Filter by status, method, date, amount, or merchant
  paydesk payments show <payment-code>                    One payment with its merchant
  paydesk transactions                                    Transaction log with search and date range

Browse merchants:
  paydesk merchants                                       Most recently registered first
  paydesk merchants --biz-type CAFE                       Filter by business type or status
  paydesk merchants show <mcht-code>                      Full merchant profile

Record sources:
  Commands read `payments.json` and `merchants.json` from `--data-dir`
  (default `./data`, or `PAYDESK_DATA_DIR`). Each file holds the raw
  `{status, message, data}` body returned by the backend.
  Use `--payments-file -` or `--merchants-file -` to read one body from stdin.

Output:
  Add `--json` to any command for machine-readable output.
  Set `PAYDESK_LOG=debug` to trace record loading on stderr.
  Run `paydesk <command> --help` for command usage.
";

fn main() -> ExitCode {
    logging::init();
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }
    let parsed = cli::Cli::try_parse();
    let cli = match parsed {
        Ok(value) => value,
        Err(err) => {
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let help_text = if is_top_level_help_request(&raw_args) {
                    TOP_LEVEL_HELP.to_string()
                } else {
                    err.to_string()
                };
                if write_stdout_text(&help_text).is_err() {
                    return Err(ExitCode::from(2));
                }
                return Ok(ExitCode::SUCCESS);
            }
            let command_hint = if matches!(
                err.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::InvalidValue
                    | ErrorKind::ValueValidation
                    | ErrorKind::WrongNumberOfValues
                    | ErrorKind::UnknownArgument
                    | ErrorKind::InvalidSubcommand
                    | ErrorKind::ArgumentConflict
            ) {
                command_path_from_args(&raw_args)
            } else {
                None
            };
            let clean_message = strip_clap_boilerplate(&err.to_string());
            let parse_error =
                ClientError::invalid_argument_for_command(&clean_message, command_hint.as_deref());
            let mode = infer_requested_output_mode(&raw_args);
            if output::print_failure(&parse_error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            return Err(ExitCode::from(1));
        }
    };
    let mode = output::mode_for_command(&cli.command);

    let dispatched = dispatch::dispatch(&cli);
    match dispatched {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            tracing::debug!(code = %error.code, "command failed");
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

/// `paydesk --help`, possibly with global source flags, but no command word.
fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args
        .iter()
        .skip(1)
        .any(|value| matches!(value.as_str(), "--help" | "-h"))
        && command_path_from_args(raw_args).is_none()
}

/// Strips clap's trailing boilerplate (Usage line, "For more information" hint)
/// so our "What to do next" section is the single source of guidance.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_end().to_string()
}

/// Builds the subcommand path from raw CLI args for use in help hints.
///
/// Only the command words are matched; flag values that happen to precede
/// them (such as a `--data-dir` path) are skipped.
fn command_path_from_args(raw_args: &[String]) -> Option<String> {
    let words: Vec<&str> = raw_args
        .iter()
        .skip(1)
        .map(String::as_str)
        .skip_while(|value| {
            !matches!(
                *value,
                "payments" | "transactions" | "merchants" | "dashboard"
            )
        })
        .filter(|value| !value.starts_with('-'))
        .collect();

    let hint = match words.as_slice() {
        ["payments", "show", ..] => Some("payments show"),
        ["payments", ..] => Some("payments"),
        ["transactions", ..] => Some("transactions"),
        ["merchants", "show", ..] => Some("merchants show"),
        ["merchants", ..] => Some("merchants"),
        ["dashboard", ..] => Some("dashboard"),
        _ => None,
    };
    hint.map(std::string::ToString::to_string)
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if is_internal_error(error) {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

fn is_internal_error(error: &ClientError) -> bool {
    error.code.starts_with("internal_")
}
