//! # actline CLI Library
//!
//! Command-line tools around the action history engine, plus the pieces
//! needed to play whole hands against a dealer: the [`transport`] seam, the
//! per-hand [`session`] loop and the parallel [`workers`] pool.
//!
//! ## Main Entry Point
//!
//! [`run`] parses arguments and dispatches to a subcommand, writing to the
//! given streams and returning the process exit code.
//!
//! ```
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let args = ["actline", "diff", "--prev", "b200c/", "--current", "b200c/kb400", "--last", "k"];
//! let code = actline_cli::run(args, &mut out, &mut err);
//! assert_eq!(code, 0);
//! assert_eq!(String::from_utf8(out).unwrap(), "b400\n");
//! ```
//!
//! ## Available Subcommands
//!
//! - `decode`: Replay a history and print the betting state
//! - `legal`: List the actions open to a seat
//! - `encode`: Turn a decision into a wire token
//! - `diff`: Extract the opponent's new tokens
//! - `replay`: Run recorded transcripts through the hand loop
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;
pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod io_utils;
pub mod logging;
pub mod session;
pub mod transport;
pub mod ui;
pub mod workers;

use cli::{ActlineCli, Commands};
use commands::{
    handle_cfg_command, handle_decode_command, handle_diff_command, handle_encode_command,
    handle_legal_command, handle_replay_command, ReplayArgs,
};

pub use error::{CliError, SessionError, TransportError};

const COMMANDS: &[&str] = &["decode", "legal", "encode", "diff", "replay", "cfg"];

/// Main entry point for the CLI application.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for any error (usage errors included).
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match ActlineCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return usage_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Decode { history } => handle_decode_command(&history, out),
        Commands::Legal {
            history,
            client_pos,
        } => handle_legal_command(&history, client_pos, out),
        Commands::Encode {
            history,
            decision,
            fraction,
            amount,
        } => handle_encode_command(&history, decision, fraction, amount, out),
        Commands::Diff {
            prev,
            current,
            last,
        } => handle_diff_command(&prev, &current, &last, out),
        Commands::Replay {
            input,
            ai,
            workers,
            seed,
            output,
        } => handle_replay_command(
            ReplayArgs {
                input,
                ai,
                workers: workers.map(usize::from),
                seed,
                output,
            },
            out,
        ),
        Commands::Cfg => handle_cfg_command(out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version should print to stdout and exit 0
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }
    let _ = writeln!(err, "{}", e);
    let _ = writeln!(err, "Usage: actline <command> [options]\n");
    let _ = writeln!(err, "Commands:");
    for c in COMMANDS {
        let _ = writeln!(err, "  {}", c);
    }
    let _ = writeln!(err, "\nFor full help, run: actline --help");
    exit_code::ERROR
}
