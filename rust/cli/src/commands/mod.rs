//! Command handler modules for the `actline` CLI.
//!
//! Each handler takes its parsed arguments plus the output and error streams
//! and returns `Result<(), CliError>`; [`crate::run`] turns errors into exit
//! codes.

mod cfg;
mod decode;
mod diff;
mod encode;
mod legal;
mod replay;

pub use cfg::handle_cfg_command;
pub use decode::handle_decode_command;
pub use diff::handle_diff_command;
pub use encode::handle_encode_command;
pub use legal::handle_legal_command;
pub use replay::{handle_replay_command, ReplayArgs};

use crate::config;
use crate::error::CliError;
use actline_engine::rules::HandContext;

/// Table parameters from the resolved configuration.
fn table() -> Result<HandContext, CliError> {
    config::load()
        .and_then(|cfg| cfg.hand_context())
        .map_err(|e| CliError::Config(e.to_string()))
}
