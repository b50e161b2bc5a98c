//! Replay command handler.
//!
//! Reads transcripts (JSONL, optionally `.zst` compressed), plays them
//! through the hand loop on a worker pool, and prints the summary. With
//! `--output` every finished hand is also written as a hand record.

use crate::config;
use crate::error::CliError;
use crate::io_utils::{ensure_parent_dir, parse_jsonl, read_text_auto};
use crate::transport::Transcript;
use crate::workers::run_workers;
use actline_engine::logger::HandLogger;
use std::io::Write;
use std::path::Path;

/// Options for one replay; unset fields fall back to the configuration.
#[derive(Debug, Clone, Default)]
pub struct ReplayArgs {
    pub input: String,
    pub ai: Option<String>,
    pub workers: Option<usize>,
    pub seed: Option<u64>,
    pub output: Option<String>,
}

/// Handle the replay command.
///
/// # Errors
///
/// Unreadable or malformed input, invalid configuration, an unknown AI, or a
/// failure writing `--output`. Individual hands that fail are counted in the
/// summary instead.
pub fn handle_replay_command(args: ReplayArgs, out: &mut dyn Write) -> Result<(), CliError> {
    let cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    let ctx = cfg
        .hand_context()
        .map_err(|e| CliError::Config(e.to_string()))?;
    let ai = args.ai.unwrap_or(cfg.ai);
    let workers = args.workers.unwrap_or(cfg.workers);
    let seed = args.seed.or(cfg.seed);

    let content = read_text_auto(&args.input)
        .map_err(|e| CliError::InvalidInput(format!("Failed to read {}: {}", args.input, e)))?;
    let transcripts: Vec<Transcript> = parse_jsonl(&content)
        .map_err(|e| CliError::InvalidInput(format!("{}: {}", args.input, e)))?;
    tracing::info!(input = %args.input, hands = transcripts.len(), ai = %ai, workers, "replay started");

    let report = run_workers(&transcripts, workers, &ai, seed, &ctx)?;

    if let Some(path) = &args.output {
        ensure_parent_dir(Path::new(path))?;
        let mut logger = HandLogger::create(path)?;
        for outcome in &report.outcomes {
            let mut record = outcome.record.clone();
            record.hand_id = logger.next_id();
            logger.write(&record)?;
        }
        writeln!(out, "Wrote {} hand records to {}", report.outcomes.len(), path)?;
    }

    writeln!(out, "{}", report.summary)?;
    Ok(())
}
