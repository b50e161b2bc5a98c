//! Running many recorded hands across worker threads.
//!
//! Every worker owns its transport, decider, token and trackers; nothing
//! mutable is shared. Results flow back over one channel and are only
//! aggregated once every worker has finished.

use std::fmt;
use std::str::FromStr;
use std::sync::mpsc;
use std::thread;

use actline_ai::scripted::ScriptedAI;
use actline_ai::create_ai;
use actline_engine::player::{Action, Position};
use actline_engine::rules::HandContext;
use serde::Serialize;

use crate::config::{validate_ai, SCRIPTED_AI};
use crate::error::{CliError, SessionError};
use crate::session::{play_hand, HandOutcome};
use crate::transport::{ScriptedTransport, Transcript};

/// Totals over every hand that finished.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub hands: usize,
    /// Hands abandoned because of a transport or decode failure
    pub errored: usize,
    pub total_winnings: i64,
    pub bb_per_100: f64,
    pub opponent_folds: usize,
    /// Opponent folds split by the opponent's seat, indexed like [`Position::index`]
    pub opponent_folds_by_position: [usize; 2],
}

impl Summary {
    fn add(&mut self, outcome: &HandOutcome) {
        self.hands += 1;
        self.total_winnings += outcome.winnings;
        if outcome.opponent_folded {
            self.opponent_folds += 1;
            self.opponent_folds_by_position[outcome.client_pos.opponent().index()] += 1;
        }
    }

    fn finish(&mut self, big_blind: u32) {
        self.bb_per_100 = if self.hands == 0 {
            0.0
        } else {
            self.total_winnings as f64 / f64::from(big_blind) / self.hands as f64 * 100.0
        };
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Hands: {} (errored: {})", self.hands, self.errored)?;
        writeln!(f, "Total winnings: {}", self.total_winnings)?;
        writeln!(f, "BB/100: {:.2}", self.bb_per_100)?;
        write!(
            f,
            "Opponent folds: {} ({}: {}, {}: {})",
            self.opponent_folds,
            Position::BigBlind,
            self.opponent_folds_by_position[Position::BigBlind.index()],
            Position::Button,
            self.opponent_folds_by_position[Position::Button.index()],
        )
    }
}

/// Everything a replay produced.
#[derive(Debug, Clone, Default)]
pub struct WorkerReport {
    pub summary: Summary,
    /// Finished hands in transcript order
    pub outcomes: Vec<HandOutcome>,
}

/// Plays every transcript through the hand loop on `workers` threads.
///
/// Worker `w` takes transcripts `w, w + workers, ...`. With `ai` set to
/// `"scripted"` each hand replays the client tokens stored in its transcript;
/// any other name is passed to [`create_ai`], seeded with `seed + w` when a
/// seed is given. Failed hands are logged and counted, never fatal.
///
/// # Errors
///
/// Only an unknown `ai` name; it is rejected before any thread starts.
pub fn run_workers(
    transcripts: &[Transcript],
    workers: usize,
    ai: &str,
    seed: Option<u64>,
    ctx: &HandContext,
) -> Result<WorkerReport, CliError> {
    validate_ai(ai).map_err(|e| CliError::Config(e.to_string()))?;
    let workers = workers.clamp(1, transcripts.len().max(1));
    let (tx, rx) = mpsc::channel::<(usize, Result<HandOutcome, SessionError>)>();

    thread::scope(|scope| {
        for worker in 0..workers {
            let tx = tx.clone();
            scope.spawn(move || {
                let mut named = if ai == SCRIPTED_AI {
                    None
                } else {
                    create_ai(ai, seed.map(|s| s.wrapping_add(worker as u64)))
                };
                let mut token = None;
                let mut played = 0usize;
                for (index, transcript) in transcripts
                    .iter()
                    .enumerate()
                    .skip(worker)
                    .step_by(workers)
                {
                    let mut transport = ScriptedTransport::new(transcript);
                    let result = match named.as_mut() {
                        Some(decider) => play_hand(&mut transport, &mut **decider, ctx, &mut token),
                        None => scripted_decider(transcript).and_then(|mut decider| {
                            play_hand(&mut transport, &mut decider, ctx, &mut token)
                        }),
                    };
                    if tx.send((index, result)).is_err() {
                        break;
                    }
                    played += 1;
                }
                tracing::info!(worker, hands = played, "worker finished");
            });
        }
    });
    drop(tx);

    let mut results: Vec<_> = rx.into_iter().collect();
    results.sort_by_key(|(index, _)| *index);

    let mut report = WorkerReport::default();
    for (index, result) in results {
        match result {
            Ok(outcome) => {
                report.summary.add(&outcome);
                report.outcomes.push(outcome);
            }
            Err(e) => {
                tracing::warn!(hand = index, error = %e, "hand skipped");
                report.summary.errored += 1;
            }
        }
    }
    report.summary.finish(ctx.big_blind);
    Ok(report)
}

fn scripted_decider(transcript: &Transcript) -> Result<ScriptedAI, SessionError> {
    let actions = transcript
        .sent
        .iter()
        .map(|token| {
            Action::from_str(token).map_err(|source| SessionError::Decode {
                history: token.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ScriptedAI::new(actions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::HandResponse;

    fn hand(actions: &[&str], sent: &[&str], client_pos: i64, winnings: i64) -> Transcript {
        let last = actions.len() - 1;
        Transcript {
            responses: actions
                .iter()
                .enumerate()
                .map(|(i, a)| HandResponse {
                    action: a.to_string(),
                    client_pos,
                    winnings: (i == last).then_some(winnings),
                    ..Default::default()
                })
                .collect(),
            sent: sent.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn summary_counts_folds_by_opponent_seat() {
        let transcripts = vec![
            // client on the button raises, big blind folds
            hand(&["", "b300f"], &["b300"], 1, 100),
            // client in the big blind raises, button folds
            hand(&["b200", "b200b600f"], &["b600"], 0, 200),
            // client folds
            hand(&["b200", "b200f"], &["f"], 0, -100),
        ];
        let report =
            run_workers(&transcripts, 2, SCRIPTED_AI, None, &HandContext::default()).unwrap();
        let s = &report.summary;
        assert_eq!(s.hands, 3);
        assert_eq!(s.errored, 0);
        assert_eq!(s.total_winnings, 200);
        assert_eq!(s.opponent_folds, 2);
        assert_eq!(s.opponent_folds_by_position, [1, 1]);
        assert!((s.bb_per_100 - 200.0 / 100.0 / 3.0 * 100.0).abs() < 1e-9);
        let histories: Vec<_> = report.outcomes.iter().map(|o| o.history.as_str()).collect();
        assert_eq!(histories, vec!["b300f", "b200b600f", "b200f"]);
    }

    #[test]
    fn diverging_hand_is_counted_not_fatal() {
        let transcripts = vec![
            hand(&["", "b300f"], &["b400"], 1, 100),
            hand(&["", "b300f"], &["b300"], 1, 100),
        ];
        let report =
            run_workers(&transcripts, 1, SCRIPTED_AI, None, &HandContext::default()).unwrap();
        assert_eq!(report.summary.hands, 1);
        assert_eq!(report.summary.errored, 1);
    }

    #[test]
    fn scripted_min_reraise_is_not_resized() {
        let transcripts = vec![hand(
            &["", "b200b600", "b200b600b1000f"],
            &["b200", "b1000"],
            1,
            600,
        )];
        let report =
            run_workers(&transcripts, 1, SCRIPTED_AI, None, &HandContext::default()).unwrap();
        assert_eq!(report.summary.errored, 0);
        assert_eq!(report.outcomes[0].history, "b200b600b1000f");
    }

    #[test]
    fn unknown_ai_rejected_up_front() {
        let err = run_workers(&[], 1, "oracle", None, &HandContext::default()).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn empty_input_gives_empty_summary() {
        let report = run_workers(&[], 4, "passive", Some(1), &HandContext::default()).unwrap();
        assert_eq!(report.summary, Summary::default());
    }
}
