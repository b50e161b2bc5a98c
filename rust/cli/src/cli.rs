//! Command-line argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "actline",
    version,
    about = "Heads-up no-limit action history tools"
)]
pub struct ActlineCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode an action history and print the betting state
    Decode {
        /// Cumulative history such as b200c/kb400
        #[arg(default_value = "")]
        history: String,
    },
    /// List the actions open to a seat
    Legal {
        #[arg(default_value = "")]
        history: String,
        /// Seat asking: 0 = big blind, 1 = button
        #[arg(long, value_parser = clap::value_parser!(i64).range(0..=1))]
        client_pos: i64,
    },
    /// Turn a decision into the wire token to send
    Encode {
        #[arg(default_value = "")]
        history: String,
        #[arg(long, value_enum)]
        decision: DecisionKind,
        /// Pot fraction for --decision pot
        #[arg(long, default_value_t = 1.0)]
        fraction: f64,
        /// Street total for --decision to
        #[arg(long)]
        amount: Option<u32>,
    },
    /// Extract the opponent's new tokens between two histories
    Diff {
        #[arg(long, default_value = "")]
        prev: String,
        #[arg(long)]
        current: String,
        /// Token the client sent last
        #[arg(long, default_value = "")]
        last: String,
    },
    /// Play recorded transcripts through the hand loop
    Replay {
        #[arg(long)]
        input: String,
        #[arg(long)]
        ai: Option<String>,
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
        workers: Option<u16>,
        #[arg(long)]
        seed: Option<u64>,
        /// Write hand records (JSONL) here
        #[arg(long)]
        output: Option<String>,
    },
    /// Show the resolved configuration
    Cfg,
}

/// Decision kinds accepted by `encode`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DecisionKind {
    Fold,
    /// Check or call, whichever applies
    Call,
    /// Bet a fraction of the pot
    Pot,
    /// Bet to an exact street total
    To,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subcommand_parses() {
        let commands: Vec<Vec<&str>> = vec![
            vec!["actline", "decode", "b200c/k"],
            vec!["actline", "decode"],
            vec!["actline", "legal", "b200", "--client-pos", "0"],
            vec!["actline", "encode", "b200", "--decision", "pot", "--fraction", "0.5"],
            vec!["actline", "encode", "--decision", "to", "--amount", "300"],
            vec!["actline", "diff", "--prev", "b200", "--current", "b200c/k", "--last", "c"],
            vec!["actline", "replay", "--input", "t.jsonl", "--workers", "4"],
            vec!["actline", "cfg"],
        ];
        for args in commands {
            assert!(ActlineCli::try_parse_from(&args).is_ok(), "{:?}", args);
        }
    }

    #[test]
    fn client_pos_and_workers_are_range_checked() {
        assert!(ActlineCli::try_parse_from(["actline", "legal", "", "--client-pos", "2"]).is_err());
        assert!(
            ActlineCli::try_parse_from(["actline", "replay", "--input", "x", "--workers", "0"])
                .is_err()
        );
    }
}
