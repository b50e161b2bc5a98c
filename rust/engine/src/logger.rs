use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::decoder::Terminal;
use crate::player::{Action, Position};

/// Represents a betting street in Texas Hold'em poker.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Street {
    /// Before flop (hole cards dealt)
    Preflop,
    /// After flop (3 community cards)
    Flop,
    /// After turn (4th community card)
    Turn,
    /// After river (5th community card)
    River,
}

impl Street {
    pub fn from_index(index: u8) -> Option<Street> {
        match index {
            0 => Some(Street::Preflop),
            1 => Some(Street::Flop),
            2 => Some(Street::Turn),
            3 => Some(Street::River),
            _ => None,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }
}

/// Records a single action replayed from a history.
/// Associates the action with the seat that took it and the street it was taken on.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub position: Position,
    pub street: Street,
    pub action: Action,
}

/// Complete record of one hand played through a transport.
/// Serialized to JSONL format for later analysis.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Unique identifier for this hand (format: YYYYMMDD-NNNNNN)
    pub hand_id: String,
    /// Seat the client played
    pub client_pos: Position,
    /// Final cumulative action history
    pub history: String,
    pub hole_cards: Vec<Card>,
    pub board: Vec<Card>,
    /// Opponent hole cards, when the remote side reveals them
    #[serde(default)]
    pub opponent_hole_cards: Vec<Card>,
    /// Chips won (negative when lost) from the client's point of view
    pub winnings: i64,
    #[serde(default)]
    pub terminal: Option<Terminal>,
    /// Timestamp when the hand finished (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct HandLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl HandLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
