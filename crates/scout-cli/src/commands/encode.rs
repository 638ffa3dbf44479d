//! Implementation of the `scout encode` command.
//!
//! A session script describes one match as seen from one board: the entry's
//! identity plus the operator's actions in order, each at the tick it
//! happened. The script is replayed against a ledger driven by a shared
//! cursor, so scrubbing back and undoing behaves exactly as it would live.
//!
//! ```json
//! {
//!   "match": "Q12", "team": "254", "scout": "Jane D", "board": "R1",
//!   "timestamp": 1700000000,
//!   "actions": [
//!     {"op": "add", "at": 3, "type": 1},
//!     {"op": "seek", "at": 2},
//!     {"op": "undo"},
//!     {"op": "comment", "text": "Great auto!"}
//!   ]
//! }
//! ```

use std::io::Write;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Deserialize;

use scout_core::{
    Board, DataPoint, EntryIdentity, Ledger, SharedCursor, TickGate, is_valid_operator_name,
};

use crate::Config;

/// A recorded session to replay.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionScript {
    #[serde(rename = "match")]
    pub match_id: String,
    pub team: String,
    /// Falls back to the configured operator.
    #[serde(default)]
    pub scout: Option<String>,
    /// Falls back to the configured board.
    #[serde(default)]
    pub board: Option<Board>,
    /// Session start in unix seconds; defaults to now.
    #[serde(default)]
    pub timestamp: Option<u32>,
    #[serde(default = "default_timed")]
    pub timed: bool,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

const fn default_timed() -> bool {
    true
}

/// One operator action.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Action {
    /// Move the cursor to `at` and record a point there.
    Add {
        at: i64,
        #[serde(rename = "type")]
        kind: i64,
        #[serde(default)]
        value: i64,
    },
    /// Undo the newest committed point, optionally moving the cursor first.
    Undo {
        #[serde(default)]
        at: Option<u8>,
    },
    /// Move the cursor without recording anything.
    Seek { at: u8 },
    /// Replace the comments.
    Comment { text: String },
}

/// Replays `script` into a fresh ledger.
///
/// With `strict`, points at a tick that already has one, or past the timer
/// limit, are skipped instead of recorded.
pub fn replay(script: SessionScript, config: &Config, strict: bool) -> Result<Ledger<SharedCursor>> {
    let operator = script
        .scout
        .or_else(|| config.operator.clone())
        .context("session names no scout and no default operator is configured")?;
    if !is_valid_operator_name(&operator) {
        tracing::warn!(%operator, "operator name is not in First-Name Last-Initial form");
    }

    let start_timestamp = match script.timestamp {
        Some(timestamp) => timestamp,
        None => u32::try_from(Utc::now().timestamp())
            .context("current time does not fit in a 32-bit timestamp")?,
    };

    let identity = EntryIdentity {
        match_id: script.match_id,
        subject_id: script.team,
        operator_id: operator,
        station: script.board.unwrap_or(config.board),
        start_timestamp,
    };
    tracing::debug!(?identity, timed = script.timed, "replaying session");

    let cursor = SharedCursor::default();
    let mut ledger = Ledger::with_timing(identity, cursor.clone(), script.timed);
    if let Some(comments) = script.comments {
        ledger.set_comments(comments);
    }

    let mut gate = TickGate::new(config.timer_limit);
    for (index, action) in script.actions.into_iter().enumerate() {
        match action {
            Action::Add { at, kind, value } => {
                let point = DataPoint::try_new(kind, value, at)
                    .with_context(|| format!("action {index}: invalid data point"))?;
                cursor.set(point.time);
                if strict && !gate.is_recordable(point.time) {
                    tracing::warn!(index, tick = point.time, "skipping point at unrecordable tick");
                    continue;
                }
                ledger.add(point);
                gate.mark(point.time);
            }
            Action::Undo { at } => {
                if let Some(at) = at {
                    cursor.set(at);
                }
                if ledger.undo().is_none() {
                    tracing::debug!(index, "undo had nothing to remove");
                }
            }
            Action::Seek { at } => cursor.set(at),
            Action::Comment { text } => ledger.set_comments(text),
        }
    }

    Ok(ledger)
}

/// Runs the encode command, writing the encoded entry as one line.
pub fn run<W: Write>(writer: &mut W, script: &str, config: &Config, strict: bool) -> Result<()> {
    let script: SessionScript =
        serde_json::from_str(script).context("failed to parse session script")?;
    let ledger = replay(script, config, strict)?;

    tracing::info!(
        points = ledger.data_points().len(),
        undo_count = ledger.undo_count(),
        "encoded entry"
    );
    let encoded = ledger.encode().context("failed to encode entry")?;
    writeln!(writer, "{encoded}")?;
    Ok(())
}
