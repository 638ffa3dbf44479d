//! Decode command for inspecting encoded entries.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat};

use scout_core::{Entry, decode};

/// Runs the decode command, printing the entry as text or pretty JSON.
pub fn run<W: Write>(writer: &mut W, encoded: &str, json: bool) -> Result<()> {
    let entry = decode(encoded).context("failed to decode entry")?;
    tracing::debug!(points = entry.data_points.len(), "decoded entry");

    if json {
        serde_json::to_writer_pretty(&mut *writer, &entry).context("failed to serialize entry")?;
        writeln!(writer)?;
        return Ok(());
    }

    write_text(writer, &entry)
}

fn write_text<W: Write>(writer: &mut W, entry: &Entry) -> Result<()> {
    let identity = &entry.identity;
    let started = DateTime::from_timestamp(i64::from(identity.start_timestamp), 0).map_or_else(
        || identity.start_timestamp.to_string(),
        |dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true),
    );

    writeln!(writer, "Match: {}", identity.match_id)?;
    writeln!(writer, "Team: {}", identity.subject_id)?;
    writeln!(writer, "Scout: {}", identity.operator_id)?;
    writeln!(
        writer,
        "Board: {} ({})",
        identity.station,
        identity.station.alliance()
    )?;
    writeln!(writer, "Started: {started}")?;
    writeln!(writer, "Undone: {}", entry.undo_count)?;
    writeln!(writer, "Data points: {}", entry.data_points.len())?;
    for point in &entry.data_points {
        writeln!(
            writer,
            "  t={:<3} type={:<3} value={}",
            point.time, point.kind, point.value
        )?;
    }
    writeln!(writer, "Comments: {}", entry.comments)?;
    Ok(())
}
