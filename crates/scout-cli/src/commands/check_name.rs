//! Check-name command for validating operator names.

use std::io::Write;

use anyhow::Result;

use scout_core::is_valid_operator_name;

/// Reports whether `name` is well-formed. Returns the verdict so the caller can set the exit status.
pub fn run<W: Write>(writer: &mut W, name: &str) -> Result<bool> {
    let valid = is_valid_operator_name(name);
    if valid {
        writeln!(writer, "ok: {}", name.trim())?;
    } else {
        writeln!(
            writer,
            "invalid operator name {name:?}: expected First-Name Space Last-Initial, e.g. \"Jane D\""
        )?;
    }
    Ok(valid)
}
