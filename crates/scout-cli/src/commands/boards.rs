//! Boards command for listing scouting positions.

use std::io::Write;

use anyhow::Result;

use scout_core::Board;

pub fn run<W: Write>(writer: &mut W) -> Result<()> {
    for board in Board::ALL {
        writeln!(writer, "{board}\t{}", board.alliance())?;
    }
    Ok(())
}
