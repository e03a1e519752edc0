//! Menu text and line-oriented prompt helpers.
//!
//! Everything here writes to a generic `Write` and reads from a generic
//! `BufRead` so the handlers can be scripted in tests.

use std::io::{self, BufRead, Write};

use crate::library::Song;

/// Print the single-screen menu.
pub fn menu<Out: Write>(out: &mut Out) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "PIANO PRACTICE - SPACED REPETITION")?;
    writeln!(out, "1. Add a new song")?;
    writeln!(out, "2. Review today")?;
    writeln!(out, "3. Delete a song")?;
    writeln!(out, "4. Record a practice take")?;
    writeln!(out, "5. Play a practice take")?;
    writeln!(out, "q. Quit")?;
    Ok(())
}

/// Show `msg`, flush, and read one trimmed line.
///
/// Returns `None` when input is exhausted (end of input / closed stdin).
pub fn prompt<In: BufRead, Out: Write>(
    input: &mut In,
    out: &mut Out,
    msg: &str,
) -> io::Result<Option<String>> {
    write!(out, "{msg}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Numbered name + reference listing, in store order.
pub fn list_songs<Out: Write>(out: &mut Out, songs: &[Song]) -> io::Result<()> {
    for (i, song) in songs.iter().enumerate() {
        if song.reference.is_empty() {
            writeln!(out, "{}. {}", i + 1, song.name)?;
        } else {
            writeln!(out, "{}. {} - {}", i + 1, song.name, song.reference)?;
        }
    }
    Ok(())
}
