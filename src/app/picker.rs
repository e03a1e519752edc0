//! Numbered-list selection shared by the delete, record and play handlers.

use std::io::{self, BufRead, Write};

use crate::library::Song;
use crate::ui;

/// Parse a 1-based selection into an index into a list of `len` items.
pub fn parse_selection(input: &str, len: usize) -> Option<usize> {
    let n: usize = input.trim().parse().ok()?;
    if n == 0 || n > len {
        return None;
    }
    Some(n - 1)
}

/// List `songs` and ask for one by number.
///
/// Returns `Ok(None)` when there are no songs, the user cancels with empty
/// input, the selection is invalid, or input ends. Nothing is mutated on
/// any of those paths.
pub fn pick_song<In: BufRead, Out: Write>(
    songs: &[Song],
    input: &mut In,
    out: &mut Out,
    msg: &str,
) -> io::Result<Option<usize>> {
    if songs.is_empty() {
        writeln!(out, "No songs yet.")?;
        return Ok(None);
    }

    ui::list_songs(out, songs)?;
    let Some(answer) = ui::prompt(input, out, msg)? else {
        return Ok(None);
    };
    if answer.is_empty() {
        writeln!(out, "Cancelled.")?;
        return Ok(None);
    }

    match parse_selection(&answer, songs.len()) {
        Some(i) => Ok(Some(i)),
        None => {
            writeln!(out, "Invalid selection.")?;
            Ok(None)
        }
    }
}
