//! The menu loop and its command handlers.

use std::fs;
use std::io::{BufRead, Write};

use chrono::{Local, NaiveDate};

use crate::audio::{self, AudioBackend};
use crate::config::{PersistMode, Settings};
use crate::library::{Song, SongStore};
use crate::scheduler::{self, Grade};
use crate::ui;

use super::picker;

type HandlerResult = Result<(), Box<dyn std::error::Error>>;

/// Whether the menu loop keeps going after a dispatched command.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    store: SongStore,
    audio: Box<dyn AudioBackend>,
    settings: Settings,
}

impl App {
    pub fn new(store: SongStore, audio: Box<dyn AudioBackend>, settings: Settings) -> Self {
        Self {
            store,
            audio,
            settings,
        }
    }

    /// Run the menu until quit or end of input.
    ///
    /// Handler errors (a corrupt store row, a failed save) are printed and
    /// the menu comes back; they never terminate the loop.
    pub fn run<In: BufRead, Out: Write>(
        &mut self,
        input: &mut In,
        out: &mut Out,
    ) -> std::io::Result<()> {
        loop {
            ui::menu(out)?;
            let Some(choice) = ui::prompt(input, out, "Select an option: ")? else {
                break;
            };

            let today = Local::now().date_naive();
            match self.dispatch(&choice, input, out, today) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => writeln!(out, "Error: {e}")?,
            }
        }
        Ok(())
    }

    /// Route one menu selection. `today` is passed in so sessions are
    /// deterministic under test.
    pub fn dispatch<In: BufRead, Out: Write>(
        &mut self,
        choice: &str,
        input: &mut In,
        out: &mut Out,
        today: NaiveDate,
    ) -> Result<Flow, Box<dyn std::error::Error>> {
        match choice.trim() {
            "1" => self.add_song(input, out, today)?,
            "2" => self.review_today(input, out, today)?,
            "3" => self.delete_song(input, out)?,
            "4" => self.record_practice(input, out)?,
            "5" => self.play_practice(input, out)?,
            "q" | "Q" => return Ok(Flow::Quit),
            _ => writeln!(out, "Invalid option.")?,
        }
        Ok(Flow::Continue)
    }

    fn add_song<In: BufRead, Out: Write>(
        &mut self,
        input: &mut In,
        out: &mut Out,
        today: NaiveDate,
    ) -> HandlerResult {
        let Some(name) = ui::prompt(input, out, "Song name: ")? else {
            return Ok(());
        };
        if name.is_empty() {
            writeln!(out, "Cancelled.")?;
            return Ok(());
        }
        let Some(reference) = ui::prompt(input, out, "Link or reference: ")? else {
            return Ok(());
        };

        let mut songs = self.store.load()?;
        songs.push(Song::new(name, reference, today));
        self.store.save(&songs)?;
        writeln!(out, "Song added to the review rotation.")?;
        Ok(())
    }

    fn review_today<In: BufRead, Out: Write>(
        &mut self,
        input: &mut In,
        out: &mut Out,
        today: NaiveDate,
    ) -> HandlerResult {
        let mut songs = self.store.load()?;
        let due = scheduler::due_indices(&songs, today);
        if due.is_empty() {
            writeln!(out, "No songs due today.")?;
            return Ok(());
        }

        writeln!(out)?;
        writeln!(out, "{} song(s) to review today:", due.len())?;

        let persist = self.settings.review.persist;
        let mut graded = 0usize;
        let mut interrupted = false;

        for (shown, &idx) in due.iter().enumerate() {
            writeln!(out)?;
            writeln!(out, "{}. {}", shown + 1, songs[idx].name)?;
            if !songs[idx].reference.is_empty() {
                writeln!(out, "   {}", songs[idx].reference)?;
            }

            let answer = ui::prompt(input, out, "How did it go? (e=easy, m=medium, h=hard): ")?;
            let Some(answer) = answer else {
                interrupted = true;
                break;
            };

            match Grade::parse(&answer) {
                None => {
                    writeln!(out, "Invalid grade; skipping this song.")?;
                }
                Some(grade) => {
                    songs[idx].apply_review(grade, today);
                    graded += 1;
                    if persist == PersistMode::AfterEachSong {
                        self.store.save(&songs)?;
                    }
                }
            }
        }

        if interrupted {
            // After-session mode keeps the original all-or-nothing batch:
            // an interrupted session persists nothing.
            match persist {
                PersistMode::AfterSession => writeln!(out, "Review interrupted; nothing saved.")?,
                PersistMode::AfterEachSong => writeln!(out, "Review interrupted.")?,
            }
            return Ok(());
        }

        if persist == PersistMode::AfterSession {
            self.store.save(&songs)?;
        }
        writeln!(out)?;
        writeln!(out, "Review complete: {graded} song(s) updated.")?;
        Ok(())
    }

    fn delete_song<In: BufRead, Out: Write>(
        &mut self,
        input: &mut In,
        out: &mut Out,
    ) -> HandlerResult {
        let mut songs = self.store.load()?;
        let Some(i) = picker::pick_song(
            &songs,
            input,
            out,
            "Number to delete (Enter to cancel): ",
        )?
        else {
            return Ok(());
        };

        let removed = songs.remove(i);
        self.store.save(&songs)?;
        writeln!(out, "Deleted: {}", removed.name)?;
        Ok(())
    }

    fn record_practice<In: BufRead, Out: Write>(
        &mut self,
        input: &mut In,
        out: &mut Out,
    ) -> HandlerResult {
        if !self.audio.is_available() {
            writeln!(out, "Audio is unavailable on this system; recording is disabled.")?;
            return Ok(());
        }

        let songs = self.store.load()?;
        let Some(i) = picker::pick_song(
            &songs,
            input,
            out,
            "Number of the song to record (Enter to cancel): ",
        )?
        else {
            return Ok(());
        };

        let default_seconds = self.settings.recording.default_seconds;
        let prompt = format!("Seconds to record ({default_seconds} by default): ");
        let Some(answer) = ui::prompt(input, out, &prompt)? else {
            return Ok(());
        };
        let seconds: u32 = answer.parse().unwrap_or(default_seconds);
        let seconds = seconds.max(1);

        let recordings_dir = &self.settings.storage.recordings_dir;
        fs::create_dir_all(audio::song_dir(recordings_dir, &songs[i].name))?;
        let path =
            audio::new_recording_path(recordings_dir, &songs[i].name, Local::now().naive_local());

        writeln!(out, "Recording {seconds}s...")?;
        match self.audio.record(&path, seconds) {
            Ok(()) => writeln!(out, "Saved: {}", path.display())?,
            Err(e) => {
                writeln!(out, "{e}")?;
                // Drop whatever the failed capture left; remove_dir only
                // succeeds on an empty folder, so earlier takes stay put.
                let _ = fs::remove_file(&path);
                if let Some(dir) = path.parent() {
                    let _ = fs::remove_dir(dir);
                }
            }
        }
        Ok(())
    }

    fn play_practice<In: BufRead, Out: Write>(
        &mut self,
        input: &mut In,
        out: &mut Out,
    ) -> HandlerResult {
        if !self.audio.is_available() {
            writeln!(out, "Audio is unavailable on this system; playback is disabled.")?;
            return Ok(());
        }

        let songs = self.store.load()?;
        let Some(i) = picker::pick_song(
            &songs,
            input,
            out,
            "Number of the song to play back (Enter to cancel): ",
        )?
        else {
            return Ok(());
        };

        let takes = audio::list_recordings(&self.settings.storage.recordings_dir, &songs[i].name);
        if takes.is_empty() {
            writeln!(out, "No recordings for this song.")?;
            return Ok(());
        }

        writeln!(out)?;
        writeln!(out, "Available recordings:")?;
        for (n, take) in takes.iter().enumerate() {
            let name = take.file_name().and_then(|s| s.to_str()).unwrap_or("?");
            writeln!(out, "{}. {name}", n + 1)?;
        }

        let Some(answer) = ui::prompt(input, out, "Number to play (Enter to cancel): ")? else {
            return Ok(());
        };
        if answer.is_empty() {
            writeln!(out, "Cancelled.")?;
            return Ok(());
        }
        let Some(j) = picker::parse_selection(&answer, takes.len()) else {
            writeln!(out, "Invalid selection.")?;
            return Ok(());
        };

        let name = takes[j].file_name().and_then(|s| s.to_str()).unwrap_or("?");
        writeln!(out, "Playing {name} ...")?;
        if let Err(e) = self.audio.play(&takes[j]) {
            writeln!(out, "{e}")?;
        }
        Ok(())
    }
}
