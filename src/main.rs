use std::io;

mod app;
mod audio;
mod config;
mod library;
mod scheduler;
mod ui;

use app::App;
use config::Settings;
use library::SongStore;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load()?;
    settings
        .validate()
        .map_err(|e| format!("invalid configuration: {e}"))?;

    let store = SongStore::open(&settings.storage.songs_file)?;
    let audio = audio::detect(settings.recording.sample_rate);

    let mut app = App::new(store, audio, settings);

    let stdin = io::stdin();
    let stdout = io::stdout();
    app.run(&mut stdin.lock(), &mut stdout.lock())?;
    Ok(())
}
