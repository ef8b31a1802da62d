use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::terminal::disable_raw_mode;

use crate::audio::RodioBackend;
use crate::cli::Args;
use crate::error::Error;
use crate::input::TerminalInput;
use crate::library::{self, LoftyMetadata};
use crate::logging;
use crate::playlist::{Outcome, PlaylistController};
use crate::render::Screen;
use crate::transport::Transport;

mod settings;
mod startup;

pub fn run() -> ExitCode {
    let args = Args::parse();
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            let _ = disable_raw_mode();
            eprintln!("spotspot: {e}");
            ExitCode::FAILURE
        }
    }
}

fn execute(args: Args) -> Result<ExitCode, Error> {
    let settings = settings::load_settings(args.config.as_deref());

    if args.print_config {
        print!("{}", toml::to_string_pretty(&settings)?);
        return Ok(ExitCode::SUCCESS);
    }

    let screen = Arc::new(Screen::terminal(&settings.ui));
    logging::init(&settings.log, args.log_file.as_deref(), Arc::clone(&screen))?;

    // clap enforces the path unless --print-config was given.
    let Some(path) = args.path else {
        return Ok(ExitCode::from(2));
    };

    let selection = match library::select(&path, &settings.library) {
        Ok(selection) => selection,
        Err(Error::NoFilesFound(dir)) => {
            tracing::info!(dir = %dir.display(), "nothing to play");
            println!("No supported music files found in directory");
            return Ok(ExitCode::SUCCESS);
        }
        Err(e @ Error::InvalidPath(_)) => {
            eprintln!("spotspot: {e}");
            return Ok(ExitCode::from(2));
        }
        Err(e) => return Err(e),
    };

    let (playlist, note) = startup::playlist_for(selection);
    if let Some(note) = note {
        println!("{note}");
    }

    let backend = match RodioBackend::open() {
        Ok(backend) => backend,
        Err(e) => {
            tracing::debug!(error = %e, "audio output unavailable");
            eprintln!("spotspot: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let transport = Arc::new(Transport::new(
        Box::new(backend),
        Box::new(LoftyMetadata),
        &settings.audio,
    ));

    if settings.ui.show_controls {
        screen.message(&startup::controls_text())?;
    }

    if let Err(e) = ctrlc::set_handler(|| {
        let _ = disable_raw_mode();
        println!();
        std::process::exit(130);
    }) {
        tracing::warn!(error = %e, "could not install signal handler");
    }

    let tick = Duration::from_millis(settings.ui.tick_ms.max(1));
    let mut controller = PlaylistController::new(playlist, transport, screen, tick);
    let outcome = controller.run(&mut TerminalInput)?;
    tracing::debug!(?outcome, "session ended");

    Ok(match outcome {
        Outcome::Quit | Outcome::Finished => ExitCode::SUCCESS,
        Outcome::PlaybackFailed => ExitCode::FAILURE,
    })
}
