use std::process::ExitCode;

mod audio;
mod cli;
mod config;
mod error;
mod input;
mod library;
mod logging;
mod playlist;
mod render;
mod runtime;
mod ticker;
mod transport;

#[cfg(test)]
mod testing;

fn main() -> ExitCode {
    runtime::run()
}
