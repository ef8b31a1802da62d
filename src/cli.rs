use std::path::PathBuf;

use clap::Parser;

/// Play a music file, or every music file in a directory, with a live
/// progress bar and single-key controls.
#[derive(Parser, Debug)]
#[command(name = "spotspot", version)]
pub struct Args {
    /// Music file or directory containing music files
    #[arg(required_unless_present = "print_config")]
    pub path: Option<PathBuf>,

    /// Read settings from this file instead of the default location
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write diagnostics to FILE instead of stderr
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}
