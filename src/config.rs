use std::path::PathBuf;

use clap::Parser;

/// Command line options.
#[derive(Parser, Debug, Default, PartialEq, Eq)]
#[command(name = "flagwave")]
#[command(version, about = "Waving flag on a GBA-style tiled background", long_about = None)]
pub struct Config {
    /// Flag shown at startup, the first of the catalog when missing
    #[arg(long, value_name = "NAME")]
    pub flag: Option<String>,

    /// Start with the animation paused
    #[arg(long)]
    pub paused: bool,

    /// Write logs here instead of stdout
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
