//! Arguments accepted by `glimmrd`.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the pricing daemon.
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// TOML file layered over the built-in defaults
    #[arg(short, long, env = "APP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write the OpenAPI document to this path and exit.
    #[arg(long)]
    pub schema: Option<PathBuf>,
}

impl Cli {
    /// Read arguments from the process, falling back to the environment.
    pub fn import() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}
