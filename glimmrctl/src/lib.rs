use clap::Parser;
use std::io::Write as _;

mod io;
pub use io::*;

mod commands;
pub use commands::*;

// The top-level arguments -- presently just which subcommand to execute
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct BaseArgs {
    #[command(subcommand)]
    pub command: Commands,
}

impl BaseArgs {
    pub fn evaluate(self) -> anyhow::Result<()> {
        match self.command {
            Commands::Quote { io, itemized } => {
                let request = io.load::<QuoteRequest>()?;
                let breakdown = request.quote()?;
                let mut output = io.sink()?;
                if itemized {
                    writeln!(output, "{breakdown}")?;
                } else {
                    serde_json::to_writer_pretty(&mut output, &breakdown)?;
                    writeln!(output)?;
                }
                output.flush()?;
            }
            Commands::Live { io } => {
                let request = io.load::<QuoteRequest>()?;
                let price = request.live()?;
                let mut output = io.sink()?;
                writeln!(output, "{price}")?;
                output.flush()?;
            }
        }

        Ok(())
    }
}
