use super::Channel;
use clap::Subcommand;

mod quote;
pub use quote::{QuoteError, QuoteRequest};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Price a composition and report the breakdown as JSON
    Quote {
        #[command(flatten)]
        io: Channel,

        /// Write an itemized receipt instead of JSON
        #[arg(long)]
        itemized: bool,
    },

    /// Report the live estimate (metal plus diamond) shown on listing cards
    Live {
        #[command(flatten)]
        io: Channel,
    },
}
