use anyhow::Context as _;
use clap::Args;
use serde::de::DeserializeOwned;
use std::{
    convert::Infallible,
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::PathBuf,
};

/// Where a request comes from or an answer goes: a file, or the process's
/// standard stream when given as `-`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stream {
    Standard,
    File(PathBuf),
}

impl Stream {
    fn parse(arg: &str) -> Result<Self, Infallible> {
        Ok(match arg {
            "-" => Self::Standard,
            path => Self::File(path.into()),
        })
    }
}

/// The request file and answer destination shared by every subcommand.
#[derive(Args, Debug)]
pub struct Channel {
    /// Quote request as JSON ("-" for stdin)
    #[arg(value_parser = Stream::parse)]
    pub input: Stream,

    /// Destination for the answer ("-" for stdout)
    #[arg(short, long, default_value = "-", value_parser = Stream::parse)]
    pub output: Stream,
}

impl Channel {
    /// Decode the request. The file is named in the error when one is used.
    pub fn load<T: DeserializeOwned>(&self) -> anyhow::Result<T> {
        match &self.input {
            Stream::Standard => {
                serde_json::from_reader(io::stdin().lock()).context("decoding request from stdin")
            }
            Stream::File(path) => {
                let file = File::open(path)
                    .with_context(|| format!("opening {}", path.display()))?;
                serde_json::from_reader(BufReader::new(file))
                    .with_context(|| format!("decoding request from {}", path.display()))
            }
        }
    }

    pub fn sink(&self) -> anyhow::Result<Box<dyn Write>> {
        Ok(match &self.output {
            Stream::Standard => Box::new(io::stdout().lock()),
            Stream::File(path) => Box::new(BufWriter::new(
                File::create(path).with_context(|| format!("creating {}", path.display()))?,
            )),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_means_standard_stream() {
        assert_eq!(Stream::parse("-").unwrap(), Stream::Standard);
        assert_eq!(
            Stream::parse("ring.json").unwrap(),
            Stream::File(PathBuf::from("ring.json"))
        );
    }
}
