use clap::Parser as _;
use glimmrctl::BaseArgs;

pub fn main() -> anyhow::Result<()> {
    let args = BaseArgs::parse();
    args.evaluate()
}
