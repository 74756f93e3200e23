use clap::Parser as _;
use glimmr_core::models::PriceBreakdown;
use glimmrctl::{BaseArgs, QuoteError};
use rstest::*;
use rust_decimal_macros::dec;
use std::path::PathBuf;

fn data(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

// A per-test output file, removed on drop.
struct Output(PathBuf);

impl Output {
    fn new(name: &str) -> Self {
        Self(std::env::temp_dir().join(format!("glimmrctl-{}-{name}", std::process::id())))
    }

    fn path(&self) -> &str {
        self.0.to_str().unwrap()
    }

    fn read(&self) -> String {
        std::fs::read_to_string(&self.0).unwrap()
    }
}

impl Drop for Output {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

fn run(args: &[&str]) -> anyhow::Result<()> {
    BaseArgs::try_parse_from(std::iter::once("glimmrctl").chain(args.iter().copied()))?.evaluate()
}

#[test]
fn test_quote_json() {
    let output = Output::new("quote.json");
    run(&["quote", &data("ring.json"), "-o", output.path()]).unwrap();

    let breakdown: PriceBreakdown = serde_json::from_str(&output.read()).unwrap();
    assert_eq!(breakdown.making_charges, dec!(500));
    assert_eq!(breakdown.final_price, dec!(61886));
}

#[test]
fn test_quote_itemized() {
    let output = Output::new("quote.txt");
    run(&["quote", &data("ring.json"), "--itemized", "-o", output.path()]).unwrap();

    let receipt = output.read();
    assert!(receipt.starts_with("Metal"));
    assert!(receipt.trim_end().ends_with("61,886"));
    assert_eq!(receipt.lines().count(), 5);
}

#[rstest]
#[case::priced("ring.json", "₹59,583\n")]
#[case::pending("solitaire.json", "Pricing pending\n")]
fn test_live(#[case] input: &str, #[case] expected: &str) {
    let output = Output::new(&format!("live-{input}.txt"));
    run(&["live", &data(input), "--output", output.path()]).unwrap();
    assert_eq!(output.read(), expected);
}

#[test]
fn test_quote_pending_is_an_error() {
    let output = Output::new("pending.json");
    let err = run(&["quote", &data("solitaire.json"), "-o", output.path()]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<QuoteError>(),
        Some(QuoteError::Pending(_))
    ));
}

#[test]
fn test_missing_input() {
    assert!(run(&["quote", "/definitely/not/here.json"]).is_err());
    assert!(run(&["quote"]).is_err());
}
