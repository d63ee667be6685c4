//! CLI parsing and command tests.


use super::{Cli, CliCommand};
use clap::Parser;

pub(super) fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).expect("parse")
}

#[test]
fn rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["s3mirror", "sync", "bucket"]).is_err());
}

#[test]
fn parse_buckets() {
    let cli = parse(&["s3mirror", "buckets"]);
    assert!(matches!(cli.command, CliCommand::Buckets));
}
