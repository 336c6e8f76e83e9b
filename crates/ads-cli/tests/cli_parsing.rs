use std::path::PathBuf;

use ads_cli::{Cli, OutputFormat};
use clap::Parser;

// Integration tests for flag parsing and defaults.

#[test]
fn test_defaults() {
    let cli = Cli::try_parse_from(["ads-assets"]).unwrap();
    assert!(cli.accounts.is_empty());
    assert_eq!(cli.provider, "GDT");
    assert_eq!(cli.format, OutputFormat::Log);
    assert!(!cli.only_adcreatives);
    assert!(!cli.debug);
    assert!(cli.output.is_none());
    assert!(cli.access_token.is_none());
}

#[test]
fn test_repeated_accounts_keep_order() {
    let cli = Cli::try_parse_from([
        "ads-assets",
        "--account",
        "1001",
        "--account",
        "2002",
    ])
    .unwrap();
    assert_eq!(cli.accounts, vec!["1001", "2002"]);
}

#[test]
fn test_harvest_flags() {
    let cli = Cli::try_parse_from([
        "ads-assets",
        "--account",
        "1001",
        "--access-token",
        "secret",
        "--only-adcreatives",
        "--debug",
        "-v",
        "--output",
        "assets.csv",
        "--format",
        "json",
    ])
    .unwrap();
    assert_eq!(cli.access_token.as_deref(), Some("secret"));
    assert!(cli.only_adcreatives);
    assert!(cli.debug);
    assert!(cli.verbose);
    assert_eq!(cli.output, Some(PathBuf::from("assets.csv")));
    assert_eq!(cli.format, OutputFormat::Json);
}

#[test]
fn test_unknown_format_is_rejected() {
    let result = Cli::try_parse_from(["ads-assets", "--format", "xml"]);
    assert!(result.is_err(), "Unknown output formats should be rejected");
}

#[test]
fn test_debug_flag_enables_debug_logging() {
    let quiet = Cli::try_parse_from(["ads-assets"]).unwrap();
    assert!(!quiet.debug_logging());

    let debug = Cli::try_parse_from(["ads-assets", "--debug"]).unwrap();
    assert!(debug.debug_logging(), "--debug alone should lower the log level");

    let verbose = Cli::try_parse_from(["ads-assets", "-v"]).unwrap();
    assert!(verbose.debug_logging());
}
