//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;
use std::path::Path;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::{self, render_suggestions};

fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_serve_defaults() {
    let cli = Cli::try_parse_from(["spendwise", "serve"]).unwrap();
    match cli.command {
        Commands::Serve { port, host } => {
            assert_eq!(port, None);
            assert_eq!(host, None);
        }
        _ => panic!("expected serve command"),
    }
    assert!(!cli.verbose);
}

#[test]
fn test_parse_serve_with_flags() {
    let cli =
        Cli::try_parse_from(["spendwise", "-v", "serve", "--port", "8080", "--host", "127.0.0.1"])
            .unwrap();
    match cli.command {
        Commands::Serve { port, host } => {
            assert_eq!(port, Some(8080));
            assert_eq!(host.as_deref(), Some("127.0.0.1"));
        }
        _ => panic!("expected serve command"),
    }
    assert!(cli.verbose);
}

#[test]
fn test_parse_analyze_requires_file() {
    assert!(Cli::try_parse_from(["spendwise", "analyze"]).is_err());

    let cli = Cli::try_parse_from(["spendwise", "analyze", "-f", "expenses.csv", "--json"]).unwrap();
    match cli.command {
        Commands::Analyze { file, json } => {
            assert_eq!(file, Path::new("expenses.csv"));
            assert!(json);
        }
        _ => panic!("expected analyze command"),
    }
}

// ========== Rendering Tests ==========

#[test]
fn test_render_suggestions_numbered() {
    let tips = vec!["First tip".to_string(), "Second tip".to_string()];
    assert_eq!(
        render_suggestions(&tips, false).unwrap(),
        "1. First tip\n2. Second tip"
    );
}

#[test]
fn test_render_suggestions_json() {
    let tips = vec!["Only tip".to_string()];
    let rendered = render_suggestions(&tips, true).unwrap();
    let parsed: Vec<String> = serde_json::from_str(&rendered).unwrap();
    assert_eq!(parsed, tips);
}

// ========== Command Tests ==========

#[test]
fn test_read_input_csv() {
    let file = write_temp(
        ".csv",
        "date,category,amount,note\n2024-06-13,Food,12.5,lunch\n2024-06-12,Rent,900,\n",
    );

    let payload = commands::read_input(file.path()).unwrap();
    let rows = payload.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1]["category"], "Rent");
}

#[test]
fn test_read_input_missing_file() {
    let err = commands::read_input(Path::new("/nonexistent/expenses.json")).unwrap_err();
    assert!(err.to_string().contains("Failed to read"));
}

#[test]
fn test_cmd_analyze_json_file() {
    let file = write_temp(
        ".json",
        r#"[{"date": "2024-06-13", "category": "Food", "amount": 12.5}]"#,
    );

    assert!(commands::cmd_analyze(file.path(), false).is_ok());
    assert!(commands::cmd_analyze(file.path(), true).is_ok());
}

#[test]
fn test_cmd_analyze_malformed_json() {
    let file = write_temp(".json", "[{\"amount\": ");
    assert!(commands::cmd_analyze(file.path(), false).is_err());
}

#[test]
fn test_cmd_summary() {
    let file = write_temp(".json", r#"[{"date": "2024-06-13", "category": "Food", "amount": 5}]"#);
    assert!(commands::cmd_summary(file.path()).is_ok());

    let bad = write_temp(".json", r#"{"amount": 5}"#);
    let err = commands::cmd_summary(bad.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to summarize"));
}
