//! Offline analysis commands

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use spendwise_core::{load_payload, read_payload, ExpenseAnalyzer, RecordFormat};

/// Read an expense payload from a file, or JSON from stdin for "-"
pub fn read_input(path: &Path) -> Result<Value> {
    if path == Path::new("-") {
        return read_payload(io::stdin().lock(), RecordFormat::Json)
            .context("Failed to read expenses from stdin");
    }

    load_payload(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Render tips as a numbered list or a JSON array
pub fn render_suggestions(suggestions: &[String], json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(suggestions)?);
    }

    Ok(suggestions
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {}", i + 1, s))
        .collect::<Vec<_>>()
        .join("\n"))
}

pub fn cmd_analyze(file: &Path, json: bool) -> Result<()> {
    let payload = read_input(file)?;
    let suggestions = ExpenseAnalyzer::new().analyze_json(&payload);

    if !json {
        println!("💡 Budgeting tips (last 30 days)");
        println!();
    }
    println!("{}", render_suggestions(&suggestions, json)?);

    Ok(())
}

pub fn cmd_summary(file: &Path) -> Result<()> {
    let payload = read_input(file)?;
    let summary = ExpenseAnalyzer::new()
        .summarize_json(&payload)
        .context("Failed to summarize expenses")?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
