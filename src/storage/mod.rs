//! Persistence layer.
//!
//! Reads pending bets and result declarations exported by the backend,
//! and writes settlement reports, all as JSON files.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

use crate::engine::ResultDeclaration;
use crate::types::{PendingBet, SettlementReport};

/// Default report file path.
const DEFAULT_REPORT_FILE: &str = "settlement_report.json";

/// Load the pending bets to settle.
pub fn load_bets(path: &str) -> Result<Vec<PendingBet>> {
    let json = std::fs::read_to_string(path)
        .context(format!("Failed to read bets from {path}"))?;

    let bets: Vec<PendingBet> = serde_json::from_str(&json)
        .context(format!("Failed to parse bets from {path}"))?;

    info!(path, count = bets.len(), "Pending bets loaded");
    Ok(bets)
}

/// Load a result declaration (not yet validated).
pub fn load_declaration(path: &str) -> Result<ResultDeclaration> {
    let json = std::fs::read_to_string(path)
        .context(format!("Failed to read result from {path}"))?;

    serde_json::from_str(&json).context(format!("Failed to parse result from {path}"))
}

/// Save a settlement report to a JSON file.
/// Returns the path written.
pub fn save_report(report: &SettlementReport, path: Option<&str>) -> Result<String> {
    let path = path.unwrap_or(DEFAULT_REPORT_FILE);
    let json = serde_json::to_string_pretty(report)
        .context("Failed to serialise settlement report")?;

    std::fs::write(path, &json)
        .context(format!("Failed to write report to {path}"))?;

    debug!(path, settlement_id = %report.settlement_id, "Report saved");
    Ok(path.to_string())
}

/// Load a previously saved settlement report.
/// Returns None if the file doesn't exist.
pub fn load_report(path: &str) -> Result<Option<SettlementReport>> {
    if !Path::new(path).exists() {
        return Ok(None);
    }

    let json = std::fs::read_to_string(path)
        .context(format!("Failed to read report from {path}"))?;

    let report: SettlementReport = serde_json::from_str(&json)
        .context(format!("Failed to parse report from {path}"))?;

    Ok(Some(report))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
