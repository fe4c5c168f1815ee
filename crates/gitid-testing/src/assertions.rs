//! Assertions over `gitid --format json` output.

use anyhow::{Context, Result};
use serde_json::Value;

/// Assert the `audit` report counted `expected` mismatched commits.
pub fn assert_mismatch_count(json: &Value, expected: u64) -> Result<()> {
    let count = json["mismatch_count"]
        .as_u64()
        .context("Expected 'mismatch_count' in JSON")?;

    if count != expected {
        anyhow::bail!("Expected {} mismatches, got {}", expected, count);
    }

    Ok(())
}

/// Assert every reported commit was authored with `email` (case-insensitive).
pub fn assert_results_authored_by(json: &Value, email: &str) -> Result<()> {
    let results = json["results"]
        .as_array()
        .context("Expected 'results' array in JSON")?;

    for (i, result) in results.iter().enumerate() {
        let author = result["commit"]["author_email"]
            .as_str()
            .with_context(|| format!("Result {} missing commit.author_email", i))?;

        if !author.eq_ignore_ascii_case(email) {
            anyhow::bail!("Result {} authored by {} but expected {}", i, author, email);
        }
    }

    Ok(())
}

/// Assert the resolved identity name.
pub fn assert_expected_identity(json: &Value, name: &str) -> Result<()> {
    let actual = json["expected_identity"]
        .as_str()
        .context("Expected 'expected_identity' string in JSON")?;

    if actual != name {
        anyhow::bail!("Expected identity {} but resolved {}", name, actual);
    }

    Ok(())
}
