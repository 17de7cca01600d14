//! Verify command implementation.

use linedb_codec::SEPARATOR;
use linedb_storage::{FileBackend, LineBackend};
use std::path::Path;
use tracing::info;

/// Verification result.
#[derive(Debug)]
pub struct VerifyResult {
    /// Number of lines checked.
    pub lines_checked: usize,
    /// Number of lines with the expected field count.
    pub valid_lines: usize,
    /// Line numbers (0-based) whose field count drifted.
    pub drifted_lines: Vec<usize>,
}

impl VerifyResult {
    fn is_ok(&self) -> bool {
        self.drifted_lines.is_empty()
    }
}

/// Runs the verify command: checks every line against the expected field
/// count.
pub fn run(path: &Path, expected_fields: usize) -> Result<(), Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("No record file found at {}", path.display()).into());
    }

    println!("Verifying {} ({expected_fields} fields/line)", path.display());

    let backend = FileBackend::open(path)?;
    let result = verify_lines(&backend, expected_fields)?;
    info!(
        checked = result.lines_checked,
        drifted = result.drifted_lines.len(),
        "verification finished"
    );

    println!(
        "Checked {} line(s): {} valid, {} drifted",
        result.lines_checked,
        result.valid_lines,
        result.drifted_lines.len()
    );
    for index in &result.drifted_lines {
        println!("  line {index}: field count mismatch");
    }

    if result.is_ok() {
        println!("✓ Record file verification passed");
        Ok(())
    } else {
        println!("✗ Record file verification failed");
        Err("Verification failed".into())
    }
}

fn verify_lines(
    backend: &dyn LineBackend,
    expected_fields: usize,
) -> Result<VerifyResult, Box<dyn std::error::Error>> {
    let mut result = VerifyResult {
        lines_checked: 0,
        valid_lines: 0,
        drifted_lines: Vec::new(),
    };

    for (index, line) in backend.read_all()?.iter().enumerate() {
        result.lines_checked += 1;
        if line.split(SEPARATOR).count() == expected_fields {
            result.valid_lines += 1;
        } else {
            result.drifted_lines.push(index);
        }
    }

    Ok(result)
}
