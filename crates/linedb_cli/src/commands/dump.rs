//! Dump command implementation.

use linedb_storage::{FileBackend, LineBackend};
use std::path::Path;

/// Runs the dump command: prints raw record lines with line numbers.
pub fn run(path: &Path, limit: Option<usize>) -> Result<(), Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("No record file found at {}", path.display()).into());
    }

    let backend = FileBackend::open(path)?;
    let lines = backend.read_all()?;
    let total = lines.len();
    let shown = limit.unwrap_or(total).min(total);

    for (index, line) in lines.iter().take(shown).enumerate() {
        println!("{index:>6}  {line}");
    }

    if shown < total {
        println!("... {} more line(s)", total - shown);
    }

    Ok(())
}
