//! Inspect command implementation.

use linedb_codec::SEPARATOR;
use linedb_storage::{FileBackend, LineBackend};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Record file inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// File path.
    pub path: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Number of record lines.
    pub line_count: usize,
    /// Smallest token count seen on a line.
    pub min_fields: usize,
    /// Largest token count seen on a line.
    pub max_fields: usize,
    /// Whether every line carries the same number of fields.
    pub uniform: bool,
}

/// Runs the inspect command.
pub fn run(path: &Path, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("No record file found at {}", path.display()).into());
    }

    let backend = FileBackend::open(path)?;
    let lines = backend.read_all()?;
    let size_bytes = std::fs::metadata(path)?.len();
    debug!(lines = lines.len(), size_bytes, "read record file");

    let mut min_fields = usize::MAX;
    let mut max_fields = 0;
    for line in &lines {
        let count = line.split(SEPARATOR).count();
        min_fields = min_fields.min(count);
        max_fields = max_fields.max(count);
    }
    if lines.is_empty() {
        min_fields = 0;
    }

    let result = InspectResult {
        path: path.display().to_string(),
        size_bytes,
        line_count: lines.len(),
        min_fields,
        max_fields,
        uniform: min_fields == max_fields,
    };

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        _ => {
            println!("Record file:  {}", result.path);
            println!("Size:         {} bytes", result.size_bytes);
            println!("Lines:        {}", result.line_count);
            if result.line_count > 0 {
                println!("Fields/line:  {}..{}", result.min_fields, result.max_fields);
                println!(
                    "Uniform:      {}",
                    if result.uniform { "yes" } else { "NO (drift?)" }
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn inspect_counts_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("user.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "30<-->1<-->alice").unwrap();
        writeln!(file, "25<-->2<-->bob").unwrap();
        drop(file);

        assert!(run(&path, "text").is_ok());
        assert!(run(&path, "json").is_ok());
    }

    #[test]
    fn inspect_missing_file_fails() {
        let dir = tempdir().unwrap();
        assert!(run(&dir.path().join("absent.txt"), "text").is_err());
    }
}
