//! In-place rewriting of score fields in local data files.
//!
//! Files are handled as plain JSON so fields this tool does not know about
//! survive the rewrite.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use common::codec::{encode_scores, try_decode_scores};
use common::model::ScoreSet;
use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encode,
    Decode,
}

/// Rewrite every `*.json` file in `data_dir` except the registry.
/// Returns the number of score fields converted.
///
/// Every file is converted in memory before any is written, so a file that
/// fails to convert leaves the whole directory untouched.
pub fn rewrite_data_dir(data_dir: &Path, registry_file: &str, direction: Direction) -> Result<usize> {
    let mut paths: Vec<_> = fs::read_dir(data_dir)
        .with_context(|| format!("Failed to read {}", data_dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension().is_some_and(|ext| ext == "json")
                && path.file_name().is_some_and(|name| name != registry_file)
        })
        .collect();
    paths.sort();

    let mut rewrites = Vec::new();
    for path in paths {
        if let Some((data, count)) = convert_file(&path, direction)? {
            rewrites.push((path, data, count));
        }
    }

    let mut total = 0;
    for (path, data, count) in &rewrites {
        write_atomic(path, data)?;
        info!(file = %path.display(), converted = count, "Rewrote data file");
        total += count;
    }
    Ok(total)
}

/// Converted contents of one file and the number of fields changed, or
/// `None` when the file holds no projects.
fn convert_file(path: &Path, direction: Direction) -> Result<Option<(Value, usize)>> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let mut data: Value =
        serde_json::from_str(&text).with_context(|| format!("Malformed JSON in {}", path.display()))?;

    let Some(projects) = data.get_mut("projects").and_then(Value::as_array_mut) else {
        warn!(file = %path.display(), "No projects found, skipping");
        return Ok(None);
    };

    let mut count = 0;
    for project in projects.iter_mut() {
        let id = project
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or("<unknown>")
            .to_string();
        let Some(scores) = project.get_mut("scores") else {
            continue;
        };
        if convert(scores, direction).with_context(|| format!("Project '{id}' in {}", path.display()))? {
            count += 1;
        }
    }
    Ok(Some((data, count)))
}

/// Pretty-print `data` to a temp file next to `path`, then rename it over `path`.
fn write_atomic(path: &Path, data: &Value) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut out = serde_json::to_string_pretty(data)?;
    out.push('\n');

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create a temp file in {}", dir.display()))?;
    tmp.write_all(out.as_bytes())?;
    tmp.persist(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Convert one score field in place. Returns whether it changed.
fn convert(scores: &mut Value, direction: Direction) -> Result<bool> {
    match (direction, &*scores) {
        (Direction::Encode, Value::Object(_)) => {
            let live: ScoreSet = serde_json::from_value(scores.clone()).context("Invalid score object")?;
            *scores = Value::String(encode_scores(&live));
            Ok(true)
        }
        (Direction::Decode, Value::String(text)) => {
            let live = try_decode_scores(text)?;
            *scores = serde_json::to_value(live)?;
            Ok(true)
        }
        _ => Ok(false),
    }
}
