//! Project scanner: walks the working tree and assembles the model context.
//!
//! The token estimate is a character-ratio heuristic (chars / 3.5, rounded
//! up), not a tokenizer result. It feeds the usage bar and the over-limit
//! warning, nothing else.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Serialize;
use tracing::debug;
use walkdir::WalkDir;

use crate::config;
use crate::error::ScribeResult;

/// Files longer than this are truncated before inclusion.
const TRUNCATE_THRESHOLD: usize = 8000;

/// Lines kept from the top of a truncated file.
const HEAD_LINES: usize = 50;

/// Lines kept from the bottom of a truncated file.
const TAIL_LINES: usize = 20;

/// Assembled scan output. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    pub context: String,
    pub file_count: usize,
    pub token_estimate: usize,
}

/// Heuristic token estimate: one token per 3.5 characters, rounded up.
pub fn estimate_tokens(text: &str) -> usize {
    (text.len() as f64 / 3.5).ceil() as usize
}

fn ignore_set() -> ScribeResult<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in config::IGNORE_PATTERNS {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

/// Format one file as a delimited context block. Content past the size
/// threshold keeps its first 50 and last 20 lines with an omission count
/// in between.
fn format_file(path: &str, content: &str) -> String {
    if content.len() <= TRUNCATE_THRESHOLD {
        return format!("\n\n=== FILE: {path} ===\n{content}\n=== END FILE ===\n");
    }

    let lines: Vec<&str> = content.split('\n').collect();
    let head = lines[..HEAD_LINES.min(lines.len())].join("\n");
    let tail = lines[lines.len().saturating_sub(TAIL_LINES)..].join("\n");
    let omitted = lines.len().saturating_sub(HEAD_LINES + TAIL_LINES);

    format!(
        "\n\n=== FILE: {path} (Partial) ===\n{head}\n...[{omitted} lines truncated]...\n{tail}\n=== END FILE ===\n"
    )
}

/// Scan a project directory into a single context blob.
///
/// Enumeration is name-sorted per directory, so two scans of an unchanged
/// tree produce identical output. Ignored patterns never contribute;
/// binary files (null byte) and unreadable files are skipped without
/// failing the scan.
pub fn scan_project(root: &Path) -> ScribeResult<ScanResult> {
    let ignore = ignore_set()?;

    let mut candidates: Vec<(PathBuf, String)> = Vec::new();
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = match entry.path().strip_prefix(root) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => continue,
        };
        if ignore.is_match(&rel) {
            continue;
        }
        candidates.push((entry.into_path(), rel.to_string_lossy().into_owned()));
    }

    let listing: Vec<&str> = candidates.iter().map(|(_, rel)| rel.as_str()).collect();
    let mut context = format!("PROJECT FILES LIST:\n{}\n", listing.join("\n"));

    let mut file_count = 0;
    for (path, rel) in &candidates {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!(path = %rel, %err, "skipping unreadable file");
                continue;
            }
        };
        if bytes.contains(&0) {
            // Binary file that slipped past the extension filters
            continue;
        }
        let content = String::from_utf8_lossy(&bytes);
        context.push_str(&format_file(rel, &content));
        file_count += 1;
    }

    Ok(ScanResult {
        token_estimate: estimate_tokens(&context),
        file_count,
        context,
    })
}
