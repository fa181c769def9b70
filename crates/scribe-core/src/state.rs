//! Per-project persisted state: a flat JSON object at `docs/.scribe`.
//!
//! Saves are read-merge-write. A partial save only overwrites the keys it
//! supplies; everything else previously stored survives.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::config;
use crate::error::ScribeResult;

/// Flat key-value state, JSON-compatible values.
pub type State = Map<String, Value>;

fn state_path(project_dir: &Path) -> PathBuf {
    project_dir.join(config::DOCS_ROOT).join(config::STATE_FILE)
}

/// Load saved state, or an empty object when the file is missing or
/// unreadable. A corrupt file is treated the same as a missing one.
pub fn load_state(project_dir: &Path) -> State {
    match std::fs::read_to_string(state_path(project_dir)) {
        Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
        Err(_) => State::new(),
    }
}

/// Merge `updates` into the saved state and write it back.
///
/// Keys absent from `updates` keep their previous values. A `lastUpdated`
/// timestamp is stamped on every save.
pub fn save_state(project_dir: &Path, updates: State) -> ScribeResult<()> {
    let mut merged = load_state(project_dir);
    for (key, value) in updates {
        merged.insert(key, value);
    }
    merged.insert(
        "lastUpdated".to_string(),
        Value::String(chrono::Utc::now().to_rfc3339()),
    );

    std::fs::create_dir_all(project_dir.join(config::DOCS_ROOT))?;
    std::fs::write(
        state_path(project_dir),
        serde_json::to_string_pretty(&merged)?,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entries(pairs: &[(&str, Value)]) -> State {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_state(dir.path()).is_empty());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("docs")).unwrap();
        std::fs::write(dir.path().join("docs/.scribe"), "{not json").unwrap();
        assert!(load_state(dir.path()).is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        save_state(dir.path(), entries(&[("model", json!("llama3.1"))])).unwrap();

        let state = load_state(dir.path());
        assert_eq!(state.get("model"), Some(&json!("llama3.1")));
        assert!(state.contains_key("lastUpdated"));
    }

    #[test]
    fn test_partial_save_preserves_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        save_state(
            dir.path(),
            entries(&[("model", json!("llama3.1")), ("ctx", json!(8192))]),
        )
        .unwrap();
        save_state(dir.path(), entries(&[("lastRun", json!("2026-08-07T00:00:00Z"))])).unwrap();

        let state = load_state(dir.path());
        assert_eq!(state.get("model"), Some(&json!("llama3.1")));
        assert_eq!(state.get("ctx"), Some(&json!(8192)));
        assert_eq!(state.get("lastRun"), Some(&json!("2026-08-07T00:00:00Z")));
    }

    #[test]
    fn test_later_save_wins_on_overlap() {
        let dir = tempfile::tempdir().unwrap();
        save_state(dir.path(), entries(&[("ctx", json!(4096))])).unwrap();
        save_state(dir.path(), entries(&[("ctx", json!(65536))])).unwrap();

        assert_eq!(load_state(dir.path()).get("ctx"), Some(&json!(65536)));
    }
}
