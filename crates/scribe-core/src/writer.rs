//! Parse the model's delimited reply and write documentation files.
//!
//! The model is instructed to emit `<<<FILENAME: path>>> ... <<<END>>>`
//! sections; everything between the markers becomes file content. Zero
//! sections is a valid outcome that the caller reports as "no files
//! parsed".

use std::path::{Component, Path, PathBuf};

use regex::Regex;

use crate::config;
use crate::error::ScribeResult;

/// One file section extracted from the model output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFile {
    pub relative_path: PathBuf,
    pub content: String,
}

/// Split raw model output into file sections, in source order.
pub fn parse_sections(output: &str) -> Vec<ParsedFile> {
    let re = Regex::new(r"(?s)<<<FILENAME:\s*([^>\n]+?)\s*>>>(.*?)<<<END>>>")
        .expect("delimiter regex is valid");

    re.captures_iter(output)
        .filter(|cap| !cap[1].trim().is_empty())
        .map(|cap| ParsedFile {
            relative_path: normalize_path(cap[1].trim()),
            content: cap[2].trim().to_string(),
        })
        .collect()
}

/// Constrain a parsed path to the documentation root.
///
/// Traversal, root, and current-dir components are dropped before the
/// prefix check, so model output can never address files outside the
/// docs tree. Paths already rooted there are left unchanged.
pub fn normalize_path(raw: &str) -> PathBuf {
    let clean: PathBuf = Path::new(raw.trim())
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect();

    if clean.starts_with(config::DOCS_ROOT) {
        clean
    } else {
        Path::new(config::DOCS_ROOT).join(clean)
    }
}

/// Write each parsed file under the project root, creating parent
/// directories as needed. Existing files are overwritten.
pub fn write_files(project_dir: &Path, files: &[ParsedFile]) -> ScribeResult<Vec<String>> {
    let mut written = Vec::with_capacity(files.len());

    for file in files {
        let target = project_dir.join(&file.relative_path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&target, &file.content)?;
        written.push(file.relative_path.to_string_lossy().into_owned());
    }

    Ok(written)
}

/// Parse the model output and write every section to disk, returning the
/// relative paths written in source order.
pub fn parse_and_write(output: &str, project_dir: &Path) -> ScribeResult<Vec<String>> {
    let files = parse_sections(output);
    write_files(project_dir, &files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_sections_is_empty() {
        assert!(parse_sections("").is_empty());
        assert!(parse_sections("just prose, no markers").is_empty());
    }

    #[test]
    fn test_single_section() {
        let output = "<<<FILENAME: guide.md>>>\nHi\n<<<END>>>";
        let files = parse_sections(output);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative_path, PathBuf::from("docs/guide.md"));
        assert_eq!(files[0].content, "Hi");
    }

    #[test]
    fn test_multiple_sections_in_order() {
        let output = "\
intro text
<<<FILENAME: docs/README.md>>>
# Readme
<<<END>>>
interstitial chatter
<<<FILENAME: api/reference.md>>>
endpoints
<<<END>>>";
        let files = parse_sections(output);
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].relative_path, PathBuf::from("docs/README.md"));
        assert_eq!(files[0].content, "# Readme");
        assert_eq!(files[1].relative_path, PathBuf::from("docs/api/reference.md"));
        assert_eq!(files[1].content, "endpoints");
    }

    #[test]
    fn test_content_is_trimmed() {
        let output = "<<<FILENAME: a.md>>>\n\n  body  \n\n<<<END>>>";
        let files = parse_sections(output);
        assert_eq!(files[0].content, "body");
    }

    #[test]
    fn test_path_outside_root_is_nested() {
        assert_eq!(normalize_path("guide.md"), PathBuf::from("docs/guide.md"));
        assert_eq!(
            normalize_path("api/reference.md"),
            PathBuf::from("docs/api/reference.md")
        );
    }

    #[test]
    fn test_path_under_root_unchanged() {
        assert_eq!(normalize_path("docs/guide.md"), PathBuf::from("docs/guide.md"));
        assert_eq!(
            normalize_path("docs/api/reference.md"),
            PathBuf::from("docs/api/reference.md")
        );
    }

    #[test]
    fn test_traversal_segments_dropped() {
        assert_eq!(
            normalize_path("../../etc/passwd"),
            PathBuf::from("docs/etc/passwd")
        );
        assert_eq!(normalize_path("docs/../../x.md"), PathBuf::from("docs/x.md"));
        assert_eq!(normalize_path("/etc/passwd"), PathBuf::from("docs/etc/passwd"));
        assert_eq!(normalize_path("./guide.md"), PathBuf::from("docs/guide.md"));
    }

    #[test]
    fn test_parse_and_write_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let output = "<<<FILENAME: guide.md>>>\nHi\n<<<END>>>\n<<<FILENAME: docs/api.md>>>\nAPI\n<<<END>>>";

        let written = parse_and_write(output, dir.path()).unwrap();
        assert_eq!(written, vec!["docs/guide.md", "docs/api.md"]);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("docs/guide.md")).unwrap(),
            "Hi"
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("docs/api.md")).unwrap(),
            "API"
        );
    }

    #[test]
    fn test_existing_file_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("docs")).unwrap();
        std::fs::write(dir.path().join("docs/guide.md"), "old").unwrap();

        parse_and_write("<<<FILENAME: guide.md>>>\nnew\n<<<END>>>", dir.path()).unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join("docs/guide.md")).unwrap(),
            "new"
        );
    }
}
