//! Master prompt assembly and instruction resolution.
//!
//! Instructions stack in a fixed order: persona skill, then global plan,
//! then per-project `scribe.md` overrides. Each source is optional.

use std::path::Path;

use crate::config::{self, GlobalPaths};

/// The resolved instruction stack plus what was (not) found, so the CLI
/// can report each source.
#[derive(Debug, Default)]
pub struct InstructionSet {
    pub text: String,
    pub loaded: Vec<String>,
    pub missing: Vec<String>,
}

impl InstructionSet {
    fn push_section(&mut self, label: &str, content: &str) {
        self.text
            .push_str(&format!("\n\n--- {label} ---\n{}", content.trim()));
    }
}

/// Load the skill/plan/local instruction stack for a run.
///
/// Missing named sources are recorded, not fatal; an absent local
/// `scribe.md` is silently skipped.
pub fn resolve_instructions(
    project_dir: &Path,
    skill: Option<&str>,
    plan: Option<&str>,
) -> InstructionSet {
    let mut set = InstructionSet::default();
    let globals = GlobalPaths::resolve();

    if let Some(name) = skill {
        match read_resource(globals.as_ref().map(|g| g.skills.as_path()), name) {
            Some(content) => {
                set.push_section("ADOPT THIS PERSONA (SKILL)", &content);
                set.loaded.push(format!("skill: {name}"));
            }
            None => set.missing.push(format!("skill '{name}'")),
        }
    }

    if let Some(name) = plan {
        match read_resource(globals.as_ref().map(|g| g.plans.as_path()), name) {
            Some(content) => {
                set.push_section("EXECUTE THIS PLAN", &content);
                set.loaded.push(format!("plan: {name}"));
            }
            None => set.missing.push(format!("plan '{name}'")),
        }
    }

    let local = project_dir.join(config::CONTEXT_FILE);
    if let Ok(content) = std::fs::read_to_string(&local) {
        set.push_section("PROJECT SPECIFIC INSTRUCTIONS", &content);
        set.loaded.push(format!("local: {}", config::CONTEXT_FILE));
    }

    set
}

fn read_resource(dir: Option<&Path>, name: &str) -> Option<String> {
    std::fs::read_to_string(dir?.join(format!("{name}.md"))).ok()
}

/// Assemble the master prompt sent to the provider.
///
/// The strict output rules are the contract `writer::parse_sections`
/// accepts; keep the two in sync.
pub fn build_prompt(project_name: &str, instructions: &str, context: &str) -> String {
    format!(
        "You are Scribe, an automated documentation writer acting as a senior software architect.\n\
Your task: create comprehensive documentation for the project below, following the plan and persona instructions when present.\n\
{instructions}\n\n\
**STRICT OUTPUT RULES:**\n\
- Output one or more complete files.\n\
- Use this exact delimiter format for every file:\n\
<<<FILENAME: path/to/file.md>>>\n\
...markdown content...\n\
<<<END>>>\n\n\
**PROJECT:** {project_name}\n\n\
**CODEBASE CONTEXT:**\n\
{context}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_carries_delimiter_contract() {
        let prompt = build_prompt("demo", "Write API docs.", "=== FILE: a.rs ===");
        assert!(prompt.contains("<<<FILENAME: path/to/file.md>>>"));
        assert!(prompt.contains("<<<END>>>"));
        assert!(prompt.contains("**PROJECT:** demo"));
        assert!(prompt.contains("Write API docs."));
        assert!(prompt.contains("=== FILE: a.rs ==="));
    }

    #[test]
    fn test_local_instructions_loaded() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("scribe.md"), "Focus on the CLI.").unwrap();

        let set = resolve_instructions(dir.path(), None, None);
        assert!(set.text.contains("PROJECT SPECIFIC INSTRUCTIONS"));
        assert!(set.text.contains("Focus on the CLI."));
        assert_eq!(set.loaded, vec!["local: scribe.md"]);
        assert!(set.missing.is_empty());
    }

    #[test]
    fn test_no_sources_yields_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let set = resolve_instructions(dir.path(), None, None);
        assert!(set.text.is_empty());
        assert!(set.loaded.is_empty());
    }

    #[test]
    fn test_missing_skill_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let set = resolve_instructions(dir.path(), Some("no-such-skill-xyzzy"), None);
        assert_eq!(set.missing, vec!["skill 'no-such-skill-xyzzy'"]);
    }
}
