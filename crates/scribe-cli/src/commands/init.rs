//! Global resource initialization: seeds ~/.scribe with starter templates.

use anyhow::{Context, Result};
use colored::Colorize;

use scribe_core::config::GlobalPaths;

const DEFAULT_SKILL: &str = "\
# Skill: Technical Writer
**Persona:** You are a principal software architect writing documentation.
**Tone:** Professional, concise, direct, and technical. No fluff.
**Format:**
- Use clear headings and tables for property definitions.
- Explain installation, configuration, and the project structure.
- Write for a senior developer audience.
- Always include a \"Caveats\" or \"Edge Cases\" section in technical docs.
";

const DEFAULT_PLAN: &str = "\
# Plan: Comprehensive Architecture Breakdown
**Goal:** Create a full documentation suite suitable for enterprise handover.

**Required Files:**
1. `docs/README.md`: High-level overview, quick start.
2. `docs/architecture/system-design.md`: folder structure and data flow.
3. `docs/api/reference.md` (if an API exists): endpoints, methods, payloads.
4. `docs/guides/contribution.md`: setup, linting, and testing rules.

**Style:** Markdown with rigorous detail.
";

pub async fn execute() -> Result<()> {
    let paths = GlobalPaths::resolve().context("could not determine the home directory")?;

    if paths.root.exists() {
        println!(
            "{} Configuration folder already exists at {}",
            "⚠".yellow().bold(),
            paths.root.display()
        );
        return Ok(());
    }

    std::fs::create_dir_all(&paths.plans)?;
    std::fs::create_dir_all(&paths.skills)?;

    std::fs::write(paths.skills.join("technical-writer.md"), DEFAULT_SKILL)?;
    std::fs::write(paths.plans.join("full-suite.md"), DEFAULT_PLAN)?;

    println!(
        "{} Initialized at {}",
        "✓".green().bold(),
        paths.root.display().to_string().bold()
    );
    println!("  {} Created skill: technical-writer", "✓".green());
    println!("  {} Created plan: full-suite", "✓".green());
    println!();
    println!("{}", "Next steps:".bold());
    println!("  scribe generate -s technical-writer -p full-suite");

    Ok(())
}
