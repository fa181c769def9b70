//! List installed local plans and skills.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use scribe_core::config::GlobalPaths;

pub async fn execute() -> Result<()> {
    let paths = GlobalPaths::resolve().context("could not determine the home directory")?;

    println!("{}", "Available global resources:".bold());
    println!();

    print_entries(&paths.plans, "Plans")?;
    print_entries(&paths.skills, "Skills")?;

    Ok(())
}

fn print_entries(dir: &Path, label: &str) -> Result<()> {
    println!("  {}", label.bold());

    if !dir.exists() {
        println!(
            "    {}",
            format!("No {} folder found. Run `scribe init`.", label.to_lowercase()).dimmed()
        );
        println!();
        return Ok(());
    }

    let mut names: Vec<String> = std::fs::read_dir(dir)?
        .flatten()
        .filter_map(|entry| {
            let path = entry.path();
            if path.extension().map_or(false, |e| e == "md") {
                path.file_stem().map(|s| s.to_string_lossy().into_owned())
            } else {
                None
            }
        })
        .collect();
    names.sort();

    if names.is_empty() {
        println!("    {}", "(none installed)".dimmed());
    }
    for name in names {
        println!("    - {name}");
    }
    println!();

    Ok(())
}
