//! Documentation generation pipeline.
//!
//! Strictly sequential: load state, probe capabilities, save state,
//! resolve instructions, scan, confirm, generate, parse and write.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use dialoguer::{Confirm, Input};
use indicatif::ProgressBar;
use serde_json::{json, Map, Value};
use tracing::warn;

use scribe_core::{config, prompt, scanner, state, writer};
use scribe_provider::{resolve_provider, GenerationRequest};

use crate::output;

#[derive(Args)]
pub struct GenerateArgs {
    /// Model to use (e.g. llama3.1, gemini-1.5-flash)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Override the context window (default: auto-detect)
    #[arg(short, long)]
    pub ctx: Option<u32>,

    /// Use a global plan (e.g. full-suite)
    #[arg(short, long)]
    pub plan: Option<String>,

    /// Use a persona skill (e.g. technical-writer)
    #[arg(short, long)]
    pub skill: Option<String>,

    /// Scan and generate without writing files
    #[arg(short, long)]
    pub dry_run: bool,

    /// Skip confirmation and input prompts
    #[arg(short, long)]
    pub yes: bool,
}

fn spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

pub async fn execute(args: GenerateArgs, project_dir: &Path) -> Result<()> {
    output::print_banner();

    let saved = state::load_state(project_dir);

    // Priority: CLI flag > saved state > default
    let model = args
        .model
        .clone()
        .or_else(|| saved.get("model").and_then(Value::as_str).map(String::from))
        .unwrap_or_else(|| config::DEFAULT_MODEL.to_string());

    println!("  Using model: {}", model.cyan());

    let provider = resolve_provider(&model);

    let probe = spinner(format!("Connecting to {model}..."));
    let caps = provider.capabilities(&model).await;
    probe.finish_and_clear();

    if !caps.model_exists && args.model.is_none() {
        println!(
            "{} Model '{}' not found. Make sure to pull it first.",
            "⚠".yellow().bold(),
            model
        );
    }

    // Context limit: flag > saved state > probed maximum
    let context_limit = args
        .ctx
        .or_else(|| saved.get("ctx").and_then(Value::as_u64).map(|n| n as u32))
        .unwrap_or(caps.max_context_tokens);

    println!(
        "{} Model ready. Max context: {} tokens.",
        "✓".green().bold(),
        context_limit.to_string().bold()
    );

    // Persist the resolved choice now, so a failed generation still
    // remembers it next run.
    let mut updates = Map::new();
    updates.insert("model".into(), json!(model));
    updates.insert("ctx".into(), json!(context_limit));
    updates.insert("lastRun".into(), json!(chrono::Utc::now().to_rfc3339()));
    if let Err(err) = state::save_state(project_dir, updates) {
        warn!(%err, "could not save project state");
    }

    let instructions =
        prompt::resolve_instructions(project_dir, args.skill.as_deref(), args.plan.as_deref());

    for name in &instructions.loaded {
        println!("  {} Loaded {}", "+".green(), name);
    }
    for name in &instructions.missing {
        println!("  {} {} not found in ~/.scribe", "x".red(), name);
    }

    let mut project_name = project_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string());

    let instruction_text = if instructions.text.is_empty() {
        if args.yes {
            "Generate standard documentation.".to_string()
        } else {
            project_name = Input::new()
                .with_prompt("Project name")
                .default(project_name)
                .interact_text()?;
            let brief: String = Input::new()
                .with_prompt("Brief description / instructions")
                .allow_empty(true)
                .interact_text()?;
            if brief.is_empty() {
                "Generate standard documentation.".to_string()
            } else {
                brief
            }
        }
    } else {
        instructions.text
    };

    let scan_spinner = spinner("Indexing codebase...".to_string());
    let scan = scanner::scan_project(project_dir)?;
    scan_spinner.finish_and_clear();
    println!("{} Indexed {} files.", "✓".green().bold(), scan.file_count);

    output::print_usage_bar(scan.token_estimate, context_limit as usize);

    if scan.token_estimate > context_limit as usize {
        println!(
            "  {} Input exceeds the model limit ({}). Truncation will occur.",
            "⚠".yellow().bold(),
            context_limit
        );
    }

    if !args.yes {
        let message = if args.dry_run {
            "Run dry-run analysis?"
        } else {
            "Generate documentation now?"
        };
        if !Confirm::new().with_prompt(message).default(true).interact()? {
            return Ok(());
        }
    }

    let master_prompt = prompt::build_prompt(&project_name, &instruction_text, &scan.context);

    let request = GenerationRequest {
        model: model.clone(),
        prompt: master_prompt,
        context_window: context_limit,
        temperature: config::TEMPERATURE,
    };

    let gen_spinner = spinner(format!("Thinking ({model})..."));
    let response = provider.generate(&request).await;
    gen_spinner.finish_and_clear();

    let response = response?;
    println!("{} Done.", "✓".green().bold());

    if args.dry_run {
        println!();
        println!("{}", "-- DRY RUN OUTPUT --".yellow());
        let preview: String = response.chars().take(500).collect();
        println!("{preview}");
        return Ok(());
    }

    let created = writer::parse_and_write(&response, project_dir)?;

    if created.is_empty() {
        println!("{} No files parsed from the model output.", "⚠".yellow().bold());
    } else {
        println!();
        println!("{} Created {} file(s).", "✓".green().bold(), created.len());
        for file in &created {
            println!("  {}", format!("- {file}").dimmed());
        }
        println!(
            "  {}",
            format!("(Settings saved to {}/{})", config::DOCS_ROOT, config::STATE_FILE).dimmed()
        );
    }

    Ok(())
}
