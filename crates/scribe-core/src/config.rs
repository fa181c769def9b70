//! Static configuration: defaults, project paths, and the scan ignore list.

use std::path::PathBuf;

/// Model used when neither the CLI flag nor saved state names one.
pub const DEFAULT_MODEL: &str = "llama3.1";

/// Directory all generated documentation is written under.
pub const DOCS_ROOT: &str = "docs";

/// Per-project state file, kept inside the documentation root.
pub const STATE_FILE: &str = ".scribe";

/// Optional per-project instructions file at the project root.
pub const CONTEXT_FILE: &str = "scribe.md";

/// Sampling temperature for documentation runs.
pub const TEMPERATURE: f32 = 0.2;

/// Glob patterns excluded from the scan. Dependency trees, build output,
/// VCS metadata, credentials, lockfiles, media, and the documentation tree
/// itself never reach the model.
pub const IGNORE_PATTERNS: &[&str] = &[
    // Dependency and build trees
    "**/node_modules/**", "**/target/**", "**/dist/**", "**/build/**",
    "**/coverage/**", "**/__pycache__/**", "**/.next/**",
    // VCS and editor metadata
    "**/.git/**", "**/.svn/**", "**/.vscode/**", "**/.idea/**", "**/.cache/**",
    // Credentials and shell history
    "**/.ssh/**", "**/.env", "**/.env.*", "**/.netrc",
    "**/.bash_history", "**/.zsh_history", "**/.bashrc", "**/.zshrc",
    // Lockfiles and logs
    "**/*.lock", "**/*.log",
    // Binary and media extensions
    "**/*.png", "**/*.jpg", "**/*.jpeg", "**/*.gif", "**/*.ico", "**/*.svg",
    "**/*.mp4", "**/*.zip", "**/*.tar", "**/*.gz", "**/*.pdf",
    "**/*.woff", "**/*.woff2",
    // The documentation tree and scribe's own files
    "**/docs/**", "**/.scribe", "scribe.md",
];

/// Global resource directories under `~/.scribe`.
#[derive(Debug, Clone)]
pub struct GlobalPaths {
    pub root: PathBuf,
    pub plans: PathBuf,
    pub skills: PathBuf,
}

impl GlobalPaths {
    /// Resolve against the user's home directory.
    pub fn resolve() -> Option<Self> {
        let root = dirs::home_dir()?.join(".scribe");
        Some(Self {
            plans: root.join("plans"),
            skills: root.join("skills"),
            root,
        })
    }
}
