//! CLI argument definitions for dosie.

use crate::browser::CategoryFilter;
use crate::models::{DecisionStatus, EntityKind, Severity};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("DOSIE_GIT_COMMIT"),
    "\nbuilt: ",
    env!("DOSIE_BUILD_TIMESTAMP"),
);

/// dosie - snippets, bug memories, decisions, git commands and project
/// templates, cross-linked.
///
/// Entity data lives in memory and starts from the built-in seed on every run.
/// Use `dosie shell` to keep edits for the length of a session.
#[derive(Parser, Debug)]
#[command(name = "dosie")]
#[command(author, version, long_version = LONG_VERSION, about = "A cross-linked developer knowledge base", long_about = None)]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Directory holding config.kdl
    #[arg(long = "config-dir", global = true, env = "DOSIE_CONFIG_DIR")]
    pub config_dir: Option<std::path::PathBuf>,

    /// Runs the interactive shell when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Session(SessionCommands),

    /// Interactive session over one in-memory knowledge base
    Shell,

    /// Show or change the persisted theme
    Theme(ThemeArgs),

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Commands that read or change the in-memory knowledge base.
///
/// Shared between one-shot invocations and `dosie shell`.
#[derive(Subcommand, Debug, Clone)]
pub enum SessionCommands {
    /// Code snippets
    Snippet {
        #[command(subcommand)]
        command: SnippetCommands,
    },

    /// Bug memories
    Bug {
        #[command(subcommand)]
        command: BugCommands,
    },

    /// Architecture decisions
    Decision {
        #[command(subcommand)]
        command: DecisionCommands,
    },

    /// Git and shell command references
    #[command(visible_alias = "command")]
    Git {
        #[command(subcommand)]
        command: GitCommands,
    },

    /// Project bootstrap templates
    #[command(visible_alias = "bootstrap")]
    Template {
        #[command(subcommand)]
        command: TemplateCommands,
    },

    /// Related links between items
    Link {
        #[command(subcommand)]
        command: LinkCommands,
    },

    /// List every item of every module
    Items {
        /// Only items of this type
        #[arg(long = "type", short = 't')]
        kind: Option<EntityKind>,
    },

    /// List link targets available to an item
    Browse {
        /// Owner type (snippet, bug, decision, git, template)
        kind: EntityKind,
        /// Owner ID
        id: u64,
        /// Category filter (all, snippet, bug, decision, git, template)
        #[arg(long, short = 'c', default_value = "all")]
        category: CategoryFilter,
        /// Case-insensitive title search
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Report dangling links and stale link titles
    Doctor,

    /// Show groups of items connected by links
    Clusters,
}

/// Snippet subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SnippetCommands {
    /// Add a snippet
    Add {
        /// Snippet title
        title: String,
        /// Source language
        #[arg(short, long, default_value = "javascript")]
        language: String,
        /// Snippet code
        #[arg(short, long, default_value = "")]
        code: String,
    },

    /// List snippets, sorted by title
    List {
        /// Search title and code
        #[arg(short = 'q', long)]
        search: Option<String>,
    },

    /// Show snippet details
    Show { id: u64 },

    /// Update a snippet
    Update {
        id: u64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        code: Option<String>,
    },

    /// Delete a snippet
    Rm { id: u64 },
}

/// Bug memory subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum BugCommands {
    /// Add a bug memory
    Add {
        /// One-line problem statement
        problem: String,
        /// Category as "Area / Topic"
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        symptom: Option<String>,
        #[arg(long)]
        cause: Option<String>,
        #[arg(long)]
        fix: Option<String>,
        #[arg(long)]
        how_to_avoid: Option<String>,
        #[arg(long)]
        where_it_happened: Option<String>,
        #[arg(long)]
        language: Option<String>,
        /// Severity (low, medium, high)
        #[arg(long)]
        severity: Option<Severity>,
    },

    /// List bug memories
    List {
        /// Search problem, symptom and cause
        #[arg(short = 'q', long)]
        search: Option<String>,
        /// Category substring (e.g. "React")
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        severity: Option<Severity>,
    },

    /// Show bug details
    Show { id: u64 },

    /// Update a bug memory
    Update {
        id: u64,
        #[arg(long)]
        problem: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        symptom: Option<String>,
        #[arg(long)]
        cause: Option<String>,
        #[arg(long)]
        fix: Option<String>,
        #[arg(long)]
        how_to_avoid: Option<String>,
        #[arg(long)]
        where_it_happened: Option<String>,
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        severity: Option<Severity>,
    },

    /// Delete a bug memory
    Rm { id: u64 },
}

/// Decision log subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum DecisionCommands {
    /// Record a decision
    Add {
        /// The decision
        decision: String,
        #[arg(long)]
        project: Option<String>,
        /// A reason in favour (repeatable)
        #[arg(long)]
        why: Vec<String>,
        /// A known cost (repeatable)
        #[arg(long)]
        tradeoff: Vec<String>,
        #[arg(long)]
        would_change: Option<String>,
        /// Decision date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        category: Option<String>,
        /// Status (active, resolved)
        #[arg(long)]
        status: Option<DecisionStatus>,
    },

    /// List decisions
    List {
        /// Search project, decision and reasons
        #[arg(short = 'q', long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        status: Option<DecisionStatus>,
    },

    /// Show decision details
    Show { id: u64 },

    /// Update a decision
    Update {
        id: u64,
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        decision: Option<String>,
        /// Replace the reasons (repeatable)
        #[arg(long)]
        why: Vec<String>,
        /// Replace the tradeoffs (repeatable)
        #[arg(long)]
        tradeoff: Vec<String>,
        /// Remove every reason
        #[arg(long, conflicts_with = "why")]
        clear_why: bool,
        /// Remove every tradeoff
        #[arg(long, conflicts_with = "tradeoff")]
        clear_tradeoffs: bool,
        #[arg(long)]
        would_change: Option<String>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        status: Option<DecisionStatus>,
    },

    /// Delete a decision
    Rm { id: u64 },
}

/// Command reference subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum GitCommands {
    /// Add a command reference; several lines make a workflow
    Add {
        /// Title
        title: String,
        /// Command lines, in order
        #[arg(required = true)]
        lines: Vec<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        use_case: Option<String>,
        /// Rewrites history or discards work
        #[arg(long)]
        dangerous: bool,
        #[arg(long)]
        notes: Option<String>,
    },

    /// List command references
    List {
        /// Search title, command text and description
        #[arg(short = 'q', long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Leave out dangerous commands
        #[arg(long)]
        safe: bool,
    },

    /// Show command details
    Show { id: u64 },

    /// Update a command reference
    Update {
        id: u64,
        #[arg(long)]
        title: Option<String>,
        /// Replace the command lines (repeatable)
        #[arg(long = "line")]
        lines: Vec<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        use_case: Option<String>,
        #[arg(long)]
        dangerous: Option<bool>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a command reference
    Rm { id: u64 },
}

/// Template subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum TemplateCommands {
    /// Add a template
    Add {
        /// Template name
        name: String,
        /// Stack family (e.g. React)
        #[arg(long = "type", short = 't')]
        template_type: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        auth: bool,
        #[arg(long)]
        api: bool,
        #[arg(long)]
        storage: Option<String>,
        #[arg(long)]
        styling: Option<String>,
        #[arg(long)]
        state_management: Option<String>,
    },

    /// List templates
    List {
        /// Only this stack family
        #[arg(long = "type", short = 't')]
        template_type: Option<String>,
    },

    /// Show template details
    Show { id: u64 },

    /// Update a template
    Update {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "type", short = 't')]
        template_type: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a template
    Rm { id: u64 },
}

/// Link subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum LinkCommands {
    /// Link an item to another item
    #[command(name = "add", visible_alias = "create")]
    Add {
        /// Owner type
        owner_kind: EntityKind,
        /// Owner ID
        owner_id: u64,
        /// Target type
        target_kind: EntityKind,
        /// Target ID
        target_id: u64,
    },

    /// Remove a link
    Rm {
        owner_kind: EntityKind,
        owner_id: u64,
        target_kind: EntityKind,
        target_id: u64,
    },

    /// List the links an item holds
    List { kind: EntityKind, id: u64 },

    /// List the items linking to an item
    Backlinks { kind: EntityKind, id: u64 },
}

/// Theme flags
#[derive(Args, Debug, Clone, Default)]
#[group(multiple = false)]
pub struct ThemeArgs {
    /// Flip the current theme
    #[arg(long)]
    pub toggle: bool,
    /// Switch to the dark theme
    #[arg(long)]
    pub dark: bool,
    /// Switch to the light theme
    #[arg(long)]
    pub light: bool,
}

impl ThemeArgs {
    /// The requested change: `None` shows the current theme.
    pub fn change(&self) -> Option<ThemeChange> {
        if self.toggle {
            Some(ThemeChange::Toggle)
        } else if self.dark {
            Some(ThemeChange::Set(true))
        } else if self.light {
            Some(ThemeChange::Set(false))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChange {
    Toggle,
    /// Set dark mode on or off
    Set(bool),
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },

    /// List all configuration values
    List,
}

/// One line typed into `dosie shell`.
#[derive(Parser, Debug)]
#[command(name = "dosie", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    /// Output this line in human-readable format
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    #[command(subcommand)]
    pub command: ShellCommands,
}

/// Commands accepted inside the shell
#[derive(Subcommand, Debug)]
pub enum ShellCommands {
    #[command(flatten)]
    Session(SessionCommands),

    /// Show or change the persisted theme
    Theme(ThemeArgs),

    /// Leave the shell
    #[command(visible_alias = "quit")]
    Exit,
}
