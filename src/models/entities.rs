//! Record types for the five knowledge modules.
//!
//! Each record is created with identifier `0`; the owning
//! [`EntityStore`](crate::store::EntityStore) assigns the real identifier on
//! insert. Every record has a matching `*Patch` type whose `Some` fields are
//! merged by [`Entity::apply`]. Patches cannot touch `id` or `related_links`.

use super::{Entity, EntityKind, Link};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// How badly a remembered bug hurt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" | "med" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            _ => Err(format!("Invalid severity: {}", s)),
        }
    }
}

/// Whether a decision still stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStatus {
    #[default]
    Active,
    Resolved,
}

impl DecisionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionStatus::Active => "active",
            DecisionStatus::Resolved => "resolved",
        }
    }
}

impl fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DecisionStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(DecisionStatus::Active),
            "resolved" => Ok(DecisionStatus::Resolved),
            _ => Err(format!("Invalid decision status: {}", s)),
        }
    }
}

/// A reusable piece of code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: u64,

    pub title: String,

    /// Source language (e.g., "javascript", "rust")
    #[serde(default)]
    pub language: String,

    pub code: String,

    #[serde(default)]
    pub related_links: Vec<Link>,

    pub created_at: DateTime<Utc>,
}

impl Snippet {
    /// Create a new, not yet stored snippet.
    pub fn new(
        title: impl Into<String>,
        language: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            title: title.into(),
            language: language.into(),
            code: code.into(),
            related_links: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnippetPatch {
    pub title: Option<String>,
    pub language: Option<String>,
    pub code: Option<String>,
}

impl Entity for Snippet {
    const KIND: EntityKind = EntityKind::Snippet;
    type Patch = SnippetPatch;

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn display_title(&self) -> &str {
        &self.title
    }

    fn related_links(&self) -> &[Link] {
        &self.related_links
    }

    fn related_links_mut(&mut self) -> &mut Vec<Link> {
        &mut self.related_links
    }

    fn apply(&mut self, patch: SnippetPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(language) = patch.language {
            self.language = language;
        }
        if let Some(code) = patch.code {
            self.code = code;
        }
    }
}

/// A remembered bug and how it was fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bug {
    pub id: u64,

    /// One-line problem statement, used as the display title
    pub problem: String,

    /// Area, written as "Area / Topic" (e.g., "React / State")
    #[serde(default)]
    pub category: String,

    /// What it looked like
    #[serde(default)]
    pub symptom: String,

    /// Root cause
    #[serde(default)]
    pub cause: String,

    /// The fix, usually a code excerpt
    #[serde(default)]
    pub fix: String,

    #[serde(default)]
    pub how_to_avoid: String,

    #[serde(default)]
    pub where_it_happened: String,

    #[serde(default)]
    pub language: String,

    #[serde(default)]
    pub severity: Severity,

    #[serde(default)]
    pub related_links: Vec<Link>,

    pub created_at: DateTime<Utc>,
}

impl Bug {
    /// Create a new, not yet stored bug memory.
    pub fn new(problem: impl Into<String>) -> Self {
        Self {
            id: 0,
            problem: problem.into(),
            category: String::new(),
            symptom: String::new(),
            cause: String::new(),
            fix: String::new(),
            how_to_avoid: String::new(),
            where_it_happened: String::new(),
            language: String::new(),
            severity: Severity::default(),
            related_links: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BugPatch {
    pub problem: Option<String>,
    pub category: Option<String>,
    pub symptom: Option<String>,
    pub cause: Option<String>,
    pub fix: Option<String>,
    pub how_to_avoid: Option<String>,
    pub where_it_happened: Option<String>,
    pub language: Option<String>,
    pub severity: Option<Severity>,
}

impl Entity for Bug {
    const KIND: EntityKind = EntityKind::Bug;
    type Patch = BugPatch;

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn display_title(&self) -> &str {
        &self.problem
    }

    fn related_links(&self) -> &[Link] {
        &self.related_links
    }

    fn related_links_mut(&mut self) -> &mut Vec<Link> {
        &mut self.related_links
    }

    fn apply(&mut self, patch: BugPatch) {
        let BugPatch {
            problem,
            category,
            symptom,
            cause,
            fix,
            how_to_avoid,
            where_it_happened,
            language,
            severity,
        } = patch;

        if let Some(v) = problem {
            self.problem = v;
        }
        if let Some(v) = category {
            self.category = v;
        }
        if let Some(v) = symptom {
            self.symptom = v;
        }
        if let Some(v) = cause {
            self.cause = v;
        }
        if let Some(v) = fix {
            self.fix = v;
        }
        if let Some(v) = how_to_avoid {
            self.how_to_avoid = v;
        }
        if let Some(v) = where_it_happened {
            self.where_it_happened = v;
        }
        if let Some(v) = language {
            self.language = v;
        }
        if let Some(v) = severity {
            self.severity = v;
        }
    }
}

/// An architecture decision record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub id: u64,

    /// Project the decision was made for
    #[serde(default)]
    pub project: String,

    /// The decision itself, used as the display title
    pub decision: String,

    /// Reasons in favour
    #[serde(default)]
    pub why: Vec<String>,

    /// Known costs
    #[serde(default)]
    pub tradeoffs: Vec<String>,

    /// Whether, knowing what we know now, we would decide differently
    #[serde(skip_serializing_if = "Option::is_none")]
    pub would_change: Option<String>,

    pub date: NaiveDate,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub status: DecisionStatus,

    #[serde(default)]
    pub related_links: Vec<Link>,

    pub created_at: DateTime<Utc>,
}

impl Decision {
    /// Create a new, not yet stored decision dated today.
    pub fn new(decision: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            project: String::new(),
            decision: decision.into(),
            why: Vec::new(),
            tradeoffs: Vec::new(),
            would_change: None,
            date: now.date_naive(),
            category: String::new(),
            status: DecisionStatus::default(),
            related_links: Vec::new(),
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecisionPatch {
    pub project: Option<String>,
    pub decision: Option<String>,
    pub why: Option<Vec<String>>,
    pub tradeoffs: Option<Vec<String>>,
    pub would_change: Option<String>,
    pub date: Option<NaiveDate>,
    pub category: Option<String>,
    pub status: Option<DecisionStatus>,
}

impl Entity for Decision {
    const KIND: EntityKind = EntityKind::Decision;
    type Patch = DecisionPatch;

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn display_title(&self) -> &str {
        &self.decision
    }

    fn related_links(&self) -> &[Link] {
        &self.related_links
    }

    fn related_links_mut(&mut self) -> &mut Vec<Link> {
        &mut self.related_links
    }

    fn apply(&mut self, patch: DecisionPatch) {
        if let Some(v) = patch.project {
            self.project = v;
        }
        if let Some(v) = patch.decision {
            self.decision = v;
        }
        if let Some(v) = patch.why {
            self.why = v;
        }
        if let Some(v) = patch.tradeoffs {
            self.tradeoffs = v;
        }
        if patch.would_change.is_some() {
            self.would_change = patch.would_change;
        }
        if let Some(v) = patch.date {
            self.date = v;
        }
        if let Some(v) = patch.category {
            self.category = v;
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
    }
}

/// What a command reference runs: one line, or an ordered workflow.
///
/// Flattened into [`Command`] as either `"command": "..."` or
/// `"commands": [...]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandBody {
    Workflow { commands: Vec<String> },
    Single { command: String },
}

impl CommandBody {
    /// Build a body from one or more lines; more than one makes a workflow.
    pub fn from_lines(mut lines: Vec<String>) -> Self {
        if lines.len() == 1 {
            CommandBody::Single {
                command: lines.remove(0),
            }
        } else {
            CommandBody::Workflow { commands: lines }
        }
    }

    pub fn is_workflow(&self) -> bool {
        matches!(self, CommandBody::Workflow { .. })
    }

    /// All lines of the body, in order.
    pub fn lines(&self) -> Vec<&str> {
        match self {
            CommandBody::Workflow { commands } => commands.iter().map(String::as_str).collect(),
            CommandBody::Single { command } => vec![command.as_str()],
        }
    }

    /// The searchable text: workflow steps joined by single spaces.
    pub fn text(&self) -> String {
        self.lines().join(" ")
    }
}

/// A git or shell command reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub id: u64,

    pub title: String,

    #[serde(flatten)]
    pub body: CommandBody,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub category: String,

    /// When to reach for it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_case: Option<String>,

    /// Rewrites history or discards work
    #[serde(default)]
    pub dangerous: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default)]
    pub related_links: Vec<Link>,

    pub created_at: DateTime<Utc>,
}

impl Command {
    /// Create a new, not yet stored command reference.
    pub fn new(title: impl Into<String>, body: CommandBody) -> Self {
        Self {
            id: 0,
            title: title.into(),
            body,
            description: String::new(),
            category: String::new(),
            use_case: None,
            dangerous: false,
            notes: None,
            related_links: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandPatch {
    pub title: Option<String>,
    pub body: Option<CommandBody>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub use_case: Option<String>,
    pub dangerous: Option<bool>,
    pub notes: Option<String>,
}

impl Entity for Command {
    const KIND: EntityKind = EntityKind::Git;
    type Patch = CommandPatch;

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn display_title(&self) -> &str {
        &self.title
    }

    fn related_links(&self) -> &[Link] {
        &self.related_links
    }

    fn related_links_mut(&mut self) -> &mut Vec<Link> {
        &mut self.related_links
    }

    fn apply(&mut self, patch: CommandPatch) {
        if let Some(v) = patch.title {
            self.title = v;
        }
        if let Some(v) = patch.body {
            self.body = v;
        }
        if let Some(v) = patch.description {
            self.description = v;
        }
        if let Some(v) = patch.category {
            self.category = v;
        }
        if patch.use_case.is_some() {
            self.use_case = patch.use_case;
        }
        if let Some(v) = patch.dangerous {
            self.dangerous = v;
        }
        if patch.notes.is_some() {
            self.notes = patch.notes;
        }
    }
}

/// Stack choices a template is built around.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateConfig {
    #[serde(default)]
    pub auth: bool,
    #[serde(default)]
    pub api: bool,
    #[serde(default)]
    pub storage: String,
    #[serde(default)]
    pub styling: String,
    #[serde(default)]
    pub state_management: String,
}

/// One directory of a template's layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDir {
    /// Path relative to the project root, with a trailing slash (e.g., "src/hooks/")
    pub path: String,
    #[serde(default)]
    pub files: Vec<String>,
}

/// Generated README sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateReadme {
    #[serde(default)]
    pub decisions: Vec<String>,
    #[serde(default)]
    pub limitations: Vec<String>,
    #[serde(default)]
    pub setup: Vec<String>,
}

/// A project bootstrap template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: u64,

    /// Template name, used as the display title
    pub name: String,

    /// Stack family (e.g., "React")
    #[serde(rename = "type", default)]
    pub template_type: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub config: TemplateConfig,

    #[serde(default)]
    pub structure: Vec<TemplateDir>,

    /// Starter file contents keyed by file name
    #[serde(default)]
    pub files: BTreeMap<String, String>,

    #[serde(default)]
    pub readme: TemplateReadme,

    #[serde(default)]
    pub related_links: Vec<Link>,

    pub created_at: DateTime<Utc>,
}

impl Template {
    /// Create a new, not yet stored template.
    pub fn new(name: impl Into<String>, template_type: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            template_type: template_type.into(),
            description: String::new(),
            config: TemplateConfig::default(),
            structure: Vec::new(),
            files: BTreeMap::new(),
            readme: TemplateReadme::default(),
            related_links: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplatePatch {
    pub name: Option<String>,
    pub template_type: Option<String>,
    pub description: Option<String>,
    pub config: Option<TemplateConfig>,
    pub readme: Option<TemplateReadme>,
}

impl Entity for Template {
    const KIND: EntityKind = EntityKind::Template;
    type Patch = TemplatePatch;

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn display_title(&self) -> &str {
        &self.name
    }

    fn related_links(&self) -> &[Link] {
        &self.related_links
    }

    fn related_links_mut(&mut self) -> &mut Vec<Link> {
        &mut self.related_links
    }

    fn apply(&mut self, patch: TemplatePatch) {
        if let Some(v) = patch.name {
            self.name = v;
        }
        if let Some(v) = patch.template_type {
            self.template_type = v;
        }
        if let Some(v) = patch.description {
            self.description = v;
        }
        if let Some(v) = patch.config {
            self.config = v;
        }
        if let Some(v) = patch.readme {
            self.readme = v;
        }
    }
}
