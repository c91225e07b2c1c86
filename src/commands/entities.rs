//! CRUD commands for the five modules.

use super::{Changed, Output, json};
use crate::app::AppState;
use crate::cli::{BugCommands, DecisionCommands, GitCommands, SnippetCommands, TemplateCommands};
use crate::models::{
    Bug, BugPatch, Command, CommandBody, CommandPatch, Decision, DecisionPatch, Entity, LinkKey,
    Snippet, SnippetPatch, Template, TemplateConfig, TemplatePatch,
};
use crate::store::{
    BugFilter, CommandFilter, DecisionFilter, EntityStore, SnippetFilter, TemplateFilter,
};
use crate::{Error, Result};
use serde::Serialize;

/// Human renderings of a record.
pub trait Summary {
    /// One line for list output.
    fn summary(&self) -> String;

    /// Full multi-line view.
    fn details(&self) -> String;
}

fn push_field(out: &mut String, label: &str, value: &str) {
    if !value.is_empty() {
        out.push_str(&format!("\n  {}: {}", label, value));
    }
}

fn push_list(out: &mut String, label: &str, values: &[String]) {
    if !values.is_empty() {
        out.push_str(&format!("\n  {}:", label));
        for value in values {
            out.push_str(&format!("\n    - {}", value));
        }
    }
}

fn push_links<T: Entity>(out: &mut String, item: &T) {
    let links = item.related_links();
    if links.is_empty() {
        return;
    }
    out.push_str(&format!("\n  Related ({}):", links.len()));
    for link in links {
        out.push_str(&format!("\n    {} {}", link.key(), link.title));
    }
}

impl Summary for Snippet {
    fn summary(&self) -> String {
        format!("#{} {} [{}]", self.id, self.title, self.language)
    }

    fn details(&self) -> String {
        let mut out = format!("Snippet #{}: {}", self.id, self.title);
        push_field(&mut out, "Language", &self.language);
        if !self.code.is_empty() {
            out.push_str("\n  Code:");
            for line in self.code.lines() {
                out.push_str(&format!("\n    {}", line));
            }
        }
        push_links(&mut out, self);
        out
    }
}

impl Summary for Bug {
    fn summary(&self) -> String {
        format!(
            "#{} [{}] {} ({})",
            self.id, self.severity, self.problem, self.category
        )
    }

    fn details(&self) -> String {
        let mut out = format!("Bug #{}: {}", self.id, self.problem);
        push_field(&mut out, "Category", &self.category);
        push_field(&mut out, "Severity", self.severity.as_str());
        push_field(&mut out, "Symptom", &self.symptom);
        push_field(&mut out, "Cause", &self.cause);
        push_field(&mut out, "Fix", &self.fix);
        push_field(&mut out, "How to avoid", &self.how_to_avoid);
        push_field(&mut out, "Where", &self.where_it_happened);
        push_links(&mut out, self);
        out
    }
}

impl Summary for Decision {
    fn summary(&self) -> String {
        format!(
            "#{} [{}] {} ({}, {})",
            self.id, self.status, self.decision, self.project, self.date
        )
    }

    fn details(&self) -> String {
        let mut out = format!("Decision #{}: {}", self.id, self.decision);
        push_field(&mut out, "Project", &self.project);
        push_field(&mut out, "Date", &self.date.to_string());
        push_field(&mut out, "Category", &self.category);
        push_field(&mut out, "Status", self.status.as_str());
        push_list(&mut out, "Why", &self.why);
        push_list(&mut out, "Tradeoffs", &self.tradeoffs);
        if let Some(ref would_change) = self.would_change {
            push_field(&mut out, "Would change", would_change);
        }
        push_links(&mut out, self);
        out
    }
}

impl Summary for Command {
    fn summary(&self) -> String {
        let marker = if self.dangerous { " [dangerous]" } else { "" };
        format!("#{} {}{} ({})", self.id, self.title, marker, self.category)
    }

    fn details(&self) -> String {
        let mut out = format!("Command #{}: {}", self.id, self.title);
        if self.dangerous {
            out.push_str(" [dangerous]");
        }
        push_field(&mut out, "Description", &self.description);
        push_field(&mut out, "Category", &self.category);
        out.push_str("\n  Run:");
        for line in self.body.lines() {
            out.push_str(&format!("\n    $ {}", line));
        }
        if let Some(ref use_case) = self.use_case {
            push_field(&mut out, "Use case", use_case);
        }
        if let Some(ref notes) = self.notes {
            push_field(&mut out, "Notes", notes);
        }
        push_links(&mut out, self);
        out
    }
}

impl Summary for Template {
    fn summary(&self) -> String {
        format!("#{} {} ({})", self.id, self.name, self.template_type)
    }

    fn details(&self) -> String {
        let mut out = format!("Template #{}: {}", self.id, self.name);
        push_field(&mut out, "Type", &self.template_type);
        push_field(&mut out, "Description", &self.description);
        push_field(
            &mut out,
            "Config",
            &format!(
                "auth={} api={} storage={} styling={} state={}",
                self.config.auth,
                self.config.api,
                self.config.storage,
                self.config.styling,
                self.config.state_management
            ),
        );
        if !self.structure.is_empty() {
            out.push_str("\n  Structure:");
            for dir in &self.structure {
                out.push_str(&format!("\n    {} {}", dir.path, dir.files.join(", ")));
            }
        }
        if !self.files.is_empty() {
            out.push_str("\n  Files:");
            for (name, content) in &self.files {
                out.push_str(&format!("\n    {}:", name));
                for line in content.lines() {
                    out.push_str(&format!("\n      {}", line));
                }
            }
        }
        push_list(&mut out, "Decisions", &self.readme.decisions);
        push_list(&mut out, "Limitations", &self.readme.limitations);
        push_list(&mut out, "Setup", &self.readme.setup);
        push_links(&mut out, self);
        out
    }
}

/// A newly added record.
#[derive(Serialize)]
pub struct Added {
    #[serde(flatten)]
    pub key: LinkKey,
    pub title: String,
}

impl Output for Added {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!("Added {}: {}", self.key, self.title)
    }
}

/// A module's filtered view.
#[derive(Serialize)]
pub struct EntityList<T> {
    pub count: usize,
    pub items: Vec<T>,
}

impl<T: Serialize + Summary> Output for EntityList<T> {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.items.is_empty() {
            return "No items.".to_string();
        }
        let mut lines = vec![format!("{} item(s):", self.count)];
        lines.extend(self.items.iter().map(|item| format!("  {}", item.summary())));
        lines.join("\n")
    }
}

/// One record in full.
#[derive(Serialize)]
#[serde(transparent)]
pub struct EntityDetail<T> {
    pub item: T,
}

impl<T: Serialize + Summary> Output for EntityDetail<T> {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        self.item.details()
    }
}

fn added<T: Entity>(store: &mut EntityStore<T>, item: T) -> Box<dyn Output> {
    let title = item.display_title().to_string();
    let id = store.add(item);
    Box::new(Added {
        key: LinkKey::new(T::KIND, id),
        title,
    })
}

fn listed<T>(items: Vec<&T>) -> Box<dyn Output>
where
    T: Entity + Serialize + Summary + 'static,
{
    let items: Vec<T> = items.into_iter().cloned().collect();
    Box::new(EntityList {
        count: items.len(),
        items,
    })
}

fn shown<T>(store: &EntityStore<T>, id: u64) -> Result<Box<dyn Output>>
where
    T: Entity + Serialize + Summary + 'static,
{
    let item = store
        .find(id)
        .cloned()
        .ok_or_else(|| Error::NotFound(LinkKey::new(T::KIND, id).to_string()))?;
    Ok(Box::new(EntityDetail { item }))
}

fn updated<T: Entity>(store: &mut EntityStore<T>, id: u64, patch: T::Patch) -> Box<dyn Output> {
    let changed = store.update(id, patch);
    Box::new(Changed::new("updated", LinkKey::new(T::KIND, id), changed))
}

fn removed<T: Entity>(store: &mut EntityStore<T>, id: u64) -> Box<dyn Output> {
    let changed = store.remove(id);
    Box::new(Changed::new("removed", LinkKey::new(T::KIND, id), changed))
}

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    if values.is_empty() { None } else { Some(values) }
}

/// New list contents for an update: given values, an explicit clear, or unchanged.
fn replacement(values: Vec<String>, clear: bool) -> Option<Vec<String>> {
    if clear { Some(Vec::new()) } else { non_empty(values) }
}

pub fn snippet(state: &mut AppState, command: SnippetCommands) -> Result<Box<dyn Output>> {
    let store = &mut state.snippets;
    Ok(match command {
        SnippetCommands::Add {
            title,
            language,
            code,
        } => added(store, Snippet::new(title, language, code)),
        SnippetCommands::List { search } => listed(store.filtered(&SnippetFilter {
            text: search.unwrap_or_default(),
        })),
        SnippetCommands::Show { id } => return shown(store, id),
        SnippetCommands::Update {
            id,
            title,
            language,
            code,
        } => updated(
            store,
            id,
            SnippetPatch {
                title,
                language,
                code,
            },
        ),
        SnippetCommands::Rm { id } => removed(store, id),
    })
}

pub fn bug(state: &mut AppState, command: BugCommands) -> Result<Box<dyn Output>> {
    let store = &mut state.bugs;
    Ok(match command {
        BugCommands::Add {
            problem,
            category,
            symptom,
            cause,
            fix,
            how_to_avoid,
            where_it_happened,
            language,
            severity,
        } => {
            let mut bug = Bug::new(problem);
            bug.apply(BugPatch {
                problem: None,
                category,
                symptom,
                cause,
                fix,
                how_to_avoid,
                where_it_happened,
                language,
                severity,
            });
            added(store, bug)
        }
        BugCommands::List {
            search,
            category,
            severity,
        } => listed(store.filtered(&BugFilter {
            text: search.unwrap_or_default(),
            category,
            severity,
        })),
        BugCommands::Show { id } => return shown(store, id),
        BugCommands::Update {
            id,
            problem,
            category,
            symptom,
            cause,
            fix,
            how_to_avoid,
            where_it_happened,
            language,
            severity,
        } => updated(
            store,
            id,
            BugPatch {
                problem,
                category,
                symptom,
                cause,
                fix,
                how_to_avoid,
                where_it_happened,
                language,
                severity,
            },
        ),
        BugCommands::Rm { id } => removed(store, id),
    })
}

pub fn decision(state: &mut AppState, command: DecisionCommands) -> Result<Box<dyn Output>> {
    let store = &mut state.decisions;
    Ok(match command {
        DecisionCommands::Add {
            decision,
            project,
            why,
            tradeoff,
            would_change,
            date,
            category,
            status,
        } => {
            let mut record = Decision::new(decision);
            record.apply(DecisionPatch {
                project,
                decision: None,
                why: non_empty(why),
                tradeoffs: non_empty(tradeoff),
                would_change,
                date,
                category,
                status,
            });
            added(store, record)
        }
        DecisionCommands::List {
            search,
            category,
            status,
        } => listed(store.filtered(&DecisionFilter {
            text: search.unwrap_or_default(),
            category,
            status,
        })),
        DecisionCommands::Show { id } => return shown(store, id),
        DecisionCommands::Update {
            id,
            project,
            decision,
            why,
            tradeoff,
            clear_why,
            clear_tradeoffs,
            would_change,
            date,
            category,
            status,
        } => updated(
            store,
            id,
            DecisionPatch {
                project,
                decision,
                why: replacement(why, clear_why),
                tradeoffs: replacement(tradeoff, clear_tradeoffs),
                would_change,
                date,
                category,
                status,
            },
        ),
        DecisionCommands::Rm { id } => removed(store, id),
    })
}

pub fn git(state: &mut AppState, command: GitCommands) -> Result<Box<dyn Output>> {
    let store = &mut state.commands;
    Ok(match command {
        GitCommands::Add {
            title,
            lines,
            description,
            category,
            use_case,
            dangerous,
            notes,
        } => {
            let mut cmd = Command::new(title, CommandBody::from_lines(lines));
            cmd.apply(CommandPatch {
                description,
                category,
                use_case,
                dangerous: Some(dangerous),
                notes,
                ..Default::default()
            });
            added(store, cmd)
        }
        GitCommands::List {
            search,
            category,
            safe,
        } => listed(store.filtered(&CommandFilter {
            text: search.unwrap_or_default(),
            category,
            show_dangerous: !safe,
        })),
        GitCommands::Show { id } => return shown(store, id),
        GitCommands::Update {
            id,
            title,
            lines,
            description,
            category,
            use_case,
            dangerous,
            notes,
        } => updated(
            store,
            id,
            CommandPatch {
                title,
                body: non_empty(lines).map(CommandBody::from_lines),
                description,
                category,
                use_case,
                dangerous,
                notes,
            },
        ),
        GitCommands::Rm { id } => removed(store, id),
    })
}

pub fn template(state: &mut AppState, command: TemplateCommands) -> Result<Box<dyn Output>> {
    let store = &mut state.templates;
    Ok(match command {
        TemplateCommands::Add {
            name,
            template_type,
            description,
            auth,
            api,
            storage,
            styling,
            state_management,
        } => {
            let mut record = Template::new(name, template_type);
            record.apply(TemplatePatch {
                description,
                config: Some(TemplateConfig {
                    auth,
                    api,
                    storage: storage.unwrap_or_default(),
                    styling: styling.unwrap_or_default(),
                    state_management: state_management.unwrap_or_default(),
                }),
                ..Default::default()
            });
            added(store, record)
        }
        TemplateCommands::List { template_type } => {
            listed(store.filtered(&TemplateFilter { template_type }))
        }
        TemplateCommands::Show { id } => return shown(store, id),
        TemplateCommands::Update {
            id,
            name,
            template_type,
            description,
        } => updated(
            store,
            id,
            TemplatePatch {
                name,
                template_type,
                description,
                ..Default::default()
            },
        ),
        TemplateCommands::Rm { id } => removed(store, id),
    })
}
