//! Related links: linking, browsing and link health.

use super::{Changed, Output, json};
use crate::app::AppState;
use crate::browser::CategoryFilter;
use crate::cli::LinkCommands;
use crate::models::graph::LinkIssue;
use crate::models::{AvailableItem, EntityKind, Link, LinkKey};
use crate::{Error, Result};
use serde::Serialize;

pub fn link(state: &mut AppState, command: LinkCommands) -> Result<Box<dyn Output>> {
    Ok(match command {
        LinkCommands::Add {
            owner_kind,
            owner_id,
            target_kind,
            target_id,
        } => {
            let owner = LinkKey::new(owner_kind, owner_id);
            let target = LinkKey::new(target_kind, target_id);
            let changed = state.link(owner, target);
            Box::new(Changed::new("linked", owner, changed).with_target(target))
        }
        LinkCommands::Rm {
            owner_kind,
            owner_id,
            target_kind,
            target_id,
        } => {
            let owner = LinkKey::new(owner_kind, owner_id);
            let target = LinkKey::new(target_kind, target_id);
            let changed = state.unlink(owner, target);
            Box::new(Changed::new("unlinked", owner, changed).with_target(target))
        }
        LinkCommands::List { kind, id } => {
            let owner = LinkKey::new(kind, id);
            if !state.contains(owner) {
                return Err(Error::NotFound(owner.to_string()));
            }
            Box::new(LinkList {
                owner,
                links: state.links_of(owner).to_vec(),
            })
        }
        LinkCommands::Backlinks { kind, id } => Box::new(backlinks(state, LinkKey::new(kind, id))),
    })
}

/// Links held by one item.
#[derive(Serialize)]
pub struct LinkList {
    pub owner: LinkKey,
    pub links: Vec<Link>,
}

impl Output for LinkList {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.links.is_empty() {
            return format!("{} has no related links.", self.owner);
        }
        let mut lines = vec![format!("{} links to {} item(s):", self.owner, self.links.len())];
        for link in &self.links {
            lines.push(format!("  {} {}", link.key(), link.title));
        }
        lines.join("\n")
    }
}

/// Items holding a link to one target.
#[derive(Serialize)]
pub struct Backlinks {
    pub target: LinkKey,
    pub owners: Vec<AvailableItem>,
}

impl Output for Backlinks {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.owners.is_empty() {
            return format!("Nothing links to {}.", self.target);
        }
        let mut lines = vec![format!("Linked from {} item(s):", self.owners.len())];
        for owner in &self.owners {
            lines.push(format!("  {} {}", owner.key(), owner.title));
        }
        lines.join("\n")
    }
}

/// Owners of links to `target`. The target itself need not exist.
pub fn backlinks(state: &AppState, target: LinkKey) -> Backlinks {
    let owners = state
        .graph()
        .backlinks(target)
        .into_iter()
        .filter_map(|owner| {
            state
                .display_title(owner)
                .map(|title| AvailableItem::new(owner.kind, owner.id, title))
        })
        .collect();
    Backlinks { target, owners }
}

/// The aggregated item list.
#[derive(Serialize)]
pub struct ItemList {
    pub count: usize,
    pub items: Vec<AvailableItem>,
}

impl Output for ItemList {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.items.is_empty() {
            return "No items.".to_string();
        }
        let mut lines = vec![format!("{} item(s):", self.count)];
        lines.extend(self.items.iter().map(candidate_line));
        lines.join("\n")
    }
}

fn candidate_line(item: &AvailableItem) -> String {
    format!("  [{}] {} {}", item.type_label, item.key(), item.title)
}

/// Every record across all modules, optionally narrowed to one kind.
pub fn items(state: &AppState, kind: Option<EntityKind>) -> ItemList {
    let items: Vec<AvailableItem> = state
        .available_items()
        .into_iter()
        .filter(|item| kind.is_none_or(|kind| item.kind == kind))
        .collect();
    ItemList {
        count: items.len(),
        items,
    }
}

/// What the link browser would offer an owner.
#[derive(Serialize)]
pub struct BrowseResult {
    pub owner: LinkKey,
    pub category: String,
    pub search: String,
    pub candidates: Vec<AvailableItem>,
}

impl Output for BrowseResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "Link candidates for {} (category: {}, search: {:?}):",
            self.owner, self.category, self.search
        )];
        if self.candidates.is_empty() {
            lines.push("  No matching items.".to_string());
        }
        lines.extend(self.candidates.iter().map(candidate_line));
        lines.join("\n")
    }
}

pub fn browse(
    state: &AppState,
    owner: LinkKey,
    category: CategoryFilter,
    search: Option<&str>,
) -> Result<BrowseResult> {
    if !state.contains(owner) {
        return Err(Error::NotFound(owner.to_string()));
    }
    let browser = state
        .browser_for(owner)
        .with_category(category)
        .with_search(search.unwrap_or_default());
    let candidates = browser.candidates().into_iter().cloned().collect();
    Ok(BrowseResult {
        owner,
        category: browser.category().to_string(),
        search: browser.search().to_string(),
        candidates,
    })
}

/// Out-of-date links across all stores.
#[derive(Serialize)]
pub struct DoctorReport {
    pub ok: bool,
    pub dangling: Vec<LinkIssue>,
    pub stale: Vec<LinkIssue>,
}

impl Output for DoctorReport {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.ok {
            return "All links are up to date.".to_string();
        }
        let mut lines = Vec::new();
        if !self.dangling.is_empty() {
            lines.push(format!("Dangling links ({}):", self.dangling.len()));
            for issue in &self.dangling {
                lines.push(format!(
                    "  {} -> {} \"{}\"",
                    issue.owner,
                    issue.link.key(),
                    issue.link.title
                ));
            }
        }
        if !self.stale.is_empty() {
            lines.push(format!("Stale titles ({}):", self.stale.len()));
            for issue in &self.stale {
                lines.push(format!(
                    "  {} -> {} \"{}\" is now \"{}\"",
                    issue.owner,
                    issue.link.key(),
                    issue.link.title,
                    issue.current_title.as_deref().unwrap_or_default()
                ));
            }
        }
        lines.join("\n")
    }
}

pub fn doctor(state: &AppState) -> DoctorReport {
    let graph = state.graph();
    let dangling = graph.dangling();
    let stale = graph.stale_titles();
    tracing::debug!(
        "Doctor: {} dangling, {} stale",
        dangling.len(),
        stale.len()
    );
    DoctorReport {
        ok: dangling.is_empty() && stale.is_empty(),
        dangling,
        stale,
    }
}

/// Connected groups of linked items.
#[derive(Serialize)]
pub struct ClusterList {
    pub clusters: Vec<Vec<AvailableItem>>,
}

impl Output for ClusterList {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.clusters.is_empty() {
            return "No linked items.".to_string();
        }
        let mut lines = Vec::new();
        for (i, cluster) in self.clusters.iter().enumerate() {
            lines.push(format!("Cluster {} ({} items):", i + 1, cluster.len()));
            lines.extend(cluster.iter().map(candidate_line));
        }
        lines.join("\n")
    }
}

pub fn clusters(state: &AppState) -> ClusterList {
    let clusters = state
        .graph()
        .clusters()
        .into_iter()
        .map(|keys| {
            keys.into_iter()
                .filter_map(|key| {
                    state
                        .display_title(key)
                        .map(|title| AvailableItem::new(key.kind, key.id, title))
                })
                .collect()
        })
        .collect();
    ClusterList { clusters }
}
