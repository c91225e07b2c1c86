//! Data models for DOS-IE entities.
//!
//! This module defines the core data structures:
//! - `EntityKind` - The closed set of modules an item can belong to
//! - `Link` - A typed, denormalized weak reference to another item
//! - `LinkKey` - The `(type, id)` composite key identifying a link target
//! - `AvailableItem` - The uniform projection used for link browsing
//! - `Entity` - The trait every module record implements
//!
//! The five record types live in [`entities`]; link analysis lives in [`graph`].

pub mod entities;
pub mod graph;

pub use entities::{
    Bug, BugPatch, Command, CommandBody, CommandPatch, Decision, DecisionPatch, DecisionStatus,
    Severity, Snippet, SnippetPatch, Template, TemplateConfig, TemplateDir, TemplatePatch,
    TemplateReadme,
};

use serde::{Deserialize, Serialize};
use std::fmt;

/// The module an item belongs to.
///
/// Serialized with the tags used inside `related_links`
/// (`snippet`, `bug`, `decision`, `git`, `template`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Snippet,
    Bug,
    Decision,
    /// Git and shell command references
    Git,
    /// Project bootstrap templates
    Template,
}

impl EntityKind {
    /// Get all entity kinds, in aggregation order.
    pub fn all() -> &'static [EntityKind] {
        &[
            EntityKind::Snippet,
            EntityKind::Bug,
            EntityKind::Decision,
            EntityKind::Git,
            EntityKind::Template,
        ]
    }

    /// The internal type tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Snippet => "snippet",
            EntityKind::Bug => "bug",
            EntityKind::Decision => "decision",
            EntityKind::Git => "git",
            EntityKind::Template => "template",
        }
    }

    /// The display label shown next to browse candidates.
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Snippet => "Snippet",
            EntityKind::Bug => "Bug",
            EntityKind::Decision => "Decision",
            EntityKind::Git => "Git",
            EntityKind::Template => "Template",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "snippet" | "snippets" => Ok(EntityKind::Snippet),
            "bug" | "bugs" => Ok(EntityKind::Bug),
            "decision" | "decisions" => Ok(EntityKind::Decision),
            "git" | "command" | "commands" => Ok(EntityKind::Git),
            "template" | "templates" | "bootstrap" => Ok(EntityKind::Template),
            _ => Err(format!("Unknown entity type: {}", s)),
        }
    }
}

/// Composite key of a link target: `(type, id)`.
///
/// Identifiers are only unique within one store, so the kind is part of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LinkKey {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub id: u64,
}

impl LinkKey {
    pub fn new(kind: EntityKind, id: u64) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for LinkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind, self.id)
    }
}

impl From<&Link> for LinkKey {
    fn from(link: &Link) -> Self {
        link.key()
    }
}

impl From<&AvailableItem> for LinkKey {
    fn from(item: &AvailableItem) -> Self {
        item.key()
    }
}

/// A one-directional weak reference to another item.
///
/// The title is captured when the link is created and is never refreshed,
/// so it can go stale if the target is renamed or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Target module
    #[serde(rename = "type")]
    pub kind: EntityKind,

    /// Target identifier within its module
    pub id: u64,

    /// Target display title at link-creation time
    pub title: String,
}

impl Link {
    /// Create a new link to the given target.
    pub fn new(kind: EntityKind, id: u64, title: impl Into<String>) -> Self {
        Self {
            kind,
            id,
            title: title.into(),
        }
    }

    /// The composite key of this link's target.
    pub fn key(&self) -> LinkKey {
        LinkKey::new(self.kind, self.id)
    }
}

impl From<AvailableItem> for Link {
    fn from(item: AvailableItem) -> Self {
        Link::new(item.kind, item.id, item.title)
    }
}

/// Uniform projection of any entity, used to pick link targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableItem {
    /// Identifier within the item's own module
    pub id: u64,

    /// Internal type tag
    #[serde(rename = "type")]
    pub kind: EntityKind,

    /// Display label for the type (e.g. "Git" for `git`)
    pub type_label: String,

    /// Module-specific display title
    pub title: String,
}

impl AvailableItem {
    pub fn new(kind: EntityKind, id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            type_label: kind.label().to_string(),
            title: title.into(),
        }
    }

    /// The composite key of this item.
    pub fn key(&self) -> LinkKey {
        LinkKey::new(self.kind, self.id)
    }
}

/// A record held by one of the five module stores.
///
/// `KIND` and `display_title` together form the per-kind projection into
/// [`AvailableItem`].
pub trait Entity: Clone {
    /// The module this record type belongs to.
    const KIND: EntityKind;

    /// Partial update accepted by [`Entity::apply`].
    type Patch;

    /// Identifier within this record's own store.
    fn id(&self) -> u64;

    /// Assign the identifier (done by the store on insert).
    fn set_id(&mut self, id: u64);

    /// The field shown as this item's title in link lists.
    fn display_title(&self) -> &str;

    fn related_links(&self) -> &[Link];

    fn related_links_mut(&mut self) -> &mut Vec<Link>;

    /// Merge the set fields of `patch` into this record.
    fn apply(&mut self, patch: Self::Patch);

    /// The composite key addressing this record.
    fn key(&self) -> LinkKey {
        LinkKey::new(Self::KIND, self.id())
    }

    /// Project this record for link browsing.
    fn to_available(&self) -> AvailableItem {
        AvailableItem::new(Self::KIND, self.id(), self.display_title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_serialization() {
        let json = serde_json::to_string(&EntityKind::Git).unwrap();
        assert_eq!(json, r#""git""#);

        let kind: EntityKind = serde_json::from_str(r#""template""#).unwrap();
        assert_eq!(kind, EntityKind::Template);
    }

    #[test]
    fn test_entity_kind_from_str() {
        assert_eq!("snippet".parse::<EntityKind>().unwrap(), EntityKind::Snippet);
        assert_eq!("Bugs".parse::<EntityKind>().unwrap(), EntityKind::Bug);
        assert_eq!("decision".parse::<EntityKind>().unwrap(), EntityKind::Decision);
        assert_eq!("command".parse::<EntityKind>().unwrap(), EntityKind::Git);
        assert_eq!("bootstrap".parse::<EntityKind>().unwrap(), EntityKind::Template);
        assert!("milestone".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_entity_kind_label_differs_from_tag() {
        assert_eq!(EntityKind::Git.as_str(), "git");
        assert_eq!(EntityKind::Git.label(), "Git");
        assert_eq!(EntityKind::all().len(), 5);
    }

    #[test]
    fn test_link_wire_shape() {
        let link = Link::new(EntityKind::Decision, 2, "Use X");
        let value = serde_json::to_value(&link).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "type": "decision", "id": 2, "title": "Use X" })
        );
    }

    #[test]
    fn test_link_key_ignores_title() {
        let a = Link::new(EntityKind::Bug, 1, "Null pointer");
        let b = Link::new(EntityKind::Bug, 1, "Renamed");
        assert_ne!(a, b);
        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), LinkKey::new(EntityKind::Snippet, 1));
    }

    #[test]
    fn test_available_item_narrows_to_link() {
        let item = AvailableItem::new(EntityKind::Git, 4, "Push Your Branch");
        assert_eq!(item.type_label, "Git");

        let link = Link::from(item.clone());
        assert_eq!(link.key(), item.key());
        assert_eq!(link.title, "Push Your Branch");
    }

    #[test]
    fn test_link_key_display() {
        assert_eq!(LinkKey::new(EntityKind::Bug, 3).to_string(), "bug#3");
    }
}
