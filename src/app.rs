//! Application state: the five module stores and the cross-module surface.

use crate::browser::LinkBrowser;
use crate::models::graph::{LinkEdge, LinkGraph};
use crate::models::{AvailableItem, Bug, Command, Decision, Link, LinkKey, Snippet, Template};
use crate::store::EntityStore;

/// Run `$body` against the store for `$kind`, bound as `$store`.
macro_rules! with_store {
    (mut $state:expr, $kind:expr, |$store:ident| $body:expr) => {
        match $kind {
            $crate::models::EntityKind::Snippet => {
                let $store = &mut $state.snippets;
                $body
            }
            $crate::models::EntityKind::Bug => {
                let $store = &mut $state.bugs;
                $body
            }
            $crate::models::EntityKind::Decision => {
                let $store = &mut $state.decisions;
                $body
            }
            $crate::models::EntityKind::Git => {
                let $store = &mut $state.commands;
                $body
            }
            $crate::models::EntityKind::Template => {
                let $store = &mut $state.templates;
                $body
            }
        }
    };
    ($state:expr, $kind:expr, |$store:ident| $body:expr) => {
        match $kind {
            $crate::models::EntityKind::Snippet => {
                let $store = &$state.snippets;
                $body
            }
            $crate::models::EntityKind::Bug => {
                let $store = &$state.bugs;
                $body
            }
            $crate::models::EntityKind::Decision => {
                let $store = &$state.decisions;
                $body
            }
            $crate::models::EntityKind::Git => {
                let $store = &$state.commands;
                $body
            }
            $crate::models::EntityKind::Template => {
                let $store = &$state.templates;
                $body
            }
        }
    };
}

/// The single owned container for all entity data.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub snippets: EntityStore<Snippet>,
    pub bugs: EntityStore<Bug>,
    pub decisions: EntityStore<Decision>,
    pub commands: EntityStore<Command>,
    pub templates: EntityStore<Template>,
}

impl AppState {
    /// Empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// State loaded with the built-in seed data.
    pub fn seeded() -> Self {
        crate::seed::state()
    }

    /// Total number of records across all stores.
    pub fn len(&self) -> usize {
        self.snippets.len()
            + self.bugs.len()
            + self.decisions.len()
            + self.commands.len()
            + self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every record of every store, projected for browsing.
    ///
    /// Built fresh on each call.
    pub fn available_items(&self) -> Vec<AvailableItem> {
        self.snippets
            .available_items()
            .chain(self.bugs.available_items())
            .chain(self.decisions.available_items())
            .chain(self.commands.available_items())
            .chain(self.templates.available_items())
            .collect()
    }

    pub fn contains(&self, key: LinkKey) -> bool {
        with_store!(self, key.kind, |store| store.find(key.id).is_some())
    }

    /// Current display title of the record at `key`.
    pub fn display_title(&self, key: LinkKey) -> Option<String> {
        use crate::models::Entity;
        with_store!(self, key.kind, |store| store
            .find(key.id)
            .map(|item| item.display_title().to_string()))
    }

    /// Links held by `owner`; empty if it does not exist.
    pub fn links_of(&self, owner: LinkKey) -> &[Link] {
        with_store!(self, owner.kind, |store| store.links(owner.id))
    }

    /// A browser over every other record, excluding targets `owner` already links.
    pub fn browser_for(&self, owner: LinkKey) -> LinkBrowser {
        let available = self
            .available_items()
            .into_iter()
            .filter(|item| item.key() != owner)
            .collect();
        LinkBrowser::new(available, self.links_of(owner))
    }

    /// Link `owner` to `target` through a browser.
    ///
    /// The stored title is the target's title at this moment. Returns `false`
    /// if the owner is missing or the target is not a candidate.
    pub fn link(&mut self, owner: LinkKey, target: LinkKey) -> bool {
        if !self.contains(owner) {
            tracing::debug!("Link {} -> {}: owner not found", owner, target);
            return false;
        }
        let mut browser = self.browser_for(owner);
        let Some(link) = browser.select(target, |item| Link::from(item.clone())) else {
            tracing::debug!("Link {} -> {}: not a candidate", owner, target);
            return false;
        };
        with_store!(mut self, owner.kind, |store| store.add_link(owner.id, link))
    }

    /// Attach a ready-made link to `owner`, without checking the target.
    pub fn add_link(&mut self, owner: LinkKey, link: Link) -> bool {
        with_store!(mut self, owner.kind, |store| store.add_link(owner.id, link))
    }

    /// Remove the link from `owner` to `target`.
    pub fn unlink(&mut self, owner: LinkKey, target: LinkKey) -> bool {
        with_store!(mut self, owner.kind, |store| store.remove_link(owner.id, target))
    }

    /// Delete the record at `key`. Links pointing at it are kept.
    pub fn remove(&mut self, key: LinkKey) -> bool {
        with_store!(mut self, key.kind, |store| store.remove(key.id))
    }

    /// Read-only snapshot of the link graph.
    pub fn graph(&self) -> LinkGraph {
        let edges = self
            .snippets
            .outbound()
            .chain(self.bugs.outbound())
            .chain(self.decisions.outbound())
            .chain(self.commands.outbound())
            .chain(self.templates.outbound())
            .map(|(owner, link)| LinkEdge {
                owner,
                link: link.clone(),
            })
            .collect();
        LinkGraph::new(&self.available_items(), edges)
    }
}
