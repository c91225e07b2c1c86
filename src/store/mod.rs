//! In-memory entity stores.
//!
//! One [`EntityStore`] holds the ordered records of one module. Every
//! operation is total: an unknown identifier is a silent no-op, never an
//! error. Mutations report whether anything changed so callers can log or
//! render it, but nothing depends on that flag.

pub mod filter;

pub use filter::{
    BugFilter, CommandFilter, DecisionFilter, EntityFilter, SnippetFilter, TemplateFilter,
};

use crate::models::{AvailableItem, Entity, Link, LinkKey};

/// Strictly monotonic identifier source for one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    /// Start issuing identifiers at `first` (minimum 1).
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: first.max(1),
        }
    }

    /// Issue the next identifier.
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Ensure future identifiers are greater than `id`.
    pub fn observe(&mut self, id: u64) {
        if id >= self.next {
            self.next = id + 1;
        }
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

/// Ordered collection of one module's records, plus its link registry.
#[derive(Debug, Clone)]
pub struct EntityStore<T: Entity> {
    items: Vec<T>,
    ids: IdSequence,
}

impl<T: Entity> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> EntityStore<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            ids: IdSequence::default(),
        }
    }

    /// Create a store from records that already carry identifiers.
    ///
    /// Duplicate links inside a seeded record are collapsed so the
    /// uniqueness invariant holds from the start. New identifiers are issued
    /// above the highest seeded one.
    pub fn from_seed(seed: impl IntoIterator<Item = T>) -> Self {
        let mut ids = IdSequence::default();
        let items = seed
            .into_iter()
            .map(|mut item| {
                ids.observe(item.id());
                let links = std::mem::take(item.related_links_mut());
                for link in links {
                    insert_if_absent(item.related_links_mut(), link);
                }
                item
            })
            .collect();
        Self { items, ids }
    }

    /// All records, in insertion order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a record under a freshly issued identifier.
    ///
    /// Any identifier or links already on `item` are replaced.
    pub fn add(&mut self, mut item: T) -> u64 {
        let id = self.ids.next_id();
        item.set_id(id);
        item.related_links_mut().clear();
        self.items.push(item);
        tracing::debug!("Added {} {}", T::KIND, id);
        id
    }

    /// Delete the record with `id`.
    ///
    /// Links held by other records that point at it are left as they are.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        let changed = self.items.len() != before;
        tracing::debug!("Remove {} {}: changed={}", T::KIND, id, changed);
        changed
    }

    /// Merge `patch` into the record with `id`.
    pub fn update(&mut self, id: u64, patch: T::Patch) -> bool {
        match self.find_mut(id) {
            Some(item) => {
                item.apply(patch);
                tracing::debug!("Updated {} {}", T::KIND, id);
                true
            }
            None => {
                tracing::debug!("Update {} {}: not found", T::KIND, id);
                false
            }
        }
    }

    pub fn find(&self, id: u64) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    fn find_mut(&mut self, id: u64) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    /// All records matching `predicate`, in order.
    pub fn find_where<P>(&self, mut predicate: P) -> Vec<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().filter(|item| predicate(item)).collect()
    }

    /// The module's filtered view.
    pub fn filtered<F: EntityFilter<T>>(&self, filter: &F) -> Vec<&T> {
        let mut matches = self.find_where(|item| filter.matches(item));
        filter.sort(&mut matches);
        matches
    }

    /// Links held by `owner_id`; empty if the owner does not exist.
    pub fn links(&self, owner_id: u64) -> &[Link] {
        self.find(owner_id)
            .map(|item| item.related_links())
            .unwrap_or(&[])
    }

    /// Attach `link` to `owner_id` unless a link with the same key is present.
    pub fn add_link(&mut self, owner_id: u64, link: Link) -> bool {
        let Some(owner) = self.find_mut(owner_id) else {
            tracing::debug!("Link on {} {}: owner not found", T::KIND, owner_id);
            return false;
        };
        let key = link.key();
        let changed = insert_if_absent(owner.related_links_mut(), link);
        tracing::debug!(
            "Link {} {} -> {}: changed={}",
            T::KIND,
            owner_id,
            key,
            changed
        );
        changed
    }

    /// Detach the link whose composite key matches `target`.
    pub fn remove_link(&mut self, owner_id: u64, target: impl Into<LinkKey>) -> bool {
        let target = target.into();
        let Some(owner) = self.find_mut(owner_id) else {
            tracing::debug!("Unlink on {} {}: owner not found", T::KIND, owner_id);
            return false;
        };
        let links = owner.related_links_mut();
        let before = links.len();
        links.retain(|link| link.key() != target);
        let changed = links.len() != before;
        tracing::debug!(
            "Unlink {} {} -> {}: changed={}",
            T::KIND,
            owner_id,
            target,
            changed
        );
        changed
    }

    /// Project every record for link browsing.
    pub fn available_items(&self) -> impl Iterator<Item = AvailableItem> + '_ {
        self.items.iter().map(|item| item.to_available())
    }

    /// Every stored link with the key of the record holding it.
    pub fn outbound(&self) -> impl Iterator<Item = (LinkKey, &Link)> + '_ {
        self.items
            .iter()
            .flat_map(|item| item.related_links().iter().map(move |link| (item.key(), link)))
    }
}

fn insert_if_absent(links: &mut Vec<Link>, link: Link) -> bool {
    if links.iter().any(|existing| existing.key() == link.key()) {
        false
    } else {
        links.push(link);
        true
    }
}
