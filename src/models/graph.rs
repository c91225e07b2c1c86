//! Read-only analysis of the related-links graph.
//!
//! Links are one-directional weak references and no reverse index is kept,
//! so everything here is computed from a snapshot on demand. Nothing in this
//! module mutates a store.

use super::{AvailableItem, Link, LinkKey};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Union-Find (Disjoint Set Union) over link keys, for grouping linked items.
///
/// Uses path compression and union by rank.
#[derive(Debug, Clone, Default)]
pub struct UnionFind {
    parent: HashMap<LinkKey, LinkKey>,
    rank: HashMap<LinkKey, usize>,
}

impl UnionFind {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new element. No-op if it already exists.
    pub fn make_set(&mut self, x: LinkKey) {
        if !self.parent.contains_key(&x) {
            self.parent.insert(x, x);
            self.rank.insert(x, 0);
        }
    }

    /// Find the representative of the set containing `x`.
    pub fn find(&mut self, x: LinkKey) -> Option<LinkKey> {
        let parent = *self.parent.get(&x)?;
        if parent == x {
            return Some(x);
        }
        let root = self.find(parent)?;
        self.parent.insert(x, root);
        Some(root)
    }

    /// Union the sets containing `x` and `y`.
    ///
    /// Returns `false` if they were already joined or either is missing.
    pub fn union(&mut self, x: LinkKey, y: LinkKey) -> bool {
        let (Some(root_x), Some(root_y)) = (self.find(x), self.find(y)) else {
            return false;
        };
        if root_x == root_y {
            return false;
        }

        let rank_x = self.rank.get(&root_x).copied().unwrap_or(0);
        let rank_y = self.rank.get(&root_y).copied().unwrap_or(0);

        if rank_x < rank_y {
            self.parent.insert(root_x, root_y);
        } else if rank_x > rank_y {
            self.parent.insert(root_y, root_x);
        } else {
            self.parent.insert(root_y, root_x);
            self.rank.insert(root_x, rank_x + 1);
        }
        true
    }

    /// All sets, each sorted, ordered by their smallest key.
    pub fn components(&mut self) -> Vec<Vec<LinkKey>> {
        let mut groups: BTreeMap<LinkKey, Vec<LinkKey>> = BTreeMap::new();
        let elements: Vec<LinkKey> = self.parent.keys().copied().collect();
        for elem in elements {
            if let Some(root) = self.find(elem) {
                groups.entry(root).or_default().push(elem);
            }
        }

        let mut components: Vec<Vec<LinkKey>> = groups
            .into_values()
            .map(|mut members| {
                members.sort();
                members
            })
            .collect();
        components.sort();
        components
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }
}

/// A link held by `owner`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkEdge {
    pub owner: LinkKey,
    pub link: Link,
}

/// Why a link no longer matches its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkIssueKind {
    /// The target no longer exists
    Dangling,
    /// The target exists under a different title
    StaleTitle,
}

/// A link found to be out of date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkIssue {
    pub owner: LinkKey,
    pub link: Link,
    pub issue: LinkIssueKind,
    /// Current title of the target, for stale titles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_title: Option<String>,
}

/// Snapshot of every live item and every stored link.
#[derive(Debug, Clone, Default)]
pub struct LinkGraph {
    titles: HashMap<LinkKey, String>,
    edges: Vec<LinkEdge>,
}

impl LinkGraph {
    /// Build a graph from the aggregated item list and all stored links.
    pub fn new(items: &[AvailableItem], edges: Vec<LinkEdge>) -> Self {
        let titles = items
            .iter()
            .map(|item| (item.key(), item.title.clone()))
            .collect();
        Self { titles, edges }
    }

    /// Whether `key` names a live item.
    pub fn contains(&self, key: LinkKey) -> bool {
        self.titles.contains_key(&key)
    }

    /// Owners holding a link to `target`, in store order.
    pub fn backlinks(&self, target: LinkKey) -> Vec<LinkKey> {
        self.edges
            .iter()
            .filter(|edge| edge.link.key() == target)
            .map(|edge| edge.owner)
            .collect()
    }

    /// Links whose target no longer exists.
    pub fn dangling(&self) -> Vec<LinkIssue> {
        self.issues()
            .into_iter()
            .filter(|issue| issue.issue == LinkIssueKind::Dangling)
            .collect()
    }

    /// Links whose target exists but has been retitled since linking.
    pub fn stale_titles(&self) -> Vec<LinkIssue> {
        self.issues()
            .into_iter()
            .filter(|issue| issue.issue == LinkIssueKind::StaleTitle)
            .collect()
    }

    /// All out-of-date links, in store order.
    pub fn issues(&self) -> Vec<LinkIssue> {
        self.edges
            .iter()
            .filter_map(|edge| match self.titles.get(&edge.link.key()) {
                None => Some(LinkIssue {
                    owner: edge.owner,
                    link: edge.link.clone(),
                    issue: LinkIssueKind::Dangling,
                    current_title: None,
                }),
                Some(title) if *title != edge.link.title => Some(LinkIssue {
                    owner: edge.owner,
                    link: edge.link.clone(),
                    issue: LinkIssueKind::StaleTitle,
                    current_title: Some(title.clone()),
                }),
                Some(_) => None,
            })
            .collect()
    }

    /// Groups of live items connected by links, ignoring direction.
    ///
    /// Items without any live link are left out. Dangling links do not join
    /// anything.
    pub fn clusters(&self) -> Vec<Vec<LinkKey>> {
        let mut uf = UnionFind::new();
        for edge in &self.edges {
            let target = edge.link.key();
            if !self.contains(edge.owner) || !self.contains(target) || edge.owner == target {
                continue;
            }
            uf.make_set(edge.owner);
            uf.make_set(target);
            uf.union(edge.owner, target);
        }
        uf.components()
    }
}
