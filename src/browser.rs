//! Link target browsing.
//!
//! A [`LinkBrowser`] is built from a fresh aggregator list and the owner's
//! current links. It only narrows and reports a selection; adding the link is
//! left to the caller.

use crate::models::{AvailableItem, EntityKind, Link, LinkKey};
use crate::store::filter::contains_ci;
use std::collections::HashSet;
use std::fmt;

/// Category narrowing for browse candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Kind(EntityKind),
}

impl CategoryFilter {
    pub fn matches(&self, kind: EntityKind) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Kind(k) => *k == kind,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Kind(kind) => write!(f, "{}", kind),
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse::<EntityKind>()
            .map(CategoryFilter::Kind)
            .map_err(|_| format!("Unknown category: {}", s))
    }
}

impl From<EntityKind> for CategoryFilter {
    fn from(kind: EntityKind) -> Self {
        CategoryFilter::Kind(kind)
    }
}

#[derive(Debug, Clone)]
pub struct LinkBrowser {
    available: Vec<AvailableItem>,
    linked: HashSet<LinkKey>,
    category: CategoryFilter,
    search: String,
}

impl LinkBrowser {
    pub fn new(available: Vec<AvailableItem>, current_links: &[Link]) -> Self {
        Self {
            available,
            linked: current_links.iter().map(Link::key).collect(),
            category: CategoryFilter::All,
            search: String::new(),
        }
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    fn is_candidate(&self, item: &AvailableItem) -> bool {
        self.category.matches(item.kind)
            && contains_ci(&item.title, &self.search)
            && !self.linked.contains(&item.key())
    }

    /// Items that can still be linked, in aggregator order.
    pub fn candidates(&self) -> Vec<&AvailableItem> {
        self.available
            .iter()
            .filter(|item| self.is_candidate(item))
            .collect()
    }

    /// Hand the candidate with `key` to `on_select`.
    ///
    /// Returns `None` without calling back when `key` is not a current
    /// candidate. A successful selection clears the search text.
    pub fn select<R, F>(&mut self, key: LinkKey, on_select: F) -> Option<R>
    where
        F: FnOnce(&AvailableItem) -> R,
    {
        let item = self
            .available
            .iter()
            .find(|item| item.key() == key && self.is_candidate(item))?;
        let result = on_select(item);
        self.search.clear();
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<AvailableItem> {
        vec![
            AvailableItem::new(EntityKind::Bug, 1, "Null pointer"),
            AvailableItem::new(EntityKind::Snippet, 1, "Debounce"),
        ]
    }

    #[test]
    fn test_excludes_current_links() {
        let current = vec![Link::new(EntityKind::Bug, 1, "Null pointer")];
        let browser = LinkBrowser::new(items(), &current);
        let candidates = browser.candidates();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].key(), LinkKey::new(EntityKind::Snippet, 1));
        assert_eq!(candidates[0].title, "Debounce");
    }

    #[test]
    fn test_exclusion_uses_composite_key() {
        // Same id, different kind: must stay a candidate.
        let current = vec![Link::new(EntityKind::Snippet, 1, "Debounce")];
        let browser = LinkBrowser::new(items(), &current);
        assert_eq!(
            browser.candidates()[0].key(),
            LinkKey::new(EntityKind::Bug, 1)
        );
    }

    #[test]
    fn test_category_and_search_are_conjunctive() {
        let mut all = items();
        all.push(AvailableItem::new(EntityKind::Bug, 2, "Debounce fires twice"));

        let browser = LinkBrowser::new(all.clone(), &[]).with_search("DEBOUNCE");
        assert_eq!(browser.candidates().len(), 2);

        let browser = LinkBrowser::new(all, &[])
            .with_search("debounce")
            .with_category(CategoryFilter::Kind(EntityKind::Bug));
        let candidates = browser.candidates();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].key(), LinkKey::new(EntityKind::Bug, 2));
    }

    #[test]
    fn test_select_calls_back_and_clears_search() {
        let mut browser = LinkBrowser::new(items(), &[]).with_search("null");
        let picked = browser.select(LinkKey::new(EntityKind::Bug, 1), |item| {
            Link::from(item.clone())
        });
        assert_eq!(picked, Some(Link::new(EntityKind::Bug, 1, "Null pointer")));
        assert_eq!(browser.search(), "");
    }

    #[test]
    fn test_select_rejects_non_candidates() {
        let current = vec![Link::new(EntityKind::Bug, 1, "Null pointer")];
        let mut browser = LinkBrowser::new(items(), &current).with_search("x");
        let mut called = false;
        let picked = browser.select(LinkKey::new(EntityKind::Bug, 1), |_| called = true);
        assert!(picked.is_none());
        assert!(!called);
        assert_eq!(browser.search(), "x");

        assert!(
            browser
                .select(LinkKey::new(EntityKind::Git, 7), |_| ())
                .is_none()
        );
    }

    #[test]
    fn test_browser_does_not_hide_owner() {
        // Owner filtering is the caller's job.
        let browser = LinkBrowser::new(items(), &[]);
        assert_eq!(browser.candidates().len(), 2);
    }

    #[test]
    fn test_category_filter_parse() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "bootstrap".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Kind(EntityKind::Template)
        );
        assert_eq!(
            "bugs".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Kind(EntityKind::Bug)
        );
        assert!("widgets".parse::<CategoryFilter>().is_err());
        assert_eq!(CategoryFilter::Kind(EntityKind::Git).to_string(), "git");
    }
}
