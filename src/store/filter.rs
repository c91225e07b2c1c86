//! Per-module filtered views.
//!
//! Text matching is a case-insensitive substring match and empty text matches
//! everything. A `None` category or status means "all".

use crate::models::{Bug, Command, Decision, DecisionStatus, Severity, Snippet, Template};

/// A predicate (and optional ordering) over one module's records.
pub trait EntityFilter<T> {
    fn matches(&self, item: &T) -> bool;

    /// Reorder matches in place. Keeps store order by default.
    fn sort(&self, _items: &mut Vec<&T>) {}
}

pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Snippets: text over title and code; results sorted by title.
#[derive(Debug, Clone, Default)]
pub struct SnippetFilter {
    pub text: String,
}

impl EntityFilter<Snippet> for SnippetFilter {
    fn matches(&self, item: &Snippet) -> bool {
        contains_ci(&item.title, &self.text) || contains_ci(&item.code, &self.text)
    }

    fn sort(&self, items: &mut Vec<&Snippet>) {
        items.sort_by_cached_key(|s| s.title.to_lowercase());
    }
}

/// Bugs: text over problem, symptom and cause.
#[derive(Debug, Clone, Default)]
pub struct BugFilter {
    pub text: String,
    /// Substring of the category, so "React" matches "React / State"
    pub category: Option<String>,
    pub severity: Option<Severity>,
}

impl EntityFilter<Bug> for BugFilter {
    fn matches(&self, item: &Bug) -> bool {
        let text = contains_ci(&item.problem, &self.text)
            || contains_ci(&item.symptom, &self.text)
            || contains_ci(&item.cause, &self.text);
        let category = self
            .category
            .as_deref()
            .is_none_or(|c| item.category.contains(c));
        let severity = self.severity.is_none_or(|s| item.severity == s);
        text && category && severity
    }
}

/// Decisions: text over project, decision and reasons.
#[derive(Debug, Clone, Default)]
pub struct DecisionFilter {
    pub text: String,
    pub category: Option<String>,
    pub status: Option<DecisionStatus>,
}

impl EntityFilter<Decision> for DecisionFilter {
    fn matches(&self, item: &Decision) -> bool {
        let text = contains_ci(&item.project, &self.text)
            || contains_ci(&item.decision, &self.text)
            || item.why.iter().any(|w| contains_ci(w, &self.text));
        let category = self
            .category
            .as_deref()
            .is_none_or(|c| item.category == c);
        let status = self.status.is_none_or(|s| item.status == s);
        text && category && status
    }
}

/// Commands: text over title, command lines and description.
#[derive(Debug, Clone)]
pub struct CommandFilter {
    pub text: String,
    pub category: Option<String>,
    /// When false, dangerous commands are hidden
    pub show_dangerous: bool,
}

impl Default for CommandFilter {
    fn default() -> Self {
        Self {
            text: String::new(),
            category: None,
            show_dangerous: true,
        }
    }
}

impl EntityFilter<Command> for CommandFilter {
    fn matches(&self, item: &Command) -> bool {
        let text = contains_ci(&item.title, &self.text)
            || contains_ci(&item.body.text(), &self.text)
            || contains_ci(&item.description, &self.text);
        let category = self
            .category
            .as_deref()
            .is_none_or(|c| item.category == c);
        let dangerous = self.show_dangerous || !item.dangerous;
        text && category && dangerous
    }
}

/// Templates: exact stack family.
#[derive(Debug, Clone, Default)]
pub struct TemplateFilter {
    pub template_type: Option<String>,
}

impl EntityFilter<Template> for TemplateFilter {
    fn matches(&self, item: &Template) -> bool {
        self.template_type
            .as_deref()
            .is_none_or(|t| item.template_type == t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CommandBody;
    use crate::store::EntityStore;

    #[test]
    fn test_contains_ci() {
        assert!(contains_ci("Debounce Hook", "hook"));
        assert!(contains_ci("anything", ""));
        assert!(!contains_ci("Debounce", "throttle"));
    }

    #[test]
    fn test_snippet_filter_matches_code_and_sorts() {
        let store = EntityStore::from_seed(vec![
            {
                let mut s = Snippet::new("sort Array", "javascript", "items.sort()");
                s.id = 1;
                s
            },
            {
                let mut s = Snippet::new("Array filter", "javascript", "items.filter()");
                s.id = 2;
                s
            },
            {
                let mut s = Snippet::new("Debounce", "javascript", "setTimeout()");
                s.id = 3;
                s
            },
        ]);

        let all = store.filtered(&SnippetFilter::default());
        let titles: Vec<&str> = all.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Array filter", "Debounce", "sort Array"]);

        let by_code = store.filtered(&SnippetFilter {
            text: "SETTIMEOUT".into(),
        });
        assert_eq!(by_code.len(), 1);
        assert_eq!(by_code[0].id, 3);
    }

    #[test]
    fn test_bug_filter_category_is_substring() {
        let mut bug = Bug::new("List renders twice");
        bug.category = "React / State".into();
        bug.severity = Severity::Medium;

        let filter = BugFilter {
            category: Some("React".into()),
            ..Default::default()
        };
        assert!(filter.matches(&bug));

        let filter = BugFilter {
            category: Some("React".into()),
            severity: Some(Severity::High),
            ..Default::default()
        };
        assert!(!filter.matches(&bug));
    }

    #[test]
    fn test_bug_filter_text_fields() {
        let mut bug = Bug::new("Infinite loop");
        bug.symptom = "Browser freezes".into();
        bug.fix = "add dependency array".into();

        let by_symptom = BugFilter {
            text: "freezes".into(),
            ..Default::default()
        };
        assert!(by_symptom.matches(&bug));

        let by_fix = BugFilter {
            text: "dependency".into(),
            ..Default::default()
        };
        assert!(!by_fix.matches(&bug));
    }

    #[test]
    fn test_decision_filter_searches_reasons() {
        let mut decision = Decision::new("Context API over Redux");
        decision.why = vec!["Less boilerplate".into()];
        decision.category = "State Management".into();

        let filter = DecisionFilter {
            text: "boilerplate".into(),
            category: Some("State Management".into()),
            status: Some(DecisionStatus::Active),
        };
        assert!(filter.matches(&decision));

        let filter = DecisionFilter {
            category: Some("State".into()),
            ..Default::default()
        };
        assert!(!filter.matches(&decision));
    }

    #[test]
    fn test_command_filter_workflow_text_and_dangerous() {
        let mut cmd = Command::new(
            "Amend Last Commit",
            CommandBody::from_lines(vec![
                "git add .".into(),
                "git commit --amend --no-edit".into(),
            ]),
        );
        cmd.dangerous = true;

        let filter = CommandFilter {
            text: "--amend".into(),
            ..Default::default()
        };
        assert!(filter.matches(&cmd));

        let filter = CommandFilter {
            show_dangerous: false,
            ..Default::default()
        };
        assert!(!filter.matches(&cmd));
    }

    #[test]
    fn test_template_filter() {
        let template = Template::new("Minimal React Starter", "React");
        assert!(TemplateFilter::default().matches(&template));
        assert!(
            TemplateFilter {
                template_type: Some("React".into())
            }
            .matches(&template)
        );
        assert!(
            !TemplateFilter {
                template_type: Some("Vue".into())
            }
            .matches(&template)
        );
    }
}
