//! Built-in starting data.
//!
//! Some seeded links point at records that are not seeded, or carry a title
//! that no longer matches their target. They are kept that way: `doctor`
//! reports them.

use crate::app::AppState;
use crate::models::{
    Bug, Command, CommandBody, Decision, DecisionStatus, EntityKind, Link, Severity, Snippet,
    Template, TemplateConfig, TemplateDir, TemplateReadme,
};
use crate::store::EntityStore;
use chrono::NaiveDate;

pub fn state() -> AppState {
    AppState {
        snippets: EntityStore::from_seed(snippets()),
        bugs: EntityStore::from_seed(bugs()),
        decisions: EntityStore::from_seed(decisions()),
        commands: EntityStore::from_seed(commands()),
        templates: EntityStore::from_seed(templates()),
    }
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn snippet(id: u64, title: &str, code: &str, links: Vec<Link>) -> Snippet {
    let mut s = Snippet::new(title, "javascript", code);
    s.id = id;
    s.related_links = links;
    s
}

fn snippets() -> Vec<Snippet> {
    vec![
        snippet(
            1,
            "Remove from List",
            "const removeItem = (id) => {\n    setItems(items.filter(item => item.id !== id));\n};",
            vec![Link::new(EntityKind::Bug, 2, "Infinite loop in useEffect")],
        ),
        snippet(
            2,
            "Edit/Update List Item",
            "const updateItem = (id, updatedData) => {\n    setItems(items.map(item =>\n        item.id === id ? { ...item, ...updatedData } : item\n    ));\n};",
            vec![],
        ),
        snippet(
            3,
            "Find Something in List",
            "const item = items.find(item => item.id === 5);",
            vec![],
        ),
        snippet(
            9,
            "Debounce Hook",
            "export function useDebounce(value, delay = 500) {\n    const [debouncedValue, setDebouncedValue] = useState(value);\n    useEffect(() => {\n        const handler = setTimeout(() => setDebouncedValue(value), delay);\n        return () => clearTimeout(handler);\n    }, [value, delay]);\n    return debouncedValue;\n}",
            vec![Link::new(EntityKind::Bug, 16, "Debounce race condition")],
        ),
        snippet(
            12,
            "Sort Array of Objects",
            "const sorted = [...items].sort((a, b) => a.name.localeCompare(b.name));",
            vec![Link::new(EntityKind::Bug, 19, "Array mutation during sort")],
        ),
    ]
}

struct BugSeed<'a> {
    id: u64,
    problem: &'a str,
    category: &'a str,
    symptom: &'a str,
    cause: &'a str,
    fix: &'a str,
    how_to_avoid: &'a str,
    where_it_happened: &'a str,
    severity: Severity,
    links: Vec<Link>,
}

impl BugSeed<'_> {
    fn build(self) -> Bug {
        let mut bug = Bug::new(self.problem);
        bug.id = self.id;
        bug.category = self.category.into();
        bug.symptom = self.symptom.into();
        bug.cause = self.cause.into();
        bug.fix = self.fix.into();
        bug.how_to_avoid = self.how_to_avoid.into();
        bug.where_it_happened = self.where_it_happened.into();
        bug.language = "javascript".into();
        bug.severity = self.severity;
        bug.related_links = self.links;
        bug
    }
}

fn bugs() -> Vec<Bug> {
    vec![
        BugSeed {
            id: 1,
            problem: "List renders twice",
            category: "React / State",
            symptom: "Duplicate items in UI",
            cause: "State updated twice in same flow",
            fix: "setUsers(updatedUsers);",
            how_to_avoid: "Centralize state updates in one function",
            where_it_happened: "Group project, event update flow",
            severity: Severity::Medium,
            links: vec![Link::new(
                EntityKind::Decision,
                1,
                "Use localStorage instead of backend",
            )],
        }
        .build(),
        BugSeed {
            id: 2,
            problem: "Infinite loop in useEffect",
            category: "React / Hooks",
            symptom: "Browser freezes, component re-renders endlessly",
            cause: "Missing dependency array or object/array in dependencies",
            fix: "useEffect(() => {\n  setData(fetchedData);\n}, [fetchedData.id]);",
            how_to_avoid: "Always add dependency array, use primitive values when possible",
            where_it_happened: "Dashboard data fetching",
            severity: Severity::High,
            links: vec![
                Link::new(EntityKind::Snippet, 1, "Remove item from array"),
                Link::new(EntityKind::Decision, 2, "Context API vs Redux"),
            ],
        }
        .build(),
        BugSeed {
            id: 3,
            problem: "Async state not updating",
            category: "JavaScript / Async",
            symptom: "State shows old value in async function",
            cause: "Closure captures old state value",
            fix: "setCount(prevCount => prevCount + 1);",
            how_to_avoid: "Use functional setState for async operations",
            where_it_happened: "Counter with API calls",
            severity: Severity::Medium,
            links: vec![],
        }
        .build(),
        BugSeed {
            id: 6,
            problem: "CORS error in API call",
            category: "API / Network",
            symptom: "Request blocked by CORS policy in the console",
            cause: "Server does not send Access-Control-Allow-Origin",
            fix: "server: { proxy: { '/api': 'http://localhost:3000' } }",
            how_to_avoid: "Configure CORS on the server or proxy in development",
            where_it_happened: "Weather app fetching a third-party API",
            severity: Severity::High,
            links: vec![],
        }
        .build(),
    ]
}

#[allow(clippy::too_many_arguments)]
fn decision(
    id: u64,
    project: &str,
    text: &str,
    why: &[&str],
    tradeoffs: &[&str],
    would_change: &str,
    when: NaiveDate,
    category: &str,
    status: DecisionStatus,
) -> Decision {
    let mut d = Decision::new(text);
    d.id = id;
    d.project = project.into();
    d.why = lines(why);
    d.tradeoffs = lines(tradeoffs);
    d.would_change = Some(would_change.into());
    d.date = when;
    d.category = category.into();
    d.status = status;
    d
}

fn decisions() -> Vec<Decision> {
    let mut local_storage = decision(
        1,
        "Event Planner",
        "Use localStorage instead of backend",
        &[
            "Time limited - 2 week sprint",
            "Focus on frontend logic first",
            "No authentication requirements",
        ],
        &[
            "No persistence across devices",
            "Data loss if browser cache cleared",
        ],
        "Yes, move to Firebase or REST API when scaling",
        date(2025, 12, 20),
        "Architecture",
        DecisionStatus::Active,
    );
    local_storage.related_links = vec![
        Link::new(EntityKind::Bug, 1, "List renders twice"),
        Link::new(EntityKind::Snippet, 1, "Remove from List"),
    ];

    let mut context = decision(
        2,
        "Dashboard App",
        "Context API over Redux",
        &["Small to medium app size", "Avoid Redux boilerplate"],
        &["Context re-renders can be wasteful", "No dev tools like Redux"],
        "Maybe, consider Zustand if performance issues arise",
        date(2025, 11, 15),
        "State Management",
        DecisionStatus::Active,
    );
    context.related_links = vec![Link::new(EntityKind::Bug, 2, "Infinite loop in useEffect")];

    let css = decision(
        3,
        "E-commerce Site",
        "CSS Modules instead of Tailwind",
        &["Team already knows CSS well", "Want component-scoped styles"],
        &["Slower development vs utility classes", "More files to manage"],
        "No, CSS Modules working great for our needs",
        date(2025, 10, 5),
        "Styling",
        DecisionStatus::Resolved,
    );

    vec![local_storage, context, css]
}

struct CommandSeed<'a> {
    id: u64,
    title: &'a str,
    steps: &'a [&'a str],
    description: &'a str,
    category: &'a str,
    use_case: &'a str,
    dangerous: bool,
    notes: &'a str,
    links: Vec<Link>,
}

impl CommandSeed<'_> {
    fn build(self) -> Command {
        let mut cmd = Command::new(self.title, CommandBody::from_lines(lines(self.steps)));
        cmd.id = self.id;
        cmd.description = self.description.into();
        cmd.category = self.category.into();
        cmd.use_case = Some(self.use_case.into());
        cmd.dangerous = self.dangerous;
        cmd.notes = Some(self.notes.into());
        cmd.related_links = self.links;
        cmd
    }
}

fn commands() -> Vec<Command> {
    vec![
        CommandSeed {
            id: 1,
            title: "Push Your Branch",
            steps: &[
                "git add .",
                "git commit -m \"your message\"",
                "git push origin branch-name",
            ],
            description: "Complete workflow to commit and push your changes",
            category: "Workflows",
            use_case: "Standard workflow after making changes",
            dangerous: false,
            notes: "Replace \"branch-name\" with your actual branch.",
            links: vec![Link::new(
                EntityKind::Decision,
                1,
                "Used conventional commits for better history",
            )],
        }
        .build(),
        CommandSeed {
            id: 2,
            title: "Update Your Branch",
            steps: &[
                "git fetch origin",
                "git pull --rebase origin branch-name",
                "git push origin branch-name",
            ],
            description: "Get latest changes from remote and update your branch",
            category: "Workflows",
            use_case: "Before starting work or when others have pushed changes",
            dangerous: false,
            notes: "--rebase replays your commits on top of the latest remote changes.",
            links: vec![Link::new(
                EntityKind::Snippet,
                2,
                "Debounce hook implementation",
            )],
        }
        .build(),
        CommandSeed {
            id: 6,
            title: "Amend Last Commit",
            steps: &[
                "git add .",
                "git commit --amend --no-edit",
                "git push --force-with-lease origin branch-name",
            ],
            description: "Add forgotten files to last commit",
            category: "Workflows",
            use_case: "Forgot to include files in last commit",
            dangerous: true,
            notes: "Use --no-edit to keep same message, or remove it to change message.",
            links: vec![],
        }
        .build(),
        CommandSeed {
            id: 10,
            title: "View Branch Status",
            steps: &["git status"],
            description: "Check current state of your branch",
            category: "Info",
            use_case: "Understanding what changed and branch status",
            dangerous: false,
            notes: "Use git diff --staged to see staged changes only.",
            links: vec![],
        }
        .build(),
        CommandSeed {
            id: 11,
            title: "Delete Local and Remote Branch",
            steps: &[
                "git checkout develop",
                "git branch -d branch-name",
                "git push origin --delete branch-name",
            ],
            description: "Clean up merged branch locally and remotely",
            category: "Cleanup",
            use_case: "After PR is merged and branch is no longer needed",
            dangerous: true,
            notes: "Use -D instead of -d to force delete unmerged branch.",
            links: vec![],
        }
        .build(),
    ]
}

fn dir(path: &str, files: &[&str]) -> TemplateDir {
    TemplateDir {
        path: path.into(),
        files: lines(files),
    }
}

fn templates() -> Vec<Template> {
    let mut api = Template::new("React Frontend with API", "React");
    api.id = 1;
    api.description = "Full-featured React app with API integration".into();
    api.config = TemplateConfig {
        auth: false,
        api: true,
        storage: "localStorage".into(),
        styling: "CSS Modules".into(),
        state_management: "React Hooks".into(),
    };
    api.structure = vec![
        dir(
            "src/components/",
            &["ErrorMessage.jsx", "LoadingSpinner.jsx", "Button.jsx"],
        ),
        dir("src/hooks/", &["useLocalStorage.js", "useFetch.js"]),
        dir("src/services/", &["api.js"]),
        dir("src/", &["App.jsx", "main.jsx"]),
    ];
    api.readme = TemplateReadme {
        decisions: lines(&["Custom hooks for data fetching", "CSS Modules for scoped styles"]),
        limitations: lines(&["No authentication", "No global state library"]),
        setup: lines(&["npm install", "npm run dev"]),
    };
    api.related_links = vec![
        Link::new(EntityKind::Snippet, 1, "Remove duplicates from list"),
        Link::new(
            EntityKind::Decision,
            1,
            "Used conventional commits for better history",
        ),
    ];

    let mut minimal = Template::new("Minimal React Starter", "React");
    minimal.id = 3;
    minimal.description = "Lightweight React starter with essentials only".into();
    minimal.config = TemplateConfig {
        auth: false,
        api: false,
        storage: "none".into(),
        styling: "CSS".into(),
        state_management: "useState".into(),
    };
    minimal.structure = vec![
        dir("src/components/", &["Header.jsx", "Footer.jsx"]),
        dir("src/pages/", &["Home.jsx"]),
        dir("src/", &["App.jsx", "App.css"]),
    ];
    minimal.files.insert(
        "Footer.jsx".into(),
        "export default function Footer() {\n  return (\n    <footer>\n      <p>&copy; 2025 My App</p>\n    </footer>\n  );\n}".into(),
    );
    minimal.readme = TemplateReadme {
        decisions: lines(&[
            "Minimal dependencies for fast learning",
            "Pure CSS for styling",
        ]),
        limitations: lines(&["No routing included", "No API integration"]),
        setup: lines(&["npm install", "npm run dev"]),
    };

    vec![api, minimal]
}
