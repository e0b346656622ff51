#![forbid(unsafe_code)]

//! The catalog itself: lookup, categories, and linear search.

use crate::records::{Category, ErrorGuide, LanguageRecord, Snippet, ToolListing, Tutorial};

/// What kind of record a search hit points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Language,
    Snippet,
    Tutorial,
    ErrorGuide,
    Tool,
}

/// One search result.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub kind: SearchKind,
    /// Id of the owning record (language id for snippets).
    pub id: &'static str,
    pub title: &'static str,
    /// Byte offset of the match inside the matched text; lower sorts first.
    pub relevance: usize,
}

/// The in-memory reference library.
#[derive(Debug, Default)]
pub struct Catalog {
    languages: Vec<LanguageRecord>,
    tutorials: Vec<Tutorial>,
    error_guides: Vec<ErrorGuide>,
    tools: Vec<ToolListing>,
}

impl Catalog {
    /// An empty catalog; populate with the `with_*` builders.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The curated dataset shipped with the app.
    #[must_use]
    pub fn builtin() -> Self {
        builtin_catalog()
    }

    /// Add languages (builder pattern).
    #[must_use]
    pub fn with_languages(mut self, languages: Vec<LanguageRecord>) -> Self {
        self.languages = languages;
        self
    }

    /// Add tutorials (builder pattern).
    #[must_use]
    pub fn with_tutorials(mut self, tutorials: Vec<Tutorial>) -> Self {
        self.tutorials = tutorials;
        self
    }

    /// Add error guides (builder pattern).
    #[must_use]
    pub fn with_error_guides(mut self, guides: Vec<ErrorGuide>) -> Self {
        self.error_guides = guides;
        self
    }

    /// Add tool listings (builder pattern).
    #[must_use]
    pub fn with_tools(mut self, tools: Vec<ToolListing>) -> Self {
        self.tools = tools;
        self
    }

    /// Look up a language by id.
    #[must_use]
    pub fn language(&self, id: &str) -> Option<&LanguageRecord> {
        self.languages.iter().find(|l| l.id == id)
    }

    /// All languages, in curated order.
    #[must_use]
    pub fn languages(&self) -> &[LanguageRecord] {
        &self.languages
    }

    /// Tutorials for a language.
    pub fn tutorials(&self, language_id: &str) -> impl Iterator<Item = &Tutorial> {
        self.tutorials
            .iter()
            .filter(move |t| t.language_id == language_id)
    }

    /// Error guides for a language.
    pub fn error_guides(&self, language_id: &str) -> impl Iterator<Item = &ErrorGuide> {
        self.error_guides
            .iter()
            .filter(move |g| g.language_id == language_id)
    }

    /// All tool listings.
    #[must_use]
    pub fn tools(&self) -> &[ToolListing] {
        &self.tools
    }

    /// Distinct snippet categories present for a language, in enum order.
    #[must_use]
    pub fn categories(&self, language_id: &str) -> Vec<Category> {
        const ALL: [Category; 5] = [
            Category::Basics,
            Category::Collections,
            Category::Functions,
            Category::Concurrency,
            Category::Tooling,
        ];
        let Some(language) = self.language(language_id) else {
            return Vec::new();
        };
        ALL.into_iter()
            .filter(|c| language.snippets.iter().any(|s| s.category == *c))
            .collect()
    }

    /// Case-insensitive linear search over names, titles, and summaries.
    ///
    /// Results are ordered by match position (earlier is better), then by
    /// title, so the ordering is stable across calls. An empty query yields
    /// no hits.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut hits = Vec::new();
        let mut push = |kind, id, title: &'static str, haystacks: &[&str]| {
            let best = haystacks
                .iter()
                .filter_map(|h| h.to_lowercase().find(&needle))
                .min();
            if let Some(relevance) = best {
                hits.push(SearchHit {
                    kind,
                    id,
                    title,
                    relevance,
                });
            }
        };

        for lang in &self.languages {
            push(
                SearchKind::Language,
                lang.id,
                lang.name,
                &[lang.name, lang.summary],
            );
            for snippet in &lang.snippets {
                push(
                    SearchKind::Snippet,
                    lang.id,
                    snippet.title,
                    &[snippet.title, snippet.description],
                );
            }
        }
        for tutorial in &self.tutorials {
            push(
                SearchKind::Tutorial,
                tutorial.id,
                tutorial.title,
                &[tutorial.title, tutorial.body],
            );
        }
        for guide in &self.error_guides {
            push(
                SearchKind::ErrorGuide,
                guide.id,
                guide.message,
                &[guide.message, guide.solution],
            );
        }
        for tool in &self.tools {
            push(
                SearchKind::Tool,
                tool.id,
                tool.name,
                &[tool.name, tool.description],
            );
        }

        hits.sort_by(|a, b| a.relevance.cmp(&b.relevance).then(a.title.cmp(b.title)));
        hits
    }
}

fn builtin_catalog() -> Catalog {
    let languages = vec![
        LanguageRecord {
            id: "rust",
            name: "Rust",
            summary: "Systems language focused on safety and performance.",
            snippets: vec![
                Snippet {
                    title: "Pattern matching",
                    code: "match value {\n    Some(x) => x,\n    None => 0,\n}",
                    description: "Exhaustive matching over an Option.",
                    category: Category::Basics,
                },
                Snippet {
                    title: "Spawning threads",
                    code: "std::thread::spawn(|| println!(\"hi\"));",
                    description: "Run a closure on a new OS thread.",
                    category: Category::Concurrency,
                },
            ],
        },
        LanguageRecord {
            id: "python",
            name: "Python",
            summary: "General-purpose language prized for readability.",
            snippets: vec![
                Snippet {
                    title: "List comprehension",
                    code: "squares = [x * x for x in range(10)]",
                    description: "Build a list from an expression and a loop.",
                    category: Category::Collections,
                },
                Snippet {
                    title: "Defining functions",
                    code: "def greet(name):\n    return f\"Hello, {name}\"",
                    description: "A function with an f-string return.",
                    category: Category::Functions,
                },
            ],
        },
        LanguageRecord {
            id: "javascript",
            name: "JavaScript",
            summary: "The language of the web, on both sides of the wire.",
            snippets: vec![Snippet {
                title: "Promises",
                code: "fetch(url).then(r => r.json())",
                description: "Chain asynchronous work without callbacks.",
                category: Category::Concurrency,
            }],
        },
    ];

    let tutorials = vec![
        Tutorial {
            id: "rust-ownership",
            language_id: "rust",
            title: "Understanding ownership",
            body: "Every value has a single owner; moves transfer it.",
        },
        Tutorial {
            id: "python-venv",
            language_id: "python",
            title: "Virtual environments",
            body: "Isolate project dependencies with venv.",
        },
    ];

    let error_guides = vec![ErrorGuide {
        id: "rust-e0382",
        language_id: "rust",
        message: "borrow of moved value",
        solution: "Clone the value or restructure so the move happens last.",
    }];

    let tools = vec![
        ToolListing {
            id: "regex-tester",
            name: "Regex Tester",
            description: "Interactive regular-expression playground.",
            url: "https://example.com/regex",
        },
        ToolListing {
            id: "json-formatter",
            name: "JSON Formatter",
            description: "Pretty-print and validate JSON documents.",
            url: "https://example.com/json",
        },
    ];

    Catalog::new()
        .with_languages(languages)
        .with_tutorials(tutorials)
        .with_error_guides(error_guides)
        .with_tools(tools)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_id() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.language("rust").unwrap().name, "Rust");
        assert!(catalog.language("cobol").is_none());
    }

    #[test]
    fn categories_reflect_snippets() {
        let catalog = Catalog::builtin();
        let cats = catalog.categories("rust");
        assert_eq!(cats, vec![Category::Basics, Category::Concurrency]);
        assert!(catalog.categories("unknown").is_empty());
    }

    #[test]
    fn search_is_case_insensitive() {
        let catalog = Catalog::builtin();
        let lower = catalog.search("ownership");
        let upper = catalog.search("OWNERSHIP");
        assert!(!lower.is_empty());
        assert_eq!(lower.len(), upper.len());
        assert_eq!(lower[0].id, upper[0].id);
    }

    #[test]
    fn search_orders_by_match_position() {
        let catalog = Catalog::builtin();
        let hits = catalog.search("rust");
        assert!(!hits.is_empty());
        // "Rust" (position 0 in the name) sorts before records that only
        // mention rust later in their text.
        assert_eq!(hits[0].kind, SearchKind::Language);
        assert_eq!(hits[0].id, "rust");
        assert!(hits.windows(2).all(|w| w[0].relevance <= w[1].relevance));
    }

    #[test]
    fn empty_query_yields_nothing() {
        let catalog = Catalog::builtin();
        assert!(catalog.search("").is_empty());
        assert!(catalog.search("   ").is_empty());
    }

    #[test]
    fn search_is_stable_across_calls() {
        let catalog = Catalog::builtin();
        let a: Vec<_> = catalog.search("the").iter().map(|h| h.title).collect();
        let b: Vec<_> = catalog.search("the").iter().map(|h| h.title).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn tutorials_filter_by_language() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.tutorials("rust").count(), 1);
        assert_eq!(catalog.tutorials("javascript").count(), 0);
    }
}
