#![forbid(unsafe_code)]

//! Record types for the curated reference content.

/// A topical grouping inside a language's documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Language basics: syntax, types, control flow.
    Basics,
    /// Collections and data structures.
    Collections,
    /// Functions, closures, and modules.
    Functions,
    /// Concurrency and asynchronous code.
    Concurrency,
    /// Tooling, build systems, package managers.
    Tooling,
}

impl Category {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Basics => "Basics",
            Self::Collections => "Collections",
            Self::Functions => "Functions",
            Self::Concurrency => "Concurrency",
            Self::Tooling => "Tooling",
        }
    }
}

/// One code snippet with its explanation.
#[derive(Debug, Clone)]
pub struct Snippet {
    pub title: &'static str,
    pub code: &'static str,
    pub description: &'static str,
    pub category: Category,
}

/// A language entry in the reference library.
#[derive(Debug, Clone)]
pub struct LanguageRecord {
    /// Stable id used for lookup and favorites (e.g. `"rust"`).
    pub id: &'static str,
    pub name: &'static str,
    pub summary: &'static str,
    pub snippets: Vec<Snippet>,
}

/// A step-by-step tutorial.
#[derive(Debug, Clone)]
pub struct Tutorial {
    pub id: &'static str,
    pub language_id: &'static str,
    pub title: &'static str,
    pub body: &'static str,
}

/// A common error with its resolution.
#[derive(Debug, Clone)]
pub struct ErrorGuide {
    pub id: &'static str,
    pub language_id: &'static str,
    pub message: &'static str,
    pub solution: &'static str,
}

/// A developer tool listing.
#[derive(Debug, Clone)]
pub struct ToolListing {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub url: &'static str,
}
