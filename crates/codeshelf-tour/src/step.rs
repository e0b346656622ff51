#![forbid(unsafe_code)]

//! The tour storyboard: a static, ordered sequence of steps.
//!
//! Steps are data. Adding a step means adding an entry here (and, if it
//! needs a curated tooltip placement, one in the placement table) — no
//! control flow changes anywhere else.

/// Where a target-less step's tooltip sits on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPosition {
    Top,
    Center,
    Bottom,
}

/// One unit of the onboarding sequence.
#[derive(Debug, Clone)]
pub struct TourStep {
    /// Unique id; drives positioning-policy dispatch and the scroll list.
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    /// Placement when the step has no (measurable) target.
    pub position: FallbackPosition,
    /// Logical target name resolved through the registry, if any.
    pub target: Option<&'static str>,
    /// Screen to navigate to before showing this step, if any.
    pub navigation_target: Option<&'static str>,
    /// Emphasized caption under the description, if any.
    pub highlight_text: Option<&'static str>,
}

impl TourStep {
    /// Whether this step spotlights a concrete element.
    #[must_use]
    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }
}

/// Step ids that must scroll their target into view before the spotlight
/// arms. Everything else shows immediately.
pub const SCROLLABLE_STEPS: [&str; 3] = ["quick-access", "languages", "community"];

/// Whether a step id is in the scroll allow-list.
#[must_use]
pub fn requires_scroll(id: &str) -> bool {
    SCROLLABLE_STEPS.contains(&id)
}

/// The shipped storyboard.
#[must_use]
pub fn default_steps() -> Vec<TourStep> {
    vec![
        TourStep {
            id: "welcome",
            title: "Welcome to Codeshelf",
            description: "Your pocket reference for languages, snippets, and fixes. \
                          This quick tour shows you around.",
            icon: "book-open",
            position: FallbackPosition::Center,
            target: None,
            navigation_target: None,
            highlight_text: None,
        },
        TourStep {
            id: "quick-access",
            title: "Quick access",
            description: "Your most-used snippets live here, one tap away.",
            icon: "zap",
            position: FallbackPosition::Bottom,
            target: Some("quickAccess"),
            navigation_target: Some("Browse"),
            highlight_text: Some("Jump straight back into what you were reading."),
        },
        TourStep {
            id: "languages",
            title: "Language shelves",
            description: "Browse every language's docs, snippets, and error guides.",
            icon: "layers",
            position: FallbackPosition::Bottom,
            target: Some("languages"),
            navigation_target: Some("Browse"),
            highlight_text: None,
        },
        TourStep {
            id: "community",
            title: "Community picks",
            description: "Solutions and write-ups shared by other developers.",
            icon: "users",
            position: FallbackPosition::Top,
            target: Some("communityFeed"),
            navigation_target: Some("Community"),
            highlight_text: None,
        },
        TourStep {
            id: "ask-ai",
            title: "Ask the assistant",
            description: "Stuck on an error? Paste it here and get a walkthrough.",
            icon: "message-circle",
            position: FallbackPosition::Center,
            target: Some("askAi"),
            navigation_target: Some("Assistant"),
            highlight_text: Some("Answers cite the library, so you can read deeper."),
        },
        TourStep {
            id: "finish",
            title: "You're all set",
            description: "Star your languages and the shelf rearranges around you.",
            icon: "check-circle",
            position: FallbackPosition::Bottom,
            target: None,
            navigation_target: None,
            highlight_text: None,
        },
    ]
}
