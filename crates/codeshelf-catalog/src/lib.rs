#![forbid(unsafe_code)]

//! Content catalog: the curated reference data behind every Codeshelf tab.
//!
//! # Role in Codeshelf
//! The whole catalog is memory-resident and read-only, so lookups are plain
//! synchronous functions: no pagination, no cache layer, no I/O. Search is
//! a linear scan — the dataset is small enough that anything cleverer would
//! be structure without payoff.
//!
//! [`Favorites`] is the one mutable piece: a starred-id set persisted
//! through the key-value store with the same fail-open policy as the rest
//! of the app's persistence.

mod catalog;
mod favorites;
mod records;

pub use catalog::{Catalog, SearchHit, SearchKind};
pub use favorites::Favorites;
pub use records::{Category, ErrorGuide, LanguageRecord, Snippet, ToolListing, Tutorial};
