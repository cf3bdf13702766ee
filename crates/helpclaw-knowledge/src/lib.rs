//! # HelpClaw Knowledge Base
//!
//! Deterministic lexical search over support articles.
//! No vector DB, no embeddings — every score is reproducible arithmetic,
//! so "why did this article match" always has an auditable answer.
//!
//! ## Design
//! - **Keyword overlap** — stop-word-filtered token intersection
//! - **Substring bonuses** — fixed boosts for title/content hits
//! - **Tag/category boosts** — per matching label, uncapped
//! - **Stable ranking** — ties keep article insertion order
//!
//! ## How it works
//! ```text
//! User: "how do I reset my password?"
//!   ↓
//! text::extract_keywords → ["reset", "password"]
//!   ↓ scorer::score for every article
//! SearchEngine: filter by min_score, stable sort, cap
//!   ↓
//! Ranked SearchResults injected into the agent reply
//! ```

pub mod index;
pub mod scorer;
pub mod search;
pub mod text;

pub use index::{Article, ArticleDraft, ArticleIndex};
pub use search::{SearchEngine, SearchOptions, SearchResult};
pub use text::TicketReferenceMatch;
