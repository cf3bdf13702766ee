//! Search orchestration: score, threshold, rank, cap.

use serde::Serialize;
use tracing::debug;

use crate::index::ArticleIndex;
use crate::{scorer, text};

/// Query keywords are capped regardless of query length.
const MAX_QUERY_KEYWORDS: usize = 10;
/// Excerpt length carried in results.
const EXCERPT_CHARS: usize = 200;

/// Search tuning. Defaults: top 5 results, 0.1 score floor.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub max_results: usize,
    pub min_score: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_results: 5,
            min_score: 0.1,
        }
    }
}

impl From<&helpclaw_core::config::SearchConfig> for SearchOptions {
    fn from(config: &helpclaw_core::config::SearchConfig) -> Self {
        Self {
            max_results: config.max_results,
            min_score: config.min_score,
        }
    }
}

/// One ranked hit. Transient, created per search call.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub article_id: String,
    pub title: String,
    pub excerpt: String,
    pub category: String,
    pub tags: Vec<String>,
    pub score: f64,
}

/// Read-only search over an [`ArticleIndex`]. Never mutates, never fails on
/// well-typed input — the worst case is an empty result list.
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    options: SearchOptions,
}

impl SearchEngine {
    pub fn new(options: SearchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Rank articles against `query` using the engine's options.
    pub fn search(&self, index: &ArticleIndex, query: &str) -> Vec<SearchResult> {
        self.search_with(index, query, &self.options)
    }

    /// Rank articles against `query` with per-call options.
    ///
    /// An empty query is defined behavior: keyword components degrade to
    /// zero and only the threshold decides what survives.
    pub fn search_with(
        &self,
        index: &ArticleIndex,
        query: &str,
        options: &SearchOptions,
    ) -> Vec<SearchResult> {
        let query_keywords = text::extract_keywords(query, MAX_QUERY_KEYWORDS);

        let mut results: Vec<SearchResult> = index
            .all()
            .iter()
            .filter_map(|article| {
                let score = scorer::score(query, &query_keywords, article);
                if score < options.min_score {
                    return None;
                }
                Some(SearchResult {
                    article_id: article.id.clone(),
                    title: article.title.clone(),
                    excerpt: text::excerpt(&article.content, EXCERPT_CHARS),
                    category: article.category.clone(),
                    tags: article.tags.clone(),
                    score,
                })
            })
            .collect();

        // Stable sort: equal scores keep index insertion order.
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(options.max_results);

        debug!(
            "Knowledge base search for '{query}' returned {} results",
            results.len()
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::ArticleDraft;

    fn seeded_index() -> ArticleIndex {
        let mut index = ArticleIndex::new();
        index
            .add(
                ArticleDraft::new("Password Reset", "Steps to reset your password safely")
                    .with_category("authentication")
                    .with_tags(vec!["password".into(), "login".into()]),
            )
            .unwrap();
        index
            .add(
                ArticleDraft::new("Billing FAQ", "Common billing and refund questions")
                    .with_category("billing")
                    .with_tags(vec!["invoice".into(), "refund".into()]),
            )
            .unwrap();
        index
            .add(
                ArticleDraft::new("Dark Mode", "Enable the dark theme in settings")
                    .with_category("appearance")
                    .with_tags(vec!["theme".into()]),
            )
            .unwrap();
        index
    }

    #[test]
    fn test_end_to_end_password_reset() {
        let index = seeded_index();
        let engine = SearchEngine::new(SearchOptions {
            max_results: 3,
            min_score: 0.1,
        });
        let results = engine.search(&index, "password reset");
        assert!(!results.is_empty());
        assert_eq!(results[0].article_id, "KB-1");
        assert_eq!(results[0].title, "Password Reset");
        assert!(results[0].score > 0.0);
    }

    #[test]
    fn test_threshold_law() {
        let index = seeded_index();
        let engine = SearchEngine::new(SearchOptions {
            max_results: 10,
            min_score: 0.4,
        });
        for result in engine.search(&index, "password reset") {
            assert!(result.score >= 0.4);
        }
    }

    #[test]
    fn test_cap_law() {
        let index = seeded_index();
        let engine = SearchEngine::default();
        for k in 0..4 {
            let results = engine.search_with(
                &index,
                "password billing theme",
                &SearchOptions {
                    max_results: k,
                    min_score: 0.0,
                },
            );
            assert!(results.len() <= k);
        }
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let index = seeded_index();
        let engine = SearchEngine::default();
        let results = engine.search(&index, "quantum chromodynamics");
        assert!(results.is_empty());
    }

    #[test]
    fn test_title_substring_ranks_strictly_higher() {
        let mut index = ArticleIndex::new();
        index
            .add(
                ArticleDraft::new("Export Data Guide", "walkthrough for other topics")
                    .with_tags(vec!["export".into()]),
            )
            .unwrap();
        index
            .add(
                ArticleDraft::new("Miscellaneous", "walkthrough for other topics")
                    .with_tags(vec!["export".into()]),
            )
            .unwrap();
        let engine = SearchEngine::new(SearchOptions {
            max_results: 5,
            min_score: 0.0,
        });
        let results = engine.search(&index, "export data guide");
        assert_eq!(results[0].article_id, "KB-1");
        assert!(results[0].score > results[1].score);
    }

    #[test]
    fn test_tie_break_preserves_insertion_order() {
        let mut index = ArticleIndex::new();
        // Identical articles except title, same keywords -> identical scores
        index
            .add(ArticleDraft::new("First Twin", "shared network troubleshooting steps"))
            .unwrap();
        index
            .add(ArticleDraft::new("Second Twin", "shared network troubleshooting steps"))
            .unwrap();
        let engine = SearchEngine::new(SearchOptions {
            max_results: 5,
            min_score: 0.0,
        });
        let results = engine.search(&index, "network troubleshooting");
        assert_eq!(results[0].article_id, "KB-1");
        assert_eq!(results[1].article_id, "KB-2");
        assert_eq!(results[0].score, results[1].score);
    }

    #[test]
    fn test_empty_query_still_scores() {
        let index = seeded_index();
        let engine = SearchEngine::default();
        // Defined behavior: a scoring pass happens, nothing clears 0.1
        let results = engine.search(&index, "");
        assert!(results.is_empty());
        // With a zero floor every article survives (at score 0)
        let all = engine.search_with(
            &index,
            "",
            &SearchOptions {
                max_results: 10,
                min_score: 0.0,
            },
        );
        assert_eq!(all.len(), 3);
    }
}
