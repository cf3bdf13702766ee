//! Relevance scoring between a query and one article.
//!
//! The score is an unbounded additive sum, not a probability. Downstream
//! consumers rank on relative order, so the arithmetic here is part of the
//! contract: identical inputs must always produce identical scores.

use std::collections::HashSet;

use crate::index::Article;

/// Bonus when the raw query appears verbatim in the article title.
pub const TITLE_BONUS: f64 = 0.3;
/// Smaller bonus when the raw query appears verbatim in the content.
pub const CONTENT_BONUS: f64 = 0.1;
/// Bonus per query keyword equal to a tag or the category label.
pub const TAG_CATEGORY_BONUS: f64 = 0.15;

/// Score one article against a query.
///
/// `query_keywords` must come from [`crate::text::extract_keywords`] on the
/// same `query` so keyword casing lines up with article keywords.
pub fn score(query: &str, query_keywords: &[String], article: &Article) -> f64 {
    let mut total = 0.0;

    // 1. Keyword overlap, normalized by query size (never by article size).
    if !query_keywords.is_empty() {
        let article_keywords: HashSet<&str> =
            article.keywords.iter().map(String::as_str).collect();
        let overlap = query_keywords
            .iter()
            .filter(|k| article_keywords.contains(k.as_str()))
            .count();
        total += overlap as f64 / query_keywords.len().max(1) as f64;
    }

    // 2. Direct substring bonuses, additive and independent.
    let query_lower = query.trim().to_lowercase();
    if !query_lower.is_empty() {
        if article.title.to_lowercase().contains(&query_lower) {
            total += TITLE_BONUS;
        }
        if article.content.to_lowercase().contains(&query_lower) {
            total += CONTENT_BONUS;
        }
    }

    // 3. Tag/category boosts, one per matching keyword, uncapped.
    let category_lower = article.category.to_lowercase();
    let tags_lower: Vec<String> = article.tags.iter().map(|t| t.to_lowercase()).collect();
    for keyword in query_keywords {
        if *keyword == category_lower {
            total += TAG_CATEGORY_BONUS;
        }
        for tag in &tags_lower {
            if keyword == tag {
                total += TAG_CATEGORY_BONUS;
            }
        }
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{ArticleDraft, ArticleIndex};
    use crate::text;

    fn article(title: &str, content: &str, category: &str, tags: &[&str]) -> Article {
        let mut index = ArticleIndex::new();
        index
            .add(
                ArticleDraft::new(title, content)
                    .with_category(category)
                    .with_tags(tags.iter().map(|t| t.to_string()).collect()),
            )
            .unwrap();
        index.all()[0].clone()
    }

    fn score_query(query: &str, article: &Article) -> f64 {
        let keywords = text::extract_keywords(query, 10);
        score(query, &keywords, article)
    }

    #[test]
    fn test_keyword_overlap_normalized_by_query() {
        let a = article("Billing", "Refund and invoice questions", "billing", &[]);
        // One of two query keywords present -> 0.5 overlap component
        let s = score_query("refund shipping", &a);
        assert!((s - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_title_bonus() {
        let a = article("Password Reset", "unrelated body text here", "general", &[]);
        let without = article("Other Title", "unrelated body text here", "general", &[]);
        let q = "password reset";
        assert!(score_query(q, &a) - score_query(q, &without) >= TITLE_BONUS - 1e-9);
    }

    #[test]
    fn test_content_bonus_additive_with_title() {
        let both = article(
            "Password Reset",
            "Follow the password reset link in the email",
            "general",
            &[],
        );
        let s = score_query("password reset", &both);
        // overlap (2/2) + title + content
        assert!((s - (1.0 + TITLE_BONUS + CONTENT_BONUS)).abs() < 1e-9);
    }

    #[test]
    fn test_tag_and_category_bonus_per_match() {
        let a = article(
            "Sign-in help",
            "Troubleshooting sign-in problems",
            "login",
            &["login", "password"],
        );
        // "login" hits both the category and a tag, "password" hits a tag
        let keywords = text::extract_keywords("login password", 10);
        let s = score(
            "login password",
            &keywords,
            &a,
        );
        let tag_part = 3.0 * TAG_CATEGORY_BONUS;
        assert!(s >= tag_part);
    }

    #[test]
    fn test_empty_query_degrades_to_zero() {
        let a = article("Anything", "any content at all", "general", &["tag"]);
        assert_eq!(score("", &[], &a), 0.0);
    }

    #[test]
    fn test_deterministic() {
        let a = article(
            "Password Reset",
            "Steps to reset your password safely",
            "authentication",
            &["password", "login"],
        );
        let s1 = score_query("password reset", &a);
        let s2 = score_query("password reset", &a);
        assert_eq!(s1, s2);
    }
}
