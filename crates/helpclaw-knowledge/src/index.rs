//! In-memory article index.
//!
//! Articles are validated and their keyword sets derived once at ingestion;
//! the index is read-only during search. `add`/`load_dir` are expected to run
//! during setup — callers doing concurrent searches must not mutate.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

use helpclaw_core::error::{HelpClawError, Result};

use crate::text;

const DEFAULT_CATEGORY: &str = "general";

/// A single knowledge-base entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    /// Derived from title + content at ingestion unless author-supplied;
    /// cached for the article's lifetime.
    pub keywords: Vec<String>,
}

/// Raw article record as supplied by storage or a caller.
/// Optional fields are resolved once, at ingestion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleDraft {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
}

impl ArticleDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// Owning collection of articles, insertion-ordered, with id lookup.
#[derive(Debug, Default)]
pub struct ArticleIndex {
    articles: Vec<Article>,
    by_id: HashMap<String, usize>,
    next_id: u64,
}

impl ArticleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and ingest one article. Fails with `Validation` when title or
    /// content is blank, or when a supplied id collides with an existing one.
    pub fn add(&mut self, draft: ArticleDraft) -> Result<&Article> {
        if draft.title.trim().is_empty() {
            return Err(HelpClawError::Validation("article title is required".into()));
        }
        if draft.content.trim().is_empty() {
            return Err(HelpClawError::Validation("article content is required".into()));
        }

        let id = match draft.id {
            Some(id) if !id.trim().is_empty() => {
                if self.by_id.contains_key(&id) {
                    return Err(HelpClawError::Validation(format!(
                        "duplicate article id: {id}"
                    )));
                }
                id
            }
            _ => self.assign_id(),
        };

        // Author-supplied keywords are normalized; otherwise derive from
        // title + content so every search term matches the same casing.
        let keywords = match draft.keywords {
            Some(kws) if !kws.is_empty() => {
                kws.into_iter().map(|k| k.to_lowercase()).collect()
            }
            _ => text::extract_keywords(
                &format!("{} {}", draft.title, draft.content),
                usize::MAX,
            ),
        };

        let category = match draft.category {
            Some(c) if !c.trim().is_empty() => c,
            _ => DEFAULT_CATEGORY.to_string(),
        };

        let article = Article {
            id: id.clone(),
            title: draft.title,
            content: draft.content,
            category,
            tags: draft.tags,
            keywords,
        };

        let pos = self.articles.len();
        self.by_id.insert(id, pos);
        self.articles.push(article);
        let added = &self.articles[pos];
        info!("Added article: {} ({})", added.title, added.id);
        Ok(added)
    }

    fn assign_id(&mut self) -> String {
        loop {
            self.next_id += 1;
            let candidate = format!("KB-{}", self.next_id);
            if !self.by_id.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    /// Exact id lookup; absence is `None`, not an error.
    pub fn get(&self, id: &str) -> Option<&Article> {
        self.by_id.get(id).map(|&i| &self.articles[i])
    }

    /// All articles in insertion order.
    pub fn all(&self) -> &[Article] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Load every `*.json` file under `dir` (each one article object or an
    /// array of them). Malformed files and records are skipped with a
    /// warning; returns the number of articles ingested.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        if !dir.exists() {
            std::fs::create_dir_all(dir)?;
            return Ok(0);
        }

        let mut files: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();

        let mut loaded = 0;
        for file in files {
            let content = match std::fs::read_to_string(&file) {
                Ok(c) => c,
                Err(e) => {
                    warn!("Error reading {}: {e}", file.display());
                    continue;
                }
            };
            let value: serde_json::Value = match serde_json::from_str(&content) {
                Ok(v) => v,
                Err(e) => {
                    warn!("Error parsing {}: {e}", file.display());
                    continue;
                }
            };
            let records = match value {
                serde_json::Value::Array(items) => items,
                other => vec![other],
            };
            for record in records {
                match serde_json::from_value::<ArticleDraft>(record) {
                    Ok(draft) => match self.add(draft) {
                        Ok(_) => loaded += 1,
                        Err(e) => warn!("Skipping article in {}: {e}", file.display()),
                    },
                    Err(e) => warn!("Skipping malformed record in {}: {e}", file.display()),
                }
            }
            debug!("Loaded articles from {}", file.display());
        }

        info!("Knowledge base loaded with {} articles", self.len());
        Ok(loaded)
    }

    /// Serialize all articles to a single JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.articles)?;
        std::fs::write(path, json)?;
        info!("Saved {} articles to {}", self.len(), path.display());
        Ok(())
    }
}
