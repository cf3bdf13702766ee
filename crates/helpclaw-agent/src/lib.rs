//! # HelpClaw Agent
//! The support agent pipeline — ties ticket retrieval and knowledge search
//! into one templated reply.
//!
//! Per query:
//! 1. Detect a ticket reference in the free text and fetch the ticket
//! 2. Search the knowledge base for relevant articles
//! 3. Assemble a templated response from both
//! 4. Record the turn in conversation history

pub mod response;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use helpclaw_core::config::HelpClawConfig;
use helpclaw_core::error::Result;
use helpclaw_knowledge::text;
use helpclaw_knowledge::{ArticleIndex, SearchEngine, SearchOptions, SearchResult};
use helpclaw_tickets::{Ticket, TicketRetriever};

/// Knowledge results carried into the reply and its source list.
const TOP_RESULTS: usize = 3;
/// Oldest turns are dropped past this point.
const MAX_HISTORY: usize = 50;

/// Where a piece of the reply came from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Source {
    Ticket { id: String, title: String },
    KnowledgeBase { id: String, title: String },
}

/// One answered query.
#[derive(Debug, Clone, Serialize)]
pub struct AgentReply {
    pub response: String,
    pub ticket: Option<Ticket>,
    pub results: Vec<SearchResult>,
    pub sources: Vec<Source>,
    pub conversation_id: String,
    pub timestamp: String,
}

/// One entry of conversation history.
#[derive(Debug, Clone, Serialize)]
pub struct Turn {
    pub timestamp: String,
    pub user_query: String,
    pub agent_response: String,
    pub ticket_reference: Option<String>,
    pub conversation_id: String,
}

/// The customer support agent. Owns its article index and ticket retriever;
/// lifecycle is tied to the caller, no process-wide state.
pub struct SupportAgent {
    index: ArticleIndex,
    engine: SearchEngine,
    tickets: TicketRetriever,
    history: Vec<Turn>,
}

impl SupportAgent {
    /// Build an agent from config: load articles from the knowledge dir and
    /// open the ticket store.
    pub fn new(config: &HelpClawConfig) -> Result<Self> {
        let mut index = ArticleIndex::new();
        index.load_dir(std::path::Path::new(&config.knowledge.base_path))?;
        let tickets = TicketRetriever::new(
            &config.tickets,
            std::path::Path::new(&config.tickets.local_file),
        )?;
        info!("Support agent initialized with {} articles", index.len());
        Ok(Self {
            index,
            engine: SearchEngine::new(SearchOptions::from(&config.search)),
            tickets,
            history: Vec::new(),
        })
    }

    /// Build from already-constructed parts (tests, embedding callers).
    pub fn from_parts(index: ArticleIndex, engine: SearchEngine, tickets: TicketRetriever) -> Self {
        Self {
            index,
            engine,
            tickets,
            history: Vec::new(),
        }
    }

    pub fn index(&self) -> &ArticleIndex {
        &self.index
    }

    pub fn index_mut(&mut self) -> &mut ArticleIndex {
        &mut self.index
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    /// Answer one customer query.
    pub async fn process_query(
        &mut self,
        user_query: &str,
        conversation_id: Option<String>,
    ) -> Result<AgentReply> {
        info!("Processing query: {}", text::excerpt(user_query, 100));

        let conversation_id =
            conversation_id.unwrap_or_else(|| format!("conv-{}", Uuid::new_v4()));
        let timestamp = Utc::now().to_rfc3339();

        // Step 1: ticket lookup when the query references one
        let ticket_reference = text::extract_ticket_reference(user_query);
        let mut sources = Vec::new();
        let ticket = match &ticket_reference {
            Some(ticket_ref) => {
                info!("Extracted ticket reference: {ticket_ref}");
                let ticket = self.tickets.get_ticket(ticket_ref).await?;
                match &ticket {
                    Some(t) => sources.push(Source::Ticket {
                        id: t.id.clone(),
                        title: t.title.clone(),
                    }),
                    None => warn!("Ticket {ticket_ref} not found"),
                }
                ticket
            }
            None => None,
        };

        // Step 2: knowledge base search
        let mut results = self.engine.search(&self.index, user_query);
        results.truncate(TOP_RESULTS);
        for result in &results {
            sources.push(Source::KnowledgeBase {
                id: result.article_id.clone(),
                title: result.title.clone(),
            });
        }

        // Step 3: templated response
        let response = response::render(
            user_query,
            ticket.as_ref(),
            &results,
            self.history.is_empty(),
        );

        // Step 4: record the turn
        self.history.push(Turn {
            timestamp: timestamp.clone(),
            user_query: user_query.to_string(),
            agent_response: response.clone(),
            ticket_reference,
            conversation_id: conversation_id.clone(),
        });
        if self.history.len() > MAX_HISTORY {
            let excess = self.history.len() - MAX_HISTORY;
            self.history.drain(..excess);
        }

        Ok(AgentReply {
            response,
            ticket,
            results,
            sources,
            conversation_id,
            timestamp,
        })
    }

    /// Conversation history, optionally filtered by conversation id.
    pub fn history(&self, conversation_id: Option<&str>) -> Vec<&Turn> {
        self.history
            .iter()
            .filter(|t| conversation_id.is_none_or(|id| t.conversation_id == id))
            .collect()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helpclaw_core::config::TicketSystemConfig;
    use helpclaw_knowledge::ArticleDraft;

    fn test_agent(dir: &std::path::Path) -> SupportAgent {
        let mut index = ArticleIndex::new();
        index
            .add(
                ArticleDraft::new("Password Reset", "Steps to reset your password safely")
                    .with_category("authentication")
                    .with_tags(vec!["password".into(), "login".into()]),
            )
            .unwrap();
        let tickets = TicketRetriever::new(
            &TicketSystemConfig::default(),
            &dir.join("tickets.json"),
        )
        .unwrap();
        SupportAgent::from_parts(index, SearchEngine::default(), tickets)
    }

    #[tokio::test]
    async fn test_ticket_reference_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut agent = test_agent(dir.path());
        let reply = agent
            .process_query("What's the status of PROJ-1001?", None)
            .await
            .unwrap();
        let ticket = reply.ticket.expect("sample ticket should resolve");
        assert_eq!(ticket.id, "PROJ-1001");
        assert!(reply.response.contains("PROJ-1001"));
        assert!(
            reply
                .sources
                .iter()
                .any(|s| matches!(s, Source::Ticket { id, .. } if id == "PROJ-1001"))
        );
    }

    #[tokio::test]
    async fn test_knowledge_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut agent = test_agent(dir.path());
        let reply = agent
            .process_query("how do I reset my password", None)
            .await
            .unwrap();
        assert!(reply.ticket.is_none());
        assert_eq!(reply.results[0].article_id, "KB-1");
        assert!(reply.response.contains("Password Reset"));
    }

    #[tokio::test]
    async fn test_no_match_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let mut agent = test_agent(dir.path());
        let reply = agent
            .process_query("completely unrelated gibberish zzz", None)
            .await
            .unwrap();
        assert!(reply.results.is_empty());
        assert!(reply.response.contains("couldn't find"));
    }

    #[tokio::test]
    async fn test_history_recorded_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let mut agent = test_agent(dir.path());
        agent
            .process_query("password help", Some("conv-1".into()))
            .await
            .unwrap();
        agent
            .process_query("billing help", Some("conv-2".into()))
            .await
            .unwrap();
        assert_eq!(agent.history(None).len(), 2);
        assert_eq!(agent.history(Some("conv-1")).len(), 1);
        agent.clear_history();
        assert!(agent.history(None).is_empty());
    }

    #[tokio::test]
    async fn test_history_capped() {
        let dir = tempfile::tempdir().unwrap();
        let mut agent = test_agent(dir.path());
        for i in 0..(MAX_HISTORY + 5) {
            agent
                .process_query(&format!("question number {i}"), Some("conv".into()))
                .await
                .unwrap();
        }
        assert_eq!(agent.history(None).len(), MAX_HISTORY);
        // Oldest turns were dropped
        assert!(
            agent.history(None)[0]
                .user_query
                .contains(&format!("number {}", 5))
        );
    }
}
