//! Combined ticket retrieval: local store first, remote API as fallback.

use tracing::{info, warn};

use helpclaw_core::config::TicketSystemConfig;
use helpclaw_core::error::Result;
use helpclaw_knowledge::text;

use crate::{JiraClient, LocalTicketStore, Ticket, TicketSource};

// Lexical ticket-search weights, kept apart from article scoring on purpose:
// ticket ids and titles are far stronger signals than free text.
const ID_WEIGHT: f64 = 10.0;
const TITLE_WEIGHT: f64 = 5.0;
const DESCRIPTION_WEIGHT: f64 = 2.0;
const SIMILARITY_WEIGHT: f64 = 3.0;

/// A ticket with its lexical match score.
#[derive(Debug, Clone)]
pub struct TicketMatch {
    pub ticket: Ticket,
    pub score: f64,
}

pub struct TicketRetriever {
    local: LocalTicketStore,
    api: Option<JiraClient>,
}

impl TicketRetriever {
    pub fn new(config: &TicketSystemConfig, local_path: &std::path::Path) -> Result<Self> {
        let local = LocalTicketStore::new(local_path)?;
        let api = JiraClient::from_config(config)?;
        info!("Ticket retriever initialized for {}", config.url);
        Ok(Self { local, api })
    }

    /// Retrieve a ticket by id. The id is whitespace-cleaned and uppercased
    /// before lookup; absence is `None`.
    pub async fn get_ticket(&self, ticket_id: &str) -> Result<Option<Ticket>> {
        let ticket_id = text::clean_text(ticket_id).to_uppercase();

        if let Some(ticket) = self.local.fetch(&ticket_id).await? {
            info!("Retrieved ticket {ticket_id} from local storage");
            return Ok(Some(ticket));
        }

        if let Some(api) = &self.api {
            if let Some(ticket) = api.fetch(&ticket_id).await? {
                info!("Retrieved ticket {ticket_id} from API");
                return Ok(Some(ticket));
            }
        }

        warn!("Ticket {ticket_id} not found");
        Ok(None)
    }

    /// Lexical search over the local store: substring hits on id, title and
    /// description plus word-set similarity, sorted descending.
    pub fn search(&self, query: &str, max_results: usize) -> Result<Vec<TicketMatch>> {
        let query_lower = query.to_lowercase();

        let mut matches: Vec<TicketMatch> = self
            .local
            .all()?
            .into_iter()
            .filter_map(|ticket| {
                let mut score = 0.0;
                if !query_lower.is_empty() {
                    if ticket.id.to_lowercase().contains(&query_lower) {
                        score += ID_WEIGHT;
                    }
                    if ticket.title.to_lowercase().contains(&query_lower) {
                        score += TITLE_WEIGHT;
                    }
                    if ticket.description.to_lowercase().contains(&query_lower) {
                        score += DESCRIPTION_WEIGHT;
                    }
                }
                let text_content = format!("{} {}", ticket.title, ticket.description);
                score += text::calculate_similarity(query, &text_content) * SIMILARITY_WEIGHT;

                (score > 0.0).then_some(TicketMatch { ticket, score })
            })
            .collect();

        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches.truncate(max_results);
        info!(
            "Ticket search for '{query}' returned {} results",
            matches.len()
        );
        Ok(matches)
    }
}
