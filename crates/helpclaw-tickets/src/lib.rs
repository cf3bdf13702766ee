//! # HelpClaw Tickets
//! Ticket retrieval from the system of record (Jira-style).
//!
//! Two sources behind one trait: a local JSON store (seeded with samples for
//! offline use) and the remote REST API, used as a fallback when credentials
//! are configured. The agent only ever sees [`Ticket`] values — transport
//! never leaks past this crate.

pub mod jira;
pub mod local;
pub mod retriever;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use helpclaw_core::error::Result;

pub use jira::JiraClient;
pub use local::LocalTicketStore;
pub use retriever::{TicketMatch, TicketRetriever};

/// A support ticket as the agent consumes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    #[serde(default)]
    pub assignee: String,
    #[serde(default)]
    pub reporter: String,
    #[serde(default)]
    pub created_date: String,
    #[serde(default)]
    pub updated_date: String,
    #[serde(default)]
    pub comments: Vec<TicketComment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketComment {
    pub author: String,
    pub body: String,
    #[serde(default)]
    pub created_date: String,
}

/// A place tickets can be fetched from. Absence is `None`, not an error.
#[async_trait]
pub trait TicketSource: Send + Sync {
    async fn fetch(&self, ticket_id: &str) -> Result<Option<Ticket>>;
}
