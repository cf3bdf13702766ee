//! File-backed ticket store.
//!
//! Stands in for the real ticket system during development and demos, and
//! doubles as an offline cache. Seeded with sample tickets on first use.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use helpclaw_core::error::{HelpClawError, Result};

use crate::{Ticket, TicketComment, TicketSource};

pub struct LocalTicketStore {
    path: PathBuf,
}

impl LocalTicketStore {
    /// Open the store at `path`, seeding sample tickets when the file is
    /// missing.
    pub fn new(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if !path.exists() {
            let samples = sample_tickets();
            let json = serde_json::to_string_pretty(&samples)?;
            std::fs::write(path, json)?;
            info!(
                "Initialized local tickets file with {} sample tickets",
                samples.len()
            );
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// All tickets in file order. A corrupt file is an error here (the
    /// caller seeded it), not a silent empty list.
    pub fn all(&self) -> Result<Vec<Ticket>> {
        let content = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&content)
            .map_err(|e| HelpClawError::Ticket(format!("Corrupt ticket store: {e}")))
    }

    /// Lookup by id, case-insensitive.
    pub fn get(&self, ticket_id: &str) -> Result<Option<Ticket>> {
        let wanted = ticket_id.to_uppercase();
        Ok(self
            .all()?
            .into_iter()
            .find(|t| t.id.to_uppercase() == wanted))
    }
}

#[async_trait]
impl TicketSource for LocalTicketStore {
    async fn fetch(&self, ticket_id: &str) -> Result<Option<Ticket>> {
        match self.get(ticket_id) {
            Ok(ticket) => Ok(ticket),
            Err(e) => {
                warn!("Error reading local tickets: {e}");
                Ok(None)
            }
        }
    }
}

fn sample_tickets() -> Vec<Ticket> {
    vec![
        Ticket {
            id: "PROJ-1001".into(),
            title: "Unable to login to application".into(),
            description:
                "User is experiencing login issues with error message 'Invalid credentials'"
                    .into(),
            status: "Open".into(),
            priority: "High".into(),
            assignee: "support-team".into(),
            reporter: "customer@example.com".into(),
            created_date: "2024-01-15T10:30:00Z".into(),
            updated_date: "2024-01-15T14:20:00Z".into(),
            comments: vec![TicketComment {
                author: "support-team".into(),
                body: "Please check if you're using the correct password".into(),
                created_date: "2024-01-15T11:00:00Z".into(),
            }],
        },
        Ticket {
            id: "PROJ-1002".into(),
            title: "Feature request: Add dark mode".into(),
            description: "Customer requests dark mode theme for better visibility".into(),
            status: "In Progress".into(),
            priority: "Medium".into(),
            assignee: "dev-team".into(),
            reporter: "user@example.com".into(),
            created_date: "2024-01-14T09:15:00Z".into(),
            updated_date: "2024-01-16T08:45:00Z".into(),
            comments: vec![TicketComment {
                author: "dev-team".into(),
                body: "Dark mode is planned for Q2 release".into(),
                created_date: "2024-01-14T16:30:00Z".into(),
            }],
        },
        Ticket {
            id: "PROJ-1003".into(),
            title: "Payment processing error".into(),
            description:
                "Transaction failed with error code 500. Customer unable to complete purchase."
                    .into(),
            status: "Resolved".into(),
            priority: "Critical".into(),
            assignee: "payment-team".into(),
            reporter: "merchant@example.com".into(),
            created_date: "2024-01-13T15:20:00Z".into(),
            updated_date: "2024-01-14T10:10:00Z".into(),
            comments: vec![TicketComment {
                author: "payment-team".into(),
                body: "Issue resolved. Was a temporary service outage.".into(),
                created_date: "2024-01-14T10:10:00Z".into(),
            }],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeds_samples_on_first_use() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tickets.json");
        let store = LocalTicketStore::new(&path).unwrap();
        assert!(path.exists());
        assert_eq!(store.all().unwrap().len(), 3);
    }

    #[test]
    fn test_get_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalTicketStore::new(&dir.path().join("tickets.json")).unwrap();
        let ticket = store.get("proj-1001").unwrap().unwrap();
        assert_eq!(ticket.id, "PROJ-1001");
        assert_eq!(ticket.status, "Open");
        assert!(store.get("PROJ-9999").unwrap().is_none());
    }

    #[test]
    fn test_existing_file_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tickets.json");
        std::fs::write(&path, "[]").unwrap();
        let store = LocalTicketStore::new(&path).unwrap();
        assert!(store.all().unwrap().is_empty());
    }
}
