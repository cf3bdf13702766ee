//! Jira-style REST client.
//!
//! Only used when credentials are configured; every failure degrades to
//! "ticket not found" so the agent keeps answering from local data.

use async_trait::async_trait;
use tracing::{error, warn};

use helpclaw_core::config::TicketSystemConfig;
use helpclaw_core::error::{HelpClawError, Result};

use crate::{Ticket, TicketComment, TicketSource};

pub struct JiraClient {
    base_url: String,
    username: String,
    api_token: String,
    client: reqwest::Client,
}

impl JiraClient {
    /// Build a client from config. Returns `None` when credentials are
    /// missing — callers then run local-only.
    pub fn from_config(config: &TicketSystemConfig) -> Result<Option<Self>> {
        let (Some(username), Some(api_token)) = (&config.username, &config.api_token) else {
            warn!("API credentials not configured. Using local tickets only.");
            return Ok(None);
        };

        let client = reqwest::Client::builder()
            .user_agent("HelpClaw/1.0")
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| HelpClawError::Ticket(format!("HTTP client error: {e}")))?;

        Ok(Some(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            username: username.clone(),
            api_token: api_token.clone(),
            client,
        }))
    }
}

#[async_trait]
impl TicketSource for JiraClient {
    async fn fetch(&self, ticket_id: &str) -> Result<Option<Ticket>> {
        let url = format!("{}/rest/api/2/issue/{ticket_id}", self.base_url);

        let response = match self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.api_token))
            .header("Accept", "application/json")
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                error!("Error fetching ticket from API: {e}");
                return Ok(None);
            }
        };

        if !response.status().is_success() {
            error!("API request failed with status {}", response.status());
            return Ok(None);
        }

        match response.json::<serde_json::Value>().await {
            Ok(data) => Ok(Some(transform_issue(&data))),
            Err(e) => {
                error!("Error decoding API response: {e}");
                Ok(None)
            }
        }
    }
}

/// Map the Jira issue layout onto [`Ticket`].
fn transform_issue(issue: &serde_json::Value) -> Ticket {
    let fields = &issue["fields"];
    let text = |v: &serde_json::Value| v.as_str().unwrap_or_default().to_string();

    let comments = fields["comment"]["comments"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .map(|c| TicketComment {
                    author: text(&c["author"]["displayName"]),
                    body: text(&c["body"]),
                    created_date: text(&c["created"]),
                })
                .collect()
        })
        .unwrap_or_default();

    Ticket {
        id: text(&issue["key"]),
        title: text(&fields["summary"]),
        description: text(&fields["description"]),
        status: text(&fields["status"]["name"]),
        priority: text(&fields["priority"]["name"]),
        assignee: text(&fields["assignee"]["displayName"]),
        reporter: text(&fields["reporter"]["displayName"]),
        created_date: text(&fields["created"]),
        updated_date: text(&fields["updated"]),
        comments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_requires_credentials() {
        let config = TicketSystemConfig::default();
        assert!(JiraClient::from_config(&config).unwrap().is_none());

        let config = TicketSystemConfig {
            username: Some("agent".into()),
            api_token: Some("token".into()),
            ..TicketSystemConfig::default()
        };
        assert!(JiraClient::from_config(&config).unwrap().is_some());
    }

    #[test]
    fn test_transform_issue() {
        let issue = serde_json::json!({
            "key": "PROJ-7",
            "fields": {
                "summary": "Broken export",
                "description": "CSV export times out",
                "status": { "name": "Open" },
                "priority": { "name": "High" },
                "assignee": { "displayName": "Dana" },
                "reporter": { "displayName": "Sam" },
                "created": "2024-02-01T08:00:00Z",
                "updated": "2024-02-02T08:00:00Z",
                "comment": { "comments": [
                    { "author": { "displayName": "Dana" },
                      "body": "Investigating",
                      "created": "2024-02-01T09:00:00Z" }
                ]}
            }
        });
        let ticket = transform_issue(&issue);
        assert_eq!(ticket.id, "PROJ-7");
        assert_eq!(ticket.status, "Open");
        assert_eq!(ticket.comments.len(), 1);
        assert_eq!(ticket.comments[0].author, "Dana");
    }

    #[test]
    fn test_transform_issue_missing_fields() {
        let ticket = transform_issue(&serde_json::json!({ "key": "PROJ-8", "fields": {} }));
        assert_eq!(ticket.id, "PROJ-8");
        assert!(ticket.title.is_empty());
        assert!(ticket.comments.is_empty());
    }
}
