//! Reply templating.
//!
//! Assembles the final text from ticket details and ranked articles.
//! Pure string work — ordering of sections is part of the reply contract.

use helpclaw_knowledge::SearchResult;
use helpclaw_knowledge::text;
use helpclaw_tickets::Ticket;

/// Ticket comments shown under "Latest Updates".
const RECENT_COMMENTS: usize = 2;
/// Truncation for quoted comment/description snippets.
const SNIPPET_CHARS: usize = 200;

/// Render the full reply.
pub fn render(
    user_query: &str,
    ticket: Option<&Ticket>,
    results: &[SearchResult],
    first_turn: bool,
) -> String {
    let mut parts: Vec<String> = Vec::new();

    if first_turn {
        parts.push("Hello! I'm your customer support agent. How can I help you today?".into());
        parts.push(String::new());
    }

    if let Some(ticket) = ticket {
        parts.push("**Ticket Information:**".into());
        parts.push(format!("Ticket ID: {}", ticket.id));
        parts.push(format!("Title: {}", ticket.title));
        parts.push(format!("Status: {}", ticket.status));
        parts.push(format!("Priority: {}", ticket.priority));
        if !ticket.description.is_empty() {
            parts.push(format!("\nDescription: {}", ticket.description));
        }
        if !ticket.comments.is_empty() {
            parts.push("\n**Latest Updates:**".into());
            let skip = ticket.comments.len().saturating_sub(RECENT_COMMENTS);
            for comment in &ticket.comments[skip..] {
                parts.push(format!(
                    "  - {}: {}",
                    comment.author,
                    text::excerpt(&comment.body, SNIPPET_CHARS)
                ));
            }
        }
        parts.push(String::new());
    }

    if !results.is_empty() {
        parts.push("**Relevant Information:**".into());
        for (idx, result) in results.iter().enumerate() {
            parts.push(format!(
                "\n{}. **{}** ({})",
                idx + 1,
                result.title,
                result.category
            ));
            parts.push(format!("   {}", result.excerpt));
        }
        parts.push(String::new());
    }

    let contextual = contextual_response(user_query, ticket, results);
    if !contextual.is_empty() {
        parts.push("**Based on your query:**".into());
        parts.push(contextual);
    }

    if ticket.is_none() && results.is_empty() {
        parts.push(
            "I couldn't find specific information related to your query. \
             Could you please provide more details or a ticket reference? \
             I'm here to help you!"
                .into(),
        );
    }

    parts.push("\n---".into());
    parts.push("Is there anything else I can help you with?".into());

    parts.join("\n")
}

/// Pattern-match common intents against what was retrieved.
fn contextual_response(
    user_query: &str,
    ticket: Option<&Ticket>,
    results: &[SearchResult],
) -> String {
    let query_lower = user_query.to_lowercase();

    if query_lower.contains("status") {
        if let Some(ticket) = ticket {
            return format!("Your ticket is currently **{}**.", ticket.status);
        }
    }

    if query_lower.contains("progress") {
        if let Some(ticket) = ticket {
            if let Some(latest) = ticket.comments.last() {
                return format!(
                    "Latest update on your ticket: {}",
                    text::excerpt(&latest.body, SNIPPET_CHARS)
                );
            }
        }
    }

    if query_lower.contains("resolve") || query_lower.contains("fix") {
        if let Some(top) = results.first() {
            return format!(
                "Based on our knowledge base, here's a potential solution: {}",
                top.excerpt
            );
        }
        return "I'm looking into solutions for you. Please check the relevant information above."
            .into();
    }

    if query_lower.contains("error") || query_lower.contains("issue") {
        if let Some(ticket) = ticket {
            return format!(
                "I see you're experiencing an issue. Your ticket describes: {}",
                text::excerpt(&ticket.description, SNIPPET_CHARS)
            );
        }
    }

    if !results.is_empty() {
        return "I've found some relevant information above that might help address your \
                concern. Please review the details and let me know if you need further \
                assistance."
            .into();
    }

    String::new()
}
