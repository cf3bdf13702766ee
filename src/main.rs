//! # HelpClaw — Customer Support Agent
//!
//! Answers support questions from two sources: the ticket system of record
//! and a local knowledge base with deterministic lexical search.
//!
//! Usage:
//!   helpclaw                      # Interactive chat (default)
//!   helpclaw search "password"    # One-shot knowledge base search
//!   helpclaw ticket PROJ-1001     # Direct ticket lookup
//!   helpclaw add --title .. --content ..   # Add a knowledge base article

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

use helpclaw_agent::SupportAgent;
use helpclaw_core::HelpClawConfig;
use helpclaw_knowledge::{ArticleDraft, ArticleIndex, SearchEngine, SearchOptions};
use helpclaw_tickets::TicketRetriever;

#[derive(Parser)]
#[command(
    name = "helpclaw",
    version,
    about = "🎧 HelpClaw — Customer Support Agent"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (default: ~/.helpclaw/config.toml)
    #[arg(long)]
    config: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive support chat (default)
    Chat,
    /// Search the knowledge base
    Search {
        query: String,
        /// Cap on returned results
        #[arg(long)]
        max_results: Option<usize>,
        /// Minimum relevance score
        #[arg(long)]
        min_score: Option<f64>,
    },
    /// Look up a ticket by id
    Ticket { id: String },
    /// Add an article to the knowledge base
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "helpclaw=debug,helpclaw_knowledge=debug,helpclaw_tickets=debug,helpclaw_agent=debug"
    } else {
        "helpclaw=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => {
            let expanded = shellexpand::tilde(path).to_string();
            HelpClawConfig::load_from(Path::new(&expanded))?
        }
        None => HelpClawConfig::load()?,
    };

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => chat(&config).await,
        Commands::Search {
            query,
            max_results,
            min_score,
        } => search(&config, &query, max_results, min_score),
        Commands::Ticket { id } => ticket(&config, &id).await,
        Commands::Add {
            title,
            content,
            category,
            tags,
        } => add(&config, title, content, category, tags),
    }
}

async fn chat(config: &HelpClawConfig) -> Result<()> {
    let mut agent = SupportAgent::new(config)?;
    println!("HelpClaw support chat. Type /quit to exit, /clear to reset, /history to review.");

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = stdin.lock().lines().next() else {
            break;
        };
        let line = line?;
        let input = line.trim();

        match input {
            "" => continue,
            "/quit" | "/exit" => break,
            "/clear" => {
                agent.clear_history();
                println!("History cleared.");
                continue;
            }
            "/history" => {
                for turn in agent.history(None) {
                    println!("[{}] {}", turn.timestamp, turn.user_query);
                }
                continue;
            }
            _ => {}
        }

        let reply = agent.process_query(input, None).await?;
        println!("\n{}\n", reply.response);
    }
    Ok(())
}

fn search(
    config: &HelpClawConfig,
    query: &str,
    max_results: Option<usize>,
    min_score: Option<f64>,
) -> Result<()> {
    let mut index = ArticleIndex::new();
    index.load_dir(Path::new(&config.knowledge.base_path))?;

    let options = SearchOptions {
        max_results: max_results.unwrap_or(config.search.max_results),
        min_score: min_score.unwrap_or(config.search.min_score),
    };
    let engine = SearchEngine::new(options);
    let results = engine.search(&index, query);

    if results.is_empty() {
        println!("No results.");
        return Ok(());
    }
    for (i, result) in results.iter().enumerate() {
        println!(
            "{}. {} ({}) [{}] score={:.3}",
            i + 1,
            result.title,
            result.article_id,
            result.category,
            result.score
        );
        println!("   {}", result.excerpt);
    }
    Ok(())
}

async fn ticket(config: &HelpClawConfig, id: &str) -> Result<()> {
    let retriever = TicketRetriever::new(&config.tickets, Path::new(&config.tickets.local_file))?;
    match retriever.get_ticket(id).await? {
        Some(ticket) => println!("{}", serde_json::to_string_pretty(&ticket)?),
        None => println!("Ticket {id} not found."),
    }
    Ok(())
}

fn add(
    config: &HelpClawConfig,
    title: String,
    content: String,
    category: Option<String>,
    tags: Vec<String>,
) -> Result<()> {
    let base_path = Path::new(&config.knowledge.base_path);
    let mut index = ArticleIndex::new();
    index.load_dir(base_path)?;

    let mut draft = ArticleDraft::new(title, content).with_tags(tags);
    if let Some(category) = category {
        draft = draft.with_category(category);
    }
    let article = index.add(draft)?;
    println!("Added article {} ({})", article.title, article.id);

    index.save(&base_path.join("knowledge_base.json"))?;
    Ok(())
}
