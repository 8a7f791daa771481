//! Command-line caller for the portfolio backend.
//!
//! Plays the part of the site's pages: reads config, builds a `Brain` and
//! renders results or the same fallback messages the UI shows.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio_brain::chat::responder;
use folio_brain::{fallback_message, Brain, BrainConfig, ChatMode, ChatSession, ConfigLoader, Testimonial};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "folio", version, about = "Client for the portfolio backend API")]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check the backend health endpoint
    Health,
    /// List stored testimonials
    Testimonials,
    /// Generate and store a new batch of testimonials
    Generate,
    /// Ask the chatbot a question
    Chat {
        question: String,
        /// Reuse an existing session id
        #[arg(long)]
        session_id: Option<String>,
        /// Answer with the offline stub instead of the live endpoint
        #[arg(long)]
        stub: bool,
    },
    /// Check health and fetch testimonials concurrently
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut config = ConfigLoader::load(cli.config.as_deref()).context("loading configuration")?;
    info!(base_url = %config.base_url, "configuration loaded");

    let brain = Brain::from_config(&config).context("building HTTP client")?;

    match cli.command {
        Command::Health => {
            let health = brain.check_health().await?;
            println!("status: {}", health.status);
        }
        Command::Testimonials => {
            let testimonials = fetch_testimonials(&brain).await;
            print_testimonials(&testimonials);
        }
        Command::Generate => {
            let generated = brain.generate_and_store_testimonials().await?;
            println!(
                "{} testimonials generated and stored in {}.",
                generated.testimonial_count, generated.storage_key
            );
            print_testimonials(&fetch_testimonials(&brain).await);
        }
        Command::Chat {
            question,
            session_id,
            stub,
        } => {
            if stub {
                config.chat.mode = ChatMode::Stub;
            }
            chat(&config, brain, &question, session_id).await?;
        }
        Command::Status => {
            let (health, testimonials) = tokio::join!(brain.check_health(), brain.get_testimonials());
            match health {
                Ok(h) => println!("health: {}", h.status),
                Err(e) => println!("health: failed ({e})"),
            }
            match testimonials {
                Ok(list) => println!("testimonials: {}", list.len()),
                Err(e) => println!("testimonials: failed ({e})"),
            }
        }
    }

    Ok(())
}

/// Failures degrade to an empty list, the way the landing page does.
async fn fetch_testimonials(brain: &Brain) -> Vec<Testimonial> {
    match brain.get_testimonials().await {
        Ok(list) => list,
        Err(e) => {
            error!(error = %e, "could not fetch testimonials");
            Vec::new()
        }
    }
}

fn print_testimonials(testimonials: &[Testimonial]) {
    if testimonials.is_empty() {
        println!("No testimonials found. Try generating some or check server logs if generation failed.");
        return;
    }
    for t in testimonials {
        println!("\"{}\"\n  - {}, {} at {}\n", t.quote, t.author, t.role, t.company);
    }
}

async fn chat(config: &BrainConfig, brain: Brain, question: &str, session_id: Option<String>) -> Result<()> {
    let chat_responder = responder(&config.chat, brain);
    let mut session = session_id.map(ChatSession::with_id).unwrap_or_default();

    match session.ask(chat_responder.as_ref(), question).await {
        Ok(response) => {
            println!("{}", response.answer);
            println!("(session {})", session.session_id());
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "chat request failed");
            println!("{}", fallback_message(&e));
            Err(e.into())
        }
    }
}
