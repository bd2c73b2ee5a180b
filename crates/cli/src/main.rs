//! Ecopuls CLI - Admin back-office for the Ecopuls storefront backend.
//!
//! # Usage
//!
//! ```bash
//! # Log in (admin path checks the returned profile's admin flag)
//! ecopuls login -e admin@example.com -p secret --admin
//!
//! # Browse the catalog
//! ecopuls products list
//!
//! # Create a product with variants
//! ecopuls products add -n "Jute Basket" --price 499 \
//!     --size "4 inch:299:8*11.5 cm" --size "6 inch:399:10*14 cm"
//!
//! # Review and prune feedback
//! ecopuls feedback list
//! ecopuls feedback delete <id>
//! ```
//!
//! # Commands
//!
//! - `login` / `register` / `logout` / `whoami` - session management
//! - `products` - catalog CRUD (admin)
//! - `feedback` - feedback listing, submission, deletion
//! - `custom` - custom product requests
//! - `users` - user administration (admin)

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::Parser;

use ecopuls_client::{ApiClient, ApiConfig, AuthFlow, SessionStore};

mod commands;

use commands::{Cli, Context};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ApiConfig::from_env()?;
    let session = SessionStore::file(&config.session_file)?;
    let client = ApiClient::new(&config, session);
    let auth = AuthFlow::new(client.clone());
    let ctx = Context {
        client,
        auth,
        config,
    };

    match commands::dispatch(&ctx, cli.command).await {
        Ok(()) => Ok(()),
        Err(e) => {
            // A 401 means the persisted token expired; drop the session so
            // the next command starts from a clean anonymous state.
            if let Some(api_err) = e.downcast_ref::<ecopuls_client::ApiError>()
                && api_err.is_unauthorized()
            {
                ctx.auth.note_unauthorized()?;
                println!("Session expired. Please log in again.");
            }
            Err(e)
        }
    }
}
