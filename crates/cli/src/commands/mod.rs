//! Command definitions and dispatch.

use std::io::{BufRead, Write};

use clap::{Parser, Subcommand};

use ecopuls_client::{ApiClient, ApiConfig, AuthFlow};

pub mod auth;
pub mod custom;
pub mod feedback;
pub mod products;
pub mod users;

/// Shared handles for command execution.
pub struct Context {
    pub client: ApiClient,
    pub auth: AuthFlow,
    pub config: ApiConfig,
}

#[derive(Parser)]
#[command(name = "ecopuls")]
#[command(author, version, about = "Ecopuls storefront admin tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and persist the session
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,

        /// Require the account to be an admin (admin login path)
        #[arg(long)]
        admin: bool,
    },
    /// Register a new account
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,

        /// Register as admin, forwarding `ECOPULS_ADMIN_SECRET`
        #[arg(long)]
        as_admin: bool,
    },
    /// Log out and clear the persisted session
    Logout,
    /// Show the current session
    Whoami,
    /// Manage the product catalog
    Products {
        #[command(subcommand)]
        action: products::ProductAction,
    },
    /// Review customer feedback
    Feedback {
        #[command(subcommand)]
        action: feedback::FeedbackAction,
    },
    /// Review custom product requests
    Custom {
        #[command(subcommand)]
        action: custom::CustomAction,
    },
    /// Manage registered users
    Users {
        #[command(subcommand)]
        action: users::UserAction,
    },
}

/// Route a parsed command to its handler.
pub async fn dispatch(ctx: &Context, command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Login {
            email,
            password,
            admin,
        } => auth::login(ctx, &email, &password, admin).await,
        Commands::Register {
            name,
            email,
            password,
            as_admin,
        } => auth::register(ctx, &name, &email, &password, as_admin).await,
        Commands::Logout => auth::logout(ctx),
        Commands::Whoami => auth::whoami(ctx),
        Commands::Products { action } => products::dispatch(ctx, action).await,
        Commands::Feedback { action } => feedback::dispatch(ctx, action).await,
        Commands::Custom { action } => custom::dispatch(ctx, action).await,
        Commands::Users { action } => users::dispatch(ctx, action).await,
    }
}

/// Blocking yes/no prompt gating deletions. `assume_yes` (the `--yes` flag)
/// skips the prompt; anything other than `y`/`yes` declines.
pub fn confirm(prompt: &str, assume_yes: bool) -> std::io::Result<bool> {
    if assume_yes {
        return Ok(true);
    }

    #[allow(clippy::print_stderr)]
    {
        eprint!("{prompt} [y/N]: ");
        std::io::stderr().flush()?;
    }

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}
