//! Shopfront CLI - terminal front-end for the storefront API.
//!
//! # Usage
//!
//! ```bash
//! # Create an account, then log in
//! shopfront register -u alice -p 'S3cret@pw' -e alice@example.com
//! shopfront login -u alice -p 'S3cret@pw'
//!
//! # Browse the catalog
//! shopfront products list
//! shopfront products search "blue shirt"
//! shopfront products category Tools
//! shopfront categories
//!
//! # Manage the account
//! shopfront profile show
//! shopfront profile update -p 'N3w@password'
//! shopfront profile delete --yes
//!
//! shopfront logout
//! ```
//!
//! Configuration comes from the environment (`SHOPFRONT_API_URL`,
//! `SHOPFRONT_DATA_DIR`), with `.env` support.

#![cfg_attr(not(test), forbid(unsafe_code))]
// All user-facing output goes through stdout/stderr
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

use clap::{Parser, Subcommand};
use secrecy::SecretString;
use shopfront_client::{ApiClient, ClientConfig};
use shopfront_core::{Email, Username};

mod commands;

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about = "Terminal front-end for the Shopfront storefront API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store a session
    Login {
        /// Account username
        #[arg(short, long)]
        username: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Create a new account
    Register {
        /// Desired username (3-20 letters, digits, underscores)
        #[arg(short, long)]
        username: Username,

        /// Desired password (policy is enforced by the server)
        #[arg(short, long)]
        password: String,

        /// Contact email
        #[arg(short, long)]
        email: Email,
    },
    /// Log out and clear the stored session
    Logout,
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// List the product categories
    Categories,
    /// View or manage the account profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Check that the API is reachable
    Health,
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List all products
    List,
    /// Search products by name or description
    Search {
        /// Search terms; under 2 characters lists everything
        query: String,
    },
    /// List the products in one category
    Category {
        /// Category label
        name: String,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show the account profile
    Show,
    /// Change the account password
    Update {
        /// New password (policy is enforced by the server)
        #[arg(short, long)]
        password: String,
    },
    /// Permanently delete the account
    Delete {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        // Command failures have already been reported to the user.
        if !e.is::<commands::CommandFailed>() {
            tracing::error!("Command failed: {e}");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    let client = ApiClient::new(&config)?;

    match cli.command {
        Commands::Login { username, password } => {
            commands::auth::login(&client, &username, SecretString::from(password)).await?;
        }
        Commands::Register {
            username,
            password,
            email,
        } => {
            commands::auth::register(&client, &username, SecretString::from(password), &email)
                .await?;
        }
        Commands::Logout => commands::auth::logout(&client).await?,
        Commands::Products { action } => match action {
            ProductsAction::List => commands::catalog::list_products(&client).await?,
            ProductsAction::Search { query } => {
                commands::catalog::search_products(&client, &query).await?;
            }
            ProductsAction::Category { name } => {
                commands::catalog::products_by_category(&client, name).await?;
            }
        },
        Commands::Categories => commands::catalog::list_categories(&client).await?,
        Commands::Profile { action } => match action {
            ProfileAction::Show => commands::profile::show(&client).await?,
            ProfileAction::Update { password } => {
                commands::profile::update(&client, SecretString::from(password)).await?;
            }
            ProfileAction::Delete { yes } => commands::profile::delete(&client, yes).await?,
        },
        Commands::Health => commands::health(&client).await?,
    }
    Ok(())
}
