use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

use dinolab::cli;
use dinolab::identity::InMemoryIdentityStore;
use dinolab::state::init_app_state;
use dinolab_observability::init_logging;

#[derive(Parser)]
#[command(name = "dinolab")]
#[command(about = "Dinolab auth - issue and verify session tokens", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Issue a session token for the given identity
    Issue {
        /// User id (a random UUID if omitted)
        #[arg(long)]
        id: Option<String>,

        /// Username, used as the token subject
        #[arg(short = 'u', long)]
        username: String,

        /// Email address
        #[arg(short = 'e', long)]
        email: String,

        /// Role to embed; repeat for several roles
        #[arg(short = 'r', long = "role")]
        roles: Vec<String>,
    },
    /// Verify a session token and print its claims
    Verify {
        /// The token string
        token: String,
    },
    /// Run the register/login walkthrough against an in-memory identity store
    Demo,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    // Configuration problems abort before any command runs.
    let state = init_app_state(Arc::new(InMemoryIdentityStore::new()))
        .context("Invalid JWT configuration")?;

    match cli.command {
        Commands::Issue {
            id,
            username,
            email,
            roles,
        } => println!("{}", cli::issue_token(&state, id, &username, &email, roles)?),
        Commands::Verify { token } => println!("{}", cli::verify_token(&state, &token)?),
        Commands::Demo => cli::run_demo(&state).await?,
    }

    Ok(())
}
