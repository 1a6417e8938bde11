use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

use taskgate_cli::admin;
use taskgate_cli::seeder::{self, SeedConfig};
use taskgate_config::ServerConfig;
use taskgate_core::{MIN_PASSWORD_LENGTH, ensure_password_policy};
use taskgate_db::{MIGRATOR, PgStore, init_db_pool};

#[derive(Parser)]
#[command(name = "taskgate-cli")]
#[command(about = "Taskgate CLI - Administrative tools for Taskgate", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an administrator account
    CreateAdmin {
        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Grant the admin role to an existing account
    Promote {
        /// Email address of the account to promote
        #[arg(short = 'e', long)]
        email: String,
    },
    /// Seed the database with fake users and tasks
    Seed {
        /// Number of users to create
        #[arg(short = 'u', long, default_value = "10")]
        users: usize,

        /// Number of tasks per user
        #[arg(short = 't', long, default_value = "5")]
        tasks: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let server_config = ServerConfig::from_env()?;
    let pool = init_db_pool(&server_config.database_url)
        .await
        .context("Failed to connect to database")?;
    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    let store = PgStore::new(pool);

    match cli.command {
        Commands::CreateAdmin { email, password } => {
            handle_create_admin(&store, email, password).await
        }
        Commands::Promote { email } => handle_promote(&store, &email).await,
        Commands::Seed { users, tasks } => handle_seed(&store, users, tasks).await,
    }
}

async fn handle_create_admin(
    store: &PgStore,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Email address")
            .interact_text()
            .context("Failed to read email")?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt(format!("Password (min {} characters)", MIN_PASSWORD_LENGTH))
            .with_confirmation("Confirm password", "Passwords don't match")
            .validate_with(|input: &String| {
                ensure_password_policy(input).map_err(|e| e.to_string())
            })
            .interact()
            .context("Failed to read password")?,
    };

    match admin::create_admin(store, &email, &password).await {
        Ok(user) => {
            println!("\n✅ Admin created successfully!");
            println!("   Email: {}", user.email);
            println!("   ID: {}", user.id);
            Ok(())
        }
        Err(e) => {
            eprintln!("\n❌ Error creating admin: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_promote(store: &PgStore, email: &str) -> anyhow::Result<()> {
    match admin::promote(store, email).await {
        Ok(user) => {
            println!("✅ {} is now an admin", user.email);
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Error promoting {}: {}", email, e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed(store: &PgStore, users: usize, tasks: usize) -> anyhow::Result<()> {
    let config = SeedConfig::new(users).with_tasks_per_user(tasks);

    match seeder::seed(store, store, config).await {
        Ok(_) => Ok(()),
        Err(e) => {
            eprintln!("\n❌ Error seeding database: {}", e);
            std::process::exit(1);
        }
    }
}
