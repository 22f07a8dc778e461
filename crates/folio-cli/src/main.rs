use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use folio_cli::seeder::{self, DEFAULT_SEED_PASSWORD, SeedConfig};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

#[derive(Parser)]
#[command(name = "folio-cli")]
#[command(about = "Folio CLI - Administrative tools for the Folio CMS", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new admin account
    CreateAdmin {
        /// Username of the admin
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with the demo admin, the demo template, fake users and contents
    Seed {
        /// Number of users to create
        #[arg(short = 'u', long, default_value = "10")]
        users: usize,

        /// Number of contents per user
        #[arg(short = 'c', long, default_value = "5")]
        contents: usize,

        /// Password shared by every seeded account
        #[arg(long, default_value = DEFAULT_SEED_PASSWORD)]
        password: String,
    },
    /// Seed only the demo template
    SeedTemplate,
    /// Clear data created by the seeder (keeps admins and API-created data)
    ClearSeed {
        /// Only clear the run with this tag (printed by `seed`)
        #[arg(short = 'r', long)]
        run: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;

    match cli.command {
        Commands::CreateAdmin {
            username,
            email,
            password,
        } => handle_create_admin(&pool, username, email, password).await,
        Commands::Seed {
            users,
            contents,
            password,
        } => {
            let config = SeedConfig::new(users)
                .with_contents_per_user(contents)
                .with_password(password);
            seeder::seed_all(&pool, config).await
        }
        Commands::SeedTemplate => {
            let id = seeder::templates::seed_demo_template(&pool, &seeder::new_run_tag()).await?;
            println!("✅ Demo template id: {}", id);
            Ok(())
        }
        Commands::ClearSeed { run } => seeder::clear_all(&pool, run.as_deref()).await,
    }
}

async fn handle_create_admin(
    pool: &PgPool,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let username = match username {
        Some(username) => username,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let id = seeder::users::create_admin(pool, &username, &email, &password).await?;

    println!("\n✅ Admin created successfully!");
    println!("   Id: {}", id);
    println!("   Username: {}", username.trim());
    println!("   Email: {}", email.trim().to_lowercase());

    Ok(())
}
