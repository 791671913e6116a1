use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use registrar_auth::CredentialService;
use registrar_cli::seeder::{self, SeedConfig};
use registrar_config::AppConfig;
use registrar_db::PgStore;

#[derive(Parser)]
#[command(name = "registrar-cli")]
#[command(about = "Registrar CLI - Administrative tools for the Registrar API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Create a new administrator account
    CreateAdmin {
        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed demo groups, one account per role and generated students
    Seed {
        /// Number of generated students
        #[arg(short = 's', long, default_value = "20")]
        students: usize,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("\n❌ {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    let store = PgStore::connect(&config.database)
        .await
        .context("Failed to connect to database")?;
    let credentials = CredentialService::new(config.jwt, config.password);

    match cli.command {
        Commands::Migrate => {
            store.migrate().await.context("Failed to run migrations")?;
            println!("✅ Migrations applied");
        }
        Commands::CreateAdmin { email, password } => {
            store.migrate().await.context("Failed to run migrations")?;
            handle_create_admin(&store, &credentials, email, password).await?;
        }
        Commands::Seed { students } => {
            store.migrate().await.context("Failed to run migrations")?;
            let summary = seeder::seed_all(&store, &credentials, SeedConfig { students })
                .await
                .map_err(|e| anyhow::anyhow!("Error seeding database: {}", e.error))?;
            println!(
                "   {} groups, {} new accounts, {} students",
                summary.groups.len(),
                summary.accounts,
                summary.students
            );
        }
    }

    Ok(())
}

async fn handle_create_admin(
    store: &PgStore,
    credentials: &CredentialService,
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
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    seeder::create_admin(store, credentials, &email, &password)
        .await
        .map_err(|e| anyhow::anyhow!("Error creating admin: {}", e.error))?;

    println!("\n✅ Admin created successfully!");
    println!("   Email: {email}");
    Ok(())
}
