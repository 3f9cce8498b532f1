use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use schoolhub_cli::admin::create_super_admin;
use schoolhub_cli::seeder::{self, DEMO_PASSWORD, DemoConfig};
use schoolhub_config::DatabaseConfig;
use schoolhub_db::{PgPool, close_pool, init_db_pool};
use schoolhub_models::auth::validate_username;

#[derive(Parser)]
#[command(name = "schoolhub-cli")]
#[command(about = "SchoolHub CLI - Administrative tools for SchoolHub", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an active super admin account
    CreateSuperadmin {
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed grades 1-12, one class per grade and the standard subjects
    SeedCatalog,
    /// Seed fake parents, students and pending teachers
    SeedDemo {
        #[arg(long, default_value = "10")]
        parents: usize,

        #[arg(long, default_value = "2")]
        students_per_parent: usize,

        #[arg(long, default_value = "5")]
        teachers: usize,
    },
}

fn prompt(label: &str, value: Option<String>) -> String {
    value.unwrap_or_else(|| {
        Input::new()
            .with_prompt(label)
            .interact_text()
            .unwrap_or_else(|e| fail(&format!("Failed to read {}", label.to_lowercase()), e))
    })
}

fn fail(context: &str, err: impl std::fmt::Display) -> ! {
    eprintln!("\n❌ {}: {}", context, err);
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let Some(config) = DatabaseConfig::from_env() else {
        fail("Configuration error", "DATABASE_URL must be set");
    };

    let pool = match init_db_pool(&config).await {
        Ok(pool) => pool,
        Err(e) => fail("Failed to connect to database", e),
    };

    match cli.command {
        Commands::CreateSuperadmin {
            username,
            name,
            email,
            password,
        } => handle_create_superadmin(&pool, username, name, email, password).await,
        Commands::SeedCatalog => handle_seed_catalog(&pool).await,
        Commands::SeedDemo {
            parents,
            students_per_parent,
            teachers,
        } => {
            let config = DemoConfig {
                parents,
                students_per_parent,
                teachers,
            };
            handle_seed_demo(&pool, config).await
        }
    }

    close_pool(pool).await;
}

async fn handle_create_superadmin(
    pool: &PgPool,
    username: Option<String>,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    let username = prompt("Username", username);
    if !(3..=32).contains(&username.len()) || validate_username(&username).is_err() {
        fail(
            "Invalid username",
            "use 3 to 32 letters, digits, '.', '_' or '-'",
        );
    }
    let name = prompt("Name", name);
    let email = email.or_else(|| {
        Input::<String>::new()
            .with_prompt("Email (optional)")
            .allow_empty(true)
            .interact_text()
            .ok()
            .filter(|s| !s.trim().is_empty())
    });

    let password = password.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .unwrap_or_else(|e| fail("Failed to read password", e))
    });

    if password.len() < 8 {
        fail("Invalid password", "must be at least 8 characters");
    }

    match create_super_admin(pool, &username, &name, email, &password).await {
        Ok(account) => {
            println!("\n✅ Super admin created successfully!");
            println!("   Username: {}", account.username);
            println!("   ID: {}", account.id);
        }
        Err(e) => fail("Error creating super admin", e),
    }
}

async fn handle_seed_catalog(pool: &PgPool) {
    if let Err(e) = seeder::seed_catalog(pool).await {
        fail("Error seeding catalog", e);
    }
}

async fn handle_seed_demo(pool: &PgPool, config: DemoConfig) {
    match seeder::seed_demo(pool, config).await {
        Ok(summary) => {
            println!(
                "✅ Created {} accounts (password: {})",
                summary.parents + summary.students + summary.teachers,
                DEMO_PASSWORD
            );
        }
        Err(e) => fail("Error seeding demo data", e),
    }
}
