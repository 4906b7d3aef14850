use coffeeshop_cli::seeder::{self, SeedConfig};
use coffeeshop_db::PgPool;
use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "coffeeshop-cli")]
#[command(about = "Coffee Shop CLI - Database administration for the Coffee Shop API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Seed the database with fake drinks
    Seed {
        /// Number of drinks to create
        #[arg(short = 'c', long, default_value = "10")]
        count: usize,

        /// Maximum number of ingredients per recipe
        #[arg(long, default_value = "4")]
        max_ingredients: usize,
    },
    /// Delete every drink, keeping the schema
    Clear {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Drop and recreate the schema. All data is lost.
    Reset {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("❌ DATABASE_URL must be set");
        std::process::exit(1);
    };

    let pool = match coffeeshop_db::init_db_pool(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Migrate => handle_migrate(&pool).await,
        Commands::Seed {
            count,
            max_ingredients,
        } => handle_seed(&pool, count, max_ingredients).await,
        Commands::Clear { yes } => handle_clear(&pool, yes).await,
        Commands::Reset { yes } => handle_reset(&pool, yes).await,
    }
}

fn confirm(prompt: &str, yes: bool) -> bool {
    if yes {
        return true;
    }

    match Confirm::new().with_prompt(prompt).default(false).interact() {
        Ok(answer) => answer,
        Err(e) => {
            eprintln!("❌ Failed to read confirmation: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_migrate(pool: &PgPool) {
    match coffeeshop_db::run_migrations(pool).await {
        Ok(_) => println!("✅ Migrations applied"),
        Err(e) => {
            eprintln!("\n❌ Error applying migrations: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed(pool: &PgPool, count: usize, max_ingredients: usize) {
    let config = SeedConfig::new(count).with_max_ingredients(max_ingredients);

    match seeder::seed_drinks(pool, &config).await {
        Ok(ids) => {
            if ids.len() < count {
                println!(
                    "⚠️  {} generated titles already existed and were skipped",
                    count - ids.len()
                );
            }
            println!("✅ Created {} drinks", ids.len());
        }
        Err(e) => {
            eprintln!("\n❌ Error seeding drinks: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_clear(pool: &PgPool, yes: bool) {
    if !confirm("Delete every drink?", yes) {
        println!("Aborted");
        return;
    }

    match seeder::clear_drinks(pool).await {
        Ok(_) => println!("✅ Cleared all drinks"),
        Err(e) => {
            eprintln!("\n❌ Error clearing drinks: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_reset(pool: &PgPool, yes: bool) {
    if !confirm(
        "This drops the drinks table and all its data. Continue?",
        yes,
    ) {
        println!("Aborted");
        return;
    }

    match coffeeshop_db::reset_schema(pool).await {
        Ok(_) => println!("✅ Schema dropped and recreated"),
        Err(e) => {
            eprintln!("\n❌ Error resetting schema: {}", e);
            std::process::exit(1);
        }
    }
}
