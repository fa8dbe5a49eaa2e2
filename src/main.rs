use anyhow::Result;
use clap::{Parser, Subcommand};
use linkshort::{config, server};
use tracing_subscriber::EnvFilter;

/// A small URL shortener.
#[derive(Parser)]
#[command(name = "linkshort")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// Create the storage schema and exit
    Migrate,
}

fn init_tracing(level: &str, format: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let config = config::load_from_env()?;
            init_tracing(&config.log_level, &config.log_format);
            config.print_summary();

            server::run(config).await
        }
        Commands::Migrate => {
            let level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
            let format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
            init_tracing(&level, &format);

            let database = config::load_database_from_env()?;
            tracing::info!("Migrating {}", config::mask_connection_string(&database.url));

            server::migrate(database).await
        }
    }
}
