mod commands;

use std::path::PathBuf;

use anyhow::Result;
use catalog_core::{DEFAULT_API_URL, DEFAULT_DATA_PATH, DEFAULT_PORT, env_parse_with_default};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Catalog item browser: JSON-backed API server and client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ApiArgs {
    /// API base URL [env: CATALOG_API_URL]
    #[arg(long)]
    url: Option<String>,
}

impl ApiArgs {
    fn base_url(self) -> String {
        self.url
            .unwrap_or_else(|| env_parse_with_default("CATALOG_API_URL", DEFAULT_API_URL.to_owned()))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
        /// Collection file [env: CATALOG_DATA_PATH]
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
    /// List one page of items
    Items {
        /// Case-insensitive name filter
        #[arg(short, long)]
        query: Option<String>,
        #[arg(short, long, default_value = "1")]
        page: usize,
        #[command(flatten)]
        api: ApiArgs,
    },
    /// Show one item
    Item {
        id: String,
        #[command(flatten)]
        api: ApiArgs,
    },
    /// Show catalog statistics
    Stats {
        #[command(flatten)]
        api: ApiArgs,
    },
    /// Create an item
    Add {
        name: String,
        category: String,
        price: f64,
        #[command(flatten)]
        api: ApiArgs,
    },
    /// Browse interactively: type to search, :n / :p to page, :q to quit
    Browse {
        #[command(flatten)]
        api: ApiArgs,
    },
}

fn data_path(flag: Option<PathBuf>) -> PathBuf {
    flag.unwrap_or_else(|| {
        PathBuf::from(env_parse_with_default("CATALOG_DATA_PATH", DEFAULT_DATA_PATH.to_owned()))
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, host, data } => {
            commands::serve::run(port, &host, data_path(data)).await?;
        },
        Commands::Items { query, page, api } => {
            commands::browse::run_items(&api.base_url(), query.as_deref().unwrap_or(""), page)
                .await?;
        },
        Commands::Item { id, api } => commands::browse::run_item(&api.base_url(), &id).await?,
        Commands::Stats { api } => commands::browse::run_stats(&api.base_url()).await?,
        Commands::Add { name, category, price, api } => {
            commands::browse::run_add(&api.base_url(), name, category, price).await?;
        },
        Commands::Browse { api } => commands::interactive::run(&api.base_url()).await?,
    }

    Ok(())
}
