//! CLI entry point for starlog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "starlog")]
#[command(version = "0.1.0")]
#[command(about = "A blog front-end that lists and renders posts from a headless CMS", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch all posts and generate static files
    #[command(alias = "g")]
    Generate,

    /// Start a local server backed by the content source
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// List content from the source (post, author)
    List {
        /// Type of content to list
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Show a single post by slug
    Show {
        /// Slug of the post to show
        slug: String,
    },

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "starlog=debug,info"
    } else {
        "starlog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());

    match cli.command {
        Commands::Generate => {
            let app = starlog::Starlog::new(&base_dir)?;
            tracing::info!("Generating static files...");
            starlog::commands::generate::run(&app).await?;
            println!("Generated successfully!");
        }

        Commands::Server { port, ip } => {
            let app = starlog::Starlog::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            starlog::server::start(&app, &ip, port).await?;
        }

        Commands::List { r#type } => {
            let app = starlog::Starlog::new(&base_dir)?;
            starlog::commands::list::run(&app, &r#type).await?;
        }

        Commands::Show { slug } => {
            let app = starlog::Starlog::new(&base_dir)?;
            starlog::commands::show::run(&app, &slug).await?;
        }

        Commands::Clean => {
            let app = starlog::Starlog::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            starlog::commands::clean::run(&app)?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("starlog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
