//! CLI entry point for blogfeed

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blogfeed::commands::preview::PreviewOptions;

#[derive(Parser)]
#[command(name = "blogfeed")]
#[command(version)]
#[command(about = "Index blog posts into a manifest and preview the feed", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Defaults to `index`
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the posts directory and rewrite the manifest
    #[command(alias = "i")]
    Index,

    /// List manifest content
    List {
        /// Type of content to list (post, tag, category)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Delete the manifest
    Clean,

    /// Load the feed from a served page and print the rendered cards
    Preview {
        /// URL of the page hosting the feed
        #[arg(short, long, default_value = "http://localhost:4000/index.html")]
        origin: String,

        /// Search query to apply
        #[arg(short, long)]
        query: Option<String>,

        /// Category chip to select
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Number of pages to load
        #[arg(short, long, default_value = "1")]
        pages: usize,
    },

    /// Serve the site directory locally
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Re-index when posts change
        #[arg(short, long)]
        watch: bool,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blogfeed=debug,info"
    } else {
        "blogfeed=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command.unwrap_or(Commands::Index) {
        Commands::Index => {
            let site = blogfeed::Site::new(&base_dir)?;
            let report = site.index()?;
            println!(
                "{} posts indexed into {}",
                report.indexed,
                report.manifest.display()
            );
        }

        Commands::List { r#type } => {
            let site = blogfeed::Site::new(&base_dir)?;
            blogfeed::commands::list::run(&site, &r#type)?;
        }

        Commands::Clean => {
            let site = blogfeed::Site::new(&base_dir)?;
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Preview {
            origin,
            query,
            category,
            pages,
        } => {
            let site = blogfeed::Site::new(&base_dir)?;
            let options = PreviewOptions {
                origin,
                query,
                category,
                pages,
            };
            let html = blogfeed::commands::preview::run(&site, &options).await?;
            println!("{}", html);
        }

        Commands::Serve {
            port,
            ip,
            open,
            watch,
        } => {
            let site = blogfeed::Site::new(&base_dir)?;

            // Index first so the feed has a manifest to load
            tracing::info!("Indexing posts...");
            let report = site.index()?;
            println!("{} posts indexed", report.indexed);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            blogfeed::server::start(&site, &ip, port, watch, open).await?;
        }

        Commands::Version => {
            println!("blogfeed version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
