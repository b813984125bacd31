use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use iptv_catalog::{
    config::Config,
    models::{CategoryFilter, Channel},
    repositories::JsonChannelRepository,
    services::{CatalogService, CatalogSyncPoller},
    sources::{PlaylistLoader, PlaylistSource},
    utils::sample_data::SAMPLE_PLAYLIST,
    web::WebServer,
};

#[derive(Parser)]
#[command(name = "iptv-catalog")]
#[command(version)]
#[command(about = "IPTV channel catalog with M3U playlist import and an admin API")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path (default: $CONFIG_FILE or config.toml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info", global = true)]
    log_level: String,

    /// Catalog file (overrides config file)
    #[arg(long, value_name = "PATH", global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Listening IP address
        #[arg(short = 'H', long, value_name = "IP")]
        host: Option<String>,

        /// Listening port
        #[arg(short, long, value_name = "PORT")]
        port: Option<u16>,
    },
    /// Import channels from an M3U playlist file or URL
    Import {
        /// Playlist file
        #[arg(value_name = "PATH", conflicts_with_all = ["url", "sample"])]
        path: Option<PathBuf>,

        /// Playlist URL
        #[arg(long, conflicts_with = "sample")]
        url: Option<String>,

        /// Import the built-in sample playlist
        #[arg(long)]
        sample: bool,

        /// Parse and show the channels without importing them
        #[arg(long)]
        dry_run: bool,
    },
    /// List catalog channels
    List {
        /// all, favorites or a category id
        #[arg(long, default_value = "all")]
        category: String,
    },
    /// Search channels by name, description or category
    Search { query: String },
    /// Toggle the favorite mark of a channel
    Favorite { id: String },
    /// Delete a channel
    Remove { id: String },
    /// Show the browsable categories
    Categories,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with specified level
    let log_filter = if cli.log_level == "trace" {
        format!("iptv_catalog={},tower_http=trace", cli.log_level)
    } else {
        format!("iptv_catalog={}", cli.log_level)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = match &cli.config {
        Some(path) => {
            let config = Config::load_from_file(path)?;
            info!("Configuration loaded from: {}", path);
            config
        }
        None => Config::load()?,
    };

    if let Some(catalog) = cli.catalog {
        config.storage.catalog_path = catalog;
    }

    let repository = Arc::new(JsonChannelRepository::open(&config.storage.catalog_path).await?);
    let catalog = Arc::new(CatalogService::new(repository, &config.import).await);

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.web.host = host;
            }
            if let Some(port) = port {
                config.web.port = port;
            }
            serve(config, catalog).await
        }
        Command::Import {
            path,
            url,
            sample,
            dry_run,
        } => {
            let text = match (path, url, sample) {
                (_, _, true) => SAMPLE_PLAYLIST.to_string(),
                (Some(path), _, _) => load(&config, PlaylistSource::File(path)).await?,
                (_, Some(url), _) => load(&config, PlaylistSource::Url(url)).await?,
                (None, None, false) => bail!("import needs a playlist PATH, --url or --sample"),
            };
            import(&catalog, &text, dry_run).await
        }
        Command::List { category } => {
            let filter: CategoryFilter = category.parse().map_err(anyhow::Error::msg)?;
            print_channels(&catalog.list(filter).await?);
            Ok(())
        }
        Command::Search { query } => {
            print_channels(&catalog.search(&query).await?);
            Ok(())
        }
        Command::Favorite { id } => {
            let id = iptv_catalog::web::handlers::parse_channel_id(&id)?;
            let favorite = catalog.toggle_favorite(id).await?;
            println!(
                "{} {}",
                id,
                if favorite { "added to favorites" } else { "removed from favorites" }
            );
            Ok(())
        }
        Command::Remove { id } => {
            let id = iptv_catalog::web::handlers::parse_channel_id(&id)?;
            catalog.delete(id).await?;
            println!("{} deleted", id);
            Ok(())
        }
        Command::Categories => {
            for category in catalog.categories() {
                println!("{:<15} {}", category.id, category.name);
            }
            Ok(())
        }
    }
}

async fn serve(config: Config, catalog: Arc<CatalogService>) -> Result<()> {
    info!("Starting IPTV catalog v{}", env!("CARGO_PKG_VERSION"));

    if config.storage.seed_sample_channels {
        catalog.seed_defaults().await?;
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let poller = CatalogSyncPoller::new(catalog.clone(), config.sync.poll_interval())
        .spawn(shutdown_rx.clone());

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
            return;
        }
        info!("Shutdown requested");
        let _ = shutdown_tx.send(true);
    });

    let web_server = WebServer::new(config, catalog)?;
    info!(
        "Starting web server on {}:{}",
        web_server.host(),
        web_server.port()
    );
    web_server.serve(shutdown_rx).await?;

    poller.await?;
    Ok(())
}

async fn load(config: &Config, source: PlaylistSource) -> Result<String> {
    let loader = PlaylistLoader::from_config(&config.import)?;
    Ok(loader.load(&source).await?)
}

async fn import(catalog: &CatalogService, text: &str, dry_run: bool) -> Result<()> {
    if dry_run {
        let preview = catalog.preview_playlist(text)?;
        for warning in &preview.warnings {
            println!("warning: {}", warning);
        }
        for draft in &preview.channels {
            println!("{:<40} {:<14} {}", draft.name, draft.category.id(), draft.stream_url);
        }
        println!(
            "{} channels found, {} entries skipped (dry run, nothing imported)",
            preview.channels.len(),
            preview.skipped_entries
        );
        return Ok(());
    }

    let summary = catalog.import_playlist(text).await?;
    for warning in &summary.warnings {
        println!("warning: {}", warning);
    }
    print_channels(&summary.channels);
    println!(
        "{} imported, {} duplicates skipped, {} over the channel limit",
        summary.imported, summary.duplicates, summary.rejected
    );
    Ok(())
}

fn print_channels(channels: &[Channel]) {
    for channel in channels {
        println!(
            "{:>4} {} {:<40} {:<14} {}",
            channel.channel_number,
            if channel.is_favorite { "*" } else { " " },
            channel.name,
            channel.category.id(),
            channel.id
        );
    }
}
