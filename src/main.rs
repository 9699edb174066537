//! Docent - Folder-backed exhibit content management for BLE beacons
//!
//! Command-line surface for composing exhibits: create them, assign and
//! reorder per-beacon content, and retire beacons or whole exhibits.

use anyhow::Result;
use clap::{Parser, Subcommand};
use docent::beacons::{Beacon, BeaconRegistry, MacAddress};
use docent::exhibits::{Exhibit, ExhibitManager};
use docent::sync::NoopSynchronizer;
use docent::DocentConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "docent")]
#[command(author = "Docent Team")]
#[command(version)]
#[command(about = "Folder-backed exhibit content management for BLE beacons")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "DOCENT_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all exhibits
    List,

    /// Create a new exhibit
    Create {
        /// Exhibit name
        name: String,
    },

    /// Show one exhibit with its per-beacon content
    Show {
        /// Exhibit identifier
        id: i64,
    },

    /// Rename an exhibit
    SetTitle {
        /// Exhibit identifier
        id: i64,

        /// New title
        title: String,
    },

    /// Set an exhibit's description
    SetDescription {
        /// Exhibit identifier
        id: i64,

        /// New description
        description: String,
    },

    /// Configure an exhibit for an additional beacon
    AddBeacon {
        /// Exhibit identifier
        id: i64,

        /// Beacon address (must be known to the registry)
        address: String,
    },

    /// Remove a beacon and all its content from an exhibit
    RemoveBeacon {
        /// Exhibit identifier
        id: i64,

        /// Beacon address
        address: String,
    },

    /// Copy a media file into an exhibit for one beacon
    AddContent {
        /// Exhibit identifier
        id: i64,

        /// Beacon address
        address: String,

        /// Media file to copy in
        file: PathBuf,
    },

    /// Remove one content item from a beacon
    RemoveContent {
        /// Exhibit identifier
        id: i64,

        /// Beacon address
        address: String,

        /// Content file name
        name: String,
    },

    /// Move a content item to a new position in a beacon's order
    Reorder {
        /// Exhibit identifier
        id: i64,

        /// Beacon address
        address: String,

        /// Current position (0-based)
        from: usize,

        /// New position (0-based)
        to: usize,
    },

    /// Delete an exhibit and everything it stores
    Remove {
        /// Exhibit identifier
        id: i64,
    },

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("docent={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        let content = std::fs::read_to_string(config_path)?;
        toml::from_str(&content)?
    } else {
        DocentConfig::default()
    };

    if let Commands::Config { default } = cli.command {
        return show_config(if default { None } else { Some(&config) });
    }

    let registry = Arc::new(config.registry());
    let manager = ExhibitManager::new(
        config.storage.exhibits_dir.clone(),
        registry.clone(),
        Arc::new(NoopSynchronizer),
    )
    .await?;

    match cli.command {
        Commands::List => {
            list_exhibits(&manager).await?;
        }
        Commands::Create { name } => {
            let exhibit = manager.create(&name).await?;
            println!("Created exhibit {} ({})", exhibit.title(), exhibit.id());
        }
        Commands::Show { id } => {
            let exhibit = manager.open(id).await?;
            show_exhibit(&exhibit, registry.as_ref());
        }
        Commands::SetTitle { id, title } => {
            let mut exhibit = manager.open(id).await?;
            exhibit.set_title(title).await?;
            println!("Renamed exhibit {} to {}", id, exhibit.title());
        }
        Commands::SetDescription { id, description } => {
            let mut exhibit = manager.open(id).await?;
            exhibit.set_description(description).await?;
            println!("Updated description of exhibit {}", id);
        }
        Commands::AddBeacon { id, address } => {
            let address = MacAddress::parse(&address)?;
            let beacon = registry.beacon_by_address(&address)?;
            let mut exhibit = manager.open(id).await?;
            exhibit.configure_for_additional_beacon(&beacon).await?;
            println!("Exhibit {} now stores content for {}", id, address);
        }
        Commands::RemoveBeacon { id, address } => {
            let address = MacAddress::parse(&address)?;
            let beacon = registry
                .beacon_by_address(&address)
                .unwrap_or_else(|_| Beacon::new(address, address.to_string()));
            let mut exhibit = manager.open(id).await?;
            exhibit.configure_for_removed_beacon(&beacon).await?;
            println!("Removed {} from exhibit {}", address, id);
        }
        Commands::AddContent { id, address, file } => {
            let address = MacAddress::parse(&address)?;
            let mut exhibit = manager.open(id).await?;
            exhibit.insert_content(&file, &address).await?;
            println!("Added {} to {} on exhibit {}", file.display(), address, id);
        }
        Commands::RemoveContent { id, address, name } => {
            let address = MacAddress::parse(&address)?;
            let mut exhibit = manager.open(id).await?;
            exhibit.remove_content(&name, &address).await?;
            println!("Removed {} from {} on exhibit {}", name, address, id);
        }
        Commands::Reorder {
            id,
            address,
            from,
            to,
        } => {
            let address = MacAddress::parse(&address)?;
            let mut exhibit = manager.open(id).await?;
            reorder_content(&mut exhibit, &address, from, to).await?;
            println!("Moved item {} to position {} on {}", from, to, address);
        }
        Commands::Remove { id } => {
            manager.remove(id).await?;
            println!("Deleted exhibit {}", id);
        }
        Commands::Config { .. } => unreachable!("handled above"),
    }

    Ok(())
}

async fn list_exhibits(manager: &ExhibitManager) -> Result<()> {
    let exhibits = manager.list().await?;
    if exhibits.is_empty() {
        println!("No exhibits yet. Create one with `docent create <name>`.");
        return Ok(());
    }

    for exhibit in exhibits {
        let active = if exhibit.is_active() { " [active]" } else { "" };
        println!(
            "{:>20}  {}{}  ({} beacons)",
            exhibit.id(),
            exhibit.title(),
            active,
            exhibit.configured_beacons().len()
        );
    }
    Ok(())
}

fn show_exhibit(exhibit: &Exhibit, registry: &dyn BeaconRegistry) {
    println!("Exhibit: {} ({})", exhibit.title(), exhibit.id());
    if !exhibit.description().is_empty() {
        println!("  {}", exhibit.description());
    }
    println!("  Folder: {}", exhibit.root_folder().display());
    println!("  Active: {}", exhibit.is_active());

    for address in exhibit.configured_beacons() {
        let label = registry
            .beacon_by_address(&address)
            .map(|b| format!("{} ({})", b.friendly_name, address))
            .unwrap_or_else(|_| address.to_string());
        println!("  Beacon {}", label);

        match exhibit.content_for_beacon(&address) {
            Some(contents) if !contents.is_empty() => {
                for (position, content) in contents.iter().enumerate() {
                    println!("    {}. {} ({:?})", position, content.name(), content.kind());
                }
            }
            _ => println!("    (no content)"),
        }
    }
}

async fn reorder_content(
    exhibit: &mut Exhibit,
    address: &MacAddress,
    from: usize,
    to: usize,
) -> Result<()> {
    let contents = exhibit
        .content_for_beacon_mut(address)
        .ok_or_else(|| anyhow::anyhow!("beacon {} isn't configured for this exhibit", address))?;

    if from >= contents.len() || to >= contents.len() {
        anyhow::bail!(
            "positions must be within 0..{}, got {} -> {}",
            contents.len(),
            from,
            to
        );
    }

    let item = contents.remove(from);
    contents.insert(to, item);
    exhibit.persist_content_changes(address).await?;
    Ok(())
}

fn show_config(config: Option<&DocentConfig>) -> Result<()> {
    let config = config.cloned().unwrap_or_default();
    let toml = toml::to_string_pretty(&config)?;
    println!("{}", toml);
    Ok(())
}
