//! Command-line interface for the discovery engine.

mod commands;

use crate::config::Config;
use clap::{Parser, Subcommand};

/// Bitemap - map-centric restaurant discovery
#[derive(Parser)]
#[command(name = "bitemap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all cities
    #[command(alias = "ls")]
    Cities,

    /// Show restaurants of a city as the numbered list
    Show {
        /// City ID (see `bitemap cities`)
        city_id: i64,

        /// Only show restaurants matching these cuisine tags (comma-separated)
        #[arg(long, value_delimiter = ',')]
        cuisine: Vec<String>,

        /// Annotate distances from this position, as `lat,lon`
        #[arg(long)]
        at: Option<String>,
    },

    /// Present the featured video of a list entry from `show`
    Watch {
        /// City ID
        city_id: i64,

        /// List entry number from `show`
        number: usize,
    },

    /// Print the cuisine catalog by category
    Tags,

    /// Show backend row counts
    #[command(alias = "st")]
    Stats,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub async fn dispatch(cli: Cli, config: Config) -> anyhow::Result<()> {
    match cli.command {
        Commands::Cities => commands::cmd_list_cities(&config).await,
        Commands::Show {
            city_id,
            cuisine,
            at,
        } => commands::cmd_show_city(&config, city_id, &cuisine, at.as_deref()).await,
        Commands::Watch { city_id, number } => commands::cmd_watch(&config, city_id, number).await,
        Commands::Tags => {
            commands::cmd_list_tags();
            Ok(())
        }
        Commands::Stats => commands::cmd_stats(&config).await,
        Commands::Init => commands::cmd_init(&config),
    }
}
