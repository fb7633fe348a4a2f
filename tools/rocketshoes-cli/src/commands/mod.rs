//! CLI command implementations.

pub mod add;
pub mod clear;
pub mod config;
pub mod remove;
pub mod show;
pub mod update;

use clap::{Args, Subcommand};
use rocketshoes_commerce::ProductId;

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product ID.
    pub id: ProductId,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Product ID.
    pub id: ProductId,
}

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// Product ID.
    pub id: ProductId,

    /// New amount. Zero or less leaves the cart unchanged.
    #[arg(allow_hyphen_values = true)]
    pub amount: i64,
}

/// Arguments for the clear command.
#[derive(Args)]
pub struct ClearArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,

        /// Storefront API base URL.
        #[arg(long, default_value = rocketshoes_data::DEFAULT_BASE_URL)]
        base_url: String,
    },
}
