//! Command line interface for `privilege-admin`

pub mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use hotel_privileges::config::StorageBackend;
use hotel_privileges::{Config, PrivilegeFlag};

/// Inspect and edit hotel page privileges
#[derive(Debug, Parser)]
#[command(name = "privilege-admin", version, about)]
pub struct Cli {
    /// YAML configuration file
    #[arg(short, long, env = "PRIVILEGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Menu tree (YAML or JSON), overrides the configured one
    #[arg(long)]
    pub menu: Option<String>,

    /// Storage backend, overrides the configured one
    #[arg(long)]
    pub storage: Option<StorageBackend>,

    /// Directory for the file backend
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Save without checking for concurrent edits
    #[arg(long)]
    pub no_locking: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List catalog pages, or the editing matrix for a hotel/role/user selection
    Pages(PagesArgs),
    /// Enable or disable a page for a hotel
    Entitle(EntitleArgs),
    /// Toggle one flag of a role grant
    Grant(GrantArgs),
    /// Toggle one flag of a user override, or clear it
    Override(OverrideArgs),
    /// Show the OR-merged view of a set of roles
    Merged(MergedArgs),
    /// Show a user's effective privilege under one role
    Effective(EffectiveArgs),
    /// Check whether a user holding the given roles may perform an action
    Check(CheckArgs),
}

#[derive(Debug, Args)]
pub struct PagesArgs {
    #[arg(long)]
    pub hotel: Option<String>,
    #[arg(long)]
    pub role: Option<String>,
    #[arg(long)]
    pub user: Option<String>,
}

#[derive(Debug, Args)]
pub struct EntitleArgs {
    #[arg(long)]
    pub hotel: String,
    #[arg(long)]
    pub page: String,
    /// Disable instead of enable
    #[arg(long)]
    pub disable: bool,
}

#[derive(Debug, Args)]
pub struct GrantArgs {
    #[arg(long)]
    pub hotel: String,
    #[arg(long)]
    pub role: String,
    #[arg(long)]
    pub page: String,
    #[arg(long)]
    pub flag: PrivilegeFlag,
}

#[derive(Debug, Args)]
pub struct OverrideArgs {
    #[arg(long)]
    pub hotel: String,
    #[arg(long)]
    pub role: String,
    #[arg(long)]
    pub user: String,
    #[arg(long)]
    pub page: String,
    #[arg(long, required_unless_present = "clear", conflicts_with = "clear")]
    pub flag: Option<PrivilegeFlag>,
    /// Remove the override so the role grant applies again
    #[arg(long)]
    pub clear: bool,
}

#[derive(Debug, Args)]
pub struct MergedArgs {
    #[arg(long)]
    pub hotel: String,
    /// Held role names
    #[arg(long = "role")]
    pub roles: Vec<String>,
}

#[derive(Debug, Args)]
pub struct EffectiveArgs {
    #[arg(long)]
    pub hotel: String,
    #[arg(long)]
    pub role: String,
    #[arg(long)]
    pub user: String,
    #[arg(long)]
    pub page: String,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    #[arg(long)]
    pub hotel: String,
    #[arg(long)]
    pub user: String,
    /// Held role names
    #[arg(long = "role")]
    pub roles: Vec<String>,
    #[arg(long)]
    pub page: String,
    #[arg(long)]
    pub flag: PrivilegeFlag,
}

impl Cli {
    /// Apply command line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(menu) = &self.menu {
            config.catalog.menu_path = Some(menu.clone());
        }
        if let Some(backend) = self.storage {
            config.storage.backend = backend;
        }
        if let Some(dir) = &self.data_dir {
            config.storage.path = Some(dir.clone());
        }
        if self.no_locking {
            config.storage.optimistic_locking = false;
        }
        config
    }
}
