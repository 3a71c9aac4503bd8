/// Command-line interface definition
///
/// ```text
/// profiles-admin [--config <PATH>] migrate
/// profiles-admin [--config <PATH>] createsuperuser --email <EMAIL> --name <NAME> [--password <PASSWORD>]
/// profiles-admin [--config <PATH>] status
/// ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Environment variable consulted when `--password` is not given
pub const SUPERUSER_PASSWORD_ENV: &str = "PROFILES_SUPERUSER_PASSWORD";

#[derive(Debug, Parser)]
#[command(name = "profiles-admin", version, about = "Administer profiles accounts and schema")]
pub struct Cli {
    /// Configuration file (defaults to ./profiles.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the database if needed and apply pending migrations
    Migrate,

    /// Create an account with superuser and staff flags
    #[command(name = "createsuperuser")]
    CreateSuperuser(CreateSuperuserArgs),

    /// Show migration status and account count
    Status,
}

#[derive(Debug, clap::Args)]
pub struct CreateSuperuserArgs {
    /// Login email address
    #[arg(long, value_name = "EMAIL")]
    pub email: String,

    /// Display name
    #[arg(long, value_name = "NAME")]
    pub name: String,

    /// Password; without one the account gets an unusable password
    #[arg(long, value_name = "PASSWORD", env = SUPERUSER_PASSWORD_ENV, hide_env_values = true)]
    pub password: Option<String>,
}
