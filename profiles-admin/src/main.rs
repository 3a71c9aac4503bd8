//! # Profiles Admin CLI
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p profiles-admin -- migrate
//! cargo run -p profiles-admin -- createsuperuser --email admin@example.com --name Admin
//! ```

use clap::Parser;
use profiles_admin::{cli::Cli, commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "profiles_admin=info,profiles_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("profiles-admin v{} starting", env!("CARGO_PKG_VERSION"));

    commands::run(Cli::parse()).await
}
