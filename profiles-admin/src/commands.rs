/// Subcommand implementations
///
/// Each command loads settings, opens its own pool and closes it on the way
/// out. Results go to stdout; progress goes to the tracing subscriber.

use crate::cli::{Cli, Command, CreateSuperuserArgs};
use anyhow::Context;
use profiles_core::{
    auth::password::Argon2Hasher,
    config::Settings,
    db::{
        migrations::{ensure_database_exists, get_migration_status, run_migrations},
        pool::{close_pool, create_pool},
    },
    models::{
        manager::{ManagerError, UserProfileManager},
        user_profile::UserProfile,
    },
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;

/// Runs the parsed command line
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::load_from(cli.config.as_deref())?;

    match cli.command {
        Command::Migrate => migrate(&settings).await,
        Command::CreateSuperuser(args) => create_superuser(&settings, args).await,
        Command::Status => status(&settings).await,
    }
}

async fn connect(settings: &Settings) -> anyhow::Result<PgPool> {
    create_pool(&settings.database)
        .await
        .context("Failed to connect to the database")
}

/// Creates the database if needed and applies pending migrations
pub async fn migrate(settings: &Settings) -> anyhow::Result<()> {
    ensure_database_exists(&settings.database.url).await?;

    let pool = connect(settings).await?;
    run_migrations(&pool).await?;

    let status = get_migration_status(&pool).await?;
    println!(
        "Applied {} of {} migrations",
        status.applied_migrations, status.known_migrations
    );

    close_pool(pool).await;
    Ok(())
}

/// Creates a superuser, turning duplicate and missing emails into readable errors
pub async fn create_superuser(settings: &Settings, args: CreateSuperuserArgs) -> anyhow::Result<()> {
    let pool = connect(settings).await?;
    let hasher = Argon2Hasher::with_params(settings.password);
    let manager = UserProfileManager::new(pool.clone(), Arc::new(hasher));

    if args.password.is_none() {
        info!("No password given; the superuser will have an unusable password");
    }

    let result = manager
        .create_superuser(Some(&args.email), &args.name, args.password.as_deref())
        .await;

    close_pool(pool).await;

    match result {
        Ok(profile) => {
            println!("Superuser created: {}", profile);
            Ok(())
        }
        Err(err) if err.is_duplicate_email() => {
            anyhow::bail!("A profile with email {} already exists", args.email)
        }
        Err(ManagerError::InvalidArgument(msg)) => anyhow::bail!(msg),
        Err(err) => Err(err.into()),
    }
}

async fn status(settings: &Settings) -> anyhow::Result<()> {
    let pool = connect(settings).await?;
    let status = get_migration_status(&pool).await?;

    println!(
        "Migrations: {} applied, {} pending",
        status.applied_migrations,
        status.pending()
    );

    if status.is_up_to_date() {
        let profiles = UserProfile::count(&pool).await?;
        println!("Profiles: {}", profiles);
    } else {
        println!("Run `profiles-admin migrate` to bring the schema up to date");
    }

    close_pool(pool).await;
    Ok(())
}
