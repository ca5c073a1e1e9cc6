//! Migrate command - Database migration management.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// What a migration action did, for reporting to the operator.
#[derive(Debug, PartialEq, Eq)]
pub enum MigrateReport {
    /// Pending migrations were applied
    Upgraded,
    /// The most recent migration was reverted
    RolledBack,
    /// Every known migration with its applied flag, oldest first
    Status(Vec<(String, bool)>),
    /// All tables dropped and migrations re-applied
    Reset,
}

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // Connect without auto-running migrations for manual control
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    match run(&db, args.action).await? {
        MigrateReport::Upgraded => tracing::info!("Migrations completed successfully"),
        MigrateReport::RolledBack => tracing::info!("Rollback completed successfully"),
        MigrateReport::Reset => tracing::info!("Fresh migrations completed successfully"),
        MigrateReport::Status(migrations) => {
            for (name, applied) in migrations {
                println!("{:<48} {}", name, if applied { "applied" } else { "pending" });
            }
        }
    }

    Ok(())
}

/// Apply a single migration action to an open database.
pub async fn run(db: &Database, action: MigrateAction) -> AppResult<MigrateReport> {
    tracing::debug!(?action, "Running migration action");

    let report = match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            MigrateReport::Upgraded
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            MigrateReport::RolledBack
        }
        MigrateAction::Status => MigrateReport::Status(db.migration_status().await?),
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables before re-running migrations");
            db.fresh_migrations().await?;
            MigrateReport::Reset
        }
    };

    Ok(report)
}
