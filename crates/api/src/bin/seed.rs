//! `checklist-seed`: reset the database to its installed defaults.
//!
//! Deletes every user-created checklist, then installs the default
//! categories and checklists. The server never runs this.

use checklist_api::config::ServerConfig;
use checklist_api::telemetry::init_tracing;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env();
    init_tracing("checklist_db=info,checklist_seed=info", config.log_format);

    let pool = checklist_db::create_pool(&config.database_url)
        .await
        .expect("Failed to open database");

    checklist_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let report = checklist_db::seed::reseed(&pool)
        .await
        .expect("Seeding failed");

    tracing::info!(
        database_url = %config.database_url,
        deleted_checklists = report.deleted_checklists,
        created_defaults = report.created_defaults,
        "Seeding completed",
    );

    pool.close().await;
}
