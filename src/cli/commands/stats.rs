//! Dashboard stats command handler

use crate::config::Config;
use crate::db::Store;
use crate::services::{DashboardService, SeaOrmDashboardService};

pub async fn cmd_stats(config: &Config) -> anyhow::Result<()> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    let stats = SeaOrmDashboardService::new(store).get_stats().await?;

    println!("Delivery Orders");
    println!("{:-<40}", "");
    println!("  Total:        {}", stats.total_deliveries);
    println!("  Pending:      {}", stats.pending);
    println!("  Processing:   {}", stats.processing);
    println!("  Delivered:    {}", stats.delivered);
    println!("  Due today:    {}", stats.today);

    Ok(())
}
