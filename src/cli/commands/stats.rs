use crate::config::Config;
use crate::state::AppState;
use tracing::warn;

const TABLES: &[&str] = &["cities", "restaurants", "tiktoks"];

pub async fn cmd_stats(config: &Config) -> anyhow::Result<()> {
    let state = AppState::new(config.clone())?;

    println!("Backend contents:");
    println!("{:-<40}", "");
    for table in TABLES {
        match state.backend.count_rows(table).await {
            Ok(count) => println!("{table:<24}{count:>8}"),
            Err(e) => {
                warn!("counting rows of {table} failed: {e}");
                println!("{table:<24}{:>8}", "?");
            }
        }
    }
    Ok(())
}
