use crate::cli::{CacheCommands, Cli};
use crate::domain::models::CacheClearReport;
use crate::services::cache::HttpCache;
use crate::services::config::load_config;
use crate::services::output::print_one;
use crate::services::storage;

pub fn handle_cache_commands(cli: &Cli, command: &CacheCommands) -> anyhow::Result<()> {
    match command {
        CacheCommands::Clear => {
            let loaded = load_config(&cli.config)?;
            let dir = storage::cache_dir(&loaded.config.cache.path)?;
            let removed = HttpCache::new(&dir).clear()?;
            let report = CacheClearReport {
                path: dir.to_string_lossy().to_string(),
                removed,
            };
            print_one(cli.json, report, |r| {
                format!("removed {} cached files from {}", r.removed, r.path)
            })?;
        }
    }
    Ok(())
}
