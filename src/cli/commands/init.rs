use crate::config::Config;
use std::path::Path;

pub fn cmd_init(config: &Config) -> anyhow::Result<()> {
    let path = Path::new("config.toml");
    if path.exists() {
        println!("config.toml already exists, leaving it alone.");
        return Ok(());
    }

    config.save_to_path(path)?;
    println!("Created default config file: {}", path.display());
    Ok(())
}
