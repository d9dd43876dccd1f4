use anyhow::Result;
use colored::Colorize;

use crate::config::{CONFIG_FILE_NAME, CampusConfig, StoreBackend};

pub fn handle_init(
    port: Option<u16>,
    store: Option<StoreBackend>,
    data_dir: Option<String>,
) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config_path = cwd.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        anyhow::bail!("Project already initialized at {}", config_path.display());
    }

    let mut config = CampusConfig::default();
    config.store.backend = store.unwrap_or(StoreBackend::Document);
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(data_dir) = data_dir {
        config.store.path = data_dir;
    }

    config.save(&config_path)?;

    println!(
        "{} campus project in {}",
        "Initialized".green(),
        cwd.display()
    );
    println!("  Config: {}", config_path.display());
    println!("  Store:  {:?}", config.store.backend);
    if config.store.backend == StoreBackend::Document {
        println!("  Data:   {}", config.data_path(&cwd).display());
    }

    Ok(())
}
