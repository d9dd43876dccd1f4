mod init;
mod mutate;
mod query;
mod serve;

pub use init::handle_init;
pub use mutate::handle_mutate;
pub use query::handle_query;
pub use serve::handle_serve;

use std::path::PathBuf;

use anyhow::{Context, Result};

use super::Cli;
use crate::config::CampusConfig;
use crate::graphql::{CampusSchema, build_schema};
use crate::service::CampusService;
use crate::storage::{self, SeedData};

/// Where startup records come from, if anywhere.
enum SeedSource {
    File(PathBuf),
    Demo,
}

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: CampusConfig,
    pub root: PathBuf,
    seed: Option<SeedSource>,
}

impl CommandContext {
    /// Load configuration and apply command-line overrides.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let (mut config, root) = match cli.config {
            Some(ref path) => CampusConfig::load_file(path)
                .with_context(|| format!("Failed to load {}", path.display()))?,
            None => CampusConfig::load_or_default(&cwd)
                .context("Failed to load campus configuration")?,
        };

        if let Some(backend) = cli.store {
            config.store.backend = backend;
        }
        if let Some(ref data_dir) = cli.data_dir {
            config.store.path = data_dir.clone();
        }

        let seed = if cli.demo {
            Some(SeedSource::Demo)
        } else if let Some(ref path) = cli.seed {
            Some(SeedSource::File(path.clone()))
        } else {
            config.seed_path(&root).map(SeedSource::File)
        };

        Ok(Self { config, root, seed })
    }

    /// Open the configured store, seed it if it is empty, and wrap it in a service.
    pub async fn service(&self) -> Result<CampusService> {
        let store = storage::open(&self.config, &self.root).context("Failed to open store")?;
        let service = CampusService::new(store);

        if let Some(ref source) = self.seed {
            let seed = match source {
                SeedSource::Demo => SeedData::demo()?,
                SeedSource::File(path) => SeedData::load(path)
                    .with_context(|| format!("Failed to read seed file {}", path.display()))?,
            };
            let empty = service.get_all_courses().await?.is_empty()
                && service.get_all_students().await?.is_empty();
            if empty {
                seed.apply(service.store()).await?;
            } else {
                tracing::info!("Store already holds records, skipping seed");
            }
        }

        Ok(service)
    }

    pub async fn schema(&self) -> Result<CampusSchema> {
        Ok(build_schema(self.service().await?))
    }
}

/// Execute one GraphQL request in process and print the response as JSON.
async fn execute_and_print(
    schema: CampusSchema,
    document: &str,
    variables: Option<String>,
) -> Result<()> {
    let vars: async_graphql::Variables = match variables {
        Some(v) => serde_json::from_str(&v).context("Variables must be a JSON object")?,
        None => async_graphql::Variables::default(),
    };

    let request = async_graphql::Request::new(document).variables(vars);
    let response = schema.execute(request).await;

    println!("{}", serde_json::to_string_pretty(&response)?);
    if !response.errors.is_empty() {
        anyhow::bail!("GraphQL request returned {} error(s)", response.errors.len());
    }
    Ok(())
}
