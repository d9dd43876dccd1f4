use anyhow::Result;
use colored::Colorize;

use super::CommandContext;
use crate::graphql::{GRAPHQL_PATH, run_server};

pub fn handle_serve(mut ctx: CommandContext, port: Option<u16>, host: Option<String>) -> Result<()> {
    if let Some(port) = port {
        ctx.config.server.port = port;
    }
    if let Some(host) = host {
        ctx.config.server.host = host;
    }
    let addr = ctx.config.server.socket_addr()?;

    tokio::runtime::Runtime::new()?.block_on(async {
        let schema = ctx.schema().await?;

        println!(
            "{} on http://{}{}",
            "Starting GraphQL server".green(),
            addr,
            GRAPHQL_PATH
        );
        println!("  Store: {:?}", ctx.config.store.backend);

        run_server(schema, addr).await?;
        Ok::<(), anyhow::Error>(())
    })
}
