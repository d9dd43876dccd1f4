use anyhow::Result;

use super::{CommandContext, execute_and_print};

pub fn handle_query(ctx: CommandContext, query: String, variables: Option<String>) -> Result<()> {
    tokio::runtime::Runtime::new()?.block_on(async {
        let schema = ctx.schema().await?;
        execute_and_print(schema, &query, variables).await
    })
}
