use anyhow::Result;

use super::{CommandContext, execute_and_print};

pub fn handle_mutate(
    ctx: CommandContext,
    mutation: String,
    variables: Option<String>,
) -> Result<()> {
    // Auto-wrap in mutation { }
    let document = format!("mutation {{ {} }}", mutation);
    tokio::runtime::Runtime::new()?.block_on(async {
        let schema = ctx.schema().await?;
        execute_and_print(schema, &document, variables).await
    })
}
