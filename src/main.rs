use anyhow::Result;
use clap::Parser;

use campus::cli::handlers::{
    CommandContext, handle_init, handle_mutate, handle_query, handle_serve,
};
use campus::cli::{Cli, Commands};
use campus::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_file.clone());

    match cli.command {
        Commands::Init { port } => handle_init(port, cli.store, cli.data_dir.clone()),
        Commands::Serve { port, ref host } => {
            let ctx = CommandContext::from_cli(&cli)?;
            handle_serve(ctx, port, host.clone())
        }
        Commands::Query {
            ref query,
            ref variables,
        } => {
            let ctx = CommandContext::from_cli(&cli)?;
            handle_query(ctx, query.clone(), variables.clone())
        }
        Commands::Mutate {
            ref mutation,
            ref variables,
        } => {
            let ctx = CommandContext::from_cli(&cli)?;
            handle_mutate(ctx, mutation.clone(), variables.clone())
        }
    }
}
