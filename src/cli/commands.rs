use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::StoreBackend;

#[derive(Parser)]
#[command(name = "campus")]
#[command(
    author,
    version,
    about = "A small GraphQL API for students, courses and enrollments"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file (searches upward for campus.yml by default)
    #[arg(long, global = true, env = "CAMPUS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Storage backend (overrides config)
    #[arg(long, global = true, value_enum, env = "CAMPUS_STORE")]
    pub store: Option<StoreBackend>,

    /// Data directory of the document store (overrides config)
    #[arg(long, global = true, env = "CAMPUS_DATA_DIR")]
    pub data_dir: Option<String>,

    /// YAML fixture loaded into an empty store at startup
    #[arg(long, global = true, env = "CAMPUS_SEED")]
    pub seed: Option<PathBuf>,

    /// Load the built-in demo fixture into an empty store
    #[arg(long, global = true, conflicts_with = "seed")]
    pub demo: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to this file
    #[arg(long, global = true, env = "CAMPUS_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a campus.yml in the current directory
    Init {
        /// Port the server listens on
        #[arg(long)]
        port: Option<u16>,
    },

    /// Start the GraphQL server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long, env = "CAMPUS_PORT")]
        port: Option<u16>,

        /// Address to bind (overrides config)
        #[arg(long, env = "CAMPUS_HOST")]
        host: Option<String>,
    },

    /// Execute a GraphQL query and print the JSON response
    Query {
        /// GraphQL query document
        query: String,

        /// Variables as a JSON object
        #[arg(long)]
        variables: Option<String>,
    },

    /// Execute a GraphQL mutation (wrapped in `mutation { }`) and print the JSON response
    Mutate {
        /// Mutation selection, e.g. 'deleteCourse(id: "1")'
        mutation: String,

        /// Variables as a JSON object
        #[arg(long)]
        variables: Option<String>,
    },
}
