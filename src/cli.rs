use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docnav")]
#[command(about = "Navigate and search documentation outlines", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to <config dir>/docnav/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the outline as an indented tree
    Tree { outline: PathBuf },
    /// Print the ancestor path of a node
    Path { outline: PathBuf, id: String },
    /// Search titles and body text
    Search {
        outline: PathBuf,
        query: String,
        #[arg(short = 'n', long, default_value = "25")]
        limit: usize,
        /// Emit ranked hits as JSON
        #[arg(long)]
        json: bool,
    },
    /// Select a node and print the resulting session state as JSON
    Select { outline: PathBuf, id: String },
}
