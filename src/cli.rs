use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pdfsplit")]
#[command(about = "Split a PDF into smaller sections based on page ranges")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to the input PDF file
    #[arg(required = true)]
    pub input_pdf: Option<PathBuf>,

    /// First page to include (1-based)
    #[arg(required = true, allow_negative_numbers = true)]
    pub start_page: Option<i64>,

    /// Last page to include (1-based, inclusive)
    #[arg(required = true, allow_negative_numbers = true)]
    pub end_page: Option<i64>,

    /// Output PDF file name [default: <input>_pages_<start>_to_<end>.pdf]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print progress information
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run as MCP server
    Mcp,

    /// Print the number of pages in a PDF
    Pages {
        /// PDF file to inspect
        path: PathBuf,
    },
}
