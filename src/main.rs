mod cli;
mod commands;
mod error;
mod mcp;
mod page_range;
mod pdf;
mod split;
mod worker;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use split::SplitRequest;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Mcp) => {
            mcp::run_server().await?;
        }
        Some(Commands::Pages { path }) => {
            commands::pages::run(&path)?;
        }
        None => {
            let (Some(input), Some(start_page), Some(end_page)) =
                (cli.input_pdf, cli.start_page, cli.end_page)
            else {
                anyhow::bail!("Expected <INPUT_PDF> <START_PAGE> <END_PAGE>");
            };
            let mut request = SplitRequest::new(input, start_page, end_page);
            request.output = cli.output;
            commands::split::run(request, cli.verbose).await?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}
