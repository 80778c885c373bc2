//! Recipe Finder - find recipes by the ingredients you have
//!
//! Looks recipes and ingredients up through a local cache, calling the
//! Spoonacular API only for data that is not already stored.

use clap::Parser;
use std::process::ExitCode;

use recipe_finder::cli::{Cli, CliError};
use recipe_finder::logging;
use recipe_finder::service::RecipeService;

async fn run(cli: &Cli) -> Result<String, CliError> {
    let config = cli.config()?;
    let service = RecipeService::from_config(&config)?;
    cli.command.execute(&service).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(&cli).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
