use clap::Parser;

use srekt::adapter::inbound::cli::command::{Cli, Commands};
use srekt::adapter::inbound::cli::{check, output, preview, run};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Run(args) => run::execute(args).await,
        Commands::Check(args) => check::execute(&args.config),
        Commands::Preview(args) => preview::execute(args),
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
