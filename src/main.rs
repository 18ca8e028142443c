mod cli;
mod commands;
mod constants;
mod error;
mod fs;
mod manifest;
mod module_edit;
mod output;
mod registry;
mod tree;
mod workspace;

use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    if let Err(err) = commands::dispatch(cli).await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
