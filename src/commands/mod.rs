use crate::cli::{Cli, Command};
use crate::error::Result;

pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Add(args) => add::run(args).await,
    }
}

pub mod add;
