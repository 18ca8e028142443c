use clap::{Parser, Subcommand};

use crate::commands::add;

#[derive(Debug, Parser)]
#[command(name = "rxwire")]
#[command(about = "RxAngular Template setup CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// @rx-angular/template をワークスペースに導入
    Add(add::Args),
}
