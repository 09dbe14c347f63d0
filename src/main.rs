mod cli;
mod execute;

use clap::Parser;
use anyhow::Result;
use crate::cli::CLI;

fn main() -> Result<()> {
    let cli = CLI::parse();
    execute::execute(cli)
}
