//! Stepflow CLI - targeted Prisma migrations with post-scripts

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{generate, init, merge_schema, migrate, run_post};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        cli::Commands::Init(args) => init::execute(args, &cli.global).await,
        cli::Commands::Migrate(args) => migrate::execute(args, &cli.global).await,
        cli::Commands::Generate(args) => generate::execute(args, &cli.global).await,
        cli::Commands::MergeSchema(args) => merge_schema::execute(args, &cli.global).await,
        cli::Commands::RunPost(args) => run_post::execute(args, &cli.global).await,
    }
}
