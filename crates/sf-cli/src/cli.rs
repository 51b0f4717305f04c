//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};

/// Stepflow - targeted Prisma migrations with post-scripts
#[derive(Parser, Debug)]
#[command(name = "sf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default stepflow.yml into the project directory
    Init(InitArgs),

    /// Apply migrations in order, running post-scripts for newly applied
    /// data migrations
    Migrate(MigrateArgs),

    /// Generate a client for every migration with an embedded schema
    Generate(GenerateArgs),

    /// Concatenate every .prisma file under a folder into one document
    MergeSchema(MergeSchemaArgs),

    /// Run a single migration's post-script
    RunPost(RunPostArgs),
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {}

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Migration name to stop at (default: apply the whole set)
    #[arg(short, long)]
    pub target: Option<String>,

    /// Stop just before the target instead of applying it
    #[arg(long)]
    pub exclude_target: bool,
}

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {}

/// Arguments for the merge-schema command
#[derive(Args, Debug)]
pub struct MergeSchemaArgs {
    /// Folder containing .prisma files, relative to the project directory
    pub schema_dir: String,

    /// Output file for the merged schema
    pub output: String,
}

/// Arguments for the run-post command
#[derive(Args, Debug)]
pub struct RunPostArgs {
    /// Name of the migration whose post-script to run
    pub migration: String,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
