use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_migrate_target_flags() {
    let cli = Cli::parse_from(["sf", "migrate", "--target", "20240101000000_init"]);
    match cli.command {
        Commands::Migrate(args) => {
            assert_eq!(args.target.as_deref(), Some("20240101000000_init"));
            assert!(!args.exclude_target);
        }
        other => panic!("expected migrate, got {:?}", other),
    }
}
