use super::*;
use std::fs;
use tempfile::tempdir;

fn make_migrations_dir(names: &[&str]) -> tempfile::TempDir {
    let temp_dir = tempdir().unwrap();
    for name in names {
        fs::create_dir(temp_dir.path().join(name)).unwrap();
    }
    fs::write(temp_dir.path().join(MIGRATION_LOCK_FILE), "provider = \"sqlite\"").unwrap();
    temp_dir
}

#[test]
fn test_read_sorts_lexically() {
    let dir = make_migrations_dir(&[
        "20240102000000_second",
        "20240101000000_first",
        "20240103000000_third",
    ]);

    let set = MigrationSet::read(dir.path()).unwrap();
    let migrations: Vec<&str> = set.migrations().collect();

    assert_eq!(
        migrations,
        vec![
            "20240101000000_first",
            "20240102000000_second",
            "20240103000000_third",
        ]
    );
}

#[test]
fn test_sentinel_excluded_from_migrations() {
    let dir = make_migrations_dir(&["20240101000000_first"]);

    let set = MigrationSet::read(dir.path()).unwrap();

    assert!(set.entries().iter().any(|e| e == MIGRATION_LOCK_FILE));
    assert!(!set.contains(MIGRATION_LOCK_FILE));
    assert_eq!(set.last(), Some("20240101000000_first"));
}

#[test]
fn test_after_excludes_target_and_sentinel() {
    let dir = make_migrations_dir(&["a_one", "b_two", "c_three"]);

    let set = MigrationSet::read(dir.path()).unwrap();
    let after = set.after("a_one").unwrap();

    assert_eq!(after, vec!["b_two".to_string(), "c_three".to_string()]);
}

#[test]
fn test_after_last_is_empty() {
    let dir = make_migrations_dir(&["a_one", "b_two"]);

    let set = MigrationSet::read(dir.path()).unwrap();
    assert!(set.after("b_two").unwrap().is_empty());
}

#[test]
fn test_after_unknown_target_fails() {
    let dir = make_migrations_dir(&["a_one"]);

    let set = MigrationSet::read(dir.path()).unwrap();
    let result = set.after("z_missing");

    assert!(matches!(
        result,
        Err(CoreError::UnknownMigration { name }) if name == "z_missing"
    ));
}

#[test]
fn test_up_to_without_target_returns_all() {
    let dir = make_migrations_dir(&["a_one", "b_two"]);

    let set = MigrationSet::read(dir.path()).unwrap();
    let all = set.up_to(None, false).unwrap();

    assert_eq!(all, vec!["a_one".to_string(), "b_two".to_string()]);
}

#[test]
fn test_up_to_include_flag() {
    let dir = make_migrations_dir(&["a_one", "b_two", "c_three"]);
    let set = MigrationSet::read(dir.path()).unwrap();

    let exclusive = set.up_to(Some("b_two"), false).unwrap();
    assert_eq!(exclusive, vec!["a_one".to_string()]);

    let inclusive = set.up_to(Some("b_two"), true).unwrap();
    assert_eq!(inclusive, vec!["a_one".to_string(), "b_two".to_string()]);
}

#[test]
fn test_missing_directory() {
    let result = MigrationSet::read(std::path::Path::new("/nonexistent/migrations"));
    assert!(matches!(
        result,
        Err(CoreError::MigrationsDirNotFound { .. })
    ));
}
