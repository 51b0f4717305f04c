use super::*;
use std::fs;
use tempfile::tempdir;

fn setup() -> (tempfile::TempDir, Validator) {
    let temp_dir = tempdir().unwrap();
    let migrations = temp_dir.path().to_path_buf();

    fs::create_dir(migrations.join("20240101000000_init")).unwrap();
    fs::write(
        migrations.join("20240101000000_init").join("migration.sql"),
        "CREATE TABLE a (id INTEGER);",
    )
    .unwrap();

    fs::create_dir(migrations.join("20240102000000_backfill")).unwrap();
    fs::write(
        migrations.join("20240102000000_backfill").join("post.sh"),
        "#!/bin/sh\n",
    )
    .unwrap();
    fs::write(
        migrations
            .join("20240102000000_backfill")
            .join("schema.prisma"),
        "datasource db {\n  provider = \"sqlite\"\n  url = \"file:./dev.db\"\n}\n",
    )
    .unwrap();

    fs::write(migrations.join("migration_lock.toml"), "provider = \"sqlite\"").unwrap();

    let validator = Validator::new(migrations, "schema.prisma");
    (temp_dir, validator)
}

#[test]
fn test_is_migration() {
    let (_dir, validator) = setup();

    assert!(validator.is_migration("20240101000000_init").unwrap());
    assert!(validator.is_migration("20240102000000_backfill").unwrap());
    assert!(!validator.is_migration("20240199000000_missing").unwrap());
}

#[test]
fn test_sentinel_is_never_a_migration() {
    let (_dir, validator) = setup();

    assert!(!validator.is_migration("migration_lock.toml").unwrap());
    assert!(!validator.has_post_script("migration_lock.toml").unwrap());
}

#[test]
fn test_os_artifact_is_never_a_migration() {
    let (dir, validator) = setup();
    fs::write(dir.path().join(".DS_Store"), []).unwrap();

    assert!(!validator.is_migration(".DS_Store").unwrap());
}

#[test]
fn test_has_post_script() {
    let (_dir, validator) = setup();

    assert!(validator
        .has_post_script("20240102000000_backfill")
        .unwrap());
    assert!(!validator.has_post_script("20240101000000_init").unwrap());
}

#[test]
fn test_has_embedded_schema() {
    let (_dir, validator) = setup();

    assert!(validator
        .has_embedded_schema("20240102000000_backfill")
        .unwrap());
    assert!(!validator
        .has_embedded_schema("20240101000000_init")
        .unwrap());
}

#[test]
fn test_assert_is_migration() {
    let (_dir, validator) = setup();

    assert!(validator.assert_is_migration("20240101000000_init").is_ok());
    assert!(matches!(
        validator.assert_is_migration("nope"),
        Err(CoreError::UnknownMigration { name }) if name == "nope"
    ));
}

#[test]
fn test_post_script_name_pattern() {
    assert!(is_post_script_name("post"));
    assert!(is_post_script_name("post.sh"));
    assert!(is_post_script_name("post.ts"));
    assert!(is_post_script_name("post.js2"));

    assert!(!is_post_script_name("post.tar.gz"));
    assert!(!is_post_script_name("postfix"));
    assert!(!is_post_script_name("pre"));
    assert!(!is_post_script_name("post."));
}

#[test]
fn test_find_post_script_is_deterministic() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("post.ts"), "").unwrap();
    fs::write(temp_dir.path().join("post.js"), "").unwrap();

    let found = find_post_script(temp_dir.path()).unwrap().unwrap();
    assert_eq!(found.file_name().unwrap(), "post.js");
}
