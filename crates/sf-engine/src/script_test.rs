use super::*;
use std::fs;
use tempfile::tempdir;

#[tokio::test]
async fn test_runs_post_script_with_substituted_path() {
    let temp_dir = tempdir().unwrap();
    let marker = temp_dir.path().join("marker");
    fs::write(
        temp_dir.path().join("post.sh"),
        format!("#!/bin/sh\ntouch {}\n", marker.display()),
    )
    .unwrap();

    let runner = ScriptRunner::new("sh ${post}");
    runner.run_post_script(temp_dir.path()).await.unwrap();

    assert!(marker.exists());
}

#[tokio::test]
async fn test_extensionless_post_script() {
    let temp_dir = tempdir().unwrap();
    let marker = temp_dir.path().join("marker");
    fs::write(
        temp_dir.path().join("post"),
        format!("touch {}\n", marker.display()),
    )
    .unwrap();

    let runner = ScriptRunner::new("sh ${post}");
    runner.run_post_script(temp_dir.path()).await.unwrap();

    assert!(marker.exists());
}

#[tokio::test]
async fn test_missing_post_script() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("migration.sql"), "").unwrap();

    let runner = ScriptRunner::new("sh ${post}");
    let result = runner.run_post_script(temp_dir.path()).await;

    assert!(matches!(result, Err(EngineError::MissingPostScript { .. })));
}

#[tokio::test]
async fn test_failing_post_script_surfaces_exit_code() {
    let temp_dir = tempdir().unwrap();
    fs::write(temp_dir.path().join("post.sh"), "exit 3\n").unwrap();

    let runner = ScriptRunner::new("sh ${post}");
    let result = runner.run_post_script(temp_dir.path()).await;

    assert!(matches!(
        result,
        Err(EngineError::ScriptFailed { code: 3, .. })
    ));
}
