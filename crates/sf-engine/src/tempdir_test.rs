use super::*;
use tempfile::tempdir;

#[tokio::test]
async fn test_temp_dir_exists_inside_scope_and_is_removed_after() {
    let root = tempdir().unwrap();
    let temp = root.path().join("scratch");

    let temp_in_scope = temp.clone();
    let value = with_temp_dir(&temp, || async move {
        assert!(temp_in_scope.is_dir());
        fs::write(temp_in_scope.join("schema.prisma"), "").unwrap();
        Ok(42)
    })
    .await
    .unwrap();

    assert_eq!(value, 42);
    assert!(!temp.exists());
}

#[tokio::test]
async fn test_temp_dir_removed_after_failure() {
    let root = tempdir().unwrap();
    let temp = root.path().join("scratch");

    let result: EngineResult<()> = with_temp_dir(&temp, || async {
        Err(EngineError::TargetNotFound {
            name: "x".to_string(),
        })
    })
    .await;

    assert!(matches!(result, Err(EngineError::TargetNotFound { .. })));
    assert!(!temp.exists());
}
