use super::*;
use crate::error::{ToolError, ToolResult};
use async_trait::async_trait;
use sf_core::MIGRATION_LOCK_FILE;
use std::sync::Mutex;
use tempfile::tempdir;

/// Records what the migrations directory looks like at each apply call
struct FakeTool {
    migrations_dir: PathBuf,
    seen: Mutex<Vec<Vec<String>>>,
    fail: bool,
}

impl FakeTool {
    fn new(migrations_dir: PathBuf, fail: bool) -> Self {
        Self {
            migrations_dir,
            seen: Mutex::new(Vec::new()),
            fail,
        }
    }

    fn seen(&self) -> Vec<Vec<String>> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl MigrationTool for FakeTool {
    async fn apply(&self, _schema: &Path) -> ToolResult<()> {
        let mut names: Vec<String> = fs::read_dir(&self.migrations_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        self.seen.lock().unwrap().push(names);

        if self.fail {
            Err(ToolError::ExitError {
                command: "fake apply".to_string(),
                code: 1,
            })
        } else {
            Ok(())
        }
    }

    async fn generate(&self, _schema: &Path) -> ToolResult<()> {
        Ok(())
    }
}

struct Setup {
    _root: tempfile::TempDir,
    migrations_dir: PathBuf,
    staging_dir: PathBuf,
    main_schema: PathBuf,
}

fn setup(names: &[&str]) -> Setup {
    let root = tempdir().unwrap();
    let migrations_dir = root.path().join("migrations");
    fs::create_dir(&migrations_dir).unwrap();

    for name in names {
        let unit = migrations_dir.join(name);
        fs::create_dir(&unit).unwrap();
        fs::write(unit.join("migration.sql"), format!("-- {}", name)).unwrap();
    }
    fs::write(
        migrations_dir.join(MIGRATION_LOCK_FILE),
        "provider = \"sqlite\"",
    )
    .unwrap();

    let main_schema = root.path().join("schema.prisma");
    fs::write(&main_schema, "").unwrap();

    Setup {
        staging_dir: root.path().join("staging"),
        migrations_dir,
        main_schema,
        _root: root,
    }
}

fn dir_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    names
}

fn migrator(setup: &Setup, tool: Arc<FakeTool>) -> TargetedMigrator {
    TargetedMigrator::new(
        setup.migrations_dir.clone(),
        setup.staging_dir.clone(),
        setup.main_schema.clone(),
        tool,
    )
}

#[tokio::test]
async fn test_applier_sees_only_units_up_to_target() {
    let setup = setup(&["a_one", "b_two", "c_three"]);
    let tool = Arc::new(FakeTool::new(setup.migrations_dir.clone(), false));

    migrator(&setup, tool.clone()).migrate_to("a_one").await.unwrap();

    // During the apply, only the target and the sentinel were visible
    assert_eq!(
        tool.seen(),
        vec![vec!["a_one".to_string(), MIGRATION_LOCK_FILE.to_string()]]
    );
}

#[tokio::test]
async fn test_directory_restored_after_success() {
    let setup = setup(&["a_one", "b_two", "c_three"]);
    let tool = Arc::new(FakeTool::new(setup.migrations_dir.clone(), false));
    let before = dir_names(&setup.migrations_dir);

    migrator(&setup, tool).migrate_to("b_two").await.unwrap();

    assert_eq!(dir_names(&setup.migrations_dir), before);
    assert!(!setup.staging_dir.exists());
}

#[tokio::test]
async fn test_directory_restored_after_applier_failure() {
    let setup = setup(&["a_one", "b_two", "c_three"]);
    let tool = Arc::new(FakeTool::new(setup.migrations_dir.clone(), true));
    let before = dir_names(&setup.migrations_dir);

    let result = migrator(&setup, tool).migrate_to("a_one").await;

    assert!(matches!(
        result,
        Err(EngineError::Tool(ToolError::ExitError { code: 1, .. }))
    ));
    assert_eq!(dir_names(&setup.migrations_dir), before);
    assert!(!setup.staging_dir.exists());
}

#[tokio::test]
async fn test_unit_contents_survive_the_round_trip() {
    let setup = setup(&["a_one", "b_two"]);
    let nested = setup.migrations_dir.join("b_two").join("data");
    fs::create_dir(&nested).unwrap();
    fs::write(nested.join("seed.csv"), "1,2,3").unwrap();

    let tool = Arc::new(FakeTool::new(setup.migrations_dir.clone(), false));
    migrator(&setup, tool).migrate_to("a_one").await.unwrap();

    let restored = setup
        .migrations_dir
        .join("b_two")
        .join("data")
        .join("seed.csv");
    assert_eq!(fs::read_to_string(restored).unwrap(), "1,2,3");
}

#[tokio::test]
async fn test_target_not_found() {
    let setup = setup(&["a_one"]);
    let tool = Arc::new(FakeTool::new(setup.migrations_dir.clone(), false));

    let result = migrator(&setup, tool.clone()).migrate_to("z_missing").await;

    assert!(matches!(
        result,
        Err(EngineError::TargetNotFound { name }) if name == "z_missing"
    ));
    assert!(tool.seen().is_empty());
}

#[tokio::test]
async fn test_sentinel_is_not_a_valid_target() {
    let setup = setup(&["a_one"]);
    let tool = Arc::new(FakeTool::new(setup.migrations_dir.clone(), false));

    let result = migrator(&setup, tool).migrate_to(MIGRATION_LOCK_FILE).await;
    assert!(matches!(result, Err(EngineError::TargetNotFound { .. })));
}

#[tokio::test]
async fn test_target_is_last_unit_still_runs_full_cycle() {
    let setup = setup(&["a_one", "b_two"]);
    let tool = Arc::new(FakeTool::new(setup.migrations_dir.clone(), false));

    migrator(&setup, tool.clone()).migrate_to("b_two").await.unwrap();

    // Nothing to stage, but the applier still ran and the staging area
    // was cleaned up
    assert_eq!(tool.seen().len(), 1);
    assert!(!setup.staging_dir.exists());
}

#[tokio::test]
async fn test_stale_staging_area_refused() {
    let setup = setup(&["a_one", "b_two"]);
    fs::create_dir(&setup.staging_dir).unwrap();
    fs::write(setup.staging_dir.join("leftover"), "").unwrap();

    let tool = Arc::new(FakeTool::new(setup.migrations_dir.clone(), false));
    let result = migrator(&setup, tool.clone()).migrate_to("a_one").await;

    assert!(matches!(
        result,
        Err(EngineError::StaleStagingArea { .. })
    ));
    // The applier never ran and the leftovers were not touched
    assert!(tool.seen().is_empty());
    assert!(setup.staging_dir.join("leftover").exists());
}

#[tokio::test]
async fn test_empty_leftover_staging_area_is_reused() {
    let setup = setup(&["a_one", "b_two"]);
    fs::create_dir(&setup.staging_dir).unwrap();

    let tool = Arc::new(FakeTool::new(setup.migrations_dir.clone(), false));
    migrator(&setup, tool).migrate_to("a_one").await.unwrap();

    assert!(!setup.staging_dir.exists());
}
