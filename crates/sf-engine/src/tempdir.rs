//! Scoped temporary directory

use crate::error::{EngineError, EngineResult};
use std::fs;
use std::future::Future;
use std::path::Path;

/// Run an async operation with a temporary directory available at `path`.
///
/// The directory is created first and removed recursively afterwards,
/// even when the operation fails.
pub async fn with_temp_dir<F, Fut, T>(path: &Path, f: F) -> EngineResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = EngineResult<T>>,
{
    fs::create_dir_all(path).map_err(|e| EngineError::IoWithPath {
        path: path.display().to_string(),
        source: e,
    })?;

    let result = f().await;

    let removed = fs::remove_dir_all(path).map_err(|e| EngineError::IoWithPath {
        path: path.display().to_string(),
        source: e,
    });

    match (result, removed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), removed) => {
            if let Err(removal) = removed {
                log::warn!("failed to remove temp dir after error: {}", removal);
            }
            Err(e)
        }
    }
}

#[cfg(test)]
#[path = "tempdir_test.rs"]
mod tests;
