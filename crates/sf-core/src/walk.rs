//! Iterative directory walk

use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Depth-first file walker over a directory tree.
///
/// Yields file paths lazily; directories are expanded as they are reached.
/// Entries within one directory are visited in lexical order.
pub struct FileWalker {
    stack: Vec<PathBuf>,
}

impl FileWalker {
    /// Create a walker rooted at `dir`
    pub fn new(dir: &Path) -> Self {
        Self {
            stack: vec![dir.to_path_buf()],
        }
    }
}

impl Iterator for FileWalker {
    type Item = CoreResult<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(path) = self.stack.pop() {
            if path.is_dir() {
                let entries = match std::fs::read_dir(&path) {
                    Ok(entries) => entries,
                    Err(e) => {
                        return Some(Err(CoreError::IoWithPath {
                            path: path.display().to_string(),
                            source: e,
                        }))
                    }
                };

                let mut children = Vec::new();
                for entry in entries {
                    match entry {
                        Ok(entry) => children.push(entry.path()),
                        Err(e) => {
                            return Some(Err(CoreError::IoWithPath {
                                path: path.display().to_string(),
                                source: e,
                            }))
                        }
                    }
                }
                // Reverse-sorted so the stack pops in lexical order
                children.sort();
                children.reverse();
                self.stack.extend(children);
                continue;
            }

            return Some(Ok(path));
        }

        None
    }
}

/// Collect every file under `dir` with the given extension, in walk order
pub fn files_with_extension(dir: &Path, extension: &str) -> CoreResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in FileWalker::new(dir) {
        let path = path?;
        if path.extension().is_some_and(|e| e == extension) {
            files.push(path);
        }
    }
    Ok(files)
}

#[cfg(test)]
#[path = "walk_test.rs"]
mod tests;
