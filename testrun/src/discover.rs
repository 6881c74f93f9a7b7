use crate::error::{Result, TestRunError};
use std::path::{Path, PathBuf};

/// Resolve the results file to check.
///
/// A value containing a path separator is taken as given, a bare file name is
/// looked up in `working_dir`. Without a value the first `*.csv` in
/// `working_dir` is used.
pub fn resolve_input(user_path: Option<&str>, working_dir: &Path) -> Result<PathBuf> {
    let path = match user_path {
        Some(user_path) if user_path.contains('/') || user_path.contains('\\') => {
            PathBuf::from(user_path)
        }
        Some(file_name) => working_dir.join(file_name),
        None => return find_first_csv(working_dir),
    };

    if !path.is_file() {
        return Err(TestRunError::FileNotFound { path });
    }
    Ok(path)
}

/// First `.csv` file in a directory, in file name order
pub fn find_first_csv(dir: &Path) -> Result<PathBuf> {
    let pattern = glob::Pattern::escape(&dir.to_string_lossy());
    let pattern = format!("{}/*.csv", pattern.trim_end_matches(['/', '\\']));

    glob::glob(&pattern)?
        .filter_map(|entry| entry.ok())
        .find(|path| path.is_file())
        .ok_or_else(|| TestRunError::NoCsvFile {
            dir: dir.to_path_buf(),
        })
}
