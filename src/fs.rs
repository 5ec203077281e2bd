use std::io;
use std::path::Path;
use tokio::fs::{create_dir_all, File};

/// Creates the directory at the provided path along with any missing
/// parents. An existing directory is left as is, an existing non
/// directory is an error
pub async fn create_directory(path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    if path.is_dir() {
        return Ok(());
    }
    create_dir_all(path).await
}

/// Creates an empty file at the provided path truncating any
/// content if the file already exists
pub async fn create_empty_file(path: impl AsRef<Path>) -> io::Result<()> {
    File::create(path).await?;
    Ok(())
}

/// Checks whether the provided path contains a git directory
pub fn is_valid_git(path: impl AsRef<Path>) -> bool {
    path.as_ref().join(".git").is_dir()
}
