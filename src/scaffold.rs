use crate::fs::{create_directory, create_empty_file};
use crate::git::{RepositoryError, VersionControl};
use derive_more::{Display, From};
use log::info;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, From, Display)]
pub enum ScaffoldError {
    #[display(fmt = "Project name must not be empty")]
    #[from(ignore)]
    EmptyName,
    #[display(fmt = "Unable to create directory {:?}: {}", _0, _1)]
    #[from(ignore)]
    CreateDirectory(PathBuf, io::Error),
    #[display(fmt = "Unable to create file {:?}: {}", _0, _1)]
    #[from(ignore)]
    CreateFile(PathBuf, io::Error),
    #[display(fmt = "Version control failed: {}", _0)]
    VersionControl(RepositoryError),
}

pub type ScaffoldResult<T> = Result<T, ScaffoldError>;

/// Subdirectories created under every project root
pub const DIRECTORIES: [&str; 5] = ["src", "tests", "docs", "data", "config"];

/// Files created empty under every project root
pub const FILES: [&str; 8] = [
    "README.md",
    "requirements.txt",
    ".gitignore",
    "src/__init__.py",
    "src/main.py",
    "tests/__init__.py",
    "tests/test_main.py",
    "config/settings.py",
];

/// Creates the project root along with the fixed directories and empty
/// files. Existing directories are reused and existing files are
/// truncated, anything else already in the root is left alone. Nothing
/// created before a failure is removed.
///
/// Returns the path of the project root
pub async fn create_structure(project_name: &str) -> ScaffoldResult<PathBuf> {
    if project_name.is_empty() {
        return Err(ScaffoldError::EmptyName);
    }

    let root = PathBuf::from(project_name);
    create_directory(&root)
        .await
        .map_err(|err| ScaffoldError::CreateDirectory(root.clone(), err))?;
    info!("Created main project directory: {project_name}");

    for directory in DIRECTORIES {
        let path = root.join(directory);
        create_directory(&path)
            .await
            .map_err(|err| ScaffoldError::CreateDirectory(path.clone(), err))?;
        info!("Created directory: {directory}");
    }

    for file in FILES {
        let path = root.join(file);
        create_empty_file(&path)
            .await
            .map_err(|err| ScaffoldError::CreateFile(path.clone(), err))?;
        info!("Created file: {file}");
    }

    Ok(root)
}

/// Creates the project structure and hands the new root to the
/// provided version control backend without a remote
pub async fn scaffold_project<V>(project_name: &str, vcs: &V) -> ScaffoldResult<PathBuf>
where
    V: VersionControl,
{
    let root = create_structure(project_name).await?;
    vcs.sync(&root, None).await?;
    info!("Project '{project_name}' structure created and Git initialized!");
    Ok(root)
}

/// Lists the paths under `root` that the scaffold is expected to create
pub fn expected_paths(root: &Path) -> Vec<PathBuf> {
    DIRECTORIES
        .iter()
        .chain(FILES.iter())
        .map(|path| root.join(path))
        .collect()
}
