use crate::cmd::{run_command, CommandError};
use crate::config::Config;
use crate::fs::is_valid_git;
use derive_more::{Display, From};
use log::info;
use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::fs::write;

#[derive(Debug, From, Display)]
pub enum RepositoryError {
    #[display(fmt = "IO Error occurred while working with repositories: {}", _0)]
    IO(io::Error),
    #[display(fmt = "Unable to execute git command: {}", _0)]
    CommandError(CommandError),
}

pub type RepoResult<T> = Result<T, RepositoryError>;

pub const COMMIT_MESSAGE: &str = "Update project files";
pub const REMOTE_NAME: &str = "origin";
pub const BRANCH_NAME: &str = "main";
const SAVE_POINT_PREFIX: &str = "save_point_";

/// Ignore patterns written when a repository is first initialized
pub const GITIGNORE_CONTENT: &str = "# Python
__pycache__/
*.py[cod]
*.so

# Environments
.env
.venv
env/
venv/
ENV/

# IDEs
.vscode/
.idea/

# Logs
*.log

# OS generated files
.DS_Store
Thumbs.db";

/// Version control backend used once the project structure exists
#[allow(async_fn_in_trait)]
pub trait VersionControl {
    /// Records everything in `working_dir` as a new commit and save point
    /// and pushes it, registering `remote_url` as the remote first when
    /// one is provided
    async fn sync(&self, working_dir: &Path, remote_url: Option<&str>) -> RepoResult<()>;
}

/// Drives the git command line program. Every operation blocks on the
/// command and any failure is returned straight away
#[derive(Debug, Clone)]
pub struct GitDriver {
    program: String,
    envs: Vec<(String, String)>,
    clock: fn() -> u64,
}

/// Current unix time in seconds
fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_secs())
        .unwrap_or_default()
}

impl Default for GitDriver {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl GitDriver {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            envs: Vec::new(),
            clock: unix_timestamp,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.git_program.clone())
    }

    /// Adds an environment variable to every git invocation
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Replaces the clock used for naming save points
    pub fn with_clock(mut self, clock: fn() -> u64) -> Self {
        self.clock = clock;
        self
    }

    async fn git(&self, working_dir: &Path, args: &[&str]) -> RepoResult<String> {
        let output = run_command(working_dir, &self.program, args, &self.envs).await?;
        Ok(output)
    }

    /// Initializes a repository and writes the ignore file unless the
    /// working directory already has one. Returns whether a new
    /// repository was created
    pub async fn ensure_repository(&self, working_dir: &Path) -> RepoResult<bool> {
        if is_valid_git(working_dir) {
            return Ok(false);
        }
        self.init_repository(working_dir).await?;
        self.create_gitignore(working_dir).await?;
        Ok(true)
    }

    pub async fn init_repository(&self, working_dir: &Path) -> RepoResult<()> {
        self.git(working_dir, &["init"]).await?;
        info!("Git repository initialized.");
        Ok(())
    }

    pub async fn create_gitignore(&self, working_dir: &Path) -> RepoResult<()> {
        write(working_dir.join(".gitignore"), GITIGNORE_CONTENT).await?;
        info!(".gitignore file created.");
        Ok(())
    }

    /// Stages every file in the working tree and returns the short
    /// status of what is now staged
    pub async fn add_files(&self, working_dir: &Path) -> RepoResult<String> {
        self.git(working_dir, &["add", "."]).await?;
        info!("All files added to staging area.");

        let status = self.git(working_dir, &["status", "--short"]).await?;
        if status.is_empty() {
            info!("No files staged for commit.");
        } else {
            info!("Files staged for commit:\n{status}");
        }
        Ok(status)
    }

    /// Fails when nothing is staged
    pub async fn commit_changes(&self, working_dir: &Path, message: &str) -> RepoResult<()> {
        self.git(working_dir, &["commit", "-m", message]).await?;
        info!("Changes committed: {message}");
        Ok(())
    }

    /// Name for a save point taken now. Only unique to the second
    pub fn save_point_name(&self) -> String {
        format!("{SAVE_POINT_PREFIX}{}", (self.clock)())
    }

    /// Tags the current commit, failing if the tag already exists
    pub async fn create_save_point(&self, working_dir: &Path, name: &str) -> RepoResult<()> {
        self.git(working_dir, &["tag", name]).await?;
        info!("Save point created: {name}");
        Ok(())
    }

    /// Fails if the remote is already registered
    pub async fn setup_remote(&self, working_dir: &Path, url: &str) -> RepoResult<()> {
        self.git(working_dir, &["remote", "add", REMOTE_NAME, url])
            .await?;
        info!("Remote repository set: {url}");
        Ok(())
    }

    /// Pushes `branch` and then all tags to `remote`
    pub async fn push_to_remote(
        &self,
        working_dir: &Path,
        remote: &str,
        branch: &str,
    ) -> RepoResult<()> {
        self.git(working_dir, &["push", remote, branch]).await?;
        self.git(working_dir, &["push", remote, "--tags"]).await?;
        info!("Changes and tags pushed to {remote}/{branch}");
        Ok(())
    }

    pub async fn create_branch(&self, working_dir: &Path, branch: &str) -> RepoResult<()> {
        self.git(working_dir, &["checkout", "-b", branch]).await?;
        info!("Switched to new branch: {branch}");
        Ok(())
    }

    pub async fn switch_branch(&self, working_dir: &Path, branch: &str) -> RepoResult<()> {
        self.git(working_dir, &["checkout", branch]).await?;
        info!("Switched to branch: {branch}");
        Ok(())
    }

    /// One line per commit, newest first
    pub async fn commit_history(&self, working_dir: &Path) -> RepoResult<String> {
        self.git(working_dir, &["log", "--oneline"]).await
    }
}

impl VersionControl for GitDriver {
    async fn sync(&self, working_dir: &Path, remote_url: Option<&str>) -> RepoResult<()> {
        self.ensure_repository(working_dir).await?;
        self.add_files(working_dir).await?;
        self.commit_changes(working_dir, COMMIT_MESSAGE).await?;

        let save_point = self.save_point_name();
        self.create_save_point(working_dir, &save_point).await?;

        if let Some(url) = remote_url {
            self.setup_remote(working_dir, url).await?;
        }

        self.push_to_remote(working_dir, REMOTE_NAME, BRANCH_NAME)
            .await
    }
}
