use assert_cmd::prelude::{CommandCargoExt, OutputAssertExt};
use git2::Repository;
use predicates::prelude::predicate;
use project_scaffold::git::{COMMIT_MESSAGE, GITIGNORE_CONTENT};
use project_scaffold::scaffold::expected_paths;
use std::fs::{read_dir, read_to_string, write};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Keeps git away from the user and system configuration so commits
/// work the same on every machine
fn isolate(command: &mut Command, temp: &Path) {
    command
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_CONFIG_GLOBAL", temp.join("gitconfig"))
        .env("GIT_CONFIG_COUNT", "1")
        .env("GIT_CONFIG_KEY_0", "init.defaultBranch")
        .env("GIT_CONFIG_VALUE_0", "main")
        .env("GIT_AUTHOR_NAME", "Scaffold Test")
        .env("GIT_AUTHOR_EMAIL", "scaffold@example.com")
        .env("GIT_COMMITTER_NAME", "Scaffold Test")
        .env("GIT_COMMITTER_EMAIL", "scaffold@example.com")
        .env_remove("SCAFFOLD_GIT")
        .env_remove("RUST_LOG");
}

fn git(dir: &Path, temp: &Path, args: &[&str]) -> TestResult {
    let mut command = Command::new("git");
    command.current_dir(dir).args(args);
    isolate(&mut command, temp);
    command.assert().success();
    Ok(())
}

fn tag_count(path: &Path) -> Result<usize, git2::Error> {
    Ok(Repository::open(path)?.tag_names(None)?.len())
}

#[test]
fn scaffold_without_arguments() -> TestResult {
    let temp = TempDir::new()?;
    let mut sut = Command::cargo_bin("scaffold")?;
    sut.current_dir(temp.path());

    sut.assert()
        .code(1)
        .stdout(predicate::str::contains("Usage: scaffold <project_name>"));
    assert_eq!(read_dir(temp.path())?.count(), 0);
    Ok(())
}

#[test]
fn scaffold_with_extra_arguments() -> TestResult {
    let temp = TempDir::new()?;
    let mut sut = Command::cargo_bin("scaffold")?;
    sut.current_dir(temp.path()).arg("first").arg("second");

    sut.assert()
        .code(1)
        .stdout(predicate::str::contains("Usage"));
    assert_eq!(read_dir(temp.path())?.count(), 0);
    Ok(())
}

#[test]
fn scaffold_commits_new_project() -> TestResult {
    let temp = TempDir::new()?;
    let mut sut = Command::cargo_bin("scaffold")?;
    sut.current_dir(temp.path()).arg("demo");
    isolate(&mut sut, temp.path());

    // No remote is registered when scaffolding so the final push fails
    sut.assert()
        .code(1)
        .stderr(predicate::str::contains("An error occurred"));

    let root = temp.path().join("demo");
    for path in expected_paths(&root) {
        assert!(path.exists(), "missing {path:?}");
    }
    assert_eq!(read_to_string(root.join(".gitignore"))?, GITIGNORE_CONTENT);
    assert_eq!(read_to_string(root.join("README.md"))?, "");

    let repo = Repository::open(&root)?;
    let head = repo.head()?.peel_to_commit()?;
    assert_eq!(head.summary(), Some(COMMIT_MESSAGE));
    assert_eq!(head.parent_count(), 0);
    assert_eq!(tag_count(&root)?, 1);
    Ok(())
}

#[test]
fn sync_pushes_to_remote() -> TestResult {
    let temp = TempDir::new()?;
    let project = temp.path().join("project");
    std::fs::create_dir(&project)?;
    write(project.join("README.md"), "hello")?;
    git(temp.path(), temp.path(), &["init", "--bare", "remote.git"])?;
    let remote = temp.path().join("remote.git");

    let mut sut = Command::cargo_bin("git-sync")?;
    sut.current_dir(&project).arg(&remote);
    isolate(&mut sut, temp.path());

    sut.assert()
        .success()
        .stderr(predicate::str::contains("Changes and tags pushed to origin/main"));

    let remote_repo = Repository::open_bare(&remote)?;
    assert!(remote_repo.find_reference("refs/heads/main").is_ok());
    assert_eq!(tag_count(&remote)?, 1);
    Ok(())
}

#[test]
fn history_does_not_mutate() -> TestResult {
    let temp = TempDir::new()?;
    let project = temp.path().join("project");
    std::fs::create_dir(&project)?;
    write(project.join("README.md"), "hello")?;
    git(&project, temp.path(), &["init"])?;
    git(&project, temp.path(), &["add", "."])?;
    git(&project, temp.path(), &["commit", "-m", "First commit"])?;

    let mut sut = Command::cargo_bin("git-sync")?;
    sut.current_dir(&project).arg("history");
    isolate(&mut sut, temp.path());

    sut.assert()
        .success()
        .stdout(predicate::str::contains("First commit"));

    let repo = Repository::open(&project)?;
    let head = repo.head()?.peel_to_commit()?;
    assert_eq!(head.summary(), Some("First commit"));
    assert_eq!(tag_count(&project)?, 0);
    assert!(!project.join(".gitignore").exists());
    Ok(())
}

#[test]
fn sync_with_extra_arguments() -> TestResult {
    let temp = TempDir::new()?;
    let mut sut = Command::cargo_bin("git-sync")?;
    sut.current_dir(temp.path()).arg("history").arg("extra");

    sut.assert().code(1).stdout(predicate::str::contains("Usage"));
    assert_eq!(read_dir(temp.path())?.count(), 0);
    Ok(())
}
