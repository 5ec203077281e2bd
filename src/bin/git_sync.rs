use log::error;
use project_scaffold::git::RepoResult;
use project_scaffold::{init_logger, Config, GitDriver, VersionControl};
use std::env;
use std::path::Path;
use std::process::exit;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() > 1 {
        println!("Usage: git-sync [history | <remote_url>]");
        exit(1);
    }

    init_logger();
    let config = Config::from_env();
    let driver = GitDriver::from_config(&config);

    if let Err(err) = run(&driver, args.first().map(String::as_str)).await {
        error!("Command failed: {err}");
        exit(1);
    }
}

async fn run(driver: &GitDriver, arg: Option<&str>) -> RepoResult<()> {
    let working_dir = Path::new(".");
    match arg {
        Some("history") => {
            let history = driver.commit_history(working_dir).await?;
            println!("{history}");
            Ok(())
        }
        remote_url => driver.sync(working_dir, remote_url).await,
    }
}
