use log::error;
use project_scaffold::{init_logger, scaffold_project, Config, GitDriver};
use std::env;
use std::process::exit;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() != 1 {
        println!("Usage: scaffold <project_name>");
        exit(1);
    }

    init_logger();
    let config = Config::from_env();
    let driver = GitDriver::from_config(&config);

    if let Err(err) = scaffold_project(&args[0], &driver).await {
        error!("An error occurred: {err}");
        exit(1);
    }
}
