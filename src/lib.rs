use env_logger::Env;
use std::io::Write;

pub mod cmd;
pub mod config;
pub mod fs;
pub mod git;
pub mod scaffold;

pub use config::Config;
pub use git::{GitDriver, RepositoryError, VersionControl};
pub use scaffold::{create_structure, scaffold_project, ScaffoldError};

/// Initializes the process wide logger writing `timestamp - LEVEL - message`
/// lines at info level unless `RUST_LOG` says otherwise. Calling this more
/// than once leaves the first logger in place
pub fn init_logger() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                buf.timestamp(),
                record.level(),
                record.args()
            )
        })
        .try_init()
        .ok();
}
