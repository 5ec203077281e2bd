use log::debug;
use std::env;

/// Environment variable naming the git program to invoke
const GIT_PROGRAM_ENV: &str = "SCAFFOLD_GIT";
const DEFAULT_GIT_PROGRAM: &str = "git";

/// Runtime configuration loaded from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Program used for every version control command
    pub git_program: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            git_program: DEFAULT_GIT_PROGRAM.to_string(),
        }
    }
}

impl Config {
    /// Loads the configuration, reading a `.env` file in the current
    /// directory first if one exists
    pub fn from_env() -> Self {
        if let Ok(path) = dotenv::dotenv() {
            debug!("Loaded environment from {path:?}");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let git_program = lookup(GIT_PROGRAM_ENV)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GIT_PROGRAM.to_string());
        Self { git_program }
    }
}
