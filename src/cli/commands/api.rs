use crate::app_lib::config::DEFAULT_TIMEOUT_SECONDS;
use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

pub const ARG_API_URL: &str = "api-url";
pub const ARG_SESSION_DIR: &str = "session-dir";
pub const ARG_TIMEOUT: &str = "timeout";

const DEFAULT_TIMEOUT: &str = "10";

pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long("api-url")
                .help("CivicLink API base URL, example: https://api.civiclink.lk")
                .env("CIVICLINK_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_SESSION_DIR)
                .long("session-dir")
                .help("Directory holding the saved session (default: per-user data directory)")
                .env("CIVICLINK_SESSION_DIR")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long("timeout")
                .help("Request timeout in seconds")
                .env("CIVICLINK_TIMEOUT_SECONDS")
                .global(true)
                .default_value(DEFAULT_TIMEOUT)
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}

#[derive(Debug)]
pub struct Options {
    pub api_url: Option<String>,
    pub session_dir: Option<PathBuf>,
    pub timeout_seconds: u64,
}

impl Options {
    #[must_use]
    pub fn parse(matches: &ArgMatches) -> Self {
        Self {
            api_url: matches.get_one::<String>(ARG_API_URL).cloned(),
            session_dir: matches.get_one::<PathBuf>(ARG_SESSION_DIR).cloned(),
            timeout_seconds: matches
                .get_one::<u64>(ARG_TIMEOUT)
                .copied()
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeout_matches_config() {
        assert_eq!(DEFAULT_TIMEOUT.parse::<u64>().ok(), Some(DEFAULT_TIMEOUT_SECONDS));
    }
}
