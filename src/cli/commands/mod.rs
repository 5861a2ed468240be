pub mod api;
pub mod citizens;
pub mod complaints;
pub mod departments;
pub mod logging;
pub mod session;

use clap::{
    ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let command = Command::new("civiclink")
        .about("CivicLink officer console")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true);

    let command = session::with_subcommands(command)
        .subcommand(complaints::subcommand())
        .subcommand(citizens::subcommand())
        .subcommand(departments::subcommand());
    let command = api::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::complaints::{ComplaintStatus, Priority};
    use std::path::PathBuf;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "civiclink");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("CivicLink officer console".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
        command.debug_assert();
    }

    #[test]
    fn test_global_args_after_subcommand() {
        temp_env::with_vars_unset(
            [
                "CIVICLINK_API_URL",
                "CIVICLINK_SESSION_DIR",
                "CIVICLINK_TIMEOUT_SECONDS",
            ],
            || {
                let matches = new().get_matches_from(vec![
                    "civiclink",
                    "logout",
                    "--api-url",
                    "https://api.civiclink.lk",
                    "--session-dir",
                    "/tmp/civiclink",
                    "--timeout",
                    "3",
                ]);

                assert_eq!(matches.subcommand_name(), Some(session::CMD_LOGOUT));
                let options = api::Options::parse(&matches);
                assert_eq!(options.api_url.as_deref(), Some("https://api.civiclink.lk"));
                assert_eq!(options.session_dir, Some(PathBuf::from("/tmp/civiclink")));
                assert_eq!(options.timeout_seconds, 3);
            },
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("CIVICLINK_API_URL", Some("http://localhost:8000")),
                ("CIVICLINK_SESSION_DIR", Some("/tmp/civiclink-env")),
                ("CIVICLINK_TIMEOUT_SECONDS", Some("25")),
                ("CIVICLINK_LOG_LEVEL", Some("info")),
                ("CIVICLINK_USERNAME", Some("officer1")),
                ("CIVICLINK_PASSWORD", Some("pw")),
            ],
            || {
                let matches = new().get_matches_from(vec!["civiclink", "login"]);
                let options = api::Options::parse(&matches);
                assert_eq!(options.api_url.as_deref(), Some("http://localhost:8000"));
                assert_eq!(options.session_dir, Some(PathBuf::from("/tmp/civiclink-env")));
                assert_eq!(options.timeout_seconds, 25);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );

                let login = matches.subcommand_matches(session::CMD_LOGIN);
                assert_eq!(
                    login.and_then(|m| m.get_one::<String>(session::ARG_USERNAME).cloned()),
                    Some("officer1".to_string())
                );
                assert_eq!(
                    login.and_then(|m| m.get_one::<String>(session::ARG_PASSWORD).cloned()),
                    Some("pw".to_string())
                );
            },
        );
    }

    #[test]
    fn test_default_timeout() {
        temp_env::with_vars_unset(["CIVICLINK_TIMEOUT_SECONDS"], || {
            let matches = new().get_matches_from(vec!["civiclink", "whoami"]);
            assert_eq!(api::Options::parse(&matches).timeout_seconds, 10);
        });
    }

    #[test]
    fn test_zero_timeout_rejected() {
        temp_env::with_vars_unset(["CIVICLINK_TIMEOUT_SECONDS"], || {
            let result = new().try_get_matches_from(vec!["civiclink", "whoami", "--timeout", "0"]);
            assert!(result.is_err());
        });
    }

    #[test]
    fn test_check_log_level_env() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("CIVICLINK_LOG_LEVEL", Some(level))], || {
                let matches = new().get_matches_from(vec!["civiclink", "whoami"]);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        for index in 0..5_usize {
            temp_env::with_vars([("CIVICLINK_LOG_LEVEL", None::<String>)], || {
                let mut args = vec!["civiclink".to_string(), "whoami".to_string()];
                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }

                let matches = new().get_matches_from(args);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_complaint_status_parsing() {
        let matches = new().get_matches_from(vec![
            "civiclink",
            "complaints",
            "set-status",
            "42",
            "in-progress",
        ]);
        let set_status = matches
            .subcommand_matches(complaints::CMD_COMPLAINTS)
            .and_then(|m| m.subcommand_matches(complaints::CMD_SET_STATUS));
        assert_eq!(
            set_status.and_then(|m| m.get_one::<i64>(complaints::ARG_ID).copied()),
            Some(42)
        );
        assert_eq!(
            set_status.and_then(|m| m.get_one::<ComplaintStatus>(complaints::ARG_STATUS).copied()),
            Some(ComplaintStatus::InProgress)
        );

        let result = new().try_get_matches_from(vec![
            "civiclink",
            "complaints",
            "list",
            "--status",
            "closed",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_submit_args() {
        let matches = new().get_matches_from(vec![
            "civiclink",
            "complaints",
            "submit",
            "--nic",
            "123456789V",
            "--title",
            "Pothole",
            "--description",
            "Deep pothole",
            "--category",
            "roads",
            "--priority",
            "high",
            "--longitude",
            "-79.85",
        ]);
        let submit = matches
            .subcommand_matches(complaints::CMD_COMPLAINTS)
            .and_then(|m| m.subcommand_matches(complaints::CMD_SUBMIT));
        assert_eq!(
            submit.and_then(|m| m.get_one::<Priority>(complaints::ARG_PRIORITY).copied()),
            Some(Priority::High)
        );
        assert_eq!(
            submit.and_then(|m| m.get_one::<f64>(complaints::ARG_LONGITUDE).copied()),
            Some(-79.85)
        );
        assert_eq!(
            submit.map(|m| m.get_flag(complaints::ARG_EMERGENCY)),
            Some(false)
        );
    }

    #[test]
    fn test_departments_filters_conflict() {
        let result = new().try_get_matches_from(vec![
            "civiclink",
            "departments",
            "list",
            "--active",
            "--inactive",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(new().try_get_matches_from(vec!["civiclink"]).is_err());
        assert!(
            new()
                .try_get_matches_from(vec!["civiclink", "complaints"])
                .is_err()
        );
    }
}
