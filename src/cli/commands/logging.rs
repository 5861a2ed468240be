use clap::{Arg, ArgAction, Command, builder::ValueParser};

pub const ARG_VERBOSITY: &str = "verbosity";
pub const ARG_LOG_JSON: &str = "log-json";

#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_VERBOSITY)
                .short('v')
                .long("verbose")
                .help("Log more on stderr: -v warnings, -vv requests, -vvv session and refresh details, -vvvv everything")
                .long_help(
                    "Repeat to log more on stderr. Without it only errors are logged.\n\
                     CIVICLINK_LOG_LEVEL accepts error, warn, info, debug, trace or 0-5; RUST_LOG overrides both.",
                )
                .env("CIVICLINK_LOG_LEVEL")
                .global(true)
                .action(ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .arg(
            Arg::new(ARG_LOG_JSON)
                .long("log-json")
                .help("Emit logs as JSON lines on stderr")
                .env("CIVICLINK_LOG_JSON")
                .global(true)
                .action(ArgAction::SetTrue),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_help_describes_repeat_counts() {
        let command = with_args(Command::new("civiclink"));
        let help = command
            .get_arguments()
            .find(|arg| arg.get_id() == ARG_VERBOSITY)
            .and_then(|arg| arg.get_help())
            .map(ToString::to_string)
            .unwrap_or_default();
        assert!(help.contains("-vv requests"));
        assert!(help.contains("stderr"));
    }

    #[test]
    fn repeated_verbose_flag_counts() {
        temp_env::with_vars_unset(["CIVICLINK_LOG_LEVEL", "CIVICLINK_LOG_JSON"], || {
            let matches = with_args(Command::new("civiclink"))
                .try_get_matches_from(["civiclink", "-vvv", "--log-json"])
                .ok();
            assert_eq!(
                matches
                    .as_ref()
                    .and_then(|m| m.get_one::<u8>(ARG_VERBOSITY).copied()),
                Some(3)
            );
            assert_eq!(matches.map(|m| m.get_flag(ARG_LOG_JSON)), Some(true));
        });
    }
}
