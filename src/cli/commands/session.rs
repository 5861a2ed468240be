use clap::{Arg, Command};

pub const CMD_LOGIN: &str = "login";
pub const CMD_LOGOUT: &str = "logout";
pub const CMD_WHOAMI: &str = "whoami";

pub const ARG_USERNAME: &str = "username";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_NEXT: &str = "next";

pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(
            Command::new(CMD_LOGIN)
                .about("Sign in as an officer and save the session")
                .arg(
                    Arg::new(ARG_USERNAME)
                        .short('u')
                        .long("username")
                        .help("Officer username")
                        .env("CIVICLINK_USERNAME")
                        .required(true),
                )
                .arg(
                    Arg::new(ARG_PASSWORD)
                        .long("password")
                        .help("Officer password (read from stdin when omitted)")
                        .env("CIVICLINK_PASSWORD")
                        .hide_env_values(true),
                )
                .arg(
                    Arg::new(ARG_NEXT)
                        .long("next")
                        .help("Path originally requested; printed as the destination after login"),
                ),
        )
        .subcommand(Command::new(CMD_LOGOUT).about("Discard the saved session"))
        .subcommand(
            Command::new(CMD_WHOAMI).about("Show the signed-in user, fetching the profile if needed"),
        )
}
