use clap::{Arg, Command};

pub const CMD_CITIZENS: &str = "citizens";
pub const CMD_REGISTER: &str = "register";

pub const ARG_USERNAME: &str = "username";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_NIC: &str = "nic";
pub const ARG_FULL_NAME: &str = "full-name";
pub const ARG_ADDRESS: &str = "address";
pub const ARG_GN_DIVISION: &str = "gn-division";

pub fn subcommand() -> Command {
    Command::new(CMD_CITIZENS)
        .about("Citizen accounts managed by officers")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new(CMD_REGISTER)
                .about("Register a citizen account")
                .arg(
                    Arg::new(ARG_USERNAME)
                        .long("username")
                        .help("Login name for the new citizen")
                        .required(true),
                )
                .arg(
                    Arg::new(ARG_PASSWORD)
                        .long("password")
                        .help("Initial password, at least 8 characters (read from stdin when omitted)")
                        .env("CIVICLINK_CITIZEN_PASSWORD")
                        .hide_env_values(true),
                )
                .arg(
                    Arg::new(ARG_NIC)
                        .long("nic")
                        .help("National identity card number: 9 digits + V/X, or 12 digits")
                        .required(true),
                )
                .arg(
                    Arg::new(ARG_FULL_NAME)
                        .long("full-name")
                        .help("Full name")
                        .required(true),
                )
                .arg(
                    Arg::new(ARG_ADDRESS)
                        .long("address")
                        .help("Postal address")
                        .required(true),
                )
                .arg(
                    Arg::new(ARG_GN_DIVISION)
                        .long("gn-division")
                        .help("Grama Niladhari division")
                        .required(true),
                ),
        )
}
