use clap::{Arg, ArgAction, Command};

pub const CMD_DEPARTMENTS: &str = "departments";
pub const CMD_LIST: &str = "list";
pub const CMD_SHOW: &str = "show";
pub const CMD_STATS: &str = "stats";

pub const ARG_ACTIVE: &str = "active";
pub const ARG_INACTIVE: &str = "inactive";
pub const ARG_ID: &str = "id";

pub fn subcommand() -> Command {
    Command::new(CMD_DEPARTMENTS)
        .about("Department directory")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new(CMD_LIST)
                .about("List departments")
                .arg(
                    Arg::new(ARG_ACTIVE)
                        .long("active")
                        .help("Only active departments")
                        .action(ArgAction::SetTrue)
                        .conflicts_with(ARG_INACTIVE),
                )
                .arg(
                    Arg::new(ARG_INACTIVE)
                        .long("inactive")
                        .help("Only inactive departments")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new(CMD_SHOW).about("Show a department and its services").arg(
                Arg::new(ARG_ID)
                    .help("Department id")
                    .required(true)
                    .value_parser(clap::value_parser!(i64)),
            ),
        )
        .subcommand(Command::new(CMD_STATS).about("Officer and complaint counts per department"))
}
