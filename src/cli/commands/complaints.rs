use crate::features::complaints::{ComplaintStatus, Priority};
use clap::{Arg, ArgAction, Command, builder::ValueParser};

pub const CMD_COMPLAINTS: &str = "complaints";
pub const CMD_EMERGENCIES: &str = "emergencies";
pub const CMD_LIST: &str = "list";
pub const CMD_SHOW: &str = "show";
pub const CMD_SET_STATUS: &str = "set-status";
pub const CMD_SUBMIT: &str = "submit";

pub const ARG_ID: &str = "id";
pub const ARG_STATUS: &str = "status";
pub const ARG_NIC: &str = "nic";
pub const ARG_TITLE: &str = "title";
pub const ARG_DESCRIPTION: &str = "description";
pub const ARG_CATEGORY: &str = "category";
pub const ARG_KEYWORDS: &str = "keywords";
pub const ARG_EMERGENCY: &str = "emergency";
pub const ARG_PRIORITY: &str = "priority";
pub const ARG_ADDRESS: &str = "address";
pub const ARG_CITY: &str = "city";
pub const ARG_DISTRICT: &str = "district";
pub const ARG_LATITUDE: &str = "latitude";
pub const ARG_LONGITUDE: &str = "longitude";
pub const ARG_INCIDENT_DATE: &str = "incident-date";

#[must_use]
pub fn validator_status() -> ValueParser {
    ValueParser::from(move |value: &str| -> std::result::Result<ComplaintStatus, String> {
        value.parse().map_err(|err| format!("{err}"))
    })
}

#[must_use]
pub fn validator_priority() -> ValueParser {
    ValueParser::from(move |value: &str| -> std::result::Result<Priority, String> {
        value.parse().map_err(|err| format!("{err}"))
    })
}

fn id_arg() -> Arg {
    Arg::new(ARG_ID)
        .help("Complaint id")
        .required(true)
        .value_parser(clap::value_parser!(i64))
}

fn text_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).help(help)
}

pub fn subcommand() -> Command {
    Command::new(CMD_COMPLAINTS)
        .about("Officer complaint dashboard and public complaint intake")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new(CMD_EMERGENCIES).about("List emergency complaints, newest first"))
        .subcommand(
            Command::new(CMD_LIST)
                .about("List complaints by status")
                .arg(
                    Arg::new(ARG_STATUS)
                        .short('s')
                        .long("status")
                        .help("PENDING, IN_PROGRESS or RESOLVED")
                        .default_value("PENDING")
                        .value_parser(validator_status()),
                ),
        )
        .subcommand(Command::new(CMD_SHOW).about("Show one complaint").arg(id_arg()))
        .subcommand(
            Command::new(CMD_SET_STATUS)
                .about("Move a complaint to a new status")
                .arg(id_arg())
                .arg(
                    Arg::new(ARG_STATUS)
                        .help("PENDING, IN_PROGRESS or RESOLVED")
                        .required(true)
                        .value_parser(validator_status()),
                ),
        )
        .subcommand(
            Command::new(CMD_SUBMIT)
                .about("File a complaint on behalf of a registered citizen")
                .arg(text_arg(ARG_NIC, "Citizen NIC").required(true))
                .arg(text_arg(ARG_TITLE, "Short title (max 120 characters)").required(true))
                .arg(text_arg(ARG_DESCRIPTION, "What happened").required(true))
                .arg(text_arg(ARG_CATEGORY, "Complaint category").required(true))
                .arg(text_arg(ARG_KEYWORDS, "Comma separated keywords").default_value(""))
                .arg(
                    Arg::new(ARG_EMERGENCY)
                        .long("emergency")
                        .help("Flag the complaint as an emergency")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    text_arg(ARG_PRIORITY, "EMERGENCY, HIGH or NORMAL")
                        .value_parser(validator_priority()),
                )
                .arg(text_arg(ARG_ADDRESS, "Incident address").default_value(""))
                .arg(text_arg(ARG_CITY, "City").default_value(""))
                .arg(text_arg(ARG_DISTRICT, "District").default_value(""))
                .arg(
                    text_arg(ARG_LATITUDE, "Latitude in decimal degrees")
                        .allow_hyphen_values(true)
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    text_arg(ARG_LONGITUDE, "Longitude in decimal degrees")
                        .allow_hyphen_values(true)
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(text_arg(ARG_INCIDENT_DATE, "Incident date, YYYY-MM-DD")),
        )
}
