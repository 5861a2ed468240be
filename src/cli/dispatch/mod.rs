use crate::{
    cli::{
        actions::{Action, citizens, complaints, departments, session},
        commands::{self, api},
        globals::GlobalArgs,
    },
    features::complaints::{ComplaintStatus, NewComplaint, Priority},
};
use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use secrecy::SecretString;

pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let globals = GlobalArgs::from_options(api::Options::parse(matches))?;

    match matches.subcommand() {
        Some((commands::session::CMD_LOGIN, sub_m)) => Ok(Action::Login(session::LoginArgs {
            globals,
            username: required(sub_m, commands::session::ARG_USERNAME)?,
            password: secret(sub_m, commands::session::ARG_PASSWORD),
            next: sub_m.get_one::<String>(commands::session::ARG_NEXT).cloned(),
        })),
        Some((commands::session::CMD_LOGOUT, _)) => Ok(Action::Logout(globals)),
        Some((commands::session::CMD_WHOAMI, _)) => Ok(Action::Whoami(globals)),
        Some((commands::complaints::CMD_COMPLAINTS, sub_m)) => {
            Ok(Action::Complaints(complaints::Args {
                globals,
                command: complaint_command(sub_m)?,
            }))
        }
        Some((commands::citizens::CMD_CITIZENS, sub_m)) => Ok(Action::Citizens(citizens::Args {
            globals,
            register: register_args(sub_m)?,
        })),
        Some((commands::departments::CMD_DEPARTMENTS, sub_m)) => {
            Ok(Action::Departments(departments::Args {
                globals,
                command: department_command(sub_m)?,
            }))
        }
        Some((other, _)) => bail!("unknown command: {other}"),
        None => bail!("no command given, try --help"),
    }
}

fn required(matches: &ArgMatches, id: &str) -> Result<String> {
    matches
        .get_one::<String>(id)
        .cloned()
        .with_context(|| format!("missing required argument: --{id}"))
}

fn text(matches: &ArgMatches, id: &str) -> String {
    matches.get_one::<String>(id).cloned().unwrap_or_default()
}

fn secret(matches: &ArgMatches, id: &str) -> Option<SecretString> {
    matches
        .get_one::<String>(id)
        .map(|value| SecretString::from(value.clone()))
}

fn complaint_command(matches: &ArgMatches) -> Result<complaints::Command> {
    use commands::complaints as args;

    let id = |sub_m: &ArgMatches| -> Result<i64> {
        sub_m
            .get_one::<i64>(args::ARG_ID)
            .copied()
            .context("missing required argument: <id>")
    };
    let status = |sub_m: &ArgMatches| -> Result<ComplaintStatus> {
        sub_m
            .get_one::<ComplaintStatus>(args::ARG_STATUS)
            .copied()
            .context("missing required argument: status")
    };

    match matches.subcommand() {
        Some((args::CMD_EMERGENCIES, _)) => Ok(complaints::Command::Emergencies),
        Some((args::CMD_LIST, sub_m)) => Ok(complaints::Command::List {
            status: status(sub_m)?,
        }),
        Some((args::CMD_SHOW, sub_m)) => Ok(complaints::Command::Show { id: id(sub_m)? }),
        Some((args::CMD_SET_STATUS, sub_m)) => Ok(complaints::Command::SetStatus {
            id: id(sub_m)?,
            status: status(sub_m)?,
        }),
        Some((args::CMD_SUBMIT, sub_m)) => Ok(complaints::Command::Submit(Box::new(
            NewComplaint {
                nic: required(sub_m, args::ARG_NIC)?,
                title: required(sub_m, args::ARG_TITLE)?,
                description: required(sub_m, args::ARG_DESCRIPTION)?,
                category: required(sub_m, args::ARG_CATEGORY)?,
                keywords: text(sub_m, args::ARG_KEYWORDS),
                is_emergency: sub_m.get_flag(args::ARG_EMERGENCY),
                priority: sub_m.get_one::<Priority>(args::ARG_PRIORITY).copied(),
                address: text(sub_m, args::ARG_ADDRESS),
                city: text(sub_m, args::ARG_CITY),
                district: text(sub_m, args::ARG_DISTRICT),
                latitude: sub_m.get_one::<f64>(args::ARG_LATITUDE).copied(),
                longitude: sub_m.get_one::<f64>(args::ARG_LONGITUDE).copied(),
                incident_date: sub_m.get_one::<String>(args::ARG_INCIDENT_DATE).cloned(),
            },
        ))),
        Some((other, _)) => bail!("unknown complaints command: {other}"),
        None => bail!("no complaints command given, try `civiclink complaints --help`"),
    }
}

fn register_args(matches: &ArgMatches) -> Result<citizens::RegisterArgs> {
    use commands::citizens as args;

    match matches.subcommand() {
        Some((args::CMD_REGISTER, sub_m)) => Ok(citizens::RegisterArgs {
            username: required(sub_m, args::ARG_USERNAME)?,
            password: secret(sub_m, args::ARG_PASSWORD),
            nic: required(sub_m, args::ARG_NIC)?,
            full_name: required(sub_m, args::ARG_FULL_NAME)?,
            address: required(sub_m, args::ARG_ADDRESS)?,
            gn_division: required(sub_m, args::ARG_GN_DIVISION)?,
        }),
        Some((other, _)) => bail!("unknown citizens command: {other}"),
        None => bail!("no citizens command given, try `civiclink citizens --help`"),
    }
}

fn department_command(matches: &ArgMatches) -> Result<departments::Command> {
    use commands::departments as args;

    match matches.subcommand() {
        Some((args::CMD_LIST, sub_m)) => {
            let active = if sub_m.get_flag(args::ARG_ACTIVE) {
                Some(true)
            } else if sub_m.get_flag(args::ARG_INACTIVE) {
                Some(false)
            } else {
                None
            };
            Ok(departments::Command::List { active })
        }
        Some((args::CMD_SHOW, sub_m)) => Ok(departments::Command::Show {
            id: sub_m
                .get_one::<i64>(args::ARG_ID)
                .copied()
                .context("missing required argument: <id>")?,
        }),
        Some((args::CMD_STATS, _)) => Ok(departments::Command::Stats),
        Some((other, _)) => bail!("unknown departments command: {other}"),
        None => bail!("no departments command given, try `civiclink departments --help`"),
    }
}
