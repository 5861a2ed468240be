use crate::{
    app_lib::config::OFFICER_LANDING_PATH,
    cli::{
        actions::{explain, print_json, require_officer},
        globals::GlobalArgs,
    },
    features::complaints::{self, ComplaintStatus, NewComplaint},
};
use anyhow::Result;

#[derive(Debug)]
pub enum Command {
    Emergencies,
    List { status: ComplaintStatus },
    Show { id: i64 },
    SetStatus { id: i64, status: ComplaintStatus },
    Submit(Box<NewComplaint>),
}

impl Command {
    /// Screen the command corresponds to; `None` for the public intake.
    #[must_use]
    pub fn guard_path(&self) -> Option<&'static str> {
        match self {
            Self::Submit(_) => None,
            _ => Some(OFFICER_LANDING_PATH),
        }
    }
}

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub command: Command,
}

/// # Errors
/// Returns an error if the guard rejects the session or the request fails.
pub async fn execute(args: Args) -> Result<()> {
    let gateway = args.globals.gateway()?;
    let session = gateway.session();

    if let Some(path) = args.command.guard_path() {
        require_officer(session, path).await?;
    }

    match args.command {
        Command::Emergencies => {
            let complaints = complaints::list_emergencies(&gateway)
                .await
                .map_err(|err| explain(err, session))?;
            print_json(&complaints)
        }
        Command::List { status } => {
            let complaints = complaints::list_by_status(&gateway, status)
                .await
                .map_err(|err| explain(err, session))?;
            print_json(&complaints)
        }
        Command::Show { id } => {
            let complaint = complaints::get(&gateway, id)
                .await
                .map_err(|err| explain(err, session))?;
            print_json(&complaint)
        }
        Command::SetStatus { id, status } => {
            let complaint = complaints::set_status(&gateway, id, status)
                .await
                .map_err(|err| explain(err, session))?;
            print_json(&complaint)
        }
        Command::Submit(complaint) => {
            let receipt = complaints::submit(&gateway, &complaint)
                .await
                .map_err(|err| explain(err, session))?;
            print_json(&receipt)
        }
    }
}
