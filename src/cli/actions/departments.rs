use crate::{
    cli::{
        actions::{explain, print_json, require_officer},
        globals::GlobalArgs,
    },
    features::departments,
};
use anyhow::Result;

pub const DEPARTMENTS_PATH: &str = "/officer/departments";

#[derive(Debug)]
pub enum Command {
    List { active: Option<bool> },
    Show { id: i64 },
    Stats,
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
    require_officer(session, DEPARTMENTS_PATH).await?;

    match args.command {
        Command::List { active } => {
            let list = departments::list(&gateway, active)
                .await
                .map_err(|err| explain(err, session))?;
            print_json(&list)
        }
        Command::Show { id } => {
            let detail = departments::get(&gateway, id)
                .await
                .map_err(|err| explain(err, session))?;
            print_json(&detail)
        }
        Command::Stats => {
            let stats = departments::statistics(&gateway)
                .await
                .map_err(|err| explain(err, session))?;
            print_json(&stats)
        }
    }
}
