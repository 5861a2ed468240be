use crate::{
    cli::{
        actions::{explain, print_json, read_secret, require_officer},
        globals::GlobalArgs,
    },
    features::citizens::{self, NewCitizen},
};
use anyhow::Result;
use secrecy::SecretString;

pub const REGISTER_CITIZEN_PATH: &str = "/officer/register-citizen";

#[derive(Debug)]
pub struct RegisterArgs {
    pub username: String,
    /// Prompted for on stdin when absent.
    pub password: Option<SecretString>,
    pub nic: String,
    pub full_name: String,
    pub address: String,
    pub gn_division: String,
}

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub register: RegisterArgs,
}

/// # Errors
/// Returns an error if the guard rejects the session, validation fails, or the request fails.
pub async fn execute(args: Args) -> Result<()> {
    let gateway = args.globals.gateway()?;
    let session = gateway.session();
    require_officer(session, REGISTER_CITIZEN_PATH).await?;

    let RegisterArgs {
        username,
        password,
        nic,
        full_name,
        address,
        gn_division,
    } = args.register;
    let password = match password {
        Some(password) => password,
        None => read_secret("Citizen password")?,
    };

    let citizen = NewCitizen {
        username,
        password,
        nic,
        full_name,
        address,
        gn_division,
    };
    let created = citizens::register(&gateway, &citizen)
        .await
        .map_err(|err| explain(err, session))?;
    print_json(&created)
}
