use crate::{
    cli::{
        actions::{print_json, read_secret},
        globals::GlobalArgs,
    },
    features::auth::RoleGuard,
};
use anyhow::{Result, bail};
use secrecy::SecretString;
use serde_json::json;
use tracing::info;

#[derive(Debug)]
pub struct LoginArgs {
    pub globals: GlobalArgs,
    pub username: String,
    pub password: Option<SecretString>,
    pub next: Option<String>,
}

/// Signs in and prints the profile with the path to continue to.
/// # Errors
/// Returns an error if the credentials are rejected or the account is not an officer.
pub async fn login(args: LoginArgs) -> Result<()> {
    let session = args.globals.open_session()?;
    let password = match args.password {
        Some(password) => password,
        None => read_secret("Password")?,
    };

    let profile = session.login(args.username.trim(), &password).await?;
    let next = RoleGuard::officer()
        .with_landing_path(session.config().landing_path.clone())
        .destination_after_login(args.next.as_deref());

    print_json(&json!({ "user": profile, "next": next }))
}

/// # Errors
/// Returns an error if the saved session cannot be removed.
pub fn logout(globals: &GlobalArgs) -> Result<()> {
    let session = globals.open_session()?;
    session.logout()?;
    info!("signed out");
    print_json(&json!({ "signed_out": true }))
}

/// # Errors
/// Returns an error when there is no usable session.
pub async fn whoami(globals: &GlobalArgs) -> Result<()> {
    let session = globals.open_session()?;
    match session.ensure_profile().await {
        Some(profile) => print_json(&profile),
        None if session.is_authenticated() => {
            bail!("Signed in, but the profile could not be loaded; try again or run `civiclink login`")
        }
        None => bail!("Not signed in; run `civiclink login`"),
    }
}
