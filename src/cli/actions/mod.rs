pub mod citizens;
pub mod complaints;
pub mod departments;
pub mod session;

// Internal "interpreter" for `Action`.
mod run;

use crate::{
    app_lib::AppError,
    cli::globals::GlobalArgs,
    features::auth::{GuardDecision, RoleGuard, SessionStore},
};
use anyhow::{Context, Result, anyhow, bail};
use secrecy::SecretString;
use serde::Serialize;
use std::io::{self, BufRead, Write};

#[derive(Debug)]
pub enum Action {
    Login(session::LoginArgs),
    Logout(GlobalArgs),
    Whoami(GlobalArgs),
    Complaints(complaints::Args),
    Citizens(citizens::Args),
    Departments(departments::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> Result<()> {
        run::execute(self).await
    }
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render output")?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}

/// Hydrates the profile if needed, then applies the officer guard for `path`.
pub(crate) async fn require_officer(session: &SessionStore, path: &str) -> Result<()> {
    session.ensure_profile().await;

    match RoleGuard::officer().check(session, path) {
        GuardDecision::Render => Ok(()),
        GuardDecision::Redirect { to, from } => Err(anyhow!(
            "{from} requires an officer session; sign in at {to} with `civiclink login --next {from}`"
        )),
    }
}

/// Adds a sign-in hint when a request failed because the session ended.
pub(crate) fn explain(err: AppError, session: &SessionStore) -> anyhow::Error {
    if err.is_unauthorized() && !session.is_authenticated() {
        anyhow::Error::new(err).context("Session expired; run `civiclink login` to sign in again")
    } else {
        err.into()
    }
}

/// Reads a single line from stdin after prompting on stderr.
pub(crate) fn read_secret(prompt: &str) -> Result<SecretString> {
    let mut stderr = io::stderr();
    write!(stderr, "{prompt}: ")?;
    stderr.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;

    let value = line.trim_end_matches(['\r', '\n']);
    if value.is_empty() {
        bail!("{prompt} is required");
    }
    Ok(SecretString::from(value.to_string()))
}
