use crate::cli::actions::{Action, citizens, complaints, departments, session};
use anyhow::Result;

/// Execute the provided action.
// This is the single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Login(args) => session::login(args).await,
        Action::Logout(globals) => session::logout(&globals),
        Action::Whoami(globals) => session::whoami(&globals).await,
        Action::Complaints(args) => complaints::execute(args).await,
        Action::Citizens(args) => citizens::execute(args).await,
        Action::Departments(args) => departments::execute(args).await,
    }
}
