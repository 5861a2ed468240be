use super::types::{Citizen, CitizenRequest, NewCitizen};
use crate::{app_lib::AppError, features::auth::Gateway};
use tracing::info;

pub const CITIZENS_PATH: &str = "/api/citizens/";

/// Registers a citizen account. Validates locally before any request is sent.
///
/// # Errors
/// Returns `AppError::Validation` for invalid input, or the gateway error.
pub async fn register(gateway: &Gateway, citizen: &NewCitizen) -> Result<Citizen, AppError> {
    citizen.validate()?;
    let created: Citizen = gateway
        .post_json(CITIZENS_PATH, &CitizenRequest::from(citizen))
        .await?;
    info!(nic = %created.nic, "citizen registered");
    Ok(created)
}
