use super::validation::{Checks, MIN_PASSWORD_CHARS};
use crate::app_lib::AppError;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Citizen account registered by an officer.
#[derive(Clone, Debug)]
pub struct NewCitizen {
    pub username: String,
    pub password: SecretString,
    pub nic: String,
    pub full_name: String,
    pub address: String,
    pub gn_division: String,
}

impl NewCitizen {
    /// Checks every field and reports all failures at once.
    ///
    /// # Errors
    /// Returns `AppError::Validation` listing each invalid field.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut checks = Checks::default();
        checks.required("username", &self.username, "Username is required.");
        checks.check(
            "password",
            self.password.expose_secret().chars().count() >= MIN_PASSWORD_CHARS,
            "Password must be at least 8 characters.",
        );
        checks.nic(&self.nic);
        checks.required("full_name", &self.full_name, "Full name is required.");
        checks.required("address", &self.address, "Address is required.");
        checks.required("gn_division", &self.gn_division, "GN division is required.");

        let errors = checks.finish();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

/// `POST /api/citizens/` body. Carries the password; never log it.
#[derive(Serialize)]
pub(crate) struct CitizenRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub nic: &'a str,
    pub full_name: &'a str,
    pub address: &'a str,
    pub gn_division: &'a str,
}

impl<'a> From<&'a NewCitizen> for CitizenRequest<'a> {
    fn from(citizen: &'a NewCitizen) -> Self {
        Self {
            username: citizen.username.trim(),
            password: citizen.password.expose_secret(),
            nic: citizen.nic.trim(),
            full_name: citizen.full_name.trim(),
            address: citizen.address.trim(),
            gn_division: citizen.gn_division.trim(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citizen {
    /// Absent in the create response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nic: String,
    pub full_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub gn_division: String,
}
