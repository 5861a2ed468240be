//! Field checks shared by citizen registration and complaint intake.
//! Client-side only; the backend re-validates everything.

use crate::app_lib::FieldError;
use regex::Regex;

pub const MIN_PASSWORD_CHARS: usize = 8;

/// Old (9 digits + V/X) or new (12 digits) national identity card number.
#[must_use]
pub fn valid_nic(nic: &str) -> bool {
    Regex::new(r"^(?:[0-9]{9}[VvXx]|[0-9]{12})$").is_ok_and(|re| re.is_match(nic))
}

/// Collects per-field errors in the order fields are checked.
#[derive(Debug, Default)]
pub(crate) struct Checks {
    errors: Vec<FieldError>,
}

impl Checks {
    pub(crate) fn required(&mut self, field: &'static str, value: &str, message: &str) -> bool {
        if value.trim().is_empty() {
            self.errors.push(FieldError::new(field, message));
            false
        } else {
            true
        }
    }

    pub(crate) fn check(&mut self, field: &'static str, ok: bool, message: &str) {
        if !ok {
            self.errors.push(FieldError::new(field, message));
        }
    }

    pub(crate) fn nic(&mut self, value: &str) {
        if self.required("nic", value, "NIC is required.") {
            self.check(
                "nic",
                valid_nic(value.trim()),
                "NIC must be 9 digits + V/X or 12 digits.",
            );
        }
    }

    pub(crate) fn finish(self) -> Vec<FieldError> {
        self.errors
    }
}
