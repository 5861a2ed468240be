//! Complaint payloads. Enum wire names match the backend's choice values.

use crate::{
    app_lib::{AppError, FieldError},
    features::citizens::{Citizen, validation::Checks},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

pub const MAX_TITLE_CHARS: usize = 120;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplaintStatus {
    Pending,
    InProgress,
    Resolved,
}

impl ComplaintStatus {
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Resolved];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Resolved => "RESOLVED",
        }
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintStatus {
    type Err = AppError;

    /// Accepts wire names in any case, with `-` or `_` separators.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| {
                AppError::Validation(vec![FieldError::new(
                    "status",
                    format!("Unknown status {value:?}; expected PENDING, IN_PROGRESS or RESOLVED."),
                )])
            })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Emergency,
    High,
    #[default]
    Normal,
}

impl FromStr for Priority {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "EMERGENCY" => Ok(Self::Emergency),
            "HIGH" => Ok(Self::High),
            "NORMAL" => Ok(Self::Normal),
            _ => Err(AppError::Validation(vec![FieldError::new(
                "priority",
                format!("Unknown priority {value:?}; expected EMERGENCY, HIGH or NORMAL."),
            )])),
        }
    }
}

/// Department a complaint is routed to by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Department {
    Municipal,
    Police,
    Electricity,
    Water,
    Health,
}

impl Department {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Municipal => "Municipal Council",
            Self::Police => "Police",
            Self::Electricity => "Electricity Board",
            Self::Water => "Water Board",
            Self::Health => "Health Department",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Complaint {
    pub id: i64,
    pub reference_code: String,
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub keywords: String,
    pub assigned_department: Department,
    #[serde(default)]
    pub is_emergency: bool,
    #[serde(default)]
    pub priority: Priority,
    pub status: ComplaintStatus,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub district: String,
    #[serde(default, deserialize_with = "decimal")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "decimal")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub incident_date: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub citizen: Option<Citizen>,
}

/// Complaint filed through the public intake form, identified by the citizen's NIC.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NewComplaint {
    pub nic: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub keywords: String,
    pub is_emergency: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    pub address: String,
    pub city: String,
    pub district: String,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "six_places"
    )]
    pub latitude: Option<f64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "six_places"
    )]
    pub longitude: Option<f64>,
    /// `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident_date: Option<String>,
}

impl NewComplaint {
    /// # Errors
    /// Returns `AppError::Validation` listing each invalid field.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut checks = Checks::default();
        checks.nic(&self.nic);
        if checks.required("title", &self.title, "Title is required.") {
            checks.check(
                "title",
                self.title.trim().chars().count() <= MAX_TITLE_CHARS,
                "Title must be at most 120 characters.",
            );
        }
        checks.required("description", &self.description, "Description is required.");
        checks.required("category", &self.category, "Category is required.");
        if let Some(latitude) = self.latitude {
            checks.check(
                "latitude",
                (-90.0..=90.0).contains(&latitude),
                "Latitude must be between -90 and 90.",
            );
        }
        if let Some(longitude) = self.longitude {
            checks.check(
                "longitude",
                (-180.0..=180.0).contains(&longitude),
                "Longitude must be between -180 and 180.",
            );
        }

        let errors = checks.finish();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

/// What the backend echoes after accepting a complaint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintReceipt {
    pub reference_code: String,
    pub assigned_department: Department,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub is_emergency: bool,
    #[serde(default)]
    pub title: String,
}

/// Backend decimals arrive as strings; accept numbers too.
fn decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(value)) => Ok(Some(value)),
        Some(Raw::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Raw::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

// The backend stores coordinates with six decimal places and rejects more.
#[allow(clippy::ref_option)]
fn six_places<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(value) => serializer.serialize_f64((value * 1_000_000.0).round() / 1_000_000.0),
        None => serializer.serialize_none(),
    }
}
