use serde::{Deserialize, Serialize};

/// Row of the department directory listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentSummary {
    pub id: i64,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub icon: String,
    pub is_active: bool,
    #[serde(default)]
    pub officer_count: u64,
    #[serde(default)]
    pub complaint_count: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentService {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub is_active: bool,
    pub created_at: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentDetail {
    pub id: i64,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub officer_count: u64,
    #[serde(default)]
    pub complaint_count: u64,
    #[serde(default)]
    pub services: Vec<DepartmentService>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentStats {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub officer_count: u64,
    pub complaint_count: u64,
    pub is_active: bool,
}

/// Admin dashboard totals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentStatistics {
    pub departments: Vec<DepartmentStats>,
    pub total_departments: u64,
    pub active_departments: u64,
}
