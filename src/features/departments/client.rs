use super::types::{DepartmentDetail, DepartmentStatistics, DepartmentSummary};
use crate::{app_lib::AppError, features::auth::Gateway};

pub const DEPARTMENTS_PATH: &str = "/api/departments/";
pub const STATISTICS_PATH: &str = "/api/departments/statistics/";

/// Lists departments, optionally filtered by `is_active`.
/// # Errors
/// Returns the gateway error or a decode failure.
pub async fn list(
    gateway: &Gateway,
    active: Option<bool>,
) -> Result<Vec<DepartmentSummary>, AppError> {
    match active {
        Some(active) => {
            let flag = if active { "true" } else { "false" };
            gateway
                .get_json_with_query(DEPARTMENTS_PATH, &[("is_active", flag)])
                .await
        }
        None => gateway.get_json(DEPARTMENTS_PATH).await,
    }
}

/// # Errors
/// Returns the gateway error or a decode failure.
pub async fn get(gateway: &Gateway, id: i64) -> Result<DepartmentDetail, AppError> {
    gateway
        .get_json(&format!("{DEPARTMENTS_PATH}{id}/"))
        .await
}

/// # Errors
/// Returns the gateway error or a decode failure.
pub async fn statistics(gateway: &Gateway) -> Result<DepartmentStatistics, AppError> {
    gateway.get_json(STATISTICS_PATH).await
}
