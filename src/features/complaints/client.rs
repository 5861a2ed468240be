//! Complaint dashboard calls. Officer endpoints rely on the gateway for bearer
//! auth and refresh; `submit` also works without a session because the backend
//! identifies the complainant by NIC.

use super::types::{Complaint, ComplaintReceipt, ComplaintStatus, NewComplaint};
use crate::{app_lib::AppError, features::auth::Gateway};
use serde::Serialize;
use tracing::info;

pub const COMPLAINTS_PATH: &str = "/api/complaints/";
pub const EMERGENCIES_PATH: &str = "/api/complaints/emergencies/";
pub const BY_STATUS_PATH: &str = "/api/complaints/by-status/";

#[derive(Serialize)]
struct StatusUpdate {
    status: ComplaintStatus,
}

fn complaint_path(id: i64) -> String {
    format!("{COMPLAINTS_PATH}{id}/")
}

/// Emergency complaints, newest first.
/// # Errors
/// Returns the gateway error or a decode failure.
pub async fn list_emergencies(gateway: &Gateway) -> Result<Vec<Complaint>, AppError> {
    gateway.get_json(EMERGENCIES_PATH).await
}

/// # Errors
/// Returns the gateway error or a decode failure.
pub async fn list_by_status(
    gateway: &Gateway,
    status: ComplaintStatus,
) -> Result<Vec<Complaint>, AppError> {
    gateway
        .get_json_with_query(BY_STATUS_PATH, &[("status", status.as_str())])
        .await
}

/// # Errors
/// Returns the gateway error or a decode failure.
pub async fn get(gateway: &Gateway, id: i64) -> Result<Complaint, AppError> {
    gateway.get_json(&complaint_path(id)).await
}

/// # Errors
/// Returns the gateway error or a decode failure.
pub async fn set_status(
    gateway: &Gateway,
    id: i64,
    status: ComplaintStatus,
) -> Result<Complaint, AppError> {
    let path = format!("{}set-status/", complaint_path(id));
    let complaint: Complaint = gateway.post_json(&path, &StatusUpdate { status }).await?;
    info!(id, %status, "complaint status updated");
    Ok(complaint)
}

/// Files a complaint. Validates locally before any request is sent.
/// # Errors
/// Returns `AppError::Validation` for invalid input, or the gateway error.
pub async fn submit(
    gateway: &Gateway,
    complaint: &NewComplaint,
) -> Result<ComplaintReceipt, AppError> {
    complaint.validate()?;
    let receipt: ComplaintReceipt = gateway.post_json(COMPLAINTS_PATH, complaint).await?;
    info!(
        reference = %receipt.reference_code,
        department = receipt.assigned_department.label(),
        "complaint submitted"
    );
    Ok(receipt)
}
