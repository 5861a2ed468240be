//! Officer complaint dashboard and the public complaint intake.

pub mod client;
pub mod types;

pub use client::{get, list_by_status, list_emergencies, set_status, submit};
pub use types::{Complaint, ComplaintReceipt, ComplaintStatus, Department, NewComplaint, Priority};
