//! Read side of the department directory used by the admin back office.

pub mod client;
pub mod types;

pub use client::{get, list, statistics};
pub use types::{
    DepartmentDetail, DepartmentService, DepartmentStatistics, DepartmentStats, DepartmentSummary,
};
