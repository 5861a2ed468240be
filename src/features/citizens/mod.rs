//! Citizen registration performed by officers, plus the field validators the
//! public intake forms share.

pub mod client;
pub mod types;
pub mod validation;

pub use client::register;
pub use types::{Citizen, NewCitizen};
