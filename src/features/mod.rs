pub mod auth;
pub mod citizens;
pub mod complaints;
pub mod departments;
