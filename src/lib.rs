//! Client-side core of the lifeboard life-management app: tiered-plan
//! feature-usage enforcement and the upgrade/payment lifecycle.
//!
//! The backend REST API and the external checkout widget are collaborators
//! reached through the traits in [`domain::repositories`]; reqwest-backed
//! implementations live in [`infrastructure::http`]. The gate itself is
//! advisory — the server re-checks every create.

pub mod api_errors;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod usecases;
