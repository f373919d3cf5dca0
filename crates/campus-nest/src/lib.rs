//! Roommate matching core for the campus-nest student-housing marketplace.
//!
//! The crate exposes the compatibility scorer, match-reason generator and candidate ranking,
//! together with the storage seam, service facade and axum router the API binary mounts.

pub mod config;
pub mod error;
pub mod roommates;
pub mod telemetry;
