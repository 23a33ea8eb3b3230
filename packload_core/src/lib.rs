#![forbid(unsafe_code)]

//! Core domain model and business logic for the dog pack load calculator.
//!
//! This crate provides:
//! - Domain types (dog profile classes, hike conditions, results)
//! - Unit conversion helpers
//! - The pack load calculator
//! - Input validation for callers
//! - Profile persistence
//! - Result rendering

pub mod types;
pub mod error;
pub mod units;
pub mod validation;
pub mod calculator;
pub mod config;
pub mod logging;
pub mod profiles;
pub mod report;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use calculator::calculate_pack_weight;
pub use config::Config;
pub use profiles::ProfileStore;
pub use report::{render_hike, render_resources, render_text, ResultsPayload};
