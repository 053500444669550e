//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, endpoints)
//! - The library `Config` struct and CLI option types

mod constants;
mod types;

pub use constants::*;
pub use types::{Config, LogLevel};
