//! Mexican Payroll Tax & Labor-Concept Calculation Engine
//!
//! This crate loads the versioned government tables a Mexican payroll run
//! depends on (UMA, minimum wages, ISR and subsidy brackets, IMSS and
//! INFONAVIT rates, labor-law entitlements), validates them once at startup,
//! and computes withholding, contributions, entitlements and business-day
//! counts from the resulting read-only configuration.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
