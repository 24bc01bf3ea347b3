//! Shared domain models for the payroll calculation engine.
//!
//! This module contains the small enums that calculators take as input.

mod pay_frequency;
mod risk_class;

pub use pay_frequency::PayFrequency;
pub use risk_class::RiskClass;
