//! Calculation logic for the payroll engine.
//!
//! This module contains the progressive bracket lookup shared by the ISR and
//! employment-subsidy calculators, IMSS and INFONAVIT contributions with
//! explicit base capping, vacation entitlements, labor-law payments
//! (aguinaldo, vacation premium, overtime, Sunday premium, state payroll
//! tax) and the business-day calendar.
//!
//! Every calculator reads from a validated [`PayrollConfig`](crate::config::PayrollConfig)
//! passed in by the caller and holds no state of its own, apart from the
//! holiday sets of the calendar types.

mod brackets;
mod business_days;
mod contributions;
mod isr;
mod labor;
mod subsidy;
mod vacation;

pub use brackets::{Bracket, lookup_bracket};
pub use business_days::{
    BusinessCalendar, BusinessDayCalculator, FIXED_HOLIDAYS, MONDAY_HOLIDAYS, is_weekend,
    nth_weekday_of_month,
};
pub use contributions::{
    ContributionBreakdown, ContributionCalculator, ContributionLine, capped_base,
};
pub use isr::{IsrResult, NetWithholding, calculate_isr, calculate_net_withholding, compute_isr};
pub use labor::{
    AguinaldoResult, DAYS_IN_YEAR, ExemptSplit, FringeBenefit, OvertimeResult,
    calculate_aguinaldo, calculate_overtime, calculate_state_payroll_tax,
    calculate_sunday_premium, calculate_vacation_premium, split_fringe_benefit,
};
pub use subsidy::{SubsidyResult, calculate_employment_subsidy, compute_subsidy};
pub use vacation::{EntitlementSource, FALLBACK_ENTITLEMENT, VacationCalculator};
