//! Labor-law entitlements and payroll-level levies.
//!
//! Covers the statutory payments that sit next to salary: aguinaldo, the
//! vacation premium, overtime, the Sunday premium and the state payroll tax.
//! Amounts are exact; rounding to cents is left to the caller.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::PayrollConfig;
use crate::error::{EngineResult, ensure_non_negative};

/// Days in the year used to prorate aguinaldo.
pub const DAYS_IN_YEAR: u32 = 365;

/// A payment split into its tax-exempt and taxable parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExemptSplit {
    /// Total amount.
    pub amount: Decimal,
    /// Tax-exempt part.
    pub exempt: Decimal,
    /// Taxable part.
    pub taxable: Decimal,
}

impl ExemptSplit {
    /// Splits `amount` against an exemption ceiling.
    pub fn new(amount: Decimal, exempt_limit: Decimal) -> Self {
        let exempt = amount.min(exempt_limit.max(Decimal::ZERO));
        Self {
            amount,
            exempt,
            taxable: amount - exempt,
        }
    }
}

/// The result of an aguinaldo calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AguinaldoResult {
    /// Days of salary paid, prorated for a partial year.
    pub days: Decimal,
    /// Amount with its exempt and taxable parts.
    pub payment: ExemptSplit,
}

/// Calculates the aguinaldo for a daily salary and days worked in the year.
///
/// The minimum days are prorated over a 365-day year; days worked beyond
/// that count as a full year. A full year never pays less than the
/// configured minimum amount. The exempt part is capped at
/// `exempt_uma_days` daily UMAs.
///
/// # Example
///
/// ```
/// use nomina_engine::calculation::calculate_aguinaldo;
/// use nomina_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::load("./config").unwrap();
/// let result = calculate_aguinaldo(&config, Decimal::from(500), 365).unwrap();
///
/// assert_eq!(result.days, Decimal::from(15));
/// assert_eq!(result.payment.amount, Decimal::from(7500));
/// ```
pub fn calculate_aguinaldo(
    config: &PayrollConfig,
    daily_salary: Decimal,
    days_worked: u32,
) -> EngineResult<AguinaldoResult> {
    ensure_non_negative("daily_salary", daily_salary)?;
    let rules = &config.labor_concepts().aguinaldo;

    let days_worked = days_worked.min(DAYS_IN_YEAR);
    let days =
        Decimal::from(rules.minimum_days) * Decimal::from(days_worked) / Decimal::from(DAYS_IN_YEAR);

    let mut amount = daily_salary * days;
    if days_worked == DAYS_IN_YEAR {
        amount = amount.max(rules.minimum_amount);
    }

    let exempt_limit = rules.exempt_uma_days * config.uma_daily();
    Ok(AguinaldoResult {
        days,
        payment: ExemptSplit::new(amount, exempt_limit),
    })
}

/// Calculates the vacation premium for days of vacation taken.
///
/// The premium uses the granted `bonus_percentage`, never less than the
/// statutory `premium_rate`. The exempt part is capped at `exempt_uma_days`
/// daily UMAs.
///
/// # Arguments
///
/// * `config` - The payroll configuration holding the vacation rules
/// * `daily_salary` - The employee's daily salary
/// * `vacation_days` - Vacation days taken in the period
///
/// # Returns
///
/// Returns the premium split into its exempt and taxable parts.
///
/// # Errors
///
/// Returns `InvalidInput` if `daily_salary` is negative.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::calculate_vacation_premium;
/// use nomina_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = ConfigLoader::load("./config").unwrap();
/// let premium = calculate_vacation_premium(&config, Decimal::from(900), 10).unwrap();
///
/// // 900 * 10 * 0.25 = 2250, of which 15 UMA days (1697.10) are exempt
/// assert_eq!(premium.amount, Decimal::from(2250));
/// assert_eq!(premium.exempt, Decimal::from_str("1697.10").unwrap());
/// assert_eq!(premium.taxable, Decimal::from_str("552.90").unwrap());
/// ```
pub fn calculate_vacation_premium(
    config: &PayrollConfig,
    daily_salary: Decimal,
    vacation_days: u32,
) -> EngineResult<ExemptSplit> {
    ensure_non_negative("daily_salary", daily_salary)?;
    let rules = &config.labor_concepts().vacation;

    let rate = rules.bonus_percentage.max(rules.premium_rate);
    let amount = daily_salary * Decimal::from(vacation_days) * rate;
    let exempt_limit = rules.exempt_uma_days * config.uma_daily();

    Ok(ExemptSplit::new(amount, exempt_limit))
}

/// The result of an overtime calculation for one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OvertimeResult {
    /// Hours paid at the double multiplier.
    pub double_hours: Decimal,
    /// Hours paid at the triple multiplier.
    pub triple_hours: Decimal,
    /// Pay for the double hours.
    pub double_amount: Decimal,
    /// Pay for the triple hours.
    pub triple_amount: Decimal,
    /// Total overtime pay.
    pub total: Decimal,
}

/// Calculates overtime pay for a week.
///
/// The first `weekly_double_hours_limit` hours are paid at the double
/// multiplier and the rest at the triple multiplier.
///
/// # Example
///
/// ```
/// use nomina_engine::calculation::calculate_overtime;
/// use nomina_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::load("./config").unwrap();
/// let result = calculate_overtime(&config, Decimal::from(50), Decimal::from(12)).unwrap();
///
/// assert_eq!(result.double_hours, Decimal::from(9));
/// assert_eq!(result.triple_hours, Decimal::from(3));
/// assert_eq!(result.total, Decimal::from(1350));
/// ```
pub fn calculate_overtime(
    config: &PayrollConfig,
    hourly_rate: Decimal,
    weekly_overtime_hours: Decimal,
) -> EngineResult<OvertimeResult> {
    ensure_non_negative("hourly_rate", hourly_rate)?;
    ensure_non_negative("weekly_overtime_hours", weekly_overtime_hours)?;
    let rules = &config.labor_concepts().overtime;

    let double_hours = weekly_overtime_hours.min(rules.weekly_double_hours_limit.max(Decimal::ZERO));
    let triple_hours = weekly_overtime_hours - double_hours;
    let double_amount = double_hours * hourly_rate * rules.double_multiplier;
    let triple_amount = triple_hours * hourly_rate * rules.triple_multiplier;

    Ok(OvertimeResult {
        double_hours,
        triple_hours,
        double_amount,
        triple_amount,
        total: double_amount + triple_amount,
    })
}

/// Calculates the Sunday premium for one Sunday worked.
///
/// # Arguments
///
/// * `config` - The payroll configuration holding the premium percentage
/// * `daily_salary` - The employee's daily salary
///
/// # Returns
///
/// Returns `daily_salary` times the configured Sunday premium percentage.
///
/// # Errors
///
/// Returns `InvalidInput` if `daily_salary` is negative.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::calculate_sunday_premium;
/// use nomina_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::load("./config").unwrap();
/// let premium = calculate_sunday_premium(&config, Decimal::from(400)).unwrap();
///
/// // 400 * 0.25
/// assert_eq!(premium, Decimal::from(100));
/// ```
pub fn calculate_sunday_premium(config: &PayrollConfig, daily_salary: Decimal) -> EngineResult<Decimal> {
    ensure_non_negative("daily_salary", daily_salary)?;
    Ok(daily_salary * config.labor_concepts().sunday_premium.percentage)
}

/// Calculates the state payroll tax on a taxable payroll amount.
///
/// # Arguments
///
/// * `config` - The payroll configuration holding the regional settings
/// * `taxable_payroll` - Total payroll subject to the state tax
///
/// # Returns
///
/// Returns `taxable_payroll` times the state rate, or zero when the state
/// levies no payroll tax or it is disabled.
///
/// # Errors
///
/// Returns `InvalidInput` if `taxable_payroll` is negative.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::calculate_state_payroll_tax;
/// use nomina_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::load("./config").unwrap();
/// let tax = calculate_state_payroll_tax(&config, Decimal::from(250000)).unwrap();
///
/// // Ciudad de México levies 4%
/// assert_eq!(tax, Decimal::from(10000));
/// ```
pub fn calculate_state_payroll_tax(
    config: &PayrollConfig,
    taxable_payroll: Decimal,
) -> EngineResult<Decimal> {
    ensure_non_negative("taxable_payroll", taxable_payroll)?;
    Ok(match &config.regional().state_payroll_tax {
        Some(tax) if tax.enabled => taxable_payroll * tax.rate,
        _ => Decimal::ZERO,
    })
}

/// Which exemption limit to apply to a fringe benefit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FringeBenefit {
    /// Savings fund contributions.
    SavingsFund,
    /// Food vouchers.
    FoodVouchers,
}

/// Splits a daily fringe-benefit amount against its UMA exemption limit.
///
/// # Arguments
///
/// * `config` - The payroll configuration holding the exemption limits
/// * `benefit` - Which benefit's limit applies
/// * `daily_amount` - The benefit paid per day
///
/// # Returns
///
/// Returns the amount split at `exempt_uma_limit` daily UMAs.
///
/// # Errors
///
/// Returns `InvalidInput` if `daily_amount` is negative.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::{FringeBenefit, split_fringe_benefit};
/// use nomina_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = ConfigLoader::load("./config").unwrap();
/// let split = split_fringe_benefit(&config, FringeBenefit::FoodVouchers, Decimal::from(150)).unwrap();
///
/// // One daily UMA (113.14) is exempt
/// assert_eq!(split.exempt, Decimal::from_str("113.14").unwrap());
/// assert_eq!(split.taxable, Decimal::from_str("36.86").unwrap());
/// ```
pub fn split_fringe_benefit(
    config: &PayrollConfig,
    benefit: FringeBenefit,
    daily_amount: Decimal,
) -> EngineResult<ExemptSplit> {
    ensure_non_negative("daily_amount", daily_amount)?;
    let labor = config.labor_concepts();
    let limit = match benefit {
        FringeBenefit::SavingsFund => labor.savings_fund.exempt_uma_limit,
        FringeBenefit::FoodVouchers => labor.food_vouchers.exempt_uma_limit,
    };
    Ok(ExemptSplit::new(daily_amount, limit * config.uma_daily()))
}
