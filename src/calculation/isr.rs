//! ISR (income tax) withholding calculation.
//!
//! Tax is computed from the progressive table for the pay frequency:
//!
//! ```text
//! tax = fixed_fee + (taxable_base - lower_limit) * rate
//! ```
//!
//! The employment subsidy for the same base can be netted against the tax
//! with [`calculate_net_withholding`].

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::{PayrollConfig, TaxBracket};
use crate::error::EngineResult;
use crate::models::PayFrequency;

use super::brackets::lookup_bracket;
use super::subsidy::{SubsidyResult, calculate_employment_subsidy};

/// The result of an ISR calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IsrResult {
    /// The taxable base the tax was computed on.
    pub taxable_base: Decimal,
    /// Index of the selected row in the table.
    pub bracket_index: usize,
    /// Lower limit of the selected row.
    pub lower_limit: Decimal,
    /// Fixed fee of the selected row.
    pub fixed_fee: Decimal,
    /// Marginal rate of the selected row, as a fraction.
    pub rate: Decimal,
    /// Tax on the excess over the lower limit.
    pub marginal_tax: Decimal,
    /// Total tax (fixed fee plus marginal tax).
    pub tax: Decimal,
}

/// Computes ISR for a taxable base against an explicit table.
///
/// A base below the first row's lower limit pays only the first row's fixed
/// fee; the excess is never negative.
///
/// # Errors
///
/// - `InvalidInput` if `taxable_base` is negative
/// - `EmptyTable` if the table has no rows
///
/// # Example
///
/// ```
/// use nomina_engine::calculation::compute_isr;
/// use nomina_engine::config::TaxBracket;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let table = vec![
///     TaxBracket {
///         lower_limit: Decimal::from_str("0.01").unwrap(),
///         upper_limit: Some(Decimal::from_str("746.04").unwrap()),
///         fixed_fee: Decimal::ZERO,
///         rate: Decimal::from_str("0.0192").unwrap(),
///     },
///     TaxBracket {
///         lower_limit: Decimal::from_str("746.05").unwrap(),
///         upper_limit: None,
///         fixed_fee: Decimal::from_str("14.32").unwrap(),
///         rate: Decimal::from_str("0.064").unwrap(),
///     },
/// ];
///
/// let result = compute_isr(&table, "isr.monthly", Decimal::from(1000)).unwrap();
/// assert_eq!(result.bracket_index, 1);
/// assert_eq!(result.tax, Decimal::from_str("30.5728").unwrap());
/// ```
pub fn compute_isr(
    table: &[TaxBracket],
    table_name: &str,
    taxable_base: Decimal,
) -> EngineResult<IsrResult> {
    let (bracket_index, bracket) = lookup_bracket(table, table_name, taxable_base)?;

    let excess = (taxable_base - bracket.lower_limit).max(Decimal::ZERO);
    let marginal_tax = excess * bracket.rate;

    Ok(IsrResult {
        taxable_base,
        bracket_index,
        lower_limit: bracket.lower_limit,
        fixed_fee: bracket.fixed_fee,
        rate: bracket.rate,
        marginal_tax,
        tax: bracket.fixed_fee + marginal_tax,
    })
}

/// Computes ISR withholding for a taxable base and pay frequency.
///
/// # Example
///
/// ```
/// use nomina_engine::calculation::calculate_isr;
/// use nomina_engine::config::ConfigLoader;
/// use nomina_engine::models::PayFrequency;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::load("./config").unwrap();
/// let result = calculate_isr(&config, Decimal::from(10000), PayFrequency::Monthly).unwrap();
/// assert_eq!(result.tax.round_dp(2), Decimal::new(77090, 2));
/// ```
pub fn calculate_isr(
    config: &PayrollConfig,
    taxable_base: Decimal,
    frequency: PayFrequency,
) -> EngineResult<IsrResult> {
    compute_isr(
        config.isr_table(frequency),
        &format!("isr.{}", frequency),
        taxable_base,
    )
}

/// ISR netted against the employment subsidy for the same base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetWithholding {
    /// The ISR calculation.
    pub isr: IsrResult,
    /// The subsidy calculation.
    pub subsidy: SubsidyResult,
    /// ISR minus subsidy. Negative when the subsidy exceeds the tax and the
    /// difference is paid to the employee.
    pub net: Decimal,
}

impl NetWithholding {
    /// Amount to withhold from the employee (zero when the subsidy wins).
    pub fn withheld(&self) -> Decimal {
        self.net.max(Decimal::ZERO)
    }

    /// Subsidy amount paid out to the employee (zero when tax is owed).
    pub fn subsidy_paid(&self) -> Decimal {
        (-self.net).max(Decimal::ZERO)
    }
}

/// Computes ISR and the employment subsidy and nets them.
pub fn calculate_net_withholding(
    config: &PayrollConfig,
    taxable_base: Decimal,
    frequency: PayFrequency,
) -> EngineResult<NetWithholding> {
    let isr = calculate_isr(config, taxable_base, frequency)?;
    let subsidy = calculate_employment_subsidy(config, taxable_base, frequency)?;
    let net = isr.tax - subsidy.subsidy;

    Ok(NetWithholding { isr, subsidy, net })
}
