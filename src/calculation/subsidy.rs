//! Employment subsidy (subsidio para el empleo) lookup.
//!
//! The subsidy is a flat amount read directly from the row covering the
//! taxable base; there is no marginal component.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::{PayrollConfig, SubsidyBracket};
use crate::error::EngineResult;
use crate::models::PayFrequency;

use super::brackets::lookup_bracket;

/// The result of an employment subsidy lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubsidyResult {
    /// The taxable base the subsidy was looked up for.
    pub taxable_base: Decimal,
    /// Index of the selected row in the table.
    pub bracket_index: usize,
    /// The subsidy amount.
    pub subsidy: Decimal,
}

/// Looks up the subsidy for a base in an explicit table.
pub fn compute_subsidy(
    table: &[SubsidyBracket],
    table_name: &str,
    taxable_base: Decimal,
) -> EngineResult<SubsidyResult> {
    let (bracket_index, bracket) = lookup_bracket(table, table_name, taxable_base)?;

    Ok(SubsidyResult {
        taxable_base,
        bracket_index,
        subsidy: bracket.subsidy,
    })
}

/// Looks up the employment subsidy for a taxable base and pay frequency.
///
/// # Example
///
/// ```
/// use nomina_engine::calculation::calculate_employment_subsidy;
/// use nomina_engine::config::ConfigLoader;
/// use nomina_engine::models::PayFrequency;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::load("./config").unwrap();
/// let result =
///     calculate_employment_subsidy(&config, Decimal::from(1000), PayFrequency::Biweekly).unwrap();
/// assert_eq!(result.subsidy, Decimal::new(20070, 2));
/// ```
pub fn calculate_employment_subsidy(
    config: &PayrollConfig,
    taxable_base: Decimal,
    frequency: PayFrequency,
) -> EngineResult<SubsidyResult> {
    compute_subsidy(
        config.subsidy_table(frequency),
        &format!("employment_subsidy.{}", frequency),
        taxable_base,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_support::sample_config;
    use crate::error::EngineError;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_lowest_row_subsidy() {
        let config = sample_config();
        let result =
            calculate_employment_subsidy(&config, dec("1500"), PayFrequency::Monthly).unwrap();

        assert_eq!(result.bracket_index, 0);
        assert_eq!(result.subsidy, dec("407.02"));
    }

    #[test]
    fn test_subsidy_at_row_boundary() {
        let config = sample_config();
        let result =
            calculate_employment_subsidy(&config, dec("4446.16"), PayFrequency::Monthly).unwrap();

        assert_eq!(result.bracket_index, 5);
        assert_eq!(result.subsidy, dec("354.23"));
    }

    #[test]
    fn test_subsidy_above_range_is_zero() {
        let config = sample_config();
        let result =
            calculate_employment_subsidy(&config, dec("25000"), PayFrequency::Weekly).unwrap();

        assert_eq!(result.bracket_index, 10);
        assert_eq!(result.subsidy, Decimal::ZERO);
    }

    #[test]
    fn test_empty_table_is_an_error() {
        let result = compute_subsidy(&[], "employment_subsidy.monthly", dec("10"));
        assert!(matches!(result, Err(EngineError::EmptyTable { .. })));
    }
}
