//! Vacation entitlement calculation.
//!
//! Entitled days come from the configured entitlement table. When that
//! table is empty the calculator falls back to the statutory staircase below
//! and logs a warning every time it does, so an unloaded table never goes
//! unnoticed. The first year of service always uses the configured
//! `first_year_days`, whichever table is active.

use tracing::warn;

use crate::config::{PayrollConfig, VacationBracket, VacationRules};
use crate::error::{EngineError, EngineResult};

/// Statutory staircase used when no entitlement table is configured:
/// `(first year of the range, last year of the range, days)`.
pub const FALLBACK_ENTITLEMENT: [(u32, u32, u32); 11] = [
    (2, 5, 14),
    (6, 10, 16),
    (11, 15, 18),
    (16, 20, 20),
    (21, 25, 22),
    (26, 30, 24),
    (31, 35, 26),
    (36, 40, 28),
    (41, 45, 30),
    (46, 50, 32),
    (51, u32::MAX, 34),
];

/// Which table produced an entitlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntitlementSource {
    /// The configured entitlement table (or `first_year_days`).
    Configured,
    /// The built-in statutory staircase.
    Fallback,
}

/// Resolves vacation entitlements from the configured rules.
///
/// # Example
///
/// ```
/// use nomina_engine::calculation::VacationCalculator;
/// use nomina_engine::config::ConfigLoader;
///
/// let config = ConfigLoader::load("./config").unwrap();
/// let calculator = VacationCalculator::new(&config);
///
/// assert_eq!(calculator.entitled_days(1).unwrap(), 12);
/// assert_eq!(calculator.entitled_days(8).unwrap(), 22);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct VacationCalculator<'a> {
    rules: &'a VacationRules,
}

impl<'a> VacationCalculator<'a> {
    /// Creates a calculator reading from a validated configuration.
    pub fn new(config: &'a PayrollConfig) -> Self {
        Self::from_rules(&config.labor_concepts().vacation)
    }

    /// Creates a calculator over a set of vacation rules.
    pub fn from_rules(rules: &'a VacationRules) -> Self {
        Self { rules }
    }

    /// Returns which table entitlements are resolved from.
    pub fn source(&self) -> EntitlementSource {
        if self.rules.entitlement_table.is_empty() {
            EntitlementSource::Fallback
        } else {
            EntitlementSource::Configured
        }
    }

    /// Returns the vacation days for completed years of service.
    ///
    /// Zero years grants nothing; one year grants `first_year_days`. Beyond
    /// the last configured row the top row applies.
    ///
    /// # Errors
    ///
    /// Returns `BracketNotFound` if a non-empty configured table leaves the
    /// given years uncovered.
    pub fn entitled_days(&self, years_of_service: u32) -> EngineResult<u32> {
        match years_of_service {
            0 => Ok(0),
            1 => Ok(self.rules.first_year_days),
            years => match self.source() {
                EntitlementSource::Configured => {
                    configured_days(&self.rules.entitlement_table, years)
                }
                EntitlementSource::Fallback => {
                    warn!(
                        years_of_service = years,
                        "Vacation entitlement table is empty, using statutory fallback"
                    );
                    Ok(fallback_days(years))
                }
            },
        }
    }
}

fn configured_days(table: &[VacationBracket], years: u32) -> EngineResult<u32> {
    if let Some(row) = table.iter().find(|row| row.covers(years)) {
        return Ok(row.days);
    }

    match table.last() {
        Some(top) if years > top.max_years.unwrap_or(u32::MAX) => Ok(top.days),
        _ => Err(EngineError::BracketNotFound {
            table: "vacation.entitlement_table".to_string(),
            value: years.into(),
        }),
    }
}

fn fallback_days(years: u32) -> u32 {
    FALLBACK_ENTITLEMENT
        .iter()
        .find(|(from, to, _)| (*from..=*to).contains(&years))
        .map(|(_, _, days)| *days)
        .unwrap_or(FALLBACK_ENTITLEMENT[0].2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_support::sample_config;
    use rust_decimal::Decimal;

    fn rules_without_table() -> VacationRules {
        let mut rules = sample_config().labor_concepts().vacation.clone();
        rules.entitlement_table.clear();
        rules
    }

    #[test]
    fn test_zero_years_grants_nothing() {
        let config = sample_config();
        let calculator = VacationCalculator::new(&config);
        assert_eq!(calculator.entitled_days(0).unwrap(), 0);
    }

    #[test]
    fn test_first_year_uses_first_year_days() {
        let config = sample_config();
        let calculator = VacationCalculator::new(&config);
        assert_eq!(calculator.source(), EntitlementSource::Configured);
        assert_eq!(calculator.entitled_days(1).unwrap(), 12);
    }

    #[test]
    fn test_configured_table_rows() {
        let config = sample_config();
        let calculator = VacationCalculator::new(&config);

        assert_eq!(calculator.entitled_days(2).unwrap(), 14);
        assert_eq!(calculator.entitled_days(5).unwrap(), 20);
        assert_eq!(calculator.entitled_days(6).unwrap(), 22);
        assert_eq!(calculator.entitled_days(10).unwrap(), 22);
        assert_eq!(calculator.entitled_days(11).unwrap(), 24);
    }

    #[test]
    fn test_configured_top_row_is_unbounded() {
        let config = sample_config();
        let calculator = VacationCalculator::new(&config);
        assert_eq!(calculator.entitled_days(45).unwrap(), 32);
    }

    #[test]
    fn test_bounded_top_row_extends_upward() {
        let mut rules = sample_config().labor_concepts().vacation.clone();
        rules.entitlement_table.last_mut().unwrap().max_years = Some(35);
        let calculator = VacationCalculator::from_rules(&rules);
        assert_eq!(calculator.entitled_days(60).unwrap(), 32);
    }

    #[test]
    fn test_gap_in_configured_table_is_an_error() {
        let mut rules = sample_config().labor_concepts().vacation.clone();
        rules.entitlement_table.remove(3);
        let calculator = VacationCalculator::from_rules(&rules);

        match calculator.entitled_days(4) {
            Err(EngineError::BracketNotFound { value, .. }) => {
                assert_eq!(value, Decimal::from(4))
            }
            other => panic!("Expected BracketNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_fallback_staircase() {
        let rules = rules_without_table();
        let calculator = VacationCalculator::from_rules(&rules);

        assert_eq!(calculator.source(), EntitlementSource::Fallback);
        assert_eq!(calculator.entitled_days(1).unwrap(), 12);
        for years in 2..=5 {
            assert_eq!(calculator.entitled_days(years).unwrap(), 14);
        }
        assert_eq!(calculator.entitled_days(6).unwrap(), 16);
        assert_eq!(calculator.entitled_days(50).unwrap(), 32);
        assert_eq!(calculator.entitled_days(51).unwrap(), 34);
        assert_eq!(calculator.entitled_days(80).unwrap(), 34);
    }

    #[test]
    fn test_fallback_first_year_follows_configuration() {
        let mut rules = rules_without_table();
        rules.first_year_days = 10;
        let calculator = VacationCalculator::from_rules(&rules);
        assert_eq!(calculator.entitled_days(1).unwrap(), 10);
    }

    #[test]
    fn test_entitlement_never_decreases() {
        let config = sample_config();
        let fallback_rules = rules_without_table();
        for calculator in [
            VacationCalculator::new(&config),
            VacationCalculator::from_rules(&fallback_rules),
        ] {
            let mut previous = 0;
            for years in 0..=60 {
                let days = calculator.entitled_days(years).unwrap();
                assert!(days >= previous, "{} years dropped to {} days", years, days);
                previous = days;
            }
        }
    }
}
