//! IMSS and INFONAVIT contribution calculation.
//!
//! Every component is a plain `rate × base` product. Capping is a separate,
//! explicit step: [`capped_base`] limits a raw daily base to a multiple of
//! the UMA, and [`ContributionCalculator::contributions_for_sdi`] applies it
//! before any rate is multiplied in. The per-rate methods take the base they
//! are given as-is.
//!
//! ## Rate totals
//!
//! The default totals sum five components per party: sickness and maternity,
//! disability and life, retirement, the severance/old-age *base* rate and
//! childcare. Severance credits are reported on their own line and work risk
//! is added only for an employer risk class.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::{ContributionRates, ImssRates, PayrollConfig};
use crate::error::{EngineResult, ensure_non_negative};
use crate::models::RiskClass;

/// Caps a raw daily base at `max_multiplier` daily UMAs.
///
/// # Errors
///
/// Returns `InvalidInput` if `raw_base` is negative.
///
/// # Example
///
/// ```
/// use nomina_engine::calculation::capped_base;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let uma = Decimal::from_str("113.14").unwrap();
/// let capped = capped_base(Decimal::from(5000), Decimal::from(25), uma).unwrap();
/// assert_eq!(capped, Decimal::from_str("2828.50").unwrap());
///
/// let uncapped = capped_base(Decimal::from(800), Decimal::from(25), uma).unwrap();
/// assert_eq!(uncapped, Decimal::from(800));
/// ```
pub fn capped_base(raw_base: Decimal, max_multiplier: Decimal, uma: Decimal) -> EngineResult<Decimal> {
    ensure_non_negative("raw_base", raw_base)?;
    Ok(raw_base.min(max_multiplier * uma))
}

/// One component of a contribution breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributionLine {
    /// Component name (e.g. "disease_maternity").
    pub concept: &'static str,
    /// Rate applied, as a fraction.
    pub rate: Decimal,
    /// Amount for the base.
    pub amount: Decimal,
}

/// Contributions for one integrated daily salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributionBreakdown {
    /// The base before capping.
    pub raw_base: Decimal,
    /// The base used for IMSS components.
    pub imss_base: Decimal,
    /// The base used for INFONAVIT.
    pub infonavit_base: Decimal,
    /// Employer IMSS components, work risk last.
    pub employer_lines: Vec<ContributionLine>,
    /// Employee IMSS components.
    pub employee_lines: Vec<ContributionLine>,
    /// Employer IMSS total (excluding severance credits).
    pub employer_total: Decimal,
    /// Employee IMSS total (excluding severance credits).
    pub employee_total: Decimal,
    /// Employer severance/old-age credits, reported separately.
    pub severance_credits: Decimal,
    /// Employer INFONAVIT contribution.
    pub infonavit_employer: Decimal,
    /// Employee INFONAVIT contribution.
    pub infonavit_employee: Decimal,
}

/// Computes IMSS and INFONAVIT contributions from the configured rates.
///
/// # Example
///
/// ```
/// use nomina_engine::calculation::ContributionCalculator;
/// use nomina_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::load("./config").unwrap();
/// let calculator = ContributionCalculator::new(&config);
///
/// let employee = calculator.employee_contribution(Decimal::from(500)).unwrap();
/// assert_eq!(employee, Decimal::new(11875, 3));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ContributionCalculator<'a> {
    rates: &'a ContributionRates,
    uma: Decimal,
    imss_cap_multiplier: Decimal,
}

impl<'a> ContributionCalculator<'a> {
    /// Creates a calculator reading from a validated configuration.
    pub fn new(config: &'a PayrollConfig) -> Self {
        Self {
            rates: config.contribution_rates(),
            uma: config.uma_daily(),
            imss_cap_multiplier: config.official_values().limits.imss_cap_uma_multiplier,
        }
    }

    /// Sum of the five default employer rates.
    pub fn total_employer_rate(&self) -> Decimal {
        total_rate(&self.rates.imss.employer)
    }

    /// Sum of the five default employee rates.
    pub fn total_employee_rate(&self) -> Decimal {
        total_rate(&self.rates.imss.employee)
    }

    /// Employer total including the work-risk rate for a class.
    pub fn total_employer_rate_with_risk(&self, risk_class: RiskClass) -> Decimal {
        self.total_employer_rate() + self.rates.imss.employer.work_risk.rate(risk_class)
    }

    /// Employer IMSS contribution for a base, including work risk.
    ///
    /// The risk class defaults to class I.
    pub fn employer_contribution(
        &self,
        base_salary: Decimal,
        risk_class: Option<RiskClass>,
    ) -> EngineResult<Decimal> {
        ensure_non_negative("base_salary", base_salary)?;
        Ok(base_salary * self.total_employer_rate_with_risk(risk_class.unwrap_or_default()))
    }

    /// Employee IMSS contribution for a base.
    pub fn employee_contribution(&self, base_salary: Decimal) -> EngineResult<Decimal> {
        ensure_non_negative("base_salary", base_salary)?;
        Ok(base_salary * self.total_employee_rate())
    }

    /// Employer severance/old-age credits for a base.
    pub fn severance_credits_contribution(&self, base_salary: Decimal) -> EngineResult<Decimal> {
        ensure_non_negative("base_salary", base_salary)?;
        Ok(base_salary * self.rates.imss.employer.severance_old_age.credits)
    }

    /// Employer INFONAVIT contribution for a base.
    pub fn infonavit_employer_contribution(&self, base_salary: Decimal) -> EngineResult<Decimal> {
        ensure_non_negative("base_salary", base_salary)?;
        Ok(base_salary * self.rates.infonavit.employer)
    }

    /// Employee INFONAVIT contribution for a base.
    pub fn infonavit_employee_contribution(&self, base_salary: Decimal) -> EngineResult<Decimal> {
        ensure_non_negative("base_salary", base_salary)?;
        Ok(base_salary * self.rates.infonavit.employee)
    }

    /// Caps an integrated daily salary and computes every contribution on it.
    ///
    /// IMSS components use the official IMSS cap; INFONAVIT uses the
    /// contribution section's own maximum base.
    pub fn contributions_for_sdi(
        &self,
        raw_sdi: Decimal,
        risk_class: Option<RiskClass>,
    ) -> EngineResult<ContributionBreakdown> {
        let imss_base = capped_base(raw_sdi, self.imss_cap_multiplier, self.uma)?;
        let infonavit_base = capped_base(raw_sdi, self.rates.max_contribution_base_uma, self.uma)?;
        let risk_class = risk_class.unwrap_or_default();

        let employer = &self.rates.imss.employer;
        let mut employer_lines = component_lines(employer, imss_base);
        employer_lines.push(line("work_risk", employer.work_risk.rate(risk_class), imss_base));
        let employee_lines = component_lines(&self.rates.imss.employee, imss_base);

        Ok(ContributionBreakdown {
            raw_base: raw_sdi,
            imss_base,
            infonavit_base,
            employer_total: self.employer_contribution(imss_base, Some(risk_class))?,
            employee_total: self.employee_contribution(imss_base)?,
            severance_credits: self.severance_credits_contribution(imss_base)?,
            infonavit_employer: self.infonavit_employer_contribution(infonavit_base)?,
            infonavit_employee: self.infonavit_employee_contribution(infonavit_base)?,
            employer_lines,
            employee_lines,
        })
    }
}

fn total_rate(rates: &ImssRates) -> Decimal {
    rates.disease_maternity
        + rates.disability_life
        + rates.retirement
        + rates.severance_old_age.base
        + rates.childcare_social_benefits
}

fn line(concept: &'static str, rate: Decimal, base: Decimal) -> ContributionLine {
    ContributionLine {
        concept,
        rate,
        amount: rate * base,
    }
}

fn component_lines(rates: &ImssRates, base: Decimal) -> Vec<ContributionLine> {
    vec![
        line("disease_maternity", rates.disease_maternity, base),
        line("disability_life", rates.disability_life, base),
        line("retirement", rates.retirement, base),
        line("severance_old_age", rates.severance_old_age.base, base),
        line("childcare_social_benefits", rates.childcare_social_benefits, base),
    ]
}
