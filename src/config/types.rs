//! Configuration types for payroll calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the section files named by the master manifest.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::EngineResult;
use crate::models::{PayFrequency, RiskClass};

use super::validator;

/// The master manifest (`payroll/main.json`).
///
/// Maps logical section names to file paths. The free-form members are kept
/// as raw JSON for the surrounding application.
#[derive(Debug, Clone, Deserialize)]
pub struct MasterConfig {
    /// Manifest version string.
    pub version: String,
    /// Human-readable configuration name.
    pub name: String,
    /// Description of this configuration set.
    #[serde(default)]
    pub description: String,
    /// When the tables were last revised.
    #[serde(default)]
    pub last_updated: String,
    /// Section key to file path, relative to the configuration directory
    /// unless absolute.
    pub config_files: HashMap<String, String>,
    /// Free-form table metadata.
    #[serde(default)]
    pub tables: serde_json::Value,
    /// Free-form holiday metadata.
    #[serde(default)]
    pub holidays: serde_json::Value,
    /// Free-form settings.
    #[serde(default)]
    pub settings: serde_json::Value,
}

/// UMA values for the fiscal year.
#[derive(Debug, Clone, Deserialize)]
pub struct Uma {
    /// Daily UMA value.
    pub daily: Decimal,
    /// Monthly UMA value.
    pub monthly: Decimal,
    /// Annual UMA value.
    pub annual: Decimal,
}

/// A minimum-wage zone.
#[derive(Debug, Clone, Deserialize)]
pub struct WageZone {
    /// Daily minimum wage for the zone.
    pub daily: Decimal,
    /// Professional minimum wages by profession name.
    #[serde(default)]
    pub professions: HashMap<String, Decimal>,
}

/// Deprecated wage zones kept for recalculating old periods.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoricalWages {
    /// Whether the historical zones may be used for lookups.
    #[serde(default)]
    pub active: bool,
    /// Zone name to zone record.
    #[serde(default)]
    pub zones: HashMap<String, WageZone>,
}

/// Minimum wages by zone.
#[derive(Debug, Clone, Deserialize)]
pub struct MinimumWages {
    /// Zone used when a lookup names an unknown zone.
    pub default_zone: String,
    /// The general zone.
    pub general: WageZone,
    /// The northern border free zone.
    pub northern_border_free_zone: WageZone,
    /// Deprecated zones.
    #[serde(default)]
    pub historical: HistoricalWages,
}

impl MinimumWages {
    fn zone(&self, name: &str) -> Option<&WageZone> {
        match name {
            "general" => Some(&self.general),
            "northern_border_free_zone" => Some(&self.northern_border_free_zone),
            other if self.historical.active => self.historical.zones.get(other),
            _ => None,
        }
    }

    /// Returns the zone named by `default_zone`, if it resolves.
    pub fn default_wage_zone(&self) -> Option<&WageZone> {
        self.zone(&self.default_zone)
    }

    /// Returns the daily minimum wage for a zone.
    ///
    /// Unknown zones, and historical zones while the historical record is
    /// inactive, fall back to the default zone and then to the general zone.
    ///
    /// # Example
    ///
    /// ```
    /// use nomina_engine::config::MinimumWages;
    /// use rust_decimal::Decimal;
    ///
    /// let wages: MinimumWages = serde_json::from_str(r#"{
    ///     "default_zone": "general",
    ///     "general": { "daily": 278.80 },
    ///     "northern_border_free_zone": { "daily": 419.88 }
    /// }"#).unwrap();
    ///
    /// assert_eq!(wages.daily_for_zone("northern_border_free_zone"), Decimal::new(41988, 2));
    /// assert_eq!(wages.daily_for_zone("atlantis"), Decimal::new(27880, 2));
    /// ```
    pub fn daily_for_zone(&self, zone: &str) -> Decimal {
        self.zone(zone)
            .or_else(|| self.default_wage_zone())
            .unwrap_or(&self.general)
            .daily
    }

    /// Returns the professional minimum wage, or the zone's daily minimum
    /// when the profession has no specific value.
    pub fn daily_for_profession(&self, zone: &str, profession: &str) -> Decimal {
        let wage_zone = self
            .zone(zone)
            .or_else(|| self.default_wage_zone())
            .unwrap_or(&self.general);
        wage_zone
            .professions
            .get(profession)
            .copied()
            .unwrap_or(wage_zone.daily)
    }
}

/// Statutory limits expressed in UMA.
#[derive(Debug, Clone, Deserialize)]
pub struct Limits {
    /// The IMSS contribution base is capped at this many daily UMAs.
    pub imss_cap_uma_multiplier: Decimal,
}

/// Official values section (`official_values`).
#[derive(Debug, Clone, Deserialize)]
pub struct OfficialValues {
    /// The fiscal year these values apply to.
    pub fiscal_year: i32,
    /// UMA values.
    pub uma: Uma,
    /// Minimum wages.
    pub minimum_wages: MinimumWages,
    /// Statutory limits.
    pub limits: Limits,
}

/// State identity.
#[derive(Debug, Clone, Deserialize)]
pub struct StateInfo {
    /// State name (e.g. "Ciudad de México").
    pub name: String,
    /// Short state code.
    #[serde(default)]
    pub code: String,
}

/// State payroll tax (ISN) settings.
#[derive(Debug, Clone, Deserialize)]
pub struct StatePayrollTax {
    /// Whether the tax is levied.
    pub enabled: bool,
    /// Tax rate as a fraction.
    pub rate: Decimal,
    /// Which payroll items make up the taxable base.
    #[serde(default)]
    pub calculation_base: Vec<String>,
}

/// A state or local holiday.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LocalHoliday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// What the holiday commemorates.
    pub description: String,
    /// Where it applies (e.g. "state", "municipal").
    pub scope: String,
}

/// Regional section (`regional`).
#[derive(Debug, Clone, Deserialize)]
pub struct RegionalConfig {
    /// State identity.
    pub state: StateInfo,
    /// Optional state payroll tax.
    #[serde(default)]
    pub state_payroll_tax: Option<StatePayrollTax>,
    /// Local holidays.
    #[serde(default)]
    pub local_holidays: Vec<LocalHoliday>,
}

/// The two-part severance and old-age rate.
#[derive(Debug, Clone, Deserialize)]
pub struct SeveranceOldAge {
    /// The base component, included in rate totals.
    pub base: Decimal,
    /// The credits component, tracked separately.
    #[serde(default)]
    pub credits: Decimal,
}

/// Work-risk rates by class.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkRiskRates {
    /// Class I rate.
    pub class_i: Decimal,
    /// Class II rate.
    pub class_ii: Decimal,
    /// Class III rate.
    pub class_iii: Decimal,
    /// Class IV rate.
    pub class_iv: Decimal,
    /// Class V rate.
    pub class_v: Decimal,
}

impl WorkRiskRates {
    /// Returns the rate for a class.
    pub fn rate(&self, class: RiskClass) -> Decimal {
        match class {
            RiskClass::ClassI => self.class_i,
            RiskClass::ClassII => self.class_ii,
            RiskClass::ClassIII => self.class_iii,
            RiskClass::ClassIV => self.class_iv,
            RiskClass::ClassV => self.class_v,
        }
    }

    pub(crate) fn named(&self) -> [(&'static str, Decimal); 5] {
        [
            ("class_i", self.class_i),
            ("class_ii", self.class_ii),
            ("class_iii", self.class_iii),
            ("class_iv", self.class_iv),
            ("class_v", self.class_v),
        ]
    }
}

/// IMSS rates paid by one party.
#[derive(Debug, Clone, Deserialize)]
pub struct ImssRates {
    /// Sickness and maternity.
    pub disease_maternity: Decimal,
    /// Disability and life.
    pub disability_life: Decimal,
    /// Retirement.
    pub retirement: Decimal,
    /// Severance at advanced age and old age.
    pub severance_old_age: SeveranceOldAge,
    /// Childcare and social benefits.
    pub childcare_social_benefits: Decimal,
    /// Work-risk rates by class.
    pub work_risk: WorkRiskRates,
    /// Housing.
    #[serde(default)]
    pub housing: Decimal,
}

/// IMSS rates per party.
#[derive(Debug, Clone, Deserialize)]
pub struct ImssParties {
    /// Employer share.
    pub employer: ImssRates,
    /// Employee share.
    pub employee: ImssRates,
}

/// INFONAVIT housing-fund rates.
#[derive(Debug, Clone, Deserialize)]
pub struct InfonavitRates {
    /// Employer rate.
    pub employer: Decimal,
    /// Employee rate.
    #[serde(default)]
    pub employee: Decimal,
}

/// Contribution rates section (`contribution_rates`).
#[derive(Debug, Clone, Deserialize)]
pub struct ContributionRates {
    /// IMSS rates.
    pub imss: ImssParties,
    /// INFONAVIT rates.
    pub infonavit: InfonavitRates,
    /// Maximum contribution base, in daily UMAs.
    pub max_contribution_base_uma: Decimal,
}

/// Aguinaldo (Christmas bonus) rules.
#[derive(Debug, Clone, Deserialize)]
pub struct AguinaldoRules {
    /// Minimum days of salary for a full year.
    pub minimum_days: u32,
    /// Minimum amount, if the employer guarantees one.
    #[serde(default)]
    pub minimum_amount: Decimal,
    /// Tax-exempt portion, in daily UMAs.
    pub exempt_uma_days: Decimal,
}

/// One row of the vacation entitlement table.
#[derive(Debug, Clone, Deserialize)]
pub struct VacationBracket {
    /// First year of service covered by the row.
    pub min_years: u32,
    /// Last year of service covered; `None` is unbounded.
    #[serde(default)]
    pub max_years: Option<u32>,
    /// Vacation days granted.
    pub days: u32,
}

impl VacationBracket {
    /// Returns true if the row covers the given years of service.
    pub fn covers(&self, years: u32) -> bool {
        years >= self.min_years && self.max_years.is_none_or(|max| years <= max)
    }
}

/// Vacation rules.
#[derive(Debug, Clone, Deserialize)]
pub struct VacationRules {
    /// Statutory minimum vacation premium, as a fraction.
    pub premium_rate: Decimal,
    /// Vacation days in the first year of service.
    pub first_year_days: u32,
    /// Premium percentage actually granted, as a fraction.
    pub bonus_percentage: Decimal,
    /// Tax-exempt portion of the premium, in daily UMAs.
    pub exempt_uma_days: Decimal,
    /// Entitlement rows ordered by years of service.
    #[serde(default)]
    pub entitlement_table: Vec<VacationBracket>,
}

/// Standard work schedule.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkSchedule {
    /// Hours in a standard work day.
    pub daily_hours: u32,
    /// Work days in a standard week.
    pub weekly_days: u32,
    /// Hours in a standard week.
    pub weekly_hours: u32,
}

/// Overtime multipliers.
#[derive(Debug, Clone, Deserialize)]
pub struct OvertimeRules {
    /// Multiplier for hours paid double.
    pub double_multiplier: Decimal,
    /// Multiplier for hours paid triple.
    pub triple_multiplier: Decimal,
    /// Overtime hours per week paid at the double multiplier.
    pub weekly_double_hours_limit: Decimal,
}

/// Sunday premium.
#[derive(Debug, Clone, Deserialize)]
pub struct SundayPremium {
    /// Premium over the daily salary, as a fraction.
    pub percentage: Decimal,
}

/// An exemption limit expressed in UMA.
#[derive(Debug, Clone, Deserialize)]
pub struct ExemptionLimit {
    /// Exempt amount in UMAs.
    pub exempt_uma_limit: Decimal,
}

/// Labor concepts section (`labor_concepts`).
#[derive(Debug, Clone, Deserialize)]
pub struct LaborConcepts {
    /// Aguinaldo rules.
    pub aguinaldo: AguinaldoRules,
    /// Vacation rules.
    pub vacation: VacationRules,
    /// Standard work schedule.
    pub work_schedule: WorkSchedule,
    /// Overtime multipliers.
    pub overtime: OvertimeRules,
    /// Sunday premium.
    pub sunday_premium: SundayPremium,
    /// Savings fund exemption.
    pub savings_fund: ExemptionLimit,
    /// Food voucher exemption.
    pub food_vouchers: ExemptionLimit,
}

/// A row of an ISR table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TaxBracket {
    /// Lower limit of the row, inclusive.
    pub lower_limit: Decimal,
    /// Upper limit as published; ignored for the top row.
    #[serde(default)]
    pub upper_limit: Option<Decimal>,
    /// Fixed fee for the row.
    pub fixed_fee: Decimal,
    /// Marginal rate over the lower limit, as a fraction.
    pub rate: Decimal,
}

/// A row of an employment-subsidy table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubsidyBracket {
    /// Lower limit of the row, inclusive.
    pub lower_limit: Decimal,
    /// Upper limit as published; ignored for the top row.
    #[serde(default)]
    pub upper_limit: Option<Decimal>,
    /// Flat subsidy for the row.
    pub subsidy: Decimal,
}

/// Tables keyed by pay frequency.
#[derive(Debug, Clone, Deserialize)]
pub struct FrequencyTables<T> {
    /// Monthly table.
    pub monthly: Vec<T>,
    /// Biweekly table.
    pub biweekly: Vec<T>,
    /// Weekly table.
    pub weekly: Vec<T>,
}

impl<T> FrequencyTables<T> {
    /// Returns the table for a frequency.
    pub fn for_frequency(&self, frequency: PayFrequency) -> &[T] {
        match frequency {
            PayFrequency::Monthly => &self.monthly,
            PayFrequency::Biweekly => &self.biweekly,
            PayFrequency::Weekly => &self.weekly,
        }
    }
}

/// Calculation tables section (`calculation_tables`).
#[derive(Debug, Clone, Deserialize)]
pub struct CalculationTables {
    /// ISR tables.
    pub isr: FrequencyTables<TaxBracket>,
    /// Employment subsidy tables.
    pub employment_subsidy: FrequencyTables<SubsidyBracket>,
}

/// The complete, validated payroll configuration.
///
/// Built once at startup by [`ConfigLoader::load`](super::ConfigLoader::load)
/// or [`PayrollConfig::from_sections`] and read-only afterwards. Calculators
/// borrow it; share it across threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    master: MasterConfig,
    official_values: OfficialValues,
    regional: RegionalConfig,
    contribution_rates: ContributionRates,
    labor_concepts: LaborConcepts,
    calculation_tables: CalculationTables,
}

impl PayrollConfig {
    /// Assembles and validates a configuration from its sections.
    ///
    /// Returns [`EngineError::ValidationFailed`](crate::error::EngineError::ValidationFailed)
    /// listing every failing rule if the sections are not consistent.
    pub fn from_sections(
        master: MasterConfig,
        official_values: OfficialValues,
        regional: RegionalConfig,
        contribution_rates: ContributionRates,
        labor_concepts: LaborConcepts,
        calculation_tables: CalculationTables,
    ) -> EngineResult<Self> {
        let config = Self::assemble(
            master,
            official_values,
            regional,
            contribution_rates,
            labor_concepts,
            calculation_tables,
        );
        validator::ensure_valid(&config)?;
        Ok(config)
    }

    /// Assembles a configuration without validating it.
    pub(crate) fn assemble(
        master: MasterConfig,
        official_values: OfficialValues,
        regional: RegionalConfig,
        contribution_rates: ContributionRates,
        labor_concepts: LaborConcepts,
        calculation_tables: CalculationTables,
    ) -> Self {
        Self {
            master,
            official_values,
            regional,
            contribution_rates,
            labor_concepts,
            calculation_tables,
        }
    }

    /// Returns the master manifest.
    pub fn master(&self) -> &MasterConfig {
        &self.master
    }

    /// Returns the official values.
    pub fn official_values(&self) -> &OfficialValues {
        &self.official_values
    }

    /// Returns the regional configuration.
    pub fn regional(&self) -> &RegionalConfig {
        &self.regional
    }

    /// Returns the contribution rates.
    pub fn contribution_rates(&self) -> &ContributionRates {
        &self.contribution_rates
    }

    /// Returns the labor concepts.
    pub fn labor_concepts(&self) -> &LaborConcepts {
        &self.labor_concepts
    }

    /// Returns the calculation tables.
    pub fn calculation_tables(&self) -> &CalculationTables {
        &self.calculation_tables
    }

    /// Returns the daily UMA value.
    pub fn uma_daily(&self) -> Decimal {
        self.official_values.uma.daily
    }

    /// Returns the maximum daily IMSS contribution base (UMA × cap multiplier).
    pub fn imss_max_base(&self) -> Decimal {
        self.official_values.uma.daily * self.official_values.limits.imss_cap_uma_multiplier
    }

    /// Returns the ISR table for a pay frequency.
    pub fn isr_table(&self, frequency: PayFrequency) -> &[TaxBracket] {
        self.calculation_tables.isr.for_frequency(frequency)
    }

    /// Returns the employment subsidy table for a pay frequency.
    pub fn subsidy_table(&self, frequency: PayFrequency) -> &[SubsidyBracket] {
        self.calculation_tables
            .employment_subsidy
            .for_frequency(frequency)
    }
}
