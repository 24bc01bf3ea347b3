//! Startup validation of the payroll configuration.
//!
//! Every rule is evaluated and failures are collected, so one run reports
//! everything an operator has to fix. Calculators rely on these checks and
//! do not repeat them.

use rust_decimal::Decimal;
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::PayFrequency;

use super::types::{CalculationTables, PayrollConfig, VacationRules};

const MIN_FISCAL_YEAR: i32 = 2020;
const MAX_FISCAL_YEAR: i32 = 2030;

/// A single failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dotted path of the offending field.
    pub field: String,
    /// What the rule requires.
    pub message: String,
}

impl Violation {
    /// Creates a violation for a field.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

#[derive(Default)]
struct Checks {
    violations: Vec<Violation>,
}

impl Checks {
    fn require(&mut self, ok: bool, field: impl Into<String>, message: &str) {
        if !ok {
            self.violations.push(Violation::new(field, message));
        }
    }

    fn positive(&mut self, field: impl Into<String>, value: Decimal) {
        self.require(value > Decimal::ZERO, field, "must be greater than zero");
    }

    fn non_negative(&mut self, field: impl Into<String>, value: Decimal) {
        self.require(value >= Decimal::ZERO, field, "must not be negative");
    }

    fn fraction(&mut self, field: impl Into<String>, value: Decimal) {
        self.require(
            value >= Decimal::ZERO && value <= Decimal::ONE,
            field,
            "must be between 0 and 1",
        );
    }
}

/// Checks every structural and numeric rule on a configuration.
///
/// Returns `Ok(())` when the configuration can be trusted, otherwise every
/// violation found, in evaluation order.
pub fn validate(config: &PayrollConfig) -> Result<(), Vec<Violation>> {
    let mut checks = Checks::default();

    check_official_values(config, &mut checks);
    check_regional(config, &mut checks);
    check_contribution_rates(config, &mut checks);
    check_labor_concepts(config, &mut checks);
    check_tables(config.calculation_tables(), &mut checks);

    if checks.violations.is_empty() {
        Ok(())
    } else {
        Err(checks.violations)
    }
}

/// Runs [`validate`] and converts failures into a single engine error.
pub(crate) fn ensure_valid(config: &PayrollConfig) -> EngineResult<()> {
    validate(config).map_err(|violations| {
        warn!(
            violation_count = violations.len(),
            "Payroll configuration failed validation"
        );
        EngineError::ValidationFailed { violations }
    })
}

fn check_official_values(config: &PayrollConfig, checks: &mut Checks) {
    let official = config.official_values();

    checks.positive("official_values.uma.daily", official.uma.daily);

    let wages = &official.minimum_wages;
    checks.positive(
        "official_values.minimum_wages.general.daily",
        wages.general.daily,
    );
    match wages.default_wage_zone() {
        Some(_) if wages.default_zone == "general" => {}
        Some(zone) => checks.positive(
            format!("official_values.minimum_wages.{}.daily", wages.default_zone),
            zone.daily,
        ),
        None => checks.require(
            false,
            "official_values.minimum_wages.default_zone",
            "must name a configured zone",
        ),
    }

    checks.positive(
        "official_values.limits.imss_cap_uma_multiplier",
        official.limits.imss_cap_uma_multiplier,
    );
    checks.require(
        (MIN_FISCAL_YEAR..=MAX_FISCAL_YEAR).contains(&official.fiscal_year),
        "official_values.fiscal_year",
        "must be between 2020 and 2030",
    );
}

fn check_regional(config: &PayrollConfig, checks: &mut Checks) {
    let regional = config.regional();

    checks.require(
        !regional.state.name.trim().is_empty(),
        "regional.state.name",
        "must not be empty",
    );

    if let Some(tax) = regional.state_payroll_tax.as_ref().filter(|t| t.enabled) {
        checks.fraction("regional.state_payroll_tax.rate", tax.rate);
        checks.require(
            !tax.calculation_base.is_empty(),
            "regional.state_payroll_tax.calculation_base",
            "must list at least one item when the tax is enabled",
        );
    }
}

fn check_contribution_rates(config: &PayrollConfig, checks: &mut Checks) {
    let rates = config.contribution_rates();

    for (party, imss) in [
        ("employer", &rates.imss.employer),
        ("employee", &rates.imss.employee),
    ] {
        let prefix = format!("contribution_rates.imss.{}", party);
        checks.non_negative(
            format!("{}.disease_maternity", prefix),
            imss.disease_maternity,
        );
        checks.non_negative(format!("{}.disability_life", prefix), imss.disability_life);
        checks.non_negative(format!("{}.retirement", prefix), imss.retirement);
        checks.non_negative(
            format!("{}.severance_old_age.base", prefix),
            imss.severance_old_age.base,
        );
        checks.non_negative(
            format!("{}.severance_old_age.credits", prefix),
            imss.severance_old_age.credits,
        );
        checks.non_negative(
            format!("{}.childcare_social_benefits", prefix),
            imss.childcare_social_benefits,
        );
        for (class, rate) in imss.work_risk.named() {
            checks.non_negative(format!("{}.work_risk.{}", prefix, class), rate);
        }
        checks.non_negative(format!("{}.housing", prefix), imss.housing);
    }

    checks.non_negative("contribution_rates.infonavit.employer", rates.infonavit.employer);
    checks.non_negative("contribution_rates.infonavit.employee", rates.infonavit.employee);
    checks.positive(
        "contribution_rates.max_contribution_base_uma",
        rates.max_contribution_base_uma,
    );
}

fn check_labor_concepts(config: &PayrollConfig, checks: &mut Checks) {
    let labor = config.labor_concepts();

    checks.require(
        labor.aguinaldo.minimum_days > 0,
        "labor_concepts.aguinaldo.minimum_days",
        "must be greater than zero",
    );
    checks.require(
        labor.vacation.first_year_days > 0,
        "labor_concepts.vacation.first_year_days",
        "must be greater than zero",
    );
    checks.fraction(
        "labor_concepts.vacation.bonus_percentage",
        labor.vacation.bonus_percentage,
    );
    check_vacation_table(&labor.vacation, checks);

    checks.require(
        labor.work_schedule.daily_hours > 0,
        "labor_concepts.work_schedule.daily_hours",
        "must be greater than zero",
    );
    checks.require(
        (1..=7).contains(&labor.work_schedule.weekly_days),
        "labor_concepts.work_schedule.weekly_days",
        "must be between 1 and 7",
    );

    checks.non_negative(
        "labor_concepts.overtime.double_multiplier",
        labor.overtime.double_multiplier,
    );
    checks.non_negative(
        "labor_concepts.overtime.triple_multiplier",
        labor.overtime.triple_multiplier,
    );
    checks.non_negative(
        "labor_concepts.sunday_premium.percentage",
        labor.sunday_premium.percentage,
    );
}

fn check_vacation_table(vacation: &VacationRules, checks: &mut Checks) {
    let table = &vacation.entitlement_table;

    for (i, row) in table.iter().enumerate() {
        if let Some(max) = row.max_years {
            checks.require(
                row.min_years <= max,
                format!("labor_concepts.vacation.entitlement_table[{}]", i),
                "must have min_years no greater than max_years",
            );
        }
    }
    for (i, pair) in table.windows(2).enumerate() {
        let field = format!("labor_concepts.vacation.entitlement_table[{}]", i + 1);
        checks.require(
            pair[0].days <= pair[1].days,
            field.clone(),
            "must not grant fewer days than the previous row",
        );
        match pair[0].max_years {
            Some(max) => checks.require(
                max.checked_add(1) == Some(pair[1].min_years),
                format!("{}.min_years", field),
                "must start the year after the previous row ends",
            ),
            None => checks.require(
                false,
                format!("labor_concepts.vacation.entitlement_table[{}].max_years", i),
                "must be set on every row but the last",
            ),
        }
    }
    if let Some(first) = table.first() {
        // Years from the second on resolve through the table
        checks.require(
            first.min_years <= 2,
            "labor_concepts.vacation.entitlement_table[0].min_years",
            "must cover the second year of service",
        );
        checks.require(
            vacation.first_year_days <= first.days,
            "labor_concepts.vacation.first_year_days",
            "must not exceed the first entitlement row",
        );
    }
}

fn check_tables(tables: &CalculationTables, checks: &mut Checks) {
    for frequency in PayFrequency::ALL {
        let prefix = format!("calculation_tables.isr.{}", frequency);
        let isr = tables.isr.for_frequency(frequency);
        checks.require(!isr.is_empty(), prefix.clone(), "must not be empty");
        check_ascending(isr.iter().map(|b| b.lower_limit), &prefix, checks);
        check_upper_limits(isr.iter().map(|b| (b.lower_limit, b.upper_limit)), &prefix, checks);
        for (i, bracket) in isr.iter().enumerate() {
            checks.fraction(format!("{}[{}].rate", prefix, i), bracket.rate);
            checks.non_negative(format!("{}[{}].fixed_fee", prefix, i), bracket.fixed_fee);
        }

        let prefix = format!("calculation_tables.employment_subsidy.{}", frequency);
        let subsidy = tables.employment_subsidy.for_frequency(frequency);
        checks.require(!subsidy.is_empty(), prefix.clone(), "must not be empty");
        check_ascending(subsidy.iter().map(|b| b.lower_limit), &prefix, checks);
        check_upper_limits(
            subsidy.iter().map(|b| (b.lower_limit, b.upper_limit)),
            &prefix,
            checks,
        );
        for (i, bracket) in subsidy.iter().enumerate() {
            checks.non_negative(format!("{}[{}].subsidy", prefix, i), bracket.subsidy);
        }
    }
}

fn check_ascending(limits: impl Iterator<Item = Decimal>, prefix: &str, checks: &mut Checks) {
    let limits: Vec<Decimal> = limits.collect();
    for (i, pair) in limits.windows(2).enumerate() {
        checks.require(
            pair[0] < pair[1],
            format!("{}[{}].lower_limit", prefix, i + 1),
            "must be greater than the previous row's lower limit",
        );
    }
}

/// Published upper limits are not used for selection, but they must not
/// contradict it: each sits at or above its own lower limit and below the
/// next row's.
fn check_upper_limits(
    rows: impl Iterator<Item = (Decimal, Option<Decimal>)>,
    prefix: &str,
    checks: &mut Checks,
) {
    let rows: Vec<(Decimal, Option<Decimal>)> = rows.collect();
    for (i, (lower, upper)) in rows.iter().enumerate() {
        let Some(upper) = upper else { continue };
        let field = format!("{}[{}].upper_limit", prefix, i);
        checks.require(
            upper >= lower,
            field.clone(),
            "must not be below the row's lower limit",
        );
        if let Some((next_lower, _)) = rows.get(i + 1) {
            checks.require(
                upper < next_lower,
                field,
                "must be below the next row's lower limit",
            );
        }
    }
}
