//! Integration tests for the payroll engine.
//!
//! These tests load the shipped configuration from `./config` and drive the
//! calculators the way the payroll service does for one employee and period.

use std::str::FromStr;
use std::sync::Arc;
use std::thread;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use nomina_engine::calculation::{
    BusinessCalendar, BusinessDayCalculator, ContributionCalculator, VacationCalculator,
    calculate_aguinaldo, calculate_employment_subsidy, calculate_isr, calculate_net_withholding,
    calculate_state_payroll_tax, calculate_vacation_premium, capped_base,
};
use nomina_engine::config::{ConfigLoader, PayrollConfig};
use nomina_engine::error::EngineError;
use nomina_engine::models::{PayFrequency, RiskClass};

// ============================================================================
// Test Helpers
// ============================================================================

fn load_config() -> PayrollConfig {
    ConfigLoader::load("./config").expect("Failed to load config")
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn make_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_shipped_configuration_loads_and_validates() {
    let config = load_config();

    assert_eq!(config.official_values().fiscal_year, 2025);
    assert_eq!(config.uma_daily(), dec("113.14"));
    assert_eq!(config.imss_max_base(), dec("2828.50"));
    assert_eq!(config.master().name, "Nómina México 2025");
    for frequency in PayFrequency::ALL {
        assert_eq!(config.isr_table(frequency).len(), 11);
        assert_eq!(config.subsidy_table(frequency).len(), 11);
    }
}

#[test]
fn test_minimum_wage_zone_lookup() {
    let config = load_config();
    let wages = &config.official_values().minimum_wages;

    assert_eq!(wages.daily_for_zone("general"), dec("278.80"));
    assert_eq!(wages.daily_for_zone("northern_border_free_zone"), dec("419.88"));
    // Historical zones are inactive in the shipped configuration
    assert_eq!(wages.daily_for_zone("zone_a"), dec("278.80"));
    assert_eq!(wages.daily_for_zone("unknown"), dec("278.80"));
    assert_eq!(wages.daily_for_profession("general", "albanil"), dec("321.20"));
    assert_eq!(
        wages.daily_for_profession("northern_border_free_zone", "albanil"),
        dec("419.88")
    );
}

#[test]
fn test_missing_configuration_directory_is_fatal() {
    let result = ConfigLoader::load("./does-not-exist");
    assert!(matches!(result, Err(EngineError::ConfigNotFound { .. })));
}

// ============================================================================
// Per-employee payroll period
// ============================================================================

#[test]
fn test_biweekly_payroll_for_one_employee() {
    let config = load_config();

    // Daily salary 600, 15-day period
    let taxable = dec("9000");
    let withholding = calculate_net_withholding(&config, taxable, PayFrequency::Biweekly).unwrap();

    // 809.25 + (9000 - 7641.91) * 0.2136
    assert_eq!(withholding.isr.bracket_index, 5);
    assert_eq!(withholding.isr.tax, dec("1099.338024"));
    assert_eq!(withholding.subsidy.subsidy, Decimal::ZERO);
    assert_eq!(withholding.withheld().round_dp(2), dec("1099.34"));

    // Contributions on an SDI of 627.12 for 15 days
    let calculator = ContributionCalculator::new(&config);
    let breakdown = calculator
        .contributions_for_sdi(dec("627.12"), Some(RiskClass::ClassII))
        .unwrap();
    assert_eq!(breakdown.imss_base, dec("627.12"));
    assert_eq!(
        breakdown.employer_total,
        dec("627.12") * (dec("0.0965") + dec("0.0113065"))
    );
    assert_eq!(breakdown.employee_total, dec("627.12") * dec("0.02375"));
}

#[test]
fn test_high_salary_is_capped_before_rating() {
    let config = load_config();
    let calculator = ContributionCalculator::new(&config);

    let raw = dec("4000");
    let base = capped_base(
        raw,
        config.official_values().limits.imss_cap_uma_multiplier,
        config.uma_daily(),
    )
    .unwrap();
    let breakdown = calculator.contributions_for_sdi(raw, None).unwrap();

    assert_eq!(base, dec("2828.50"));
    assert_eq!(breakdown.imss_base, base);
    assert_eq!(
        breakdown.employee_total,
        calculator.employee_contribution(base).unwrap()
    );
}

#[test]
fn test_subsidy_and_isr_share_frequency_selection() {
    let config = load_config();

    let weekly_isr = calculate_isr(&config, dec("1200"), PayFrequency::Weekly).unwrap();
    let weekly_subsidy =
        calculate_employment_subsidy(&config, dec("1200"), PayFrequency::Weekly).unwrap();

    assert_eq!(weekly_isr.bracket_index, 1);
    assert_eq!(weekly_subsidy.bracket_index, 6);
    assert_eq!(weekly_subsidy.subsidy, dec("74.83"));
}

#[test]
fn test_published_fee_rounding_dips_at_first_boundary() {
    let config = load_config();

    // The SAT rounds its fixed fees, so the first row's top edge
    // (0.01 + 746.03 * 0.0192) sits above the second row's fee.
    let below = calculate_isr(&config, dec("746.04"), PayFrequency::Monthly).unwrap();
    let above = calculate_isr(&config, dec("746.05"), PayFrequency::Monthly).unwrap();

    assert_eq!(below.bracket_index, 0);
    assert_eq!(below.tax, dec("14.323776"));
    assert_eq!(above.bracket_index, 1);
    assert_eq!(above.tax, dec("14.32"));
    assert!(above.tax < below.tax);
    assert_eq!(below.tax.round_dp(2), above.tax);
}

#[test]
fn test_state_payroll_tax_for_cdmx() {
    let config = load_config();
    let tax = calculate_state_payroll_tax(&config, dec("250000")).unwrap();
    assert_eq!(tax, dec("10000"));
}

// ============================================================================
// Vacation scenario crossing a year boundary
// ============================================================================

#[test]
fn test_december_to_january_vacation() {
    let config = load_config();

    let vacation = VacationCalculator::new(&config);
    let entitled = vacation.entitled_days(3).unwrap();
    assert_eq!(entitled, 16);

    let calendar = BusinessCalendar::with_local_holidays(config.regional());
    let taken = calendar
        .business_day_count(make_date("2024-12-23"), make_date("2025-01-03"))
        .unwrap();
    assert_eq!(taken, 8);

    let premium = calculate_vacation_premium(&config, dec("500"), taken).unwrap();
    assert_eq!(premium.amount, dec("1000"));
    assert_eq!(premium.exempt, dec("1000"));
}

#[test]
fn test_aguinaldo_for_new_hire() {
    let config = load_config();

    // Hired on 2025-07-01: 184 days worked through 2025-12-31
    let days_worked = (make_date("2025-12-31") - make_date("2025-07-01")).num_days() as u32 + 1;
    let result = calculate_aguinaldo(&config, dec("730"), days_worked).unwrap();

    assert_eq!(days_worked, 184);
    assert_eq!(result.payment.amount.round_dp(2), dec("5520.00"));
    assert_eq!(result.payment.exempt, dec("3394.20"));
}

// ============================================================================
// Business days
// ============================================================================

#[test]
fn test_business_day_scenarios() {
    let calculator = BusinessDayCalculator::new(2025).unwrap();

    let cases = [
        ("2025-01-06", "2025-01-10", 5),
        ("2025-01-03", "2025-01-06", 2),
        ("2025-01-01", "2025-01-03", 2),
        ("2025-01-10", "2025-01-06", 0),
        ("2025-01-04", "2025-01-04", 0),
    ];

    for (start, end, expected) in cases {
        assert_eq!(
            calculator.business_day_count(make_date(start), make_date(end)),
            expected,
            "{} to {}",
            start,
            end
        );
    }
}

#[test]
fn test_shared_configuration_across_threads() {
    let config = Arc::new(load_config());

    let handles: Vec<_> = (1..=4)
        .map(|i| {
            let config = Arc::clone(&config);
            thread::spawn(move || {
                let base = Decimal::from(5000 * i);
                calculate_isr(&config, base, PayFrequency::Monthly)
                    .unwrap()
                    .tax
            })
        })
        .collect();

    let taxes: Vec<Decimal> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(taxes.windows(2).all(|pair| pair[0] <= pair[1]));
}
