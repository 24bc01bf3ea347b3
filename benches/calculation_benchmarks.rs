//! Performance benchmarks for the payroll engine.
//!
//! Covers the hot paths of a payroll run:
//! - ISR and subsidy lookup for a single employee
//! - Contribution breakdown for a single SDI
//! - Business-day counts across year boundaries
//! - A batch of 1000 employees through withholding and contributions
//! - Loading and validating the configuration directory
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use nomina_engine::calculation::{
    BusinessCalendar, ContributionCalculator, calculate_isr, calculate_net_withholding,
};
use nomina_engine::config::{ConfigLoader, PayrollConfig};
use nomina_engine::models::{PayFrequency, RiskClass};

fn load_config() -> PayrollConfig {
    ConfigLoader::load("./config").expect("Failed to load config")
}

fn make_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").expect("Invalid date")
}

/// Benchmark: ISR lookup per frequency.
fn bench_isr_lookup(c: &mut Criterion) {
    let config = load_config();
    let mut group = c.benchmark_group("isr_lookup");

    for frequency in PayFrequency::ALL {
        group.bench_with_input(
            BenchmarkId::new("frequency", frequency),
            &frequency,
            |b, &frequency| {
                b.iter(|| calculate_isr(&config, black_box(Decimal::new(1234567, 2)), frequency))
            },
        );
    }

    group.finish();
}

/// Benchmark: ISR netted against the employment subsidy.
fn bench_net_withholding(c: &mut Criterion) {
    let config = load_config();

    c.bench_function("net_withholding_biweekly", |b| {
        b.iter(|| {
            calculate_net_withholding(
                &config,
                black_box(Decimal::new(450000, 2)),
                PayFrequency::Biweekly,
            )
        })
    });
}

/// Benchmark: Full contribution breakdown for one SDI.
fn bench_contributions(c: &mut Criterion) {
    let config = load_config();
    let calculator = ContributionCalculator::new(&config);

    c.bench_function("contributions_for_sdi", |b| {
        b.iter(|| {
            calculator.contributions_for_sdi(black_box(Decimal::new(62712, 2)), Some(RiskClass::ClassII))
        })
    });
}

/// Benchmark: Business-day counts over ranges of growing length.
fn bench_business_days(c: &mut Criterion) {
    let config = load_config();
    let calendar = BusinessCalendar::with_local_holidays(config.regional());
    let start = make_date("2024-12-23");

    let mut group = c.benchmark_group("business_day_count");

    for days in [12i64, 90, 365, 1095] {
        let end = start + chrono::Duration::days(days - 1);
        group.throughput(Throughput::Elements(days as u64));
        group.bench_with_input(BenchmarkId::new("days", days), &end, |b, &end| {
            b.iter(|| calendar.business_day_count(black_box(start), black_box(end)))
        });
    }

    group.finish();
}

/// Benchmark: A payroll run of 1000 employees.
fn bench_batch_1000(c: &mut Criterion) {
    let config = load_config();
    let calculator = ContributionCalculator::new(&config);

    // Daily salaries from the minimum wage up past the contribution cap
    let salaries: Vec<Decimal> = (0..1000)
        .map(|i| Decimal::new(27880 + i * 350, 2))
        .collect();

    let mut group = c.benchmark_group("payroll_run");
    group.throughput(Throughput::Elements(salaries.len() as u64));
    group.sample_size(20);

    group.bench_function("batch_1000", |b| {
        b.iter(|| {
            let mut results = Vec::with_capacity(salaries.len());
            for daily in &salaries {
                let period = *daily * Decimal::from(15);
                let withholding =
                    calculate_net_withholding(&config, period, PayFrequency::Biweekly);
                let contributions = calculator.contributions_for_sdi(*daily, None);
                results.push((withholding, contributions));
            }
            black_box(results)
        })
    });

    group.finish();
}

/// Benchmark: Loading and validating the configuration directory.
fn bench_config_load(c: &mut Criterion) {
    c.bench_function("config_load", |b| b.iter(|| ConfigLoader::load(black_box("./config"))));
}

criterion_group!(
    benches,
    bench_isr_lookup,
    bench_net_withholding,
    bench_contributions,
    bench_business_days,
    bench_batch_1000,
    bench_config_load,
);
criterion_main!(benches);
