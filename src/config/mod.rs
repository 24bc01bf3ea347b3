//! Configuration loading and validation for the payroll engine.
//!
//! This module loads the master manifest and its section files into a
//! [`PayrollConfig`], and validates it before anything can read from it.
//!
//! # Example
//!
//! ```no_run
//! use nomina_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("UMA daily value: {}", config.uma_daily());
//! ```

mod loader;
mod types;
mod validator;

pub use loader::{ConfigLoader, MANIFEST_PATH, SECTION_KEYS};
pub use types::{
    AguinaldoRules, CalculationTables, ContributionRates, ExemptionLimit, FrequencyTables,
    HistoricalWages, ImssParties, ImssRates, InfonavitRates, LaborConcepts, Limits,
    LocalHoliday, MasterConfig, MinimumWages, OfficialValues, OvertimeRules, PayrollConfig,
    RegionalConfig, SeveranceOldAge, StateInfo, StatePayrollTax, SubsidyBracket, SundayPremium,
    TaxBracket, Uma, VacationBracket, VacationRules, WageZone, WorkRiskRates, WorkSchedule,
};
pub use validator::{Violation, validate};
