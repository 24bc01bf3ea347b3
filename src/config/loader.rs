//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the payroll
//! configuration from a manifest and its section files.

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};

use super::types::{
    CalculationTables, ContributionRates, LaborConcepts, MasterConfig, OfficialValues,
    PayrollConfig, RegionalConfig,
};

/// Location of the master manifest inside the configuration directory.
pub const MANIFEST_PATH: &str = "payroll/main.json";

/// Section keys every manifest must declare.
pub const SECTION_KEYS: [&str; 5] = [
    "official_values",
    "regional",
    "contribution_rates",
    "labor_concepts",
    "calculation_tables",
];

/// Loads the payroll configuration.
///
/// Reads the master manifest, parses each section file it names and
/// validates the result. A configuration that fails any step is never
/// returned.
///
/// # Directory Structure
///
/// ```text
/// config/
/// └── payroll/
///     ├── main.json                # Master manifest
///     ├── official_values.json     # UMA, minimum wages, limits
///     ├── regional.json            # State tax and local holidays
///     ├── contribution_rates.json  # IMSS and INFONAVIT rates
///     ├── labor_concepts.json      # Aguinaldo, vacation, overtime
///     └── calculation_tables.json  # ISR and subsidy tables
/// ```
///
/// Section paths come from the manifest's `config_files` and are resolved
/// against the configuration directory unless absolute. Files ending in
/// `.yaml` or `.yml` are read as YAML, everything else as JSON.
///
/// # Example
///
/// ```no_run
/// use nomina_engine::config::ConfigLoader;
///
/// let config = ConfigLoader::load("./config")?;
/// println!("Fiscal year: {}", config.official_values().fiscal_year);
/// # Ok::<(), nomina_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads and validates the configuration under `path`.
    ///
    /// # Returns
    ///
    /// Returns the validated [`PayrollConfig`], or an error if:
    /// - The manifest or any section file is missing (`ConfigNotFound`)
    /// - Any file is malformed (`ConfigParseError`)
    /// - The manifest omits a required section (`MissingSection`)
    /// - Any validation rule fails (`ValidationFailed`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<PayrollConfig> {
        let path = path.as_ref();
        info!(config_dir = %path.display(), "Loading payroll configuration");

        let master = Self::load_manifest(path)?;

        let official_values: OfficialValues =
            Self::load_section(path, &master, "official_values")?;
        let regional: RegionalConfig = Self::load_section(path, &master, "regional")?;
        let contribution_rates: ContributionRates =
            Self::load_section(path, &master, "contribution_rates")?;
        let labor_concepts: LaborConcepts = Self::load_section(path, &master, "labor_concepts")?;
        let calculation_tables: CalculationTables =
            Self::load_section(path, &master, "calculation_tables")?;

        let config = PayrollConfig::from_sections(
            master,
            official_values,
            regional,
            contribution_rates,
            labor_concepts,
            calculation_tables,
        )?;

        info!(
            fiscal_year = config.official_values().fiscal_year,
            state = %config.regional().state.name,
            "Payroll configuration loaded"
        );
        Ok(config)
    }

    /// Loads only the master manifest under `path`.
    pub fn load_manifest<P: AsRef<Path>>(path: P) -> EngineResult<MasterConfig> {
        let manifest_path = path.as_ref().join(MANIFEST_PATH);
        let master: MasterConfig = Self::load_file(&manifest_path)?;

        if let Some(missing) = SECTION_KEYS
            .iter()
            .find(|key| !master.config_files.contains_key(**key))
        {
            return Err(EngineError::MissingSection {
                section: missing.to_string(),
            });
        }
        Ok(master)
    }

    /// Resolves the file path the manifest declares for a section.
    pub fn section_path(path: &Path, master: &MasterConfig, section: &str) -> EngineResult<PathBuf> {
        let declared = master
            .config_files
            .get(section)
            .ok_or_else(|| EngineError::MissingSection {
                section: section.to_string(),
            })?;

        let declared = Path::new(declared);
        if declared.is_absolute() {
            Ok(declared.to_path_buf())
        } else {
            Ok(path.join(declared))
        }
    }

    fn load_section<T: DeserializeOwned>(
        path: &Path,
        master: &MasterConfig,
        section: &str,
    ) -> EngineResult<T> {
        let section_path = Self::section_path(path, master, section)?;
        debug!(section, path = %section_path.display(), "Loading configuration section");
        Self::load_file(&section_path)
    }

    /// Loads and parses a JSON or YAML file.
    fn load_file<T: DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let is_yaml = path
            .extension()
            .is_some_and(|ext| ext == "yaml" || ext == "yml");

        if is_yaml {
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })
        } else {
            serde_json::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })
        }
    }
}
