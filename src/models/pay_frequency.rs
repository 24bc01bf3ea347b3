//! Pay frequency model.

use serde::{Deserialize, Serialize};

/// How often an employee is paid.
///
/// Selects which ISR and employment-subsidy table applies. The frequency is
/// always supplied by the caller, never inferred from the amount.
///
/// # Example
///
/// ```
/// use nomina_engine::models::PayFrequency;
///
/// let frequency: PayFrequency = serde_json::from_str("\"biweekly\"").unwrap();
/// assert_eq!(frequency, PayFrequency::Biweekly);
/// assert_eq!(frequency.to_string(), "biweekly");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayFrequency {
    /// Paid once a month.
    Monthly,
    /// Paid twice a month (quincenal).
    Biweekly,
    /// Paid every week (semanal).
    Weekly,
}

impl PayFrequency {
    /// All frequencies, in the order tables are declared.
    pub const ALL: [PayFrequency; 3] = [
        PayFrequency::Monthly,
        PayFrequency::Biweekly,
        PayFrequency::Weekly,
    ];
}

impl std::fmt::Display for PayFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayFrequency::Monthly => write!(f, "monthly"),
            PayFrequency::Biweekly => write!(f, "biweekly"),
            PayFrequency::Weekly => write!(f, "weekly"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_deserializes_from_snake_case() {
        let frequency: PayFrequency = serde_json::from_str("\"weekly\"").unwrap();
        assert_eq!(frequency, PayFrequency::Weekly);
    }

    #[test]
    fn test_frequency_display_matches_serde_name() {
        for frequency in PayFrequency::ALL {
            let json = serde_json::to_string(&frequency).unwrap();
            assert_eq!(json, format!("\"{}\"", frequency));
        }
    }
}
