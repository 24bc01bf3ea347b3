//! IMSS work-risk class model.

use serde::{Deserialize, Serialize};

/// The IMSS work-risk class an employer is registered under.
///
/// Class I is the lowest-risk class and the default when the caller does not
/// specify one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskClass {
    /// Ordinary risk (e.g. offices, commerce).
    #[default]
    #[serde(rename = "class_i")]
    ClassI,
    /// Low risk.
    #[serde(rename = "class_ii")]
    ClassII,
    /// Medium risk.
    #[serde(rename = "class_iii")]
    ClassIII,
    /// High risk.
    #[serde(rename = "class_iv")]
    ClassIV,
    /// Maximum risk (e.g. mining, construction).
    #[serde(rename = "class_v")]
    ClassV,
}

impl std::fmt::Display for RiskClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskClass::ClassI => write!(f, "I"),
            RiskClass::ClassII => write!(f, "II"),
            RiskClass::ClassIII => write!(f, "III"),
            RiskClass::ClassIV => write!(f, "IV"),
            RiskClass::ClassV => write!(f, "V"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_risk_class_is_class_i() {
        assert_eq!(RiskClass::default(), RiskClass::ClassI);
    }

    #[test]
    fn test_risk_class_deserializes() {
        let class: RiskClass = serde_json::from_str("\"class_iii\"").unwrap();
        assert_eq!(class, RiskClass::ClassIII);
        assert_eq!(class.to_string(), "III");
    }
}
