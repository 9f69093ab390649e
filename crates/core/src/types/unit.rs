//! Assigned unit codes.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Unit an attorney is assigned to.
///
/// The source enumeration grows over time, so codes the directory does not
/// know about are kept verbatim in [`Unit::Other`] rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    Exec,
    Gcu,
    Svu,
    Vcu,
    Csu,
    Combat,
    Drug,
    Fsd,
    Other(String),
}

impl Unit {
    /// Parse a unit code as stored in the roster.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "Exec" => Self::Exec,
            "GCU" => Self::Gcu,
            "SVU" => Self::Svu,
            "VCU" => Self::Vcu,
            "CSU" => Self::Csu,
            "COMBAT" => Self::Combat,
            "Drug" => Self::Drug,
            "FSD" => Self::Fsd,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Source-system code.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Exec => "Exec",
            Self::Gcu => "GCU",
            Self::Svu => "SVU",
            Self::Vcu => "VCU",
            Self::Csu => "CSU",
            Self::Combat => "COMBAT",
            Self::Drug => "Drug",
            Self::Fsd => "FSD",
            Self::Other(code) => code,
        }
    }

    /// Name shown inside position badges.
    #[must_use]
    pub fn badge_name(&self) -> &str {
        match self {
            Self::Drug => "Drug Court",
            other => other.code(),
        }
    }

    /// Label used in the unit filter.
    #[must_use]
    pub fn filter_label(&self) -> &str {
        match self {
            Self::Exec => "Executive Staff",
            Self::Gcu => "General Crimes Unit (GCU)",
            Self::Svu => "Special Victims Unit (SVU)",
            Self::Vcu => "Violent Crimes Unit (VCU)",
            Self::Csu => "Crime Strategies Unit (CSU)",
            Self::Combat => "COMBAT",
            Self::Drug => "Drug Court",
            Self::Fsd => "Family Support Division",
            Self::Other(code) => code,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_round_trip() {
        for code in ["Exec", "GCU", "SVU", "VCU", "CSU", "COMBAT", "Drug", "FSD"] {
            assert_eq!(Unit::from_code(code).code(), code);
        }
    }

    #[test]
    fn test_unknown_code_preserved() {
        let unit = Unit::from_code("Appeals");
        assert_eq!(unit, Unit::Other("Appeals".to_string()));
        assert_eq!(unit.badge_name(), "Appeals");
    }

    #[test]
    fn test_drug_badge_name() {
        assert_eq!(Unit::Drug.badge_name(), "Drug Court");
        assert_eq!(Unit::Gcu.badge_name(), "GCU");
    }
}
