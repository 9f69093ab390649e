//! Office location codes.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Office an attorney works from.
///
/// Unknown or missing values are kept as [`OfficeLocation::Unspecified`] so a
/// single bad row never breaks rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OfficeLocation {
    #[serde(rename = "Dt-11")]
    Downtown11,
    #[serde(rename = "Dt-10")]
    Downtown10,
    #[serde(rename = "Dt-9")]
    Downtown9,
    #[serde(rename = "Dt-7M")]
    Downtown7M,
    #[serde(rename = "Indy")]
    Independence,
    #[serde(rename = "FSD")]
    FamilySupport,
    /// Code not in the lookup table, or no location recorded.
    Unspecified(Option<String>),
}

impl OfficeLocation {
    /// Parse a location code as stored in the roster.
    #[must_use]
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("Dt-11") => Self::Downtown11,
            Some("Dt-10") => Self::Downtown10,
            Some("Dt-9") => Self::Downtown9,
            Some("Dt-7M") => Self::Downtown7M,
            Some("Indy") => Self::Independence,
            Some("FSD") => Self::FamilySupport,
            other => Self::Unspecified(other.map(str::to_owned)),
        }
    }

    /// Source-system code, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Downtown11 => Some("Dt-11"),
            Self::Downtown10 => Some("Dt-10"),
            Self::Downtown9 => Some("Dt-9"),
            Self::Downtown7M => Some("Dt-7M"),
            Self::Independence => Some("Indy"),
            Self::FamilySupport => Some("FSD"),
            Self::Unspecified(code) => code.as_deref(),
        }
    }

    /// Human-readable location name.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Downtown11 => "Downtown Courthouse, 11th floor",
            Self::Downtown10 => "Downtown Courthouse, 10th floor",
            Self::Downtown9 => "Downtown Courthouse, 9th floor (COMBAT)",
            Self::Downtown7M => "Downtown Courthouse, 7M",
            Self::Independence => "Eastern Jackson Courthouse, Independence",
            Self::FamilySupport => "Family Support Division",
            Self::Unspecified(_) => "Unspecified",
        }
    }
}

impl fmt::Display for OfficeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
