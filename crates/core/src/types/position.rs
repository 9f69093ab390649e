//! Job position of an attorney.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a position code is outside the directory's scope.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown position code: {0}")]
pub struct PositionError(pub String);

/// Attorney position.
///
/// The roster query only loads these four positions; investigators, victim
/// advocates, legal assistants and support staff live in the same source
/// table but are out of scope for the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "Exec")]
    Exec,
    #[serde(rename = "CTA")]
    Cta,
    #[serde(rename = "TTL")]
    Ttl,
    #[serde(rename = "APA")]
    Apa,
}

impl Position {
    /// All positions, in the order they are offered as filters.
    pub const ALL: [Self; 4] = [Self::Exec, Self::Cta, Self::Ttl, Self::Apa];

    /// Source-system code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Exec => "Exec",
            Self::Cta => "CTA",
            Self::Ttl => "TTL",
            Self::Apa => "APA",
        }
    }

    /// Singular role name used on badges.
    #[must_use]
    pub const fn role_name(self) -> &'static str {
        match self {
            Self::Exec => "Executive Staff",
            Self::Cta => "Chief Trial Attorney",
            Self::Ttl => "Trial Team Leader",
            Self::Apa => "Assistant Prosecuting Attorney",
        }
    }

    /// Plural label used in the position filter.
    #[must_use]
    pub const fn filter_label(self) -> &'static str {
        match self {
            Self::Exec => "Executive Staff",
            Self::Cta => "Chief Trial Attorneys",
            Self::Ttl => "Team Trial Leaders",
            Self::Apa => "Assistant Prosecuting Attorneys",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Position {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|position| position.code() == s)
            .ok_or_else(|| PositionError(s.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_parse_back() {
        for position in Position::ALL {
            assert_eq!(position.code().parse::<Position>().unwrap(), position);
        }
    }

    #[test]
    fn test_out_of_scope_codes_rejected() {
        assert_eq!(
            "VA".parse::<Position>(),
            Err(PositionError("VA".to_string()))
        );
        // Codes are case-sensitive in the source data.
        assert!("apa".parse::<Position>().is_err());
    }

    #[test]
    fn test_serde_uses_source_codes() {
        assert_eq!(serde_json::to_string(&Position::Cta).unwrap(), "\"CTA\"");
    }
}
