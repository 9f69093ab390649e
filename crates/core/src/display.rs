//! Display formatting for roster rows.
//!
//! Pure functions only: every output is derived from the record and the
//! formatting inputs passed in.

use core::fmt;

use crate::types::{Position, Unit};

/// Office phone prefix whose last four digits double as a desk extension.
pub const DEFAULT_EXTENSION_PREFIX: &str = "816881";

/// Badge color, one per position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeColor {
    Red,
    Orange,
    Green,
    Blue,
}

impl BadgeColor {
    #[must_use]
    pub const fn for_position(position: Position) -> Self {
        match position {
            Position::Exec => Self::Red,
            Position::Cta => Self::Orange,
            Position::Ttl => Self::Green,
            Position::Apa => Self::Blue,
        }
    }

    /// CSS class suffix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }
}

/// Position badge shown on a directory card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub color: BadgeColor,
}

impl Badge {
    /// Build the badge for a position and its assigned units.
    ///
    /// Executive staff with no units, or only the `Exec` unit, get a bare
    /// "Executive Staff"; everyone else lists every assigned unit.
    #[must_use]
    pub fn new(position: Position, units: &[Unit]) -> Self {
        let exec_only = units.is_empty() || units == [Unit::Exec];

        let label = if position == Position::Exec && exec_only {
            position.role_name().to_owned()
        } else {
            format!("{} - {}", position.role_name(), unit_list(units))
        };

        Self {
            label,
            color: BadgeColor::for_position(position),
        }
    }
}

fn unit_list(units: &[Unit]) -> String {
    if units.is_empty() {
        return "N/A".to_owned();
    }
    units
        .iter()
        .map(|unit| unit.badge_name())
        .collect::<Vec<_>>()
        .join(" / ")
}

/// A phone number prepared for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedPhone {
    /// `XXX-XXX-XXXX` for ten-digit numbers, the raw input otherwise.
    pub number: String,
    /// Desk extension for numbers on the office exchange.
    pub extension: Option<String>,
}

impl fmt::Display for FormattedPhone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.number)?;
        if let Some(ext) = &self.extension {
            write!(f, " (ext. {ext})")?;
        }
        Ok(())
    }
}

/// Format a raw phone number.
///
/// Exactly ten ASCII digits become `XXX-XXX-XXXX`, with the last four digits
/// surfaced as an extension when the number starts with `extension_prefix`.
/// Anything else is passed through untouched.
///
/// ```
/// use jcpao_directory_core::format_phone;
///
/// assert_eq!(format_phone("8168815000", "816881").to_string(), "816-881-5000 (ext. 5000)");
/// assert_eq!(format_phone("123", "816881").to_string(), "123");
/// ```
#[must_use]
pub fn format_phone(raw: &str, extension_prefix: &str) -> FormattedPhone {
    let is_ten_digits = raw.len() == 10 && raw.bytes().all(|b| b.is_ascii_digit());
    if !is_ten_digits {
        return FormattedPhone {
            number: raw.to_owned(),
            extension: None,
        };
    }

    // Ten ASCII digits, so byte slicing lands on char boundaries.
    let (area, rest) = raw.split_at(3);
    let (exchange, line) = rest.split_at(3);
    let extension = (!extension_prefix.is_empty() && raw.starts_with(extension_prefix))
        .then(|| line.to_owned());

    FormattedPhone {
        number: format!("{area}-{exchange}-{line}"),
        extension,
    }
}
