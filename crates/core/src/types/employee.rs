//! Employee records and the loaded roster.

use serde::{Deserialize, Serialize};

use super::location::OfficeLocation;
use super::position::Position;
use super::unit::Unit;

/// Text a missing name field is compared as during search.
///
/// A search for "none" therefore matches anyone without, say, a middle name.
pub const MISSING_FIELD_TEXT: &str = "None";

/// Name fields of an employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    pub full: String,
    pub first: Option<String>,
    pub middle: Option<String>,
    pub last: Option<String>,
    pub suffix: Option<String>,
    pub preferred: Option<String>,
}

impl PersonName {
    /// The six fields free-text search looks at, missing ones rendered as
    /// [`MISSING_FIELD_TEXT`].
    #[must_use]
    pub fn search_fields(&self) -> [&str; 6] {
        fn or_missing(field: Option<&str>) -> &str {
            field.unwrap_or(MISSING_FIELD_TEXT)
        }

        [
            self.full.as_str(),
            or_missing(self.first.as_deref()),
            or_missing(self.middle.as_deref()),
            or_missing(self.last.as_deref()),
            or_missing(self.suffix.as_deref()),
            or_missing(self.preferred.as_deref()),
        ]
    }
}

/// One attorney in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub name: PersonName,
    pub position: Position,
    /// Assigned units in source order.
    pub assigned_units: Vec<Unit>,
    pub office_location: OfficeLocation,
    pub work_email: Option<String>,
    /// Raw phone number, normally ten digits.
    pub work_phone: Option<String>,
    pub job_title: Option<String>,
    /// Image store identifier for the headshot.
    pub photo_id: Option<String>,
}

impl Employee {
    /// Whether the employee is assigned to `unit`.
    #[must_use]
    pub fn has_unit(&self, unit: &Unit) -> bool {
        self.assigned_units.contains(unit)
    }
}

/// The full set of employees loaded from the roster source.
///
/// Ordered by last name as delivered by the source; never mutated after load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    employees: Vec<Employee>,
}

impl Roster {
    /// Wrap employees in source order.
    #[must_use]
    pub const fn new(employees: Vec<Employee>) -> Self {
        Self { employees }
    }

    #[must_use]
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_fields_fill_missing() {
        let name = PersonName {
            full: "Jane Q. Doe".to_string(),
            first: Some("Jane".to_string()),
            last: Some("Doe".to_string()),
            ..PersonName::default()
        };

        assert_eq!(
            name.search_fields(),
            ["Jane Q. Doe", "Jane", "None", "Doe", "None", "None"]
        );
    }
}
