//! Roster filter engine.
//!
//! A [`FilterState`] holds four independent constraints. Applying it to a
//! [`Roster`] yields the employees that satisfy every active constraint, in
//! roster order. The roster itself is never touched.

use serde::{Deserialize, Serialize};

use crate::types::{Employee, OfficeLocation, Position, Roster, Unit};

/// Form value meaning "no constraint".
pub const ALL_CODE: &str = "All";

/// Error returned when a submitted filter value is not one of the offered
/// options.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {field} filter: {value}")]
pub struct SelectionError {
    pub field: &'static str,
    pub value: String,
}

/// A value that can be picked from a filter drop-down.
pub trait FilterOption: Sized + Clone + PartialEq {
    /// Name of the filter, used in errors.
    const FIELD: &'static str;
    /// Label of the "All" entry.
    const ALL_LABEL: &'static str;

    /// Values offered in the drop-down, in display order.
    fn options() -> Vec<Self>;
    /// Code submitted by the form.
    fn option_code(&self) -> &str;
    /// Text shown to the user.
    fn option_label(&self) -> &str;
}

impl FilterOption for Position {
    const FIELD: &'static str = "position";
    const ALL_LABEL: &'static str = "All Job Positions";

    fn options() -> Vec<Self> {
        Self::ALL.to_vec()
    }

    fn option_code(&self) -> &str {
        self.code()
    }

    fn option_label(&self) -> &str {
        self.filter_label()
    }
}

impl FilterOption for Unit {
    const FIELD: &'static str = "unit";
    const ALL_LABEL: &'static str = "All Units";

    fn options() -> Vec<Self> {
        vec![
            Self::Exec,
            Self::Gcu,
            Self::Svu,
            Self::Vcu,
            Self::Csu,
            Self::Drug,
            Self::Fsd,
        ]
    }

    fn option_code(&self) -> &str {
        self.code()
    }

    fn option_label(&self) -> &str {
        self.filter_label()
    }
}

impl FilterOption for OfficeLocation {
    const FIELD: &'static str = "location";
    const ALL_LABEL: &'static str = "All Office Locations";

    // Dt-9 (COMBAT) is not offered while that team is inactive.
    fn options() -> Vec<Self> {
        vec![
            Self::Downtown11,
            Self::Downtown10,
            Self::Downtown7M,
            Self::Independence,
            Self::FamilySupport,
        ]
    }

    fn option_code(&self) -> &str {
        self.code().unwrap_or_default()
    }

    fn option_label(&self) -> &str {
        self.label()
    }
}

/// A single drop-down constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: FilterOption> Selection<T> {
    /// Parse a submitted form value.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError` if `code` is neither `All` nor the code of one
    /// of [`FilterOption::options`].
    pub fn parse(code: &str) -> Result<Self, SelectionError> {
        if code == ALL_CODE {
            return Ok(Self::All);
        }
        T::options()
            .into_iter()
            .find(|option| option.option_code() == code)
            .map(Self::Only)
            .ok_or_else(|| SelectionError {
                field: T::FIELD,
                value: code.to_owned(),
            })
    }

    /// Form value for this selection.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::All => ALL_CODE,
            Self::Only(value) => value.option_code(),
        }
    }
}

impl<T> Selection<T> {
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// `true` for `All`, otherwise the result of `test` on the selected value.
    fn admits(&self, test: impl FnOnce(&T) -> bool) -> bool {
        match self {
            Self::All => true,
            Self::Only(value) => test(value),
        }
    }
}

/// The user's current narrowing of the roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub position: Selection<Position>,
    pub unit: Selection<Unit>,
    pub location: Selection<OfficeLocation>,
    /// Raw search text as typed; normalized when matching.
    pub search: String,
}

impl FilterState {
    /// Whether every constraint is at its default.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.position.is_all()
            && self.unit.is_all()
            && self.location.is_all()
            && self.normalized_search().is_empty()
    }

    /// Clear all four constraints.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Drop only the text constraint.
    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    fn normalized_search(&self) -> String {
        self.search.trim().to_lowercase()
    }

    /// Whether `employee` satisfies every active constraint.
    #[must_use]
    pub fn matches(&self, employee: &Employee) -> bool {
        self.matches_with(employee, &self.normalized_search())
    }

    fn matches_with(&self, employee: &Employee, needle: &str) -> bool {
        self.position.admits(|p| employee.position == *p)
            && self.unit.admits(|u| employee.has_unit(u))
            && self.location.admits(|l| employee.office_location == *l)
            && (needle.is_empty()
                || employee
                    .name
                    .search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(needle)))
    }

    /// Employees of `roster` satisfying this state, in roster order.
    #[must_use]
    pub fn apply<'a>(&self, roster: &'a Roster) -> Vec<&'a Employee> {
        let needle = self.normalized_search();
        roster
            .employees()
            .iter()
            .filter(|employee| self.matches_with(employee, &needle))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;
    use crate::types::PersonName;

    pub(crate) fn employee(
        full: &str,
        last: &str,
        position: Position,
        units: &[&str],
        location: &str,
    ) -> Employee {
        Employee {
            name: PersonName {
                full: full.to_string(),
                first: full.split_whitespace().next().map(str::to_string),
                middle: None,
                last: Some(last.to_string()),
                suffix: None,
                preferred: None,
            },
            position,
            assigned_units: units.iter().map(|u| Unit::from_code(u)).collect(),
            office_location: OfficeLocation::from_code(Some(location)),
            work_email: None,
            work_phone: None,
            job_title: None,
            photo_id: None,
        }
    }

    fn roster() -> Roster {
        Roster::new(vec![
            employee("Alice Adams", "Adams", Position::Apa, &["GCU", "SVU"], "Dt-11"),
            employee("Bob Baker", "Baker", Position::Exec, &["Exec"], "Dt-10"),
            employee("Carol Smith", "Smith", Position::Cta, &["VCU"], "Indy"),
            employee("Dan Smithers", "Smithers", Position::Apa, &["Drug"], "Dt-11"),
            employee("Eve Evans", "Evans", Position::Ttl, &[], "FSD"),
        ])
    }

    fn names(rows: &[&Employee]) -> Vec<String> {
        rows.iter().map(|e| e.name.full.clone()).collect()
    }

    #[test]
    fn test_default_state_returns_full_roster_in_order() {
        let roster = roster();
        let state = FilterState::default();
        assert!(state.is_default());

        let rows = state.apply(&roster);
        assert_eq!(rows.len(), roster.len());
        assert!(rows.iter().zip(roster.employees()).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_position_filter() {
        let roster = roster();
        let state = FilterState {
            position: Selection::Only(Position::Apa),
            ..FilterState::default()
        };
        assert_eq!(
            names(&state.apply(&roster)),
            vec!["Alice Adams", "Dan Smithers"]
        );
    }

    #[test]
    fn test_unit_membership() {
        let roster = roster();
        let alice = roster.employees().first().unwrap();

        for (unit, expected) in [(Unit::Gcu, true), (Unit::Svu, true), (Unit::Vcu, false)] {
            let state = FilterState {
                unit: Selection::Only(unit),
                ..FilterState::default()
            };
            assert_eq!(state.matches(alice), expected);
        }
    }

    #[test]
    fn test_location_filter() {
        let roster = roster();
        let state = FilterState {
            location: Selection::Only(OfficeLocation::Downtown11),
            ..FilterState::default()
        };
        assert_eq!(
            names(&state.apply(&roster)),
            vec!["Alice Adams", "Dan Smithers"]
        );
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let roster = roster();
        let state = FilterState {
            search: "  smith ".to_string(),
            ..FilterState::default()
        };
        assert_eq!(
            names(&state.apply(&roster)),
            vec!["Carol Smith", "Dan Smithers"]
        );

        let upper = FilterState {
            search: "SMITH".to_string(),
            ..FilterState::default()
        };
        assert_eq!(state.apply(&roster), upper.apply(&roster));
    }

    #[test]
    fn test_search_matches_missing_field_text() {
        let roster = roster();
        let state = FilterState {
            search: "none".to_string(),
            ..FilterState::default()
        };
        // Every test employee lacks a middle name.
        assert_eq!(state.apply(&roster).len(), roster.len());
    }

    #[test]
    fn test_constraints_compose_with_and() {
        let roster = roster();
        let state = FilterState {
            position: Selection::Only(Position::Apa),
            location: Selection::Only(OfficeLocation::Downtown11),
            search: "smith".to_string(),
            ..FilterState::default()
        };
        assert_eq!(names(&state.apply(&roster)), vec!["Dan Smithers"]);

        let none = FilterState {
            unit: Selection::Only(Unit::Fsd),
            position: Selection::Only(Position::Exec),
            ..FilterState::default()
        };
        assert!(none.apply(&roster).is_empty());
    }

    #[test]
    fn test_empty_roster_yields_empty_result() {
        let state = FilterState {
            search: "adams".to_string(),
            ..FilterState::default()
        };
        assert!(state.apply(&Roster::default()).is_empty());
    }

    #[test]
    fn test_apply_is_deterministic() {
        let roster = roster();
        let state = FilterState {
            position: Selection::Only(Position::Apa),
            search: "a".to_string(),
            ..FilterState::default()
        };
        assert_eq!(state.apply(&roster), state.apply(&roster));
    }

    #[test]
    fn test_reset_restores_full_roster() {
        let roster = roster();
        let mut state = FilterState {
            position: Selection::Only(Position::Ttl),
            unit: Selection::Only(Unit::Drug),
            location: Selection::Only(OfficeLocation::Independence),
            search: "zzz".to_string(),
        };
        assert!(state.apply(&roster).is_empty());

        state.reset();
        assert!(state.is_default());
        assert_eq!(state.apply(&roster).len(), roster.len());
    }

    #[test]
    fn test_selection_parse() {
        assert_eq!(Selection::<Position>::parse("All").unwrap(), Selection::All);
        assert_eq!(
            Selection::<Unit>::parse("GCU").unwrap(),
            Selection::Only(Unit::Gcu)
        );
        assert_eq!(
            Selection::<OfficeLocation>::parse("Dt-7M").unwrap(),
            Selection::Only(OfficeLocation::Downtown7M)
        );
    }

    #[test]
    fn test_selection_rejects_unoffered_values() {
        let err = Selection::<Unit>::parse("COMBAT").unwrap_err();
        assert_eq!(err.field, "unit");
        assert!(Selection::<OfficeLocation>::parse("Dt-9").is_err());
        assert!(Selection::<Position>::parse("VA").is_err());
    }

    #[test]
    fn test_selection_code_round_trip() {
        let selection = Selection::Only(OfficeLocation::Independence);
        assert_eq!(selection.code(), "Indy");
        assert_eq!(
            Selection::<OfficeLocation>::parse(selection.code()).unwrap(),
            selection
        );
    }
}
