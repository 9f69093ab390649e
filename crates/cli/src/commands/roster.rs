//! Roster export command.
//!
//! # Usage
//!
//! ```bash
//! jcpao-cli roster --position APA --unit GCU
//! jcpao-cli roster --location Indy --search smith > indy.tsv
//! ```
//!
//! Filters take the same codes as the directory sidebar (`All` by default).
//! Output is one tab-separated line per attorney: name, badge, location,
//! phone.

use clap::Args;
use jcpao_directory::db::EmployeeRepository;
use jcpao_directory_core::{
    ALL_CODE, Badge, DEFAULT_EXTENSION_PREFIX, Employee, FilterState, Roster, Selection,
    format_phone,
};

use super::{CommandError, connect};

/// Filters for `jcpao-cli roster`.
#[derive(Debug, Args)]
pub struct RosterArgs {
    /// Position code (Exec, CTA, TTL, APA)
    #[arg(long, default_value = ALL_CODE)]
    pub position: String,

    /// Unit code (Exec, GCU, SVU, VCU, CSU, Drug, FSD)
    #[arg(long, default_value = ALL_CODE)]
    pub unit: String,

    /// Office location code (Dt-11, Dt-10, Dt-7M, Indy, FSD)
    #[arg(long, default_value = ALL_CODE)]
    pub location: String,

    /// Case-insensitive name search
    #[arg(long, default_value = "")]
    pub search: String,

    /// Office exchange prefix for extensions
    #[arg(
        long,
        env = "DIRECTORY_PHONE_EXTENSION_PREFIX",
        default_value = DEFAULT_EXTENSION_PREFIX
    )]
    pub extension_prefix: String,
}

impl RosterArgs {
    fn filters(&self) -> Result<FilterState, CommandError> {
        Ok(FilterState {
            position: Selection::parse(&self.position)?,
            unit: Selection::parse(&self.unit)?,
            location: Selection::parse(&self.location)?,
            search: self.search.clone(),
        })
    }
}

/// Load the roster, filter it, and print it.
///
/// # Errors
///
/// Returns an error for unknown filter codes or if the roster cannot be loaded.
pub async fn run(args: &RosterArgs) -> Result<(), CommandError> {
    // Validate before connecting
    let filters = args.filters()?;

    let pool = connect().await?;
    let roster = EmployeeRepository::new(&pool).list_directory().await?;

    let lines = render(&roster, &filters, &args.extension_prefix);
    tracing::info!(matched = lines.len(), total = roster.len(), "Roster filtered");

    #[allow(clippy::print_stdout)]
    {
        for line in &lines {
            println!("{line}");
        }
    }
    Ok(())
}

/// Tab-separated lines for the employees matching `filters`.
fn render(roster: &Roster, filters: &FilterState, extension_prefix: &str) -> Vec<String> {
    filters
        .apply(roster)
        .into_iter()
        .map(|employee| line(employee, extension_prefix))
        .collect()
}

fn line(employee: &Employee, extension_prefix: &str) -> String {
    let badge = Badge::new(employee.position, &employee.assigned_units);
    let phone = employee
        .work_phone
        .as_deref()
        .map(|raw| format_phone(raw, extension_prefix).to_string())
        .unwrap_or_default();

    format!(
        "{}\t{}\t{}\t{}",
        employee.name.full,
        badge.label,
        employee.office_location.label(),
        phone
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use jcpao_directory_core::{OfficeLocation, PersonName, Position, Unit};

    use super::*;

    fn args(position: &str, unit: &str) -> RosterArgs {
        RosterArgs {
            position: position.to_string(),
            unit: unit.to_string(),
            location: ALL_CODE.to_string(),
            search: String::new(),
            extension_prefix: DEFAULT_EXTENSION_PREFIX.to_string(),
        }
    }

    fn employee(full: &str, position: Position, units: Vec<Unit>) -> Employee {
        Employee {
            name: PersonName {
                full: full.to_string(),
                first: None,
                middle: None,
                last: None,
                suffix: None,
                preferred: None,
            },
            position,
            assigned_units: units,
            office_location: OfficeLocation::Independence,
            work_email: None,
            work_phone: Some("8168815123".to_string()),
            job_title: None,
            photo_id: None,
        }
    }

    #[test]
    fn test_filters_from_args() {
        let filters = args("CTA", "Drug").filters().unwrap();
        assert_eq!(filters.position, Selection::Only(Position::Cta));
        assert_eq!(filters.unit, Selection::Only(Unit::Drug));
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert!(matches!(
            args("Intern", ALL_CODE).filters(),
            Err(CommandError::Selection(_))
        ));
    }

    #[test]
    fn test_render_lines() {
        let roster = Roster::new(vec![
            employee("Dana Cole", Position::Apa, vec![Unit::Gcu]),
            employee("Lee Park", Position::Exec, vec![]),
        ]);
        let filters = args("APA", ALL_CODE).filters().unwrap();

        let lines = render(&roster, &filters, DEFAULT_EXTENSION_PREFIX);
        assert_eq!(
            lines,
            vec![
                "Dana Cole\tAssistant Prosecuting Attorney - GCU\t\
                 Eastern Jackson Courthouse, Independence\t816-881-5123 (ext. 5123)"
            ]
        );
    }
}
