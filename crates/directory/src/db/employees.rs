//! Roster repository.
//!
//! Reads `employee_info_view`, whose column names carry spaces and whose enum
//! and array columns are cast to text so they can be validated here.

use sqlx::PgPool;
use thiserror::Error;
use tracing::instrument;

use jcpao_directory_core::{
    Employee, OfficeLocation, PersonName, Position, PositionError, Roster, Unit, parse_text_array,
};

use super::RepositoryError;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Raw roster row as returned by `PostgreSQL`.
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub(crate) struct EmployeeRow {
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub suffix: Option<String>,
    pub preferred_name: Option<String>,
    pub position: Option<String>,
    pub assigned_unit: Option<String>,
    pub office_location: Option<String>,
    pub work_email: Option<String>,
    pub work_phone: Option<String>,
    pub job_title: Option<String>,
    pub photo_id: Option<String>,
}

/// Why a roster row could not become an [`Employee`].
#[derive(Debug, Error)]
pub(crate) enum RowError {
    #[error("row has no full name")]
    MissingFullName,
    #[error("row has no position")]
    MissingPosition,
    #[error(transparent)]
    Position(#[from] PositionError),
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = RowError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let full = row
            .full_name
            .filter(|name| !name.trim().is_empty())
            .ok_or(RowError::MissingFullName)?;
        let position = row
            .position
            .ok_or(RowError::MissingPosition)?
            .parse::<Position>()?;

        Ok(Self {
            name: PersonName {
                full,
                first: row.first_name,
                middle: row.middle_name,
                last: row.last_name,
                suffix: row.suffix,
                preferred: row.preferred_name,
            },
            position,
            assigned_units: parse_text_array(row.assigned_unit.as_deref())
                .iter()
                .map(|code| Unit::from_code(code))
                .collect(),
            office_location: OfficeLocation::from_code(row.office_location.as_deref()),
            work_email: row.work_email,
            work_phone: row.work_phone,
            job_title: row.job_title,
            photo_id: row.photo_id.filter(|id| !id.is_empty()),
        })
    }
}

/// Convert rows into a roster, skipping rows that fail validation.
pub(crate) fn rows_to_roster(rows: Vec<EmployeeRow>) -> Roster {
    let employees = rows
        .into_iter()
        .filter_map(|row| {
            let full_name = row.full_name.clone();
            Employee::try_from(row)
                .map_err(|e| {
                    tracing::warn!(full_name = ?full_name, error = %e, "Skipping invalid roster row");
                })
                .ok()
        })
        .collect();
    Roster::new(employees)
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for roster reads.
pub struct EmployeeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EmployeeRepository<'a> {
    /// Create a new employee repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Load every attorney in the directory, ordered by last name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_directory(&self) -> Result<Roster, RepositoryError> {
        let positions: Vec<String> = Position::ALL
            .iter()
            .map(|p| p.code().to_owned())
            .collect();

        let rows = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT "Full Name" AS full_name,
                   "First Name" AS first_name,
                   "Middle Name" AS middle_name,
                   "Last Name" AS last_name,
                   "Suffix" AS suffix,
                   "Preferred Name" AS preferred_name,
                   "Position"::text AS position,
                   "Assigned Unit"::text AS assigned_unit,
                   "Office Location"::text AS office_location,
                   "Work Email Address" AS work_email,
                   "Work Phone #"::text AS work_phone,
                   "Job Title" AS job_title,
                   "PhotoID" AS photo_id
            FROM employee_info_view
            WHERE "Position"::text = ANY($1)
            ORDER BY "Last Name"
            "#,
        )
        .bind(positions)
        .fetch_all(self.pool)
        .await?;

        let fetched = rows.len();
        let roster = rows_to_roster(rows);
        tracing::info!(fetched, loaded = roster.len(), "Roster loaded");
        Ok(roster)
    }
}
