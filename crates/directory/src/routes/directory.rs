//! Directory page rendering and the internal (ungated) directory routes.
//!
//! The same pages serve the internal directory at `/` and each verified portal
//! at `/{portal}`; [`Scope`] decides where forms post and what the header
//! shows.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use jcpao_directory_core::{
    ALL_CODE, Badge, Employee, FilterOption, FilterState, Portal, Selection, format_phone,
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::models::{DirectorySession, DirectoryView, FLASH_DISMISS_MS, Flash};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Filter form data.
///
/// Every field is optional so a partial form leaves the rest at "All".
#[derive(Debug, Default, Deserialize)]
pub struct FilterForm {
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
}

impl FilterForm {
    /// Validate the submission into a filter state.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for values outside the offered options.
    pub fn into_filters(self) -> Result<FilterState> {
        let code = |value: Option<String>| value.unwrap_or_else(|| ALL_CODE.to_string());

        Ok(FilterState {
            position: Selection::parse(&code(self.position))?,
            unit: Selection::parse(&code(self.unit))?,
            location: Selection::parse(&code(self.location))?,
            search: self.q.unwrap_or_default(),
        })
    }
}

/// View switch form data.
#[derive(Debug, Deserialize)]
pub struct ViewForm {
    pub view: String,
}

impl ViewForm {
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for an unknown view.
    pub fn into_view(self) -> Result<DirectoryView> {
        DirectoryView::ALL
            .into_iter()
            .find(|view| view.code() == self.view)
            .ok_or_else(|| AppError::BadRequest(format!("invalid view: {}", self.view)))
    }
}

// =============================================================================
// View Models
// =============================================================================

/// Where a directory page lives.
#[derive(Debug, Clone)]
pub enum Scope {
    /// Internal office directory at `/`.
    Internal,
    /// Verified external portal at `/{portal}`.
    Portal { portal: Portal, email: String },
}

impl Scope {
    /// Path prefix that forms post under.
    #[must_use]
    pub fn base_path(&self) -> String {
        match self {
            Self::Internal => String::new(),
            Self::Portal { portal, .. } => format!("/{}", portal.slug()),
        }
    }

    /// Where to go after a form post.
    #[must_use]
    pub fn home_path(&self) -> String {
        match self {
            Self::Internal => "/".to_string(),
            Self::Portal { portal, .. } => format!("/{}", portal.slug()),
        }
    }
}

/// One entry of a drop-down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub code: String,
    pub label: String,
    pub selected: bool,
}

fn select_options<T: FilterOption>(current: &Selection<T>) -> Vec<SelectOption> {
    let current = current.code();
    std::iter::once((ALL_CODE.to_string(), T::ALL_LABEL.to_string()))
        .chain(
            T::options()
                .into_iter()
                .map(|option| (option.option_code().to_owned(), option.option_label().to_owned())),
        )
        .map(|(code, label)| SelectOption {
            selected: code == current,
            code,
            label,
        })
        .collect()
}

fn view_options(current: DirectoryView) -> Vec<SelectOption> {
    DirectoryView::ALL
        .into_iter()
        .map(|view| SelectOption {
            code: view.code().to_string(),
            label: view.label().to_string(),
            selected: view == current,
        })
        .collect()
}

/// Everything the shared layout and sidebar need.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub title: String,
    /// Portal audience line, e.g. the court's name.
    pub audience: Option<String>,
    pub base_path: String,
    pub verified_email: Option<String>,
    pub views: Vec<SelectOption>,
    pub positions: Vec<SelectOption>,
    pub units: Vec<SelectOption>,
    pub locations: Vec<SelectOption>,
    pub search: String,
    pub show_search: bool,
    pub result_count: usize,
}

impl PageContext {
    fn new(
        scope: &Scope,
        filters: &FilterState,
        view: DirectoryView,
        result_count: usize,
    ) -> Self {
        let (title, audience, verified_email) = match scope {
            Scope::Internal => ("JCPAO Attorney Directory".to_string(), None, None),
            Scope::Portal { portal, email } => (
                portal.title().to_string(),
                Some(portal.audience().to_string()),
                Some(email.clone()),
            ),
        };

        Self {
            title,
            audience,
            base_path: scope.base_path(),
            verified_email,
            views: view_options(view),
            positions: select_options(&filters.position),
            units: select_options(&filters.unit),
            locations: select_options(&filters.location),
            search: filters.search.clone(),
            show_search: view == DirectoryView::Main,
            result_count,
        }
    }
}

/// A photo card in the main directory.
#[derive(Debug, Clone)]
pub struct EmployeeCard {
    pub name: String,
    pub job_title: Option<String>,
    pub photo_url: String,
    pub badge_label: String,
    pub badge_color: &'static str,
    pub location: &'static str,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl EmployeeCard {
    fn new(employee: &Employee, state: &AppState) -> Self {
        let badge = Badge::new(employee.position, &employee.assigned_units);
        let prefix = &state.config().phone_extension_prefix;

        Self {
            name: employee.name.full.clone(),
            job_title: employee.job_title.clone(),
            photo_url: state.images().photo_url(employee.photo_id.as_deref()),
            badge_label: badge.label,
            badge_color: badge.color.as_str(),
            location: employee.office_location.label(),
            email: employee.work_email.clone(),
            phone: employee
                .work_phone
                .as_deref()
                .map(|raw| format_phone(raw, prefix).to_string()),
        }
    }
}

/// A row of the contact table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRow {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Contact rows sorted by last name; phones formatted without extensions.
///
/// The sort is stable and case-sensitive, with missing last names at the end.
fn contact_rows(employees: &[&Employee], extension_prefix: &str) -> Vec<ContactRow> {
    let mut sorted = employees.to_vec();
    sorted.sort_by(|a, b| {
        (a.name.last.is_none(), &a.name.last).cmp(&(b.name.last.is_none(), &b.name.last))
    });

    sorted
        .into_iter()
        .map(|employee| ContactRow {
            name: employee.name.full.clone(),
            email: employee.work_email.clone(),
            phone: employee
                .work_phone
                .as_deref()
                .map(|raw| format_phone(raw, extension_prefix).number),
        })
        .collect()
}

// =============================================================================
// Templates
// =============================================================================

/// Main directory: photo cards.
#[derive(Template, WebTemplate)]
#[template(path = "directory/main.html")]
pub struct MainDirectoryTemplate {
    pub page: PageContext,
    pub flash: Option<Flash>,
    pub dismiss_ms: u64,
    pub cards: Vec<EmployeeCard>,
}

/// Contact directory: name / email / phone table.
#[derive(Template, WebTemplate)]
#[template(path = "directory/contacts.html")]
pub struct ContactDirectoryTemplate {
    pub page: PageContext,
    pub flash: Option<Flash>,
    pub dismiss_ms: u64,
    pub rows: Vec<ContactRow>,
}

/// Render the directory for `scope` from the session's filters and view.
///
/// Consumes any pending flash message.
///
/// # Errors
///
/// Returns an error if the roster cannot be loaded or the session fails.
pub async fn render_directory(
    state: &AppState,
    session: &DirectorySession,
    scope: &Scope,
) -> Result<Response> {
    let roster = state.roster().await?;
    let mut filters = session.filters().await?;
    let view = session.view().await?;
    let flash = session.take_flash().await?;

    // The contact table has no search box
    if view == DirectoryView::Contact && !filters.search.is_empty() {
        filters.clear_search();
        session.set_filters(&filters).await?;
    }

    let matches = filters.apply(&roster);
    let page = PageContext::new(scope, &filters, view, matches.len());

    Ok(match view {
        DirectoryView::Main => MainDirectoryTemplate {
            page,
            flash,
            dismiss_ms: FLASH_DISMISS_MS,
            cards: matches
                .iter()
                .map(|employee| EmployeeCard::new(employee, state))
                .collect(),
        }
        .into_response(),
        DirectoryView::Contact => ContactDirectoryTemplate {
            page,
            flash,
            dismiss_ms: FLASH_DISMISS_MS,
            rows: contact_rows(&matches, &state.config().phone_extension_prefix),
        }
        .into_response(),
    })
}

/// Store submitted filters and redirect back to the directory.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for unknown filter values.
pub async fn apply_filters(
    session: &DirectorySession,
    scope: &Scope,
    form: FilterForm,
) -> Result<Redirect> {
    let filters = form.into_filters()?;
    session.set_filters(&filters).await?;
    Ok(Redirect::to(&scope.home_path()))
}

/// Reset all filters and redirect back to the directory.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_filters(session: &DirectorySession, scope: &Scope) -> Result<Redirect> {
    session.set_filters(&FilterState::default()).await?;
    Ok(Redirect::to(&scope.home_path()))
}

/// Switch view and redirect back to the directory.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for an unknown view.
pub async fn switch_view(
    session: &DirectorySession,
    scope: &Scope,
    form: ViewForm,
) -> Result<Redirect> {
    let view = form.into_view()?;
    if view == DirectoryView::Contact {
        let mut filters = session.filters().await?;
        filters.clear_search();
        session.set_filters(&filters).await?;
    }
    session.set_view(view).await?;
    Ok(Redirect::to(&scope.home_path()))
}

// =============================================================================
// Internal Directory Routes
// =============================================================================

/// Internal directory page.
///
/// GET /
#[instrument(skip_all)]
pub async fn index(State(state): State<AppState>, session: DirectorySession) -> Result<Response> {
    render_directory(&state, &session, &Scope::Internal).await
}

/// POST /filters
#[instrument(skip_all)]
pub async fn update_filters(
    session: DirectorySession,
    Form(form): Form<FilterForm>,
) -> Result<Redirect> {
    apply_filters(&session, &Scope::Internal, form).await
}

/// POST /filters/reset
#[instrument(skip_all)]
pub async fn reset_filters(session: DirectorySession) -> Result<Redirect> {
    clear_filters(&session, &Scope::Internal).await
}

/// POST /view
#[instrument(skip_all)]
pub async fn select_view(
    session: DirectorySession,
    Form(form): Form<ViewForm>,
) -> Result<Redirect> {
    switch_view(&session, &Scope::Internal, form).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use jcpao_directory_core::{OfficeLocation, PersonName, Position, Unit};

    use super::*;
    use crate::state::tests::test_state;

    fn employee(full: &str, last: &str, phone: Option<&str>) -> Employee {
        Employee {
            name: PersonName {
                full: full.to_string(),
                first: None,
                middle: None,
                last: Some(last.to_string()),
                suffix: None,
                preferred: None,
            },
            position: Position::Apa,
            assigned_units: vec![Unit::Gcu],
            office_location: OfficeLocation::Downtown11,
            work_email: Some(format!("{}@jacksongov.org", last.to_lowercase())),
            work_phone: phone.map(str::to_string),
            job_title: Some("Assistant Prosecuting Attorney".to_string()),
            photo_id: None,
        }
    }

    #[test]
    fn test_filter_form_defaults_to_all() {
        let filters = FilterForm::default().into_filters().unwrap();
        assert!(filters.is_default());
    }

    #[test]
    fn test_filter_form_parses_codes() {
        let filters = FilterForm {
            position: Some("CTA".to_string()),
            unit: Some("SVU".to_string()),
            location: Some("Indy".to_string()),
            q: Some("smith".to_string()),
        }
        .into_filters()
        .unwrap();

        assert_eq!(filters.position, Selection::Only(Position::Cta));
        assert_eq!(filters.unit, Selection::Only(Unit::Svu));
        assert_eq!(filters.location, Selection::Only(OfficeLocation::Independence));
        assert_eq!(filters.search, "smith");
    }

    #[test]
    fn test_filter_form_rejects_unlisted_value() {
        let result = FilterForm {
            unit: Some("COMBAT".to_string()),
            ..FilterForm::default()
        }
        .into_filters();
        assert!(result.is_err());
    }

    #[test]
    fn test_view_form() {
        let view = ViewForm {
            view: "contact".to_string(),
        };
        assert_eq!(view.into_view().unwrap(), DirectoryView::Contact);

        let view = ViewForm {
            view: "grid".to_string(),
        };
        assert!(view.into_view().is_err());
    }

    #[test]
    fn test_select_options_marks_current() {
        let options = select_options(&Selection::Only(Position::Ttl));
        assert_eq!(options.len(), 5);
        assert_eq!(options[0].label, "All Job Positions");
        assert!(!options[0].selected);
        let selected: Vec<_> = options.iter().filter(|o| o.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].code, "TTL");
        assert_eq!(selected[0].label, "Team Trial Leaders");
    }

    #[test]
    fn test_scope_paths() {
        assert_eq!(Scope::Internal.base_path(), "");
        assert_eq!(Scope::Internal.home_path(), "/");
        let scope = Scope::Portal {
            portal: Portal::Court,
            email: "x@jacksongov.org".to_string(),
        };
        assert_eq!(scope.base_path(), "/court");
        assert_eq!(scope.home_path(), "/court");
    }

    #[test]
    fn test_contact_rows_sorted_by_last_name() {
        let zed = employee("Zed Adams", "adams", Some("8168815000"));
        let amy = employee("Amy Young", "Young", Some("123"));
        let bo = employee("Bo Baker", "Baker", None);
        let mut cher = employee("Cher", "unused", None);
        cher.name.last = None;
        let rows = contact_rows(&[&cher, &amy, &zed, &bo], "816881");

        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Bo Baker", "Amy Young", "Zed Adams", "Cher"]);
        assert_eq!(rows[0].phone, None);
        assert_eq!(rows[1].phone.as_deref(), Some("123"));
        assert_eq!(rows[2].phone.as_deref(), Some("816-881-5000"));
    }

    #[tokio::test]
    async fn test_card_formatting() {
        let state = test_state();
        let card = EmployeeCard::new(&employee("Pat Smith", "Smith", Some("8168815000")), &state);

        assert_eq!(card.badge_label, "Assistant Prosecuting Attorney - GCU");
        assert_eq!(card.badge_color, "blue");
        assert_eq!(card.location, "Downtown Courthouse, 11th floor");
        assert_eq!(card.phone.as_deref(), Some("816-881-5000 (ext. 5000)"));
        assert_eq!(card.photo_url, crate::services::images::PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_empty_result_message() {
        let page = PageContext::new(
            &Scope::Internal,
            &FilterState::default(),
            DirectoryView::Main,
            0,
        );
        let html = MainDirectoryTemplate {
            page,
            flash: None,
            dismiss_ms: FLASH_DISMISS_MS,
            cards: Vec::new(),
        }
        .render()
        .unwrap();

        assert!(html.contains("No attorneys found matching the search criteria."));
    }

    #[test]
    fn test_flash_rendered_with_dismiss_delay() {
        let page = PageContext::new(
            &Scope::Portal {
                portal: Portal::Court,
                email: "x@jacksongov.org".to_string(),
            },
            &FilterState::default(),
            DirectoryView::Contact,
            0,
        );
        let html = ContactDirectoryTemplate {
            page,
            flash: Some(Flash::success("x@jacksongov.org successfully verified.")),
            dismiss_ms: FLASH_DISMISS_MS,
            rows: Vec::new(),
        }
        .render()
        .unwrap();

        assert!(html.contains("x@jacksongov.org successfully verified."));
        assert!(html.contains("data-dismiss-ms=\"2000\""));
        assert!(html.contains("action=\"/court/filters\""));
        assert!(html.contains("JCPAO APA Directory (Courts)"));
    }
}
