//! External portal routes: verification gate and the gated directory.
//!
//! `/{portal}` shows the verification form until the session passes the
//! portal's gate, then the same directory as the internal view. Every
//! filter/view route under the portal requires verification.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use jcpao_directory_core::{AccessLogSink, AttemptOutcome, Portal, VerificationGate};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{ClientIp, EnabledPortal, RequireVerified};
use crate::models::{DirectorySession, FLASH_DISMISS_MS, Flash};
use crate::routes::directory::{
    FilterForm, Scope, ViewForm, apply_filters, clear_filters, render_directory, switch_view,
};
use crate::state::AppState;

/// Shown when the email domain or the code is wrong. Never says which.
pub const VERIFY_FAILED_MESSAGE: &str =
    "Failed to verify user. Please try again with an authorized email and security code.";

/// Shown when the access log write fails.
pub const ACCESS_LOG_FAILED_MESSAGE: &str = "An error has occurred.";

// =============================================================================
// Form Types
// =============================================================================

/// Verification form data.
///
/// No `Debug`: the code must never reach the logs.
#[derive(Deserialize)]
pub struct VerifyForm {
    pub email: String,
    pub code: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Verification form page.
#[derive(Template, WebTemplate)]
#[template(path = "portal/verify.html")]
pub struct VerifyTemplate {
    pub title: &'static str,
    pub audience: &'static str,
    pub action: String,
    pub flash: Option<Flash>,
    pub dismiss_ms: u64,
}

impl VerifyTemplate {
    fn new(portal: Portal, flash: Option<Flash>) -> Self {
        Self {
            title: portal.title(),
            audience: portal.audience(),
            action: format!("/{}/verify", portal.slug()),
            flash,
            dismiss_ms: FLASH_DISMISS_MS,
        }
    }
}

fn portal_home(portal: Portal) -> Redirect {
    Redirect::to(&format!("/{}", portal.slug()))
}

fn portal_scope(verified: &RequireVerified) -> Scope {
    Scope::Portal {
        portal: verified.portal,
        email: verified.email.to_string(),
    }
}

// =============================================================================
// Routes
// =============================================================================

/// Verification form, or the directory once verified.
///
/// GET /{portal}
#[instrument(skip_all, fields(portal = %portal))]
pub async fn home(
    State(state): State<AppState>,
    EnabledPortal(portal): EnabledPortal,
    session: DirectorySession,
) -> Result<Response> {
    if let Some(email) = session.verified_email(portal).await? {
        let scope = Scope::Portal {
            portal,
            email: email.to_string(),
        };
        return render_directory(&state, &session, &scope).await;
    }

    let flash = session.take_flash().await?;
    Ok(VerifyTemplate::new(portal, flash).into_response())
}

/// Handle a verification attempt.
///
/// POST /{portal}/verify
///
/// Both outcomes redirect back to `/{portal}` with a flash message. A failed
/// access log write is reported but does not undo the verification.
#[instrument(skip_all, fields(portal = %portal, ip = %ip))]
pub async fn verify(
    State(state): State<AppState>,
    EnabledPortal(portal): EnabledPortal,
    ClientIp(ip): ClientIp,
    session: DirectorySession,
    Form(form): Form<VerifyForm>,
) -> Result<Redirect> {
    let gate = state
        .config()
        .gate(portal)
        .ok_or_else(|| AppError::NotFound(format!("portal {portal}")))?;

    record_attempt(&session, gate, &state.access_log(), &form, &ip).await?;

    Ok(portal_home(portal))
}

/// Run one attempt against `gate`, logging to `sink`, and store the result.
async fn record_attempt<S>(
    session: &DirectorySession,
    gate: &VerificationGate,
    sink: &S,
    form: &VerifyForm,
    ip: &str,
) -> Result<()>
where
    S: AccessLogSink + Sync,
{
    let portal = gate.portal();
    let mut verification = session.verification(portal).await?;

    let flash = match verification
        .attempt(gate, sink, form.email.trim(), &form.code, ip)
        .await
    {
        AttemptOutcome::Verified(email) => {
            set_sentry_user(email.as_str());
            Flash::success(format!("{email} successfully verified."))
        }
        AttemptOutcome::VerifiedUnlogged { email, error } => {
            set_sentry_user(email.as_str());
            let event_id = sentry::capture_error(&error);
            tracing::error!(
                error = %error,
                sentry_event_id = %event_id,
                "Failed to write access log"
            );
            Flash::error(ACCESS_LOG_FAILED_MESSAGE)
        }
        AttemptOutcome::Rejected => Flash::error(VERIFY_FAILED_MESSAGE),
        AttemptOutcome::AlreadyVerified => return Ok(()),
    };

    if verification.is_verified() {
        session.set_verification(portal, &verification).await?;
    }
    session.set_flash(flash).await
}

/// Clear the whole session and return to the verification form.
///
/// POST /{portal}/logout
#[instrument(skip_all, fields(portal = %portal))]
pub async fn logout(
    EnabledPortal(portal): EnabledPortal,
    session: DirectorySession,
) -> Result<Redirect> {
    session.logout().await?;
    clear_sentry_user();
    tracing::info!("Portal session cleared");
    Ok(portal_home(portal))
}

/// POST /{portal}/filters
#[instrument(skip_all, fields(portal = %verified.portal))]
pub async fn update_filters(
    verified: RequireVerified,
    session: DirectorySession,
    Form(form): Form<FilterForm>,
) -> Result<Redirect> {
    apply_filters(&session, &portal_scope(&verified), form).await
}

/// POST /{portal}/filters/reset
#[instrument(skip_all, fields(portal = %verified.portal))]
pub async fn reset_filters(
    verified: RequireVerified,
    session: DirectorySession,
) -> Result<Redirect> {
    clear_filters(&session, &portal_scope(&verified)).await
}

/// POST /{portal}/view
#[instrument(skip_all, fields(portal = %verified.portal))]
pub async fn select_view(
    verified: RequireVerified,
    session: DirectorySession,
    Form(form): Form<ViewForm>,
) -> Result<Redirect> {
    switch_view(&session, &portal_scope(&verified), form).await
}
