//! Portal extractors.
//!
//! External portals live under `/{portal}`. [`EnabledPortal`] resolves the
//! path segment to a configured portal, and [`RequireVerified`] additionally
//! requires that the session has passed that portal's verification gate.

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use jcpao_directory_core::{Email, Portal};

use crate::error::AppError;
use crate::models::DirectorySession;
use crate::state::AppState;

/// A portal named in the path that is enabled in configuration.
///
/// Unknown or disabled portals are a 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnabledPortal(pub Portal);

impl FromRequestParts<AppState> for EnabledPortal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(slug) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound("portal".to_string()))?;

        let portal = slug
            .parse::<Portal>()
            .map_err(|_| AppError::NotFound(format!("portal {slug}")))?;

        if state.config().gate(portal).is_none() {
            return Err(AppError::NotFound(format!("portal {slug}")));
        }

        Ok(Self(portal))
    }
}

/// Extractor that requires a verified session for the portal in the path.
///
/// Unverified visitors are redirected to the portal's verification form.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(verified: RequireVerified) -> impl IntoResponse {
///     format!("{} via {}", verified.email, verified.portal)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireVerified {
    pub portal: Portal,
    pub email: Email,
}

/// Why a gated portal request was refused.
pub enum VerificationRejection {
    /// Not verified yet; go to the verification form.
    RedirectToGate(Portal),
    /// Unknown portal or session failure.
    Error(AppError),
}

impl IntoResponse for VerificationRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToGate(portal) => {
                Redirect::to(&format!("/{}", portal.slug())).into_response()
            }
            Self::Error(err) => err.into_response(),
        }
    }
}

impl From<AppError> for VerificationRejection {
    fn from(err: AppError) -> Self {
        Self::Error(err)
    }
}

impl FromRequestParts<AppState> for RequireVerified {
    type Rejection = VerificationRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let EnabledPortal(portal) = EnabledPortal::from_request_parts(parts, state).await?;
        let session = DirectorySession::from_request_parts(parts, state).await?;

        match session.verified_email(portal).await? {
            Some(email) => Ok(Self { portal, email }),
            None => Err(VerificationRejection::RedirectToGate(portal)),
        }
    }
}
