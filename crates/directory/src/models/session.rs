//! Session-scoped directory state.
//!
//! Everything a visitor changes (filters, chosen view, portal verification,
//! pending messages) is kept in their `tower-sessions` session and reached
//! through [`DirectorySession`]. Handlers receive it as an extractor; nothing
//! is global.

use axum::{extract::FromRequestParts, http::request::Parts};
use jcpao_directory_core::{Email, FilterState, Portal, VerificationState};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::AppError;

/// How long transient messages stay on screen, in milliseconds.
pub const FLASH_DISMISS_MS: u64 = 2_000;

/// Session keys for directory data.
pub mod keys {
    use jcpao_directory_core::Portal;

    /// Key for the current filter state.
    pub const FILTERS: &str = "filters";

    /// Key for the selected directory view.
    pub const VIEW: &str = "view";

    /// Key for the pending transient message.
    pub const FLASH: &str = "flash";

    /// Key for a portal's verification state.
    #[must_use]
    pub fn verification(portal: Portal) -> String {
        format!("verification:{}", portal.slug())
    }
}

/// Which rendering of the filtered roster is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectoryView {
    /// Photo cards with badges.
    #[default]
    Main,
    /// Name, email and phone table.
    Contact,
}

impl DirectoryView {
    pub const ALL: [Self; 2] = [Self::Main, Self::Contact];

    /// Form value.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Contact => "contact",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Main => "Main Directory",
            Self::Contact => "Contact Directory",
        }
    }
}

/// Kind of transient message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    /// CSS class suffix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A message shown once on the next page render, then auto-dismissed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }
}

/// Typed access to one visitor's session.
#[derive(Debug, Clone)]
pub struct DirectorySession(Session);

impl DirectorySession {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self(session)
    }

    /// Current filters, defaulting to "All" everywhere.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub async fn filters(&self) -> Result<FilterState, AppError> {
        Ok(self.0.get(keys::FILTERS).await?.unwrap_or_default())
    }

    /// Replace the filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn set_filters(&self, filters: &FilterState) -> Result<(), AppError> {
        Ok(self.0.insert(keys::FILTERS, filters).await?)
    }

    /// Selected view, defaulting to the main directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub async fn view(&self) -> Result<DirectoryView, AppError> {
        Ok(self.0.get(keys::VIEW).await?.unwrap_or_default())
    }

    /// Select a view.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn set_view(&self, view: DirectoryView) -> Result<(), AppError> {
        Ok(self.0.insert(keys::VIEW, view).await?)
    }

    /// Verification state for `portal`.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub async fn verification(&self, portal: Portal) -> Result<VerificationState, AppError> {
        Ok(self
            .0
            .get(&keys::verification(portal))
            .await?
            .unwrap_or_default())
    }

    /// Store the verification state for `portal`.
    ///
    /// The session id is cycled when a portal becomes verified so a
    /// pre-verification cookie cannot be reused.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn set_verification(
        &self,
        portal: Portal,
        state: &VerificationState,
    ) -> Result<(), AppError> {
        if state.is_verified() {
            self.0.cycle_id().await?;
        }
        Ok(self.0.insert(&keys::verification(portal), state).await?)
    }

    /// Verified email for `portal`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub async fn verified_email(&self, portal: Portal) -> Result<Option<Email>, AppError> {
        Ok(self.verification(portal).await?.verified_email().cloned())
    }

    /// Queue a message for the next render.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn set_flash(&self, flash: Flash) -> Result<(), AppError> {
        Ok(self.0.insert(keys::FLASH, flash).await?)
    }

    /// Remove and return the pending message.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be modified.
    pub async fn take_flash(&self) -> Result<Option<Flash>, AppError> {
        Ok(self.0.remove(keys::FLASH).await?)
    }

    /// Clear everything: filters, view, verification and messages.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be deleted.
    pub async fn logout(&self) -> Result<(), AppError> {
        Ok(self.0.flush().await?)
    }
}

impl<S> FromRequestParts<S> for DirectorySession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(Self)
            .ok_or_else(|| AppError::Internal("session layer not installed".to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use jcpao_directory_core::{Position, Selection};
    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> DirectorySession {
        DirectorySession::new(Session::new(None, Arc::new(MemoryStore::default()), None))
    }

    #[tokio::test]
    async fn test_defaults() {
        let session = session();
        assert_eq!(session.filters().await.unwrap(), FilterState::default());
        assert_eq!(session.view().await.unwrap(), DirectoryView::Main);
        assert_eq!(
            session.verification(Portal::Court).await.unwrap(),
            VerificationState::Unverified
        );
        assert!(session.take_flash().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_filters_round_trip() {
        let session = session();
        let filters = FilterState {
            position: Selection::Only(Position::Cta),
            search: "smith".to_string(),
            ..FilterState::default()
        };

        session.set_filters(&filters).await.unwrap();
        assert_eq!(session.filters().await.unwrap(), filters);
    }

    #[tokio::test]
    async fn test_flash_is_taken_once() {
        let session = session();
        session.set_flash(Flash::error("nope")).await.unwrap();

        assert_eq!(
            session.take_flash().await.unwrap(),
            Some(Flash::error("nope"))
        );
        assert!(session.take_flash().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_verification_is_per_portal() {
        let session = session();
        let verified = VerificationState::Verified {
            email: Email::parse("x@jacksongov.org").unwrap(),
        };

        session
            .set_verification(Portal::Court, &verified)
            .await
            .unwrap();

        assert!(session.verification(Portal::Court).await.unwrap().is_verified());
        assert!(!session.verification(Portal::Police).await.unwrap().is_verified());
        assert_eq!(
            session.verified_email(Portal::Court).await.unwrap().unwrap().as_str(),
            "x@jacksongov.org"
        );
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let session = session();
        session
            .set_verification(
                Portal::Court,
                &VerificationState::Verified {
                    email: Email::parse("x@jacksongov.org").unwrap(),
                },
            )
            .await
            .unwrap();
        session.set_view(DirectoryView::Contact).await.unwrap();

        session.logout().await.unwrap();

        assert_eq!(
            session.verification(Portal::Court).await.unwrap(),
            VerificationState::Unverified
        );
        assert_eq!(session.view().await.unwrap(), DirectoryView::Main);
    }
}
