//! Email + shared code verification gate for external portals.
//!
//! A session starts [`VerificationState::Unverified`]. A successful
//! [`VerificationState::attempt`] writes one access log entry and moves the
//! session to [`VerificationState::Verified`], where it stays until logout.
//! Failed attempts change nothing and may be retried without limit.

use core::fmt;
use std::future::Future;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::types::{Email, Portal};

/// One successful verification, as written to the portal's access log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessLogEntry {
    pub portal: Portal,
    pub email: Email,
    pub ip: String,
}

/// Append-only store for access log entries.
pub trait AccessLogSink {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Append `entry` to the log.
    fn append(
        &self,
        entry: &AccessLogEntry,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// The accept rule for one portal: authorized domains plus the shared code.
#[derive(Clone)]
pub struct VerificationGate {
    portal: Portal,
    allowed_domains: Vec<String>,
    code: SecretString,
}

impl fmt::Debug for VerificationGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationGate")
            .field("portal", &self.portal)
            .field("allowed_domains", &self.allowed_domains)
            .field("code", &"[REDACTED]")
            .finish()
    }
}

impl VerificationGate {
    #[must_use]
    pub const fn new(portal: Portal, allowed_domains: Vec<String>, code: SecretString) -> Self {
        Self {
            portal,
            allowed_domains,
            code,
        }
    }

    #[must_use]
    pub const fn portal(&self) -> Portal {
        self.portal
    }

    #[must_use]
    pub fn allowed_domains(&self) -> &[String] {
        &self.allowed_domains
    }

    /// Whether `email` contains one of the allowed domain markers.
    ///
    /// This is a substring test, not a suffix match: it accepts
    /// `a@courts.mo.gov.example.net`. Kept as-is until the office signs off on
    /// tightening it.
    #[must_use]
    pub fn domain_allowed(&self, email: &str) -> bool {
        self.allowed_domains
            .iter()
            .any(|domain| email.contains(domain.as_str()))
    }

    /// Validate a submission, returning the parsed email on success.
    ///
    /// Callers must not reveal which part failed.
    #[must_use]
    pub fn check(&self, email: &str, code: &str) -> Option<Email> {
        if !self.domain_allowed(email) || code != self.code.expose_secret() {
            return None;
        }
        Email::parse(email).ok()
    }
}

/// Result of a verification attempt.
#[derive(Debug)]
pub enum AttemptOutcome<E> {
    /// Accepted and logged.
    Verified(Email),
    /// Accepted, but the access log write failed. The session is verified
    /// regardless.
    VerifiedUnlogged { email: Email, error: E },
    /// Wrong domain or wrong code.
    Rejected,
    /// The session was already verified; nothing was written.
    AlreadyVerified,
}

/// Per-session verification state for one portal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationState {
    #[default]
    Unverified,
    Verified { email: Email },
}

impl VerificationState {
    #[must_use]
    pub const fn is_verified(&self) -> bool {
        matches!(self, Self::Verified { .. })
    }

    #[must_use]
    pub const fn verified_email(&self) -> Option<&Email> {
        match self {
            Self::Verified { email } => Some(email),
            Self::Unverified => None,
        }
    }

    /// Back to `Unverified`, forgetting the email.
    pub fn reset(&mut self) {
        *self = Self::Unverified;
    }

    /// Try to verify with `email` and `code`, logging the access on success.
    pub async fn attempt<S>(
        &mut self,
        gate: &VerificationGate,
        sink: &S,
        email: &str,
        code: &str,
        ip: &str,
    ) -> AttemptOutcome<S::Error>
    where
        S: AccessLogSink + Sync,
    {
        if self.is_verified() {
            return AttemptOutcome::AlreadyVerified;
        }

        let Some(email) = gate.check(email, code) else {
            tracing::info!(portal = %gate.portal(), "verification rejected");
            return AttemptOutcome::Rejected;
        };

        let entry = AccessLogEntry {
            portal: gate.portal(),
            email: email.clone(),
            ip: ip.to_owned(),
        };
        let logged = sink.append(&entry).await;

        // Full addresses go to the access log only.
        tracing::info!(portal = %gate.portal(), domain = email.domain(), "verification accepted");
        *self = Self::Verified {
            email: email.clone(),
        };

        match logged {
            Ok(()) => AttemptOutcome::Verified(email),
            Err(error) => AttemptOutcome::VerifiedUnlogged { email, error },
        }
    }
}
