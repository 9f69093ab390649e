//! JCPAO Directory Core - Domain types and pure directory logic.
//!
//! This crate provides the pieces of the staff directory that do not touch
//! the network. It is shared by:
//! - `directory` - Internal and court-facing web server
//! - `cli` - Command-line tools for migrations and roster inspection
//!
//! # Architecture
//!
//! The core crate contains only types, traits and pure functions - no database
//! access, no HTTP. The access log is reached through the [`AccessLogSink`]
//! trait so the verification gate can be driven by any store.
//!
//! # Modules
//!
//! - [`types`] - Employee records, enumerations, emails, portals
//! - [`filter`] - Roster filter engine
//! - [`display`] - Badge, location and phone formatting
//! - [`verification`] - Email + shared code verification gate

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod display;
pub mod filter;
pub mod types;
pub mod verification;

pub use display::{Badge, BadgeColor, DEFAULT_EXTENSION_PREFIX, FormattedPhone, format_phone};
pub use filter::{ALL_CODE, FilterOption, FilterState, Selection, SelectionError};
pub use types::*;
pub use verification::{
    AccessLogEntry, AccessLogSink, AttemptOutcome, VerificationGate, VerificationState,
};
