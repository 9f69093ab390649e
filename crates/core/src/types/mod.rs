//! Core types for the staff directory.
//!
//! This module provides type-safe wrappers for the directory's domain concepts.

pub mod email;
pub mod employee;
pub mod location;
pub mod portal;
pub mod position;
pub mod text_array;
pub mod unit;

pub use email::{Email, EmailError};
pub use employee::{Employee, MISSING_FIELD_TEXT, PersonName, Roster};
pub use location::OfficeLocation;
pub use portal::{Portal, PortalError};
pub use position::{Position, PositionError};
pub use text_array::parse_text_array;
pub use unit::Unit;
