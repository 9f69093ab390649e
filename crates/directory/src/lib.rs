//! JCPAO attorney directory server library.
//!
//! The internal directory and the verified court/police portals, as a
//! library so the binary, CLI and tests share one implementation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
