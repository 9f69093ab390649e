//! Session-backed models for the directory server.

pub mod session;

pub use session::{DirectorySession, DirectoryView, FLASH_DISMISS_MS, Flash, FlashKind, keys};
