//! Services backing the route handlers.

pub mod images;
pub mod roster;

pub use images::ImageStore;
pub use roster::RosterCache;
