//! Library crate for the interest tracker.
//!
//! The interesting part lives in [`db`]: a small storage engine over SQLite
//! that records interest entries, resolves tag names to rows (creating them
//! lazily), and reads everything back with tags aggregated. [`effort`] and
//! [`tags`] are the input-side collaborators the CLI feeds it with.

pub mod db;
pub mod effort;
pub mod models;
pub mod tags;
