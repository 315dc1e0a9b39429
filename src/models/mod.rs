//! Domain models for the interest tracker.
//!
//! - [`Interest`]: one logged unit of work with a description and an effort
//!   duration. Written once, never updated.
//! - [`Tag`]: a short label categorizing interests, unique by name.
//!
//! Interests and tags form a many-to-many relation through the
//! `interests_tags` link table; the link carries no data of its own and has
//! no model type.

mod interest;
mod tag;

pub use interest::*;
pub use tag::*;
