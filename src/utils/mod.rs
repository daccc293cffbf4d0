//! Shared helpers with no knowledge of the site layout.

pub mod date;
pub mod html;
pub mod path;
pub mod plural;

pub use plural::{plural_count, plural_s};
