//! Command-line interface module.

mod args;
pub mod check;
mod common;
pub mod highlight;
pub mod theme;

pub use args::{CheckArgs, Cli, Commands, CommonArgs, HighlightArgs, ThemeArgs};
