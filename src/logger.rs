//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro, only printed with `--verbose`
//!
//! `error` and `warning` lines go to stderr, everything else to stdout.
//!
//! # Example
//!
//! ```ignore
//! log!("check"; "validating {} entries", count);
//! log!("error"; "could not find active nav link element");
//! ```

use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use std::io::{Write, stderr, stdout};
use std::sync::atomic::{AtomicBool, Ordering};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();

    if captured(&module_lower, message) {
        return;
    }

    let prefix = colorize_prefix(module, &module_lower);

    if is_diagnostic(&module_lower) {
        let mut stderr = stderr().lock();
        writeln!(stderr, "{prefix} {message}").ok();
        stderr.flush().ok();
        return;
    }

    let mut stdout = stdout().lock();
    execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

#[cfg(test)]
#[inline]
fn captured(module_lower: &str, message: &str) -> bool {
    capture::record(module_lower, message)
}

#[cfg(not(test))]
#[inline]
fn captured(_module_lower: &str, _message: &str) -> bool {
    false
}

#[inline]
fn is_diagnostic(module_lower: &str) -> bool {
    matches!(module_lower, "error" | "warning")
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "check" => prefix.bright_blue().bold().to_string(),
        "nav" | "theme" => prefix.bright_green().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// Test Capture
// ============================================================================

/// Per-thread log capture so tests can assert on emitted diagnostics.
#[cfg(test)]
pub mod capture {
    use std::cell::RefCell;

    thread_local! {
        static LINES: RefCell<Option<Vec<(String, String)>>> = const { RefCell::new(None) };
    }

    /// Run `f`, returning its result and every `(module, message)` logged
    /// on this thread meanwhile.
    pub fn capture<R>(f: impl FnOnce() -> R) -> (R, Vec<(String, String)>) {
        LINES.with(|lines| *lines.borrow_mut() = Some(Vec::new()));
        let result = f();
        let lines = LINES.with(|lines| lines.borrow_mut().take()).unwrap_or_default();
        (result, lines)
    }

    pub(super) fn record(module: &str, message: &str) -> bool {
        LINES.with(|lines| match lines.borrow_mut().as_mut() {
            Some(lines) => {
                lines.push((module.to_string(), message.to_string()));
                true
            }
            None => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_records_module_and_message() {
        let ((), lines) = capture::capture(|| {
            crate::log!("Check"; "validating {} entries", 3);
            crate::log!("error"; "boom");
        });
        assert_eq!(
            lines,
            vec![
                ("check".to_string(), "validating 3 entries".to_string()),
                ("error".to_string(), "boom".to_string()),
            ]
        );
    }

    #[test]
    fn test_diagnostic_modules() {
        assert!(is_diagnostic("error"));
        assert!(is_diagnostic("warning"));
        assert!(!is_diagnostic("check"));
    }

    #[test]
    fn test_prefix_contains_module() {
        assert!(colorize_prefix("nav", "nav").contains("[nav]"));
        assert!(colorize_prefix("error", "error").contains("[error]"));
    }
}
