#![deny(missing_docs)]
//! Shared logging utilities for the scraper workspace.
//!
//! This crate provides the `scrape_*` logging macros used across the codebase,
//! a per-thread jurisdiction context that prefixes every message, and a
//! minimal test initializer for the global logger.

use std::cell::RefCell;

#[doc(hidden)]
pub use log;

const NO_JURISDICTION: &str = "-";

thread_local! {
    /// Jurisdiction currently being scraped on this thread.
    static JURISDICTION: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Sets the jurisdiction label for the current thread.
/// Returns the previous label so callers can restore it.
pub fn set_jurisdiction(name: Option<&str>) -> Option<String> {
    JURISDICTION.with(|cell| cell.replace(name.map(str::to_string)))
}

/// Retrieves the jurisdiction label for the current thread.
/// Returns `"-"` if none has been set.
pub fn current_jurisdiction() -> String {
    JURISDICTION.with(|cell| {
        cell.borrow()
            .clone()
            .unwrap_or_else(|| NO_JURISDICTION.to_string())
    })
}

/// Scoped jurisdiction label; the previous label is restored on drop.
pub struct JurisdictionScope {
    previous: Option<String>,
}

impl JurisdictionScope {
    /// Enters `name` as the current jurisdiction for this thread.
    pub fn enter(name: &str) -> Self {
        Self {
            previous: set_jurisdiction(Some(name)),
        }
    }
}

impl Drop for JurisdictionScope {
    fn drop(&mut self) {
        set_jurisdiction(self.previous.as_deref());
    }
}

/// Logs a trace-level message prefixed with the current jurisdiction.
#[macro_export]
macro_rules! scrape_trace {
    ($($arg:tt)*) => {{
        $crate::log::trace!("[{}] {}", $crate::current_jurisdiction(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message prefixed with the current jurisdiction.
#[macro_export]
macro_rules! scrape_debug {
    ($($arg:tt)*) => {{
        $crate::log::debug!("[{}] {}", $crate::current_jurisdiction(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message prefixed with the current jurisdiction.
#[macro_export]
macro_rules! scrape_info {
    ($($arg:tt)*) => {{
        $crate::log::info!("[{}] {}", $crate::current_jurisdiction(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message prefixed with the current jurisdiction.
#[macro_export]
macro_rules! scrape_warn {
    ($($arg:tt)*) => {{
        $crate::log::warn!("[{}] {}", $crate::current_jurisdiction(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message prefixed with the current jurisdiction.
#[macro_export]
macro_rules! scrape_error {
    ($($arg:tt)*) => {{
        $crate::log::error!("[{}] {}", $crate::current_jurisdiction(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::{current_jurisdiction, set_jurisdiction, JurisdictionScope};

    #[test]
    fn scope_restores_previous_label() {
        set_jurisdiction(None);
        assert_eq!(current_jurisdiction(), "-");
        {
            let _outer = JurisdictionScope::enter("ca");
            assert_eq!(current_jurisdiction(), "ca");
            {
                let _inner = JurisdictionScope::enter("il");
                assert_eq!(current_jurisdiction(), "il");
            }
            assert_eq!(current_jurisdiction(), "ca");
        }
        assert_eq!(current_jurisdiction(), "-");
    }

    #[test]
    fn macros_expand_without_logger() {
        let _scope = JurisdictionScope::enter("in");
        scrape_debug!("value={}", 3);
        scrape_warn!("plain message");
    }
}
