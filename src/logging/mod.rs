//! # Logging Module
//!
//! This module provides logging utilities for copyright-sync, including:
//! - Verbose logging that can be enabled/disabled
//! - Standard info logging with color support
//! - `tracing` subscriber setup for diagnostics
//!
//! Diagnostics (`tracing` events and [`verbose_log!`]) go to stderr, info logs
//! go to stdout for better pipeline integration.
//!
//! ## Example
//!
//! ```rust
//! use copyright_sync::logging::{ColorMode, set_verbose};
//! use copyright_sync::{info_log, verbose_log};
//!
//! // Enable verbose logging
//! set_verbose();
//!
//! // Let owo-colors decide based on the terminal
//! ColorMode::Auto.apply();
//!
//! // Log a verbose message (goes to stderr)
//! verbose_log!("Scanning: {}", "scripts/run.sh");
//!
//! // Log an info message (goes to stdout)
//! info_log!("Banner rewritten in: {}", "scripts/run.sh");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, reset_output_mode, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Logs a message to stderr if verbose mode is enabled.
///
/// This macro is used for detailed logging that is only shown when verbose mode
/// is enabled via [`set_verbose`]. It uses the same format string syntax as
/// the standard [`eprintln!`] macro.
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Logs a message to stdout unless quiet mode is enabled.
///
/// It uses the same format string syntax as the standard [`println!`] macro.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Prints an info message in yellow when the terminal supports it.
///
/// Used by the [`info_log!`] macro.
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}
