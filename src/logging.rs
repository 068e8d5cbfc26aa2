//! Logging abstraction layer
//!
//! Macros that forward to either the `log` or the `tracing` crate, selected at
//! compile time through the `log` (default) and `tracing` features. They are
//! mutually exclusive.
//!
//! Every macro accepts an optional subsystem prefix written as
//! `"subsystem" =>`. With `log` the subsystem is rendered as a `[subsystem]`
//! prefix on the message; with `tracing` it becomes a structured `subsystem`
//! field on the event.
//!
//! # Usage
//!
//! ```ignore
//! use hash_navigator::{debug_log, error_log};
//!
//! debug_log!("router" => "navigating to '{}'", page_id);
//! error_log!("loader" => "fetch of '{}' failed: {}", path, err);
//! debug_log!("no subsystem prefix");
//! ```

/// Trace-level logging
#[macro_export]
macro_rules! trace_log {
    ($subsystem:literal => $($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!(subsystem = $subsystem, $($arg)+);
        #[cfg(feature = "log")]
        ::log::trace!("[{}] {}", $subsystem, format_args!($($arg)+));
    };
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!($($arg)+);
        #[cfg(feature = "log")]
        ::log::trace!($($arg)+);
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! debug_log {
    ($subsystem:literal => $($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(subsystem = $subsystem, $($arg)+);
        #[cfg(feature = "log")]
        ::log::debug!("[{}] {}", $subsystem, format_args!($($arg)+));
    };
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!($($arg)+);
        #[cfg(feature = "log")]
        ::log::debug!($($arg)+);
    };
}

/// Info-level logging
#[macro_export]
macro_rules! info_log {
    ($subsystem:literal => $($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        ::tracing::info!(subsystem = $subsystem, $($arg)+);
        #[cfg(feature = "log")]
        ::log::info!("[{}] {}", $subsystem, format_args!($($arg)+));
    };
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        ::tracing::info!($($arg)+);
        #[cfg(feature = "log")]
        ::log::info!($($arg)+);
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! warn_log {
    ($subsystem:literal => $($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        ::tracing::warn!(subsystem = $subsystem, $($arg)+);
        #[cfg(feature = "log")]
        ::log::warn!("[{}] {}", $subsystem, format_args!($($arg)+));
    };
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        ::tracing::warn!($($arg)+);
        #[cfg(feature = "log")]
        ::log::warn!($($arg)+);
    };
}

/// Error-level logging
///
/// Used for every failure the router swallows: configuration mistakes,
/// fetch errors and panicking or failing callbacks.
#[macro_export]
macro_rules! error_log {
    ($subsystem:literal => $($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        ::tracing::error!(subsystem = $subsystem, $($arg)+);
        #[cfg(feature = "log")]
        ::log::error!("[{}] {}", $subsystem, format_args!($($arg)+));
    };
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        ::tracing::error!($($arg)+);
        #[cfg(feature = "log")]
        ::log::error!($($arg)+);
    };
}
