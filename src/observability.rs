//! Logging infrastructure for rowsift.
//!
//! rowsift uses `tracing` for structured logging. All events use target
//! "rowsift" and include an `event` field for filtering.
//!
//! ## Library Integration
//!
//! rowsift never initializes a global subscriber. Applications configure
//! tracing via `tracing_subscriber` or similar.
//!
//! ## Conventions
//!
//! - `event`: snake_case event name (required)
//! - `component`: module/subsystem (e.g., "selector")
//! - Use `%` for Display, `?` for Debug formatting

/// Target for all rowsift log events.
pub(crate) const ROWSIFT_TARGET: &str = "rowsift";

/// Macro for debug-level log events.
///
/// # Example
/// ```ignore
/// log_debug!(
///     component = "selector",
///     event = "selection_finished",
///     rows_in = table.num_rows(),
///     rows_out = output.num_rows(),
/// );
/// ```
macro_rules! log_debug {
    ($($field:tt)*) => {
        ::tracing::debug!(target: $crate::observability::ROWSIFT_TARGET, $($field)*)
    };
}

/// Macro for trace-level log events.
macro_rules! log_trace {
    ($($field:tt)*) => {
        ::tracing::trace!(target: $crate::observability::ROWSIFT_TARGET, $($field)*)
    };
}

/// Macro for warn-level log events.
macro_rules! log_warn {
    ($($field:tt)*) => {
        ::tracing::warn!(target: $crate::observability::ROWSIFT_TARGET, $($field)*)
    };
}

pub(crate) use log_debug;
pub(crate) use log_trace;
pub(crate) use log_warn;
