//! This module provides diagnostics for the adaptive kernels.
//!
//! The kernels pick between strategies (block skip vs. bulk copy, partial vs.
//! full sort) and this module makes those choices visible. The `log_metric!`
//! macro is the primary tool: it emits one structured record per call through
//! the `log` facade under the `vexcol::metrics` target, at `debug` level, so it
//! costs a level check when metrics are not being collected.

/// Target used for every metric record.
pub const METRICS_TARGET: &str = "vexcol::metrics";

/// Logs a structured key-value metric record at debug level.
///
/// # Example
/// ```
/// use vexcol::log_metric;
/// let rows = 4;
/// log_metric!("event" = "filter", "rows" = rows);
/// ```
#[macro_export]
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        if $crate::__log::log_enabled!(target: $crate::observability::METRICS_TARGET, $crate::__log::Level::Debug) {
            let mut parts: Vec<String> = Vec::new();
            $(
                parts.push(format!("{}={}", $key, $value));
            )+
            $crate::__log::debug!(target: $crate::observability::METRICS_TARGET, "{}", parts.join(" "));
        }
    };
}
