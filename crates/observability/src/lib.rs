//! Tracing/logging setup shared by the stockdesk binaries and tests.

/// Initialize process-wide logging with the default output format.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::from_env());
}

/// Tracing configuration (filters, output format).
pub mod tracing;
