//! Logging utilities for http-errors
//!
//! Re-exports tracing macros with log_* naming convention for consistency.
//! The library never installs a subscriber; the host application owns that.

// Re-export tracing macros with log_* naming
pub use tracing::{debug as log_debug, error as log_error, warn as log_warn};
