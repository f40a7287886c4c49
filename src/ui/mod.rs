//! User interface module - console output for the command line binary.

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_error, display_resolution, display_status,
    display_success, format_resolution,
};
