//! Utility functions

pub mod validation;

pub use validation::{page_params, sanitize_string, validate_status_filter};
