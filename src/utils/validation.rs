//! Input validation utilities

use crate::constants::{self, MAX_PAGE_SIZE};

/// Validate a competition status filter
pub fn validate_status_filter(status: &str) -> Result<(), &'static str> {
    if constants::competition_status::ALL.contains(&status) {
        Ok(())
    } else {
        Err("Status must be one of: upcoming, ongoing, ended")
    }
}

/// Sanitize string input (remove control characters, trim whitespace)
pub fn sanitize_string(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Resolve page and page size query parameters.
///
/// Pages start at 1; the size falls back to `default_per_page` and is capped
/// at `MAX_PAGE_SIZE`.
pub fn page_params(page: Option<u32>, per_page: Option<u32>, default_per_page: u32) -> (u32, u32) {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page
        .unwrap_or(default_per_page)
        .clamp(1, MAX_PAGE_SIZE);
    (page, per_page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_status_filter() {
        assert!(validate_status_filter("upcoming").is_ok());
        assert!(validate_status_filter("ongoing").is_ok());
        assert!(validate_status_filter("ended").is_ok());
        assert!(validate_status_filter("finished").is_err());
        assert!(validate_status_filter("").is_err());
    }

    #[test]
    fn test_sanitize_string() {
        assert_eq!(sanitize_string("  hello  "), "hello");
        assert_eq!(sanitize_string("hello\x00world"), "helloworld");
        assert_eq!(sanitize_string("line1\nline2"), "line1\nline2");
    }

    #[test]
    fn test_page_params() {
        assert_eq!(page_params(None, None, 20), (1, 20));
        assert_eq!(page_params(Some(0), Some(0), 20), (1, 1));
        assert_eq!(page_params(Some(3), Some(500), 50), (3, MAX_PAGE_SIZE));
    }
}
