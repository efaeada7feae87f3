//! Base URL normalization.
//!
//! Normalization runs before the cache key is computed, so equivalent spellings
//! of the same instance share one cache entry.

use crate::client::error::FetchError;

/// Normalize a caller-supplied base URL.
///
/// Trims whitespace, prepends `https://` when no scheme is present, and strips
/// a single trailing slash.
pub fn normalize_base_url(raw: &str) -> Result<String, FetchError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FetchError::InvalidBaseUrl("base URL is empty".to_string()));
    }

    let mut normalized = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    if normalized.ends_with('/') {
        normalized.pop();
    }

    let parsed = url::Url::parse(&normalized)
        .map_err(|e| FetchError::InvalidBaseUrl(format!("'{}': {}", raw.trim(), e)))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(FetchError::InvalidBaseUrl(format!(
                "unsupported scheme '{}'",
                other
            )))
        }
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(FetchError::InvalidBaseUrl(format!("'{}' has no host", raw.trim())));
    }

    Ok(normalized)
}

/// Join a normalized base and an endpoint path.
///
/// This is both the request target and the cache key.
pub fn target_url(normalized_base: &str, endpoint: &str) -> String {
    format!("{}{}", normalized_base, endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equivalent_spellings_normalize_identically() {
        let a = normalize_base_url("school.instructure.com/").unwrap();
        let b = normalize_base_url("https://school.instructure.com").unwrap();
        let c = normalize_base_url("https://school.instructure.com/").unwrap();
        assert_eq!(a, "https://school.instructure.com");
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(
            target_url(&a, "/api/v1/users/self"),
            target_url(&c, "/api/v1/users/self")
        );
    }

    #[test]
    fn test_whitespace_and_scheme_kept() {
        assert_eq!(
            normalize_base_url("  http://localhost:8080/ ").unwrap(),
            "http://localhost:8080"
        );
    }

    #[test]
    fn test_only_one_trailing_slash_stripped() {
        assert_eq!(
            normalize_base_url("https://example.com//").unwrap(),
            "https://example.com/"
        );
    }

    #[test]
    fn test_rejects_empty_and_bad_scheme() {
        assert!(matches!(
            normalize_base_url("   "),
            Err(FetchError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            normalize_base_url("ftp://example.com"),
            Err(FetchError::InvalidBaseUrl(_))
        ));
    }
}
