//! Endpoint URL construction.
//!
//! Backend roots come from config or the command line and arrive with or
//! without trailing slashes; endpoints are joined without ever producing
//! a double slash.

/// Strip trailing slashes from a configured backend root.
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Join a backend root and an endpoint path.
///
/// ```
/// use duobot::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("http://localhost:5000/", "api/chat"),
///     "http://localhost:5000/api/chat"
/// );
/// assert_eq!(
///     construct_api_url("http://qa.internal:5000", "/api/health"),
///     "http://qa.internal:5000/api/health"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let endpoint = endpoint.trim_start_matches('/');
    format!("{normalized_base}/{endpoint}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_stripped() {
        assert_eq!(normalize_base_url("http://localhost:5000"), "http://localhost:5000");
        assert_eq!(normalize_base_url("http://localhost:5000/"), "http://localhost:5000");
        assert_eq!(normalize_base_url("http://localhost:5000///"), "http://localhost:5000");
    }

    #[test]
    fn joins_never_double_the_slash() {
        for base in ["http://localhost:5000", "http://localhost:5000/"] {
            for endpoint in ["api/chat", "/api/chat"] {
                assert_eq!(
                    construct_api_url(base, endpoint),
                    "http://localhost:5000/api/chat"
                );
            }
        }
    }
}
