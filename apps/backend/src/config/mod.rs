pub mod realtime;
pub mod session;

use crate::error::AppError;

/// Read a required environment variable, treating empty values as absent.
pub(crate) fn require_env(name: &str) -> Result<String, AppError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::config(format!("{name} must be set")))
}

/// Strip a single trailing slash so URL joins stay predictable.
pub(crate) fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::trim_base_url;

    #[test]
    fn trailing_slash_is_stripped() {
        assert_eq!(trim_base_url("https://api.example.com/"), "https://api.example.com");
        assert_eq!(trim_base_url("https://api.example.com"), "https://api.example.com");
    }
}
