use std::env;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/users";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Collection URL; item routes are `{api_url}/{id}`.
    pub api_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup("DIRECTORY_API_URL")
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self { api_url }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_service() {
        assert_eq!(Config::from_lookup(|_| None).api_url, DEFAULT_API_URL);
    }

    #[test]
    fn trailing_slash_is_dropped() {
        let config = Config::from_lookup(|_| Some("http://directory:8080/users/".into()));
        assert_eq!(config.api_url, "http://directory:8080/users");
        assert_eq!(Config::from_lookup(|_| Some("  ".into())).api_url, DEFAULT_API_URL);
    }
}
