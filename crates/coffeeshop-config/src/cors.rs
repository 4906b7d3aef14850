use std::env;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    /// Allowed origins; a single `*` allows any origin.
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        Self::from_origins(&env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()))
    }

    pub fn from_origins(raw: &str) -> Self {
        let allowed_origins = raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self::from_origins("*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_default() {
        assert!(CorsConfig::default().allows_any_origin());
    }

    #[test]
    fn test_origin_list_is_trimmed() {
        let config = CorsConfig::from_origins("http://localhost:8100, http://localhost:4200,,");
        assert_eq!(
            config.allowed_origins,
            vec!["http://localhost:8100", "http://localhost:4200"]
        );
        assert!(!config.allows_any_origin());
    }
}
