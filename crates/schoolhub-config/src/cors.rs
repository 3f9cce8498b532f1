use std::env;

const DEFAULT_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

/// Browser origins allowed to call the API with the session cookie.
///
/// Credentialed CORS cannot use a wildcard, so `*` entries are dropped, as is
/// anything that is not an `http://` or `https://` origin.
#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        let raw = env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ORIGINS.to_string());
        Self {
            allowed_origins: parse_origins(&raw),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/'))
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_origins() {
        assert_eq!(
            parse_origins(DEFAULT_ORIGINS),
            vec!["http://localhost:3000", "http://localhost:5173"]
        );
    }

    #[test]
    fn test_wildcard_and_junk_dropped() {
        let origins = parse_origins(" https://school.example/ , *, ,ftp://x, http://a:8080");
        assert_eq!(origins, vec!["https://school.example", "http://a:8080"]);
    }
}
