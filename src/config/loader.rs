//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::SiteConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<SiteConfig, ConfigError> {
    let config: SiteConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;

    tracing::debug!(
        path = %path.display(),
        routes = config.routes.len(),
        "Site configuration loaded"
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_yields_stock_site() {
        let config = parse_config("").unwrap();
        assert_eq!(config.default_route, "home");
        assert_eq!(config.routes.len(), 8);
        assert_eq!(config.error_message, "Không thể tải nội dung");
    }

    #[test]
    fn test_routes_replace_defaults() {
        let config = parse_config(
            r#"
            site_name = "Example"
            error_message = "Page unavailable"

            [fetch]
            base_url = "http://127.0.0.1:9000/"

            [[routes]]
            name = "home"
            path = "pages/home.html"

            [[routes]]
            name = "about"
            path = "pages/about.html"
            "#,
        )
        .unwrap();

        assert_eq!(config.site_name, "Example");
        assert_eq!(config.error_message, "Page unavailable");
        assert_eq!(config.error_heading, "Đã có lỗi");
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.routes[1].name, "about");
        assert_eq!(config.fetch.timeout_secs, 30);
    }

    #[test]
    fn test_validation_errors_are_reported() {
        let err = parse_config(
            r#"
            [[routes]]
            name = "about"
            path = "pages/about.html"
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("home"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "site_name = \"From Disk\"").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.site_name, "From Disk");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/site-router.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
