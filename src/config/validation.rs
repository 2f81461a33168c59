use crate::config::types::{CheckConfig, Config, OutputConfig, SiteConfig, UserAgentConfig};
use crate::{ConfigError, ConfigResult};
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_check_config(&config.check)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the site section: origin, local host and seed paths
fn validate_site_config(config: &SiteConfig) -> ConfigResult<()> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    if base.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' has no host",
            config.base_url
        )));
    }

    if let Some(host) = &config.local_host {
        validate_host_name(host)?;
    }

    validate_site_path("root", &config.root)?;
    validate_site_path("docs-prefix", &config.docs_prefix)?;
    for seed in &config.extra_seeds {
        validate_site_path("extra-seeds", seed)?;
    }

    Ok(())
}

/// Validates the check section
fn validate_check_config(config: &CheckConfig) -> ConfigResult<()> {
    if config.accepted_statuses.is_empty() {
        return Err(ConfigError::Validation(
            "accepted-statuses cannot be empty".to_string(),
        ));
    }

    if let Some(status) = config
        .accepted_statuses
        .iter()
        .find(|status| !(100..=599).contains(*status))
    {
        return Err(ConfigError::Validation(format!(
            "accepted-statuses must be HTTP status codes (100-599), got {}",
            status
        )));
    }

    if config.heading_anchor_class.is_empty()
        || config.heading_anchor_class.chars().any(char::is_whitespace)
    {
        return Err(ConfigError::Validation(format!(
            "heading-anchor-class must be a single class name, got '{}'",
            config.heading_anchor_class
        )));
    }

    if config.timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout must be >= 1s, got {}s",
            config.timeout
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> ConfigResult<()> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-version cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> ConfigResult<()> {
    if let Some(path) = &config.report_path {
        if path.is_empty() {
            return Err(ConfigError::Validation(
                "report-path cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}

/// Site paths are absolute and carry neither query nor fragment
fn validate_site_path(field: &str, path: &str) -> ConfigResult<()> {
    if !path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "{} must be an absolute path starting with '/', got '{}'",
            field, path
        )));
    }

    if path.contains('?') || path.contains('#') {
        return Err(ConfigError::Validation(format!(
            "{} must not contain a query or fragment, got '{}'",
            field, path
        )));
    }

    Ok(())
}

/// Validates a bare host name such as "localhost" or "docs.example.com"
fn validate_host_name(host: &str) -> ConfigResult<()> {
    if host.is_empty() {
        return Err(ConfigError::Validation(
            "local-host cannot be empty".to_string(),
        ));
    }

    if !host
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "local-host '{}' contains invalid characters",
            host
        )));
    }

    if host.starts_with('.') || host.ends_with('.') || host.starts_with('-') || host.ends_with('-')
    {
        return Err(ConfigError::Validation(format!(
            "local-host '{}' cannot start or end with '.' or '-'",
            host
        )));
    }

    if host.contains("..") {
        return Err(ConfigError::Validation(format!(
            "local-host '{}' cannot contain consecutive dots",
            host
        )));
    }

    Ok(())
}
