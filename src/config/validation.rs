use crate::config::types::{Config, CrawlerConfig, OutputConfig, RuleEntry, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_rules(&config.rules)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
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
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if let Some(contact_url) = &config.contact_url {
        Url::parse(contact_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.graph_path.is_empty() {
        return Err(ConfigError::Validation(
            "graph_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates custom rule entries
fn validate_rules(rules: &[RuleEntry]) -> Result<(), ConfigError> {
    for entry in rules {
        validate_rule_domain(&entry.domain)?;

        if entry.keywords.is_empty() {
            return Err(ConfigError::InvalidRule(format!(
                "Rule for '{}' must have at least one keyword",
                entry.domain
            )));
        }

        for keyword in &entry.keywords {
            validate_keyword(keyword)?;
        }
    }
    Ok(())
}

/// Validates the domain of a rule entry
fn validate_rule_domain(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidRule(
            "Rule domain cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidRule(format!(
            "Rule domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.') || domain.ends_with('.') || domain.contains("..") {
        return Err(ConfigError::InvalidRule(format!(
            "Rule domain '{}' is malformed",
            domain
        )));
    }

    Ok(())
}

/// A keyword must be exactly one path segment
fn validate_keyword(keyword: &str) -> Result<(), ConfigError> {
    if keyword.is_empty() {
        return Err(ConfigError::InvalidRule(
            "Rule keyword cannot be empty".to_string(),
        ));
    }

    if keyword.contains(['/', '?', '#']) {
        return Err(ConfigError::InvalidRule(format!(
            "Rule keyword '{}' must be a single path segment",
            keyword
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(domain: &str, keywords: &[&str]) -> RuleEntry {
        RuleEntry {
            domain: domain.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_rule_domain() {
        assert!(validate_rule_domain("example.com").is_ok());
        assert!(validate_rule_domain("github.io").is_ok());
        assert!(validate_rule_domain("localhost").is_ok());

        assert!(validate_rule_domain("").is_err());
        assert!(validate_rule_domain(".example.com").is_err());
        assert!(validate_rule_domain("example..com").is_err());
        assert!(validate_rule_domain("exa mple.com").is_err());
    }

    #[test]
    fn test_validate_keyword() {
        assert!(validate_keyword("author").is_ok());
        assert!(validate_keyword("best-sellers").is_ok());

        assert!(validate_keyword("").is_err());
        assert!(validate_keyword("a/b").is_err());
        assert!(validate_keyword("tag?x").is_err());
    }

    #[test]
    fn test_rule_without_keywords() {
        let result = validate_rules(&[rule("example.com", &[])]);
        assert!(matches!(result, Err(ConfigError::InvalidRule(_))));
    }

    #[test]
    fn test_invalid_crawler_name() {
        let mut config = Config::default();
        config.user_agent.crawler_name = "bad name!".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_invalid_contact_url() {
        let mut config = Config::default();
        config.user_agent.contact_url = Some("not a url".to_string());
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_zero_timeout() {
        let mut config = Config::default();
        config.crawler.timeout = 0;
        assert!(validate(&config).is_err());
    }
}
