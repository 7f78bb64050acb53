//! Run configuration for research passes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Settings supplied per research run.
///
/// ```
/// use parsed_paper::ResearchConfig;
///
/// let config = ResearchConfig::from_json_str(r#"{ "siteDomain": "yoast.com" }"#).unwrap();
/// assert_eq!(config.site_domain(), Some("yoast.com"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResearchConfig {
    /// Host name of the analysed site. Links to this host count as internal.
    /// When unset, every non-fragment http(s) link is external.
    pub site_domain: Option<String>,
}

impl ResearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the site domain.
    pub fn with_site_domain(mut self, domain: impl Into<String>) -> Self {
        self.site_domain = Some(domain.into());
        self
    }

    /// The configured site domain without surrounding whitespace. Empty values
    /// are treated as unset.
    pub fn site_domain(&self) -> Option<&str> {
        self.site_domain
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// Parse a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check that the site domain is a bare host name.
    pub fn validate(&self) -> Result<()> {
        if let Some(domain) = self.site_domain()
            && (domain.contains('/') || domain.contains(char::is_whitespace))
        {
            return Err(Error::Config(format!(
                "site domain must be a bare host name, got '{domain}'"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_domain() {
        let config = ResearchConfig::new();
        assert_eq!(config.site_domain(), None);
    }

    #[test]
    fn test_parse_camel_case() {
        let config = ResearchConfig::from_json_str(r#"{"siteDomain":"example.org"}"#).unwrap();
        assert_eq!(config.site_domain(), Some("example.org"));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = ResearchConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ResearchConfig::default());
    }

    #[test]
    fn test_blank_domain_is_unset() {
        let config = ResearchConfig::new().with_site_domain("   ");
        assert_eq!(config.site_domain(), None);
    }

    #[test]
    fn test_rejects_url_as_domain() {
        let err = ResearchConfig::from_json_str(r#"{"siteDomain":"https://example.org/"}"#);
        assert!(matches!(err, Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_builder_domain() {
        let config = ResearchConfig::new().with_site_domain("https://yoast.com/");
        assert!(matches!(config.validate(), Err(Error::Config(_))));
        assert!(ResearchConfig::new().with_site_domain("yoast.com").validate().is_ok());
    }
}
