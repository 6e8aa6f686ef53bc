//! Version template configuration loading
//!
//! The config file is a flat JSON object mapping service names to version
//! templates, e.g. `{"service_a": "1.*.3", "service_b": "*.*.*"}`. Key
//! order is preserved so generation order matches the file.

use std::path::Path;

use indexmap::IndexMap;
use thiserror::Error;

use crate::version::template::{TemplateError, VersionTemplate};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    NotFound {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid JSON in config file '{path}': {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("invalid template for service '{service}': {source}")]
    InvalidTemplate {
        service: String,
        source: TemplateError,
    },
}

/// Mapping of service name to version template, in file order.
///
/// Loaded once per run and never mutated. Template shape is validated at
/// load time, so a malformed value fails the run up front instead of
/// surfacing later during generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateConfig {
    templates: IndexMap<String, VersionTemplate>,
}

impl TemplateConfig {
    /// Load and validate the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::NotFound {
            path: path.display().to_string(),
            source,
        })?;

        let raw: IndexMap<String, String> =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;

        let mut templates = IndexMap::with_capacity(raw.len());
        for (service, template) in raw {
            let parsed =
                template
                    .parse::<VersionTemplate>()
                    .map_err(|source| ConfigError::InvalidTemplate {
                        service: service.clone(),
                        source,
                    })?;
            templates.insert(service, parsed);
        }

        Ok(Self { templates })
    }

    /// Iterate over `(service, template)` pairs in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &VersionTemplate)> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_parses_templates_in_file_order() {
        let file = write_config(r#"{"service_b": "*.*.*", "service_a": "1.*.3"}"#);

        let config = TemplateConfig::load(file.path()).unwrap();

        let services: Vec<&String> = config.iter().map(|(service, _)| service).collect();
        assert_eq!(services, vec!["service_b", "service_a"]);
        assert_eq!(config.len(), 2);
    }

    #[test]
    fn load_fails_for_missing_file() {
        let result = TemplateConfig::load(Path::new("/nonexistent/config.json"));

        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn load_fails_for_invalid_json() {
        let file = write_config("{not json");

        let result = TemplateConfig::load(file.path());

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn load_fails_when_document_is_not_a_string_map() {
        let file = write_config(r#"["1.2.3", "4.5.6"]"#);

        let result = TemplateConfig::load(file.path());

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn load_fails_for_malformed_template_value() {
        let file = write_config(r#"{"service_a": "1..3"}"#);

        let result = TemplateConfig::load(file.path());

        assert!(matches!(
            result,
            Err(ConfigError::InvalidTemplate { ref service, .. }) if service == "service_a"
        ));
    }

    #[test]
    fn load_accepts_empty_object() {
        let file = write_config("{}");

        let config = TemplateConfig::load(file.path()).unwrap();

        assert!(config.is_empty());
    }
}
