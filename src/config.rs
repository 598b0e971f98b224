//! Read-only provider configuration.
//!
//! Configuration-file loading is out of scope for this crate; callers hand
//! in an already-resolved [`ResolverConfig`]. It is a nested mapping keyed
//! by provider name, where each section is an opaque JSON value that the
//! owning provider deserializes into its own parameter struct (e.g. the
//! GCE target zone). The whole structure is shared read-only across
//! concurrent provider calls via `Arc`.

use crate::error::ResolveError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Nested, read-only configuration keyed by provider name.
///
/// ```rust,ignore
/// let config = ResolverConfig::from_json_str(
///     r#"{ "providers": { "gce": { "zone": "europe-west1-b" } } }"#,
/// )?;
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResolverConfig {
    #[serde(default)]
    providers: HashMap<String, Value>,
}

impl ResolverConfig {
    /// An empty configuration; providers that need parameters will fail
    /// with a configuration error when dispatched against this.
    pub fn new() -> Self {
        ResolverConfig::default()
    }

    /// Parses the configuration from a JSON document.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Sets or replaces one provider's section.
    pub fn with_provider(mut self, name: impl Into<String>, section: Value) -> Self {
        self.providers.insert(name.into(), section);
        self
    }

    /// The raw section for `name`, if configured.
    pub fn provider_section(&self, name: &str) -> Option<&Value> {
        self.providers.get(name)
    }

    /// Deserializes the section for `provider` into its typed parameter
    /// struct. Absence of the section is `Ok(None)`; a present section
    /// that does not deserialize is a configuration failure scoped to
    /// that provider.
    pub fn section<T: DeserializeOwned>(
        &self,
        provider: &'static str,
    ) -> Result<Option<T>, ResolveError> {
        match self.providers.get(provider) {
            None => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| ResolveError::InvalidConfig {
                    provider,
                    source: Arc::new(e),
                }),
        }
    }

    /// Convenience for the common hand-off shape.
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct ZoneSection {
        zone: String,
    }

    #[test]
    fn test_from_json_str() {
        let config = ResolverConfig::from_json_str(
            r#"{ "providers": { "gce": { "zone": "europe-west1-b" } } }"#,
        )
        .unwrap();

        let section: Option<ZoneSection> = config.section("gce").unwrap();
        assert_eq!(
            section,
            Some(ZoneSection {
                zone: "europe-west1-b".into()
            })
        );
    }

    #[test]
    fn test_absent_section_is_none() {
        let config = ResolverConfig::new();
        let section: Option<ZoneSection> = config.section("gce").unwrap();
        assert!(section.is_none());
        assert!(config.provider_section("gce").is_none());
    }

    #[test]
    fn test_malformed_section_is_config_error() {
        let config = ResolverConfig::new().with_provider("gce", json!({ "zone": 42 }));
        let err = config.section::<ZoneSection>("gce").unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("gce"));
    }

    #[test]
    fn test_with_provider_replaces() {
        let config = ResolverConfig::new()
            .with_provider("gce", json!({ "zone": "a" }))
            .with_provider("gce", json!({ "zone": "b" }));
        let section: ZoneSection = config.section("gce").unwrap().unwrap();
        assert_eq!(section.zone, "b");
    }
}
