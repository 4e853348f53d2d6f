use crate::shared::error::PipelineError;
use crate::shared::Result;
use std::path::Path;

/// Environment key holding the registry resource name
pub const REGISTRY_NAME_KEY: &str = "ACR_NAME";

/// Environment key holding the registry login endpoint (host)
pub const REGISTRY_LOGIN_SERVER_KEY: &str = "ACR_LOGIN_SERVER";

/// Coordinates of the cloud registry produced by provisioning.
///
/// Built once at start-up and handed to every stage that talks to the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    name: String,
    login_server: String,
}

impl RegistryConfig {
    pub fn new(name: String, login_server: String) -> Result<Self> {
        let name = name.trim().to_string();
        let login_server = normalize_login_server(&login_server);

        if name.is_empty() {
            anyhow::bail!(PipelineError::Validation {
                message: "Registry name cannot be empty".to_string(),
            });
        }
        if login_server.is_empty() {
            anyhow::bail!(PipelineError::Validation {
                message: "Registry login server cannot be empty".to_string(),
            });
        }
        if !login_server
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == ':')
        {
            anyhow::bail!(PipelineError::Validation {
                message: format!("Registry login server is not a valid host: {}", login_server),
            });
        }

        Ok(Self { name, login_server })
    }

    /// Builds the configuration from a key lookup (env file merged with the process environment).
    ///
    /// A missing or blank key is a fatal configuration error naming the key and `source`.
    pub fn from_lookup<F>(lookup: F, source: &Path) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| {
                    PipelineError::MissingRegistryConfig {
                        field: key.to_string(),
                        path: source.to_path_buf(),
                    }
                    .into()
                })
        };

        let name = required(REGISTRY_NAME_KEY)?;
        let login_server = required(REGISTRY_LOGIN_SERVER_KEY)?;
        Self::new(name, login_server)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn login_server(&self) -> &str {
        &self.login_server
    }

    /// Key/value pairs in the order they are persisted
    pub fn entries(&self) -> [(&'static str, &str); 2] {
        [
            (REGISTRY_NAME_KEY, self.name.as_str()),
            (REGISTRY_LOGIN_SERVER_KEY, self.login_server.as_str()),
        ]
    }
}

/// Strips a scheme and trailing slash some tools print around the host.
fn normalize_login_server(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    without_scheme.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_registry_config_from_lookup() {
        let config = RegistryConfig::from_lookup(
            lookup_from(&[
                ("ACR_NAME", "studyacr"),
                ("ACR_LOGIN_SERVER", "studyacr.azurecr.io"),
            ]),
            &PathBuf::from("infra/registry.env"),
        )
        .unwrap();
        assert_eq!(config.name(), "studyacr");
        assert_eq!(config.login_server(), "studyacr.azurecr.io");
    }

    #[test]
    fn test_registry_config_missing_login_server() {
        let err = RegistryConfig::from_lookup(
            lookup_from(&[("ACR_NAME", "studyacr")]),
            &PathBuf::from("infra/registry.env"),
        )
        .unwrap_err();
        let pipeline_err = err.downcast_ref::<PipelineError>().unwrap();
        assert!(matches!(
            pipeline_err,
            PipelineError::MissingRegistryConfig { field, .. } if field == "ACR_LOGIN_SERVER"
        ));
    }

    #[test]
    fn test_registry_config_blank_value_is_missing() {
        let err = RegistryConfig::from_lookup(
            lookup_from(&[("ACR_NAME", "  "), ("ACR_LOGIN_SERVER", "x.azurecr.io")]),
            &PathBuf::from("registry.env"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("ACR_NAME"));
    }

    #[test]
    fn test_registry_config_normalizes_scheme() {
        let config = RegistryConfig::new(
            "studyacr".to_string(),
            "https://studyacr.azurecr.io/".to_string(),
        )
        .unwrap();
        assert_eq!(config.login_server(), "studyacr.azurecr.io");
    }

    #[test]
    fn test_registry_config_rejects_invalid_host() {
        let result = RegistryConfig::new("studyacr".to_string(), "bad host".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_registry_config_entries_order() {
        let config =
            RegistryConfig::new("studyacr".to_string(), "studyacr.azurecr.io".to_string()).unwrap();
        let entries = config.entries();
        assert_eq!(entries[0], ("ACR_NAME", "studyacr"));
        assert_eq!(entries[1], ("ACR_LOGIN_SERVER", "studyacr.azurecr.io"));
    }
}
