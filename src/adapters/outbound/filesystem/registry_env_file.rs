use super::atomic::replace_file;
use crate::ports::outbound::RegistryConfigStore;
use crate::shared::security::read_input_file;
use crate::shared::Result;
use crate::study::domain::RegistryConfig;
use std::collections::BTreeMap;
use std::env;
use std::io::Write;
use std::path::PathBuf;

/// RegistryEnvFile adapter for the `KEY=VALUE` file written by provisioning
///
/// Values from the process environment take precedence over the file, so a
/// registry can be selected without touching the file.
pub struct RegistryEnvFile {
    path: PathBuf,
    use_environment: bool,
}

impl RegistryEnvFile {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            use_environment: true,
        }
    }

    /// Reads the file only, ignoring process environment variables
    pub fn ignore_environment(mut self) -> Self {
        self.use_environment = false;
        self
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            log::debug!("Registry env file {} not found", self.path.display());
            return Ok(BTreeMap::new());
        }
        Ok(parse_env_file(&read_input_file(&self.path)?))
    }
}

impl RegistryConfigStore for RegistryEnvFile {
    fn load(&self) -> Result<RegistryConfig> {
        let entries = self.read_entries()?;
        let lookup = |key: &str| -> Option<String> {
            if self.use_environment {
                if let Ok(value) = env::var(key) {
                    if !value.trim().is_empty() {
                        return Some(value);
                    }
                }
            }
            entries.get(key).cloned()
        };
        RegistryConfig::from_lookup(lookup, &self.path)
    }

    fn save(&self, registry: &RegistryConfig) -> Result<()> {
        let content: String = registry
            .entries()
            .iter()
            .map(|(key, value)| format!("{}={}\n", key, value))
            .collect();
        replace_file(&self.path, |file| file.write_all(content.as_bytes()))
    }
}

/// Parses `KEY=VALUE` lines.
///
/// Blank lines and `#` comments are ignored, an `export ` prefix is allowed
/// and matching single or double quotes around a value are removed.
fn parse_env_file(content: &str) -> BTreeMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (key, value) = line.split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), unquote(value.trim()).to_string()))
        })
        .collect()
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::PipelineError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_env_file_variants() {
        let entries = parse_env_file(
            "# written by provision\nexport ACR_NAME=\"studyacr\"\nACR_LOGIN_SERVER = 'studyacr.azurecr.io'\n\nbroken line\n",
        );
        assert_eq!(entries["ACR_NAME"], "studyacr");
        assert_eq!(entries["ACR_LOGIN_SERVER"], "studyacr.azurecr.io");
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = RegistryEnvFile::new(temp_dir.path().join("infra").join("registry.env"))
            .ignore_environment();
        let registry =
            RegistryConfig::new("studyacr".to_string(), "studyacr.azurecr.io".to_string()).unwrap();

        store.save(&registry).unwrap();

        assert_eq!(store.load().unwrap(), registry);
        let content = fs::read_to_string(temp_dir.path().join("infra").join("registry.env")).unwrap();
        assert_eq!(content, "ACR_NAME=studyacr\nACR_LOGIN_SERVER=studyacr.azurecr.io\n");
    }

    #[test]
    fn test_missing_login_server_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("registry.env");
        fs::write(&path, "ACR_NAME=studyacr\n").unwrap();

        let err = RegistryEnvFile::new(path).ignore_environment().load().unwrap_err();
        match err.downcast_ref::<PipelineError>() {
            Some(PipelineError::MissingRegistryConfig { field, .. }) => {
                assert_eq!(field, "ACR_LOGIN_SERVER")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let err = RegistryEnvFile::new(temp_dir.path().join("absent.env"))
            .ignore_environment()
            .load()
            .unwrap_err();
        assert!(err.to_string().contains("ACR_NAME"));
    }
}
