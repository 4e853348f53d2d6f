//! Configuration file support for vuln-timeline.
//!
//! Provides YAML-based study configuration through `vuln-timeline.config.yml`
//! files, including data structures, file loading, validation and resolution
//! of defaults.

use anyhow::Context;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::shared::error::PipelineError;
use crate::shared::security::read_input_file;
use crate::shared::Result;
use crate::study::domain::{Severity, SeverityFilter, TrackedImage};
use crate::study::policies::FailurePolicy;

pub const CONFIG_FILENAME: &str = "vuln-timeline.config.yml";

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_INFRA_DIR: &str = "infra";
const REGISTRY_ENV_FILENAME: &str = "registry.env";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub images: Option<Vec<ImageEntry>>,
    pub severities: Option<Vec<String>>,
    pub failure_policy: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub infra_dir: Option<PathBuf>,
    pub registry_env_file: Option<PathBuf>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// A tracked image as written in the configuration file.
#[derive(Debug, Deserialize)]
pub struct ImageEntry {
    pub source: String,
    pub repo: String,
    pub tag: String,
}

/// Settings of one run, with defaults applied and values validated.
#[derive(Debug, Clone)]
pub struct StudyConfig {
    pub images: Vec<TrackedImage>,
    pub severities: SeverityFilter,
    pub failure_policy: FailurePolicy,
    pub data_dir: PathBuf,
    pub infra_dir: PathBuf,
    pub registry_env_file: PathBuf,
}

impl Default for StudyConfig {
    fn default() -> Self {
        let infra_dir = PathBuf::from(DEFAULT_INFRA_DIR);
        Self {
            images: TrackedImage::default_set(),
            severities: SeverityFilter::default(),
            failure_policy: FailurePolicy::default(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            registry_env_file: infra_dir.join(REGISTRY_ENV_FILENAME),
            infra_dir,
        }
    }
}

impl StudyConfig {
    /// Applies `file` on top of the defaults.
    pub fn resolve(file: Option<ConfigFile>) -> Result<Self> {
        let Some(file) = file else {
            return Ok(Self::default());
        };

        let images = match file.images {
            Some(entries) => resolve_images(entries)?,
            None => TrackedImage::default_set(),
        };

        let severities = match file.severities {
            Some(labels) => resolve_severities(&labels)?,
            None => SeverityFilter::default(),
        };

        let failure_policy = match file.failure_policy {
            Some(raw) => FailurePolicy::from_str(&raw)
                .map_err(|message| PipelineError::Validation { message })?,
            None => FailurePolicy::default(),
        };

        let data_dir = file
            .data_dir
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let infra_dir = file
            .infra_dir
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INFRA_DIR));
        let registry_env_file = file
            .registry_env_file
            .unwrap_or_else(|| infra_dir.join(REGISTRY_ENV_FILENAME));

        Ok(Self {
            images,
            severities,
            failure_policy,
            data_dir,
            infra_dir,
            registry_env_file,
        })
    }

    /// Loads `explicit` if given, otherwise discovers a config file in `dir`.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        let file = match explicit {
            Some(path) => Some(load_config_from_path(path)?),
            None => discover_config(dir)?,
        };
        Self::resolve(file)
    }
}

fn resolve_images(entries: Vec<ImageEntry>) -> Result<Vec<TrackedImage>> {
    if entries.is_empty() {
        anyhow::bail!(PipelineError::Validation {
            message: "images must list at least one image".to_string(),
        });
    }

    let mut seen = HashSet::new();
    let mut images = Vec::with_capacity(entries.len());
    for (i, entry) in entries.into_iter().enumerate() {
        let image = TrackedImage::new(entry.source, entry.repo, entry.tag)
            .with_context(|| format!("Invalid config: images[{}]", i))?;
        if !seen.insert(image.display_name()) {
            anyhow::bail!(PipelineError::Validation {
                message: format!(
                    "images[{}] duplicates {}; each repo:tag may be tracked once",
                    i,
                    image.display_name()
                ),
            });
        }
        images.push(image);
    }

    if let Some((first, second)) = TrackedImage::find_report_name_clash(&images) {
        anyhow::bail!(PipelineError::Validation {
            message: format!(
                "images {} and {} map to the same raw report name; rename one repo",
                first.display_name(),
                second.display_name()
            ),
        });
    }
    Ok(images)
}

fn resolve_severities(labels: &[String]) -> Result<SeverityFilter> {
    let severities = labels
        .iter()
        .map(|label| {
            Severity::from_str(label).map_err(|message| PipelineError::Validation { message })
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;
    SeverityFilter::new(severities)
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = read_input_file(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    warn_unknown_fields(&config);
    log::debug!("Loaded configuration from {}", path.display());

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
