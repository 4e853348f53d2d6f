use crate::shared::Result;
use crate::study::domain::Timepoint;
use std::collections::HashMap;

/// Maximum length of a full image reference (security limit)
const MAX_REFERENCE_LENGTH: usize = 255;

/// Maximum length of a tag, as enforced by the registry
const MAX_TAG_LENGTH: usize = 128;

/// NewType wrapper for a container image reference (`host/path:tag`)
///
/// References are passed as argv entries to external tools, so only the
/// characters a registry reference can legitimately contain are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageReference(String);

impl ImageReference {
    pub fn new(reference: String) -> Result<Self> {
        if reference.is_empty() {
            anyhow::bail!("Image reference cannot be empty");
        }

        if reference.len() > MAX_REFERENCE_LENGTH {
            anyhow::bail!(
                "Image reference is too long ({} bytes). Maximum allowed: {} bytes",
                reference.len(),
                MAX_REFERENCE_LENGTH
            );
        }

        if reference.starts_with('-') {
            anyhow::bail!("Image reference cannot start with '-': {}", reference);
        }

        if !reference.chars().all(|c| {
            c.is_ascii_alphanumeric()
                || c == '.'
                || c == '-'
                || c == '_'
                || c == '/'
                || c == ':'
                || c == '@'
        }) {
            anyhow::bail!(
                "Image reference contains invalid characters: {}. Only alphanumeric, dots, hyphens, underscores, slashes, colons and '@' are allowed.",
                reference
            );
        }

        Ok(Self(reference))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment without tag or digest (`myacr.azurecr.io/alpine:3.19` -> `alpine`)
    pub fn short_name(&self) -> &str {
        short_image_name(&self.0)
    }
}

impl std::fmt::Display for ImageReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Extracts the last path segment of a reference, dropping tag and digest.
pub fn short_image_name(reference: &str) -> &str {
    let without_digest = reference.split('@').next().unwrap_or(reference);
    let last_segment = without_digest.rsplit('/').next().unwrap_or(without_digest);
    last_segment.split(':').next().unwrap_or(last_segment)
}

/// NewType wrapper for the logical repository name inside the registry
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepoName(String);

impl RepoName {
    pub fn new(name: String) -> Result<Self> {
        if name.is_empty() {
            anyhow::bail!("Repository name cannot be empty");
        }

        if name.starts_with(['-', '.', '/']) || name.ends_with('/') {
            anyhow::bail!("Repository name has an invalid leading or trailing character: {}", name);
        }

        if !name.chars().all(|c| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_' || c == '.' || c == '/'
        }) {
            anyhow::bail!(
                "Repository name contains invalid characters: {}. Only lowercase alphanumeric, hyphens, underscores, dots and slashes are allowed.",
                name
            );
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RepoName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// NewType wrapper for an image tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageTag(String);

impl ImageTag {
    pub fn new(tag: String) -> Result<Self> {
        if tag.is_empty() {
            anyhow::bail!("Image tag cannot be empty");
        }

        if tag.len() > MAX_TAG_LENGTH {
            anyhow::bail!(
                "Image tag is too long ({} bytes). Maximum allowed: {} bytes",
                tag.len(),
                MAX_TAG_LENGTH
            );
        }

        if tag.starts_with(['-', '.']) {
            anyhow::bail!("Image tag cannot start with '-' or '.': {}", tag);
        }

        if !tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_')
        {
            anyhow::bail!(
                "Image tag contains invalid characters: {}. Only alphanumeric, dots, hyphens and underscores are allowed.",
                tag
            );
        }

        Ok(Self(tag))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A base image followed through the study: where it comes from and where it is mirrored to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedImage {
    source: ImageReference,
    repo: RepoName,
    tag: ImageTag,
}

impl TrackedImage {
    pub fn new(source: String, repo: String, tag: String) -> Result<Self> {
        Ok(Self {
            source: ImageReference::new(source)?,
            repo: RepoName::new(repo)?,
            tag: ImageTag::new(tag)?,
        })
    }

    pub fn source(&self) -> &ImageReference {
        &self.source
    }

    pub fn repo(&self) -> &RepoName {
        &self.repo
    }

    pub fn tag(&self) -> &ImageTag {
        &self.tag
    }

    /// `repo:tag`, used in progress messages
    pub fn display_name(&self) -> String {
        format!("{}:{}", self.repo, self.tag)
    }

    /// Name of the raw report archived for this image at `timepoint`
    pub fn report_name(&self, timepoint: Timepoint) -> String {
        format!("{}_{}", self.report_stem(), timepoint.file_stem())
    }

    fn report_stem(&self) -> String {
        format!("{}_{}", self.repo.as_str().replace('/', "-"), self.tag)
    }

    /// First pair of images whose raw reports would share a file name.
    ///
    /// Nested repos are flattened (`base/alpine` and `base-alpine` clash), so
    /// distinct `repo:tag` pairs are not enough on their own.
    pub fn find_report_name_clash(images: &[TrackedImage]) -> Option<(&TrackedImage, &TrackedImage)> {
        let mut seen: HashMap<String, &TrackedImage> = HashMap::new();
        for image in images {
            if let Some(previous) = seen.insert(image.report_stem(), image) {
                return Some((previous, image));
            }
        }
        None
    }

    /// The four base images followed by the study unless configured otherwise
    pub fn default_set() -> Vec<TrackedImage> {
        [
            ("docker.io/library/alpine:3.19", "alpine", "3.19"),
            ("docker.io/library/busybox:1.36", "busybox", "1.36"),
            ("docker.io/library/debian:12-slim", "debian", "12-slim"),
            ("docker.io/library/nginx:1.25", "nginx", "1.25"),
        ]
        .into_iter()
        .map(|(source, repo, tag)| Self {
            source: ImageReference(source.to_string()),
            repo: RepoName(repo.to_string()),
            tag: ImageTag(tag.to_string()),
        })
        .collect()
    }
}
