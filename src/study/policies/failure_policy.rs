use std::fmt;
use std::str::FromStr;

/// What a scan stage does when one image's pull or scan fails.
///
/// Exactly one policy applies to a run. `Skip` keeps a timepoint's data when a
/// single registry has a transient problem; `FailFast` guarantees no partial
/// timepoint is accepted silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Warn on stderr, leave the image's row out, continue with the next image
    #[default]
    Skip,
    /// Abort the stage on the first failure
    FailFast,
}

/// Outcome of applying the policy to a per-image failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureAction {
    Continue,
    Abort,
}

impl FailurePolicy {
    pub fn on_image_failure(&self) -> FailureAction {
        match self {
            FailurePolicy::Skip => FailureAction::Continue,
            FailurePolicy::FailFast => FailureAction::Abort,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FailurePolicy::Skip => "skip",
            FailurePolicy::FailFast => "fail-fast",
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "skip" | "skip-and-continue" | "continue" => Ok(FailurePolicy::Skip),
            "fail-fast" | "failfast" | "abort" => Ok(FailurePolicy::FailFast),
            _ => Err(format!(
                "Invalid failure policy: {}. Please specify 'skip' or 'fail-fast'",
                s
            )),
        }
    }
}
