use crate::study::domain::Timepoint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A completed pipeline stage.
///
/// Scan stages are independent of each other and may be re-entered;
/// re-entering simply refreshes their completion time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Provisioned,
    ImagesPushed,
    Scanned(Timepoint),
    Consolidated,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStage::Provisioned => f.write_str("PROVISIONED"),
            PipelineStage::ImagesPushed => f.write_str("IMAGES_PUSHED"),
            PipelineStage::Scanned(tp) => write!(f, "{}_SCANNED", tp),
            PipelineStage::Consolidated => f.write_str("CONSOLIDATED"),
        }
    }
}

/// Persistent record of when each stage last completed (RFC 3339 UTC strings)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioned_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images_pushed_at: Option<String>,
    /// Keyed by timepoint label (`T0`..`T3`)
    #[serde(default)]
    pub scanned_at: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consolidated_at: Option<String>,
}

impl PipelineState {
    /// Marks `stage` as completed at `timestamp`
    pub fn record(&mut self, stage: PipelineStage, timestamp: String) {
        match stage {
            PipelineStage::Provisioned => self.provisioned_at = Some(timestamp),
            PipelineStage::ImagesPushed => self.images_pushed_at = Some(timestamp),
            PipelineStage::Scanned(tp) => {
                self.scanned_at.insert(tp.label().to_string(), timestamp);
            }
            PipelineStage::Consolidated => self.consolidated_at = Some(timestamp),
        }
    }

    /// Label of the furthest state reached (`NOT_PROVISIONED` when nothing has run)
    pub fn current_label(&self) -> String {
        if self.consolidated_at.is_some() {
            return PipelineStage::Consolidated.to_string();
        }
        if let Some(latest) = self.scanned_timepoints().last() {
            return PipelineStage::Scanned(*latest).to_string();
        }
        if self.images_pushed_at.is_some() {
            return PipelineStage::ImagesPushed.to_string();
        }
        if self.provisioned_at.is_some() {
            return PipelineStage::Provisioned.to_string();
        }
        "NOT_PROVISIONED".to_string()
    }

    /// Timepoints with a recorded scan, in chronological order
    pub fn scanned_timepoints(&self) -> Vec<Timepoint> {
        Timepoint::ALL
            .into_iter()
            .filter(|tp| self.scanned_at.contains_key(tp.label()))
            .collect()
    }

    pub fn scanned_at(&self, timepoint: Timepoint) -> Option<&str> {
        self.scanned_at.get(timepoint.label()).map(String::as_str)
    }
}
