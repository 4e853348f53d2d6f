use crate::study::domain::ImageReference;

/// MirrorResponse - References pushed to the study registry
#[derive(Debug, Clone)]
pub struct MirrorResponse {
    pub pushed: Vec<ImageReference>,
}
