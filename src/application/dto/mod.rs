/// Data Transfer Objects for application layer
///
/// DTOs carry stage inputs from the CLI into the use cases and
/// stage outcomes back out.
mod consolidation_response;
mod mirror_response;
mod scan_request;
mod scan_response;
mod stage;

pub use consolidation_response::ConsolidationResponse;
pub use mirror_response::MirrorResponse;
pub use scan_request::ScanRequest;
pub use scan_response::{ScanResponse, SkippedImage};
pub use stage::{RequiredTool, Stage};
