pub mod density;
pub mod pipeline_state;
pub mod registry;
pub mod result_row;
pub mod scan_report;
pub mod scanner_info;
pub mod severity;
pub mod timepoint;
pub mod tracked_image;

pub use density::{Density, ImageSize, SeverityCounts};
pub use pipeline_state::{PipelineStage, PipelineState};
pub use registry::RegistryConfig;
pub use result_row::{ResultRecord, ResultRow, RESULT_COLUMNS};
pub use scan_report::ScanReport;
pub use scanner_info::ScannerInfo;
pub use severity::{Severity, SeverityFilter};
pub use timepoint::Timepoint;
pub use tracked_image::{ImageReference, TrackedImage};
