pub mod consolidator;
pub mod image_resolver;
pub mod report_aggregator;

pub use consolidator::{ComparisonTable, Consolidator};
pub use image_resolver::ImageResolver;
pub use report_aggregator::ReportAggregator;
