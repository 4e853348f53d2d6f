/// Mock implementations for testing
mod mock_container_engine;
mod mock_progress_reporter;
mod mock_registry;
mod mock_vulnerability_scanner;

#[allow(unused_imports)]
pub use mock_container_engine::MockContainerEngine;
#[allow(unused_imports)]
pub use mock_progress_reporter::MockProgressReporter;
#[allow(unused_imports)]
pub use mock_registry::{MockProvisioner, MockRegistryAuthenticator};
#[allow(unused_imports)]
pub use mock_vulnerability_scanner::MockVulnerabilityScanner;
