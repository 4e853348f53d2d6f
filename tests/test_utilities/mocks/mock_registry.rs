use std::sync::{Arc, Mutex};
use vuln_timeline::prelude::*;

/// Mock InfrastructureProvisioner returning fixed registry coordinates
pub struct MockProvisioner {
    pub name: String,
    pub login_server: String,
}

impl InfrastructureProvisioner for MockProvisioner {
    fn provision(&self) -> Result<RegistryConfig> {
        RegistryConfig::new(self.name.clone(), self.login_server.clone())
    }
}

/// Mock RegistryAuthenticator counting logins
#[derive(Default, Clone)]
pub struct MockRegistryAuthenticator {
    pub logins: Arc<Mutex<Vec<String>>>,
}

impl RegistryAuthenticator for MockRegistryAuthenticator {
    fn authenticate(&self, registry: &RegistryConfig) -> Result<()> {
        self.logins.lock().unwrap().push(registry.name().to_string());
        Ok(())
    }
}
