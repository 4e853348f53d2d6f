use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use vuln_timeline::prelude::*;

/// Mock ContainerEngine: every image pulls successfully unless marked failing
#[derive(Default, Clone)]
pub struct MockContainerEngine {
    sizes: HashMap<String, u64>,
    failing_pulls: HashSet<String>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockContainerEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size in bytes reported for the image whose last path segment is `short_name`
    pub fn with_size(mut self, short_name: &str, bytes: u64) -> Self {
        self.sizes.insert(short_name.to_string(), bytes);
        self
    }

    pub fn with_failing_pull(mut self, short_name: &str) -> Self {
        self.failing_pulls.insert(short_name.to_string());
        self
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ContainerEngine for MockContainerEngine {
    fn pull(&self, reference: &ImageReference) -> Result<u64> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("pull {}", reference));
        if self.failing_pulls.contains(reference.short_name()) {
            anyhow::bail!("Error response from daemon: manifest unknown");
        }
        Ok(*self
            .sizes
            .get(reference.short_name())
            .unwrap_or(&(10 * 1024 * 1024)))
    }

    fn tag(&self, source: &ImageReference, target: &ImageReference) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("tag {} {}", source, target));
        Ok(())
    }

    fn push(&self, reference: &ImageReference) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("push {}", reference));
        Ok(())
    }
}
