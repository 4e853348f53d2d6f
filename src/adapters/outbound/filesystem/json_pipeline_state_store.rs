use super::atomic::replace_file;
use crate::ports::outbound::PipelineStateStore;
use crate::shared::error::PipelineError;
use crate::shared::security::read_input_file;
use crate::shared::Result;
use crate::study::domain::PipelineState;
use std::io::Write;
use std::path::{Path, PathBuf};

const STATE_FILE: &str = "pipeline_state.json";

/// JsonPipelineStateStore adapter persisting the ledger at `<data_dir>/pipeline_state.json`
pub struct JsonPipelineStateStore {
    path: PathBuf,
}

impl JsonPipelineStateStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(STATE_FILE),
        }
    }
}

impl PipelineStateStore for JsonPipelineStateStore {
    fn load(&self) -> Result<PipelineState> {
        if !self.path.exists() {
            return Ok(PipelineState::default());
        }

        let content = read_input_file(&self.path)?;
        let state = serde_json::from_str(&content).map_err(|e| PipelineError::FileReadError {
            path: self.path.clone(),
            details: format!("Invalid pipeline state: {}", e),
        })?;
        Ok(state)
    }

    fn save(&self, state: &PipelineState) -> Result<()> {
        let json = serde_json::to_string_pretty(state)?;
        replace_file(&self.path, |file| {
            file.write_all(json.as_bytes())?;
            file.write_all(b"\n")
        })
    }
}
