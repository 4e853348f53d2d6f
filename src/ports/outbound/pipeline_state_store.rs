use crate::shared::Result;
use crate::study::domain::PipelineState;

/// PipelineStateStore port for the stage-completion ledger
pub trait PipelineStateStore {
    /// Loads the ledger; a missing ledger is the initial state
    fn load(&self) -> Result<PipelineState>;

    fn save(&self, state: &PipelineState) -> Result<()>;
}
