use super::utc_now;
use crate::ports::outbound::PipelineStateStore;
use crate::shared::Result;
use crate::study::domain::{PipelineStage, PipelineState};

/// PipelineTracker - Advances and reports the stage-completion ledger
pub struct PipelineTracker<PSS> {
    store: PSS,
}

impl<PSS> PipelineTracker<PSS>
where
    PSS: PipelineStateStore,
{
    pub fn new(store: PSS) -> Self {
        Self { store }
    }

    /// Records `stage` as completed now
    pub fn record(&self, stage: PipelineStage) -> Result<PipelineState> {
        let mut state = self.store.load()?;
        state.record(stage, utc_now());
        self.store.save(&state)?;
        log::debug!("Pipeline state advanced to {}", stage);
        Ok(state)
    }

    pub fn status(&self) -> Result<PipelineState> {
        self.store.load()
    }
}
