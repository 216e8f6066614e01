use std::sync::Arc;

use nr_core::{HistoryStorage, ResearchPipeline};
use tokio::sync::Mutex;

pub struct AppState {
    pub pipeline: ResearchPipeline,
    pub history: Arc<dyn HistoryStorage>,
    /// Held for the whole of a pipeline run; runs never overlap.
    pub run_lock: Mutex<()>,
}

impl AppState {
    pub fn new(pipeline: ResearchPipeline) -> Self {
        let history = pipeline.history();
        Self {
            pipeline,
            history,
            run_lock: Mutex::new(()),
        }
    }
}
