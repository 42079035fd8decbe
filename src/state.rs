use crate::models::TrackerState;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// Shared handle to the one tracker snapshot and the file it is written to.
#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<TrackerState>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: TrackerState) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
        }
    }
}
