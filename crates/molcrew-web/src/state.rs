//! Shared application state for the web server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;

use molcrew_annotate::{Annotator, SmilesExtractor};
use molcrew_common::stream::RunEvent;
use molcrew_runtime::{RunManager, StreamPacing};

use crate::config::{Config, VisualizeConfig};

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub runs: RunManager,
    pub annotator: Annotator,
    pub extractor: SmilesExtractor,
    visualize: VisualizeConfig,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let pacing = StreamPacing {
            message_delay: Duration::from_millis(config.stream.message_delay_ms),
            snapshot_delay: Duration::from_millis(config.stream.snapshot_delay_ms),
        };
        Self {
            runs: RunManager::new(pacing, config.stream.channel_capacity),
            annotator: Annotator::builtin(),
            extractor: SmilesExtractor::new(),
            visualize: config.visualize.clone(),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RunEvent> {
        self.runs.subscribe()
    }

    /// Placeholder image URL for a structure string, keyed by its truncated
    /// prefix exactly as the mock rendering service expects.
    pub fn image_url(&self, smiles: &str) -> String {
        let truncated: String = smiles.chars().take(self.visualize.truncate).collect();
        self.visualize.url_template.replace("{smiles}", &truncated)
    }
}

pub type SharedState = Arc<AppState>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_url_truncates_structure() {
        let state = AppState::new(&Config::default());
        let url = state.image_url("CC(C)(C(=O)O)c1ccccc1");
        assert_eq!(
            url,
            "https://placehold.co/400x300/EEF2FF/1E40AF?text=Molecule+CC(C)(C(=O..."
        );
    }

    #[test]
    fn test_image_url_short_structure() {
        let state = AppState::new(&Config::default());
        let url = state.image_url("CCO");
        assert!(url.contains("Molecule+CCO..."));
    }
}
