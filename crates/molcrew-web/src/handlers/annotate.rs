//! Annotation API — segments for one text, as consumed by the renderer.

use axum::{extract::{Query, State}, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use molcrew_annotate::Segment;

use crate::state::{AppState, SharedState};

#[derive(Deserialize)]
pub struct AnnotateQuery {
    #[serde(default)]
    pub text: String,
}

pub async fn api_annotate(
    State(state): State<SharedState>,
    Query(query): Query<AnnotateQuery>,
) -> Json<Value> {
    Json(json!({ "segments": render_segments(&state, &query.text) }))
}

/// Segments as JSON, with definitions resolved for decorated terms.
pub fn render_segments(state: &AppState, text: &str) -> Vec<Value> {
    state
        .annotator
        .annotate(text)
        .into_iter()
        .map(|segment| match segment {
            Segment::Plain { text } => json!({ "kind": "plain", "text": text }),
            Segment::Term { key, text } => {
                let definition = state.annotator.dictionary().definition_or_fallback(&key);
                json!({ "kind": "term", "key": key, "text": text, "definition": definition })
            }
            Segment::Property { key, text, value, status } => {
                let definition = state.annotator.dictionary().definition_or_fallback(&key);
                json!({
                    "kind": "property",
                    "key": key,
                    "text": text,
                    "value": value,
                    "status": status.as_str(),
                    "definition": definition,
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_render_segments_resolves_definitions() {
        let state = AppState::new(&Config::default());
        let segments = render_segments(&state, "TPSA: 45.8 is fine");
        assert_eq!(segments[0]["kind"], "property");
        assert_eq!(segments[0]["status"], "optimal");
        assert!(segments[0]["definition"].as_str().unwrap().contains("polar"));
        assert_eq!(segments[1]["kind"], "plain");
    }

    #[test]
    fn test_render_segments_cover_input() {
        let state = AppState::new(&Config::default());
        let text = "LogP: 2.3 with good permeability";
        let segments = render_segments(&state, text);
        let rebuilt: String = segments
            .iter()
            .map(|s| s["text"].as_str().unwrap())
            .collect();
        assert_eq!(rebuilt, text);
    }
}
