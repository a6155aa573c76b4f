//! Molecule image lookup — resolves a structure string to a placeholder
//! image URL. Never calls a real rendering service.

use axum::{extract::{Query, State}, Json};
use serde::Deserialize;
use serde_json::json;

use crate::state::SharedState;

#[derive(Deserialize)]
pub struct VisualizeQuery {
    #[serde(default)]
    pub smiles: String,
}

pub async fn api_visualize(
    State(state): State<SharedState>,
    Query(query): Query<VisualizeQuery>,
) -> Json<serde_json::Value> {
    if query.smiles.trim().is_empty() {
        return Json(json!({ "status": "error", "error": "smiles must not be empty" }));
    }
    Json(json!({
        "status": "ok",
        "smiles": query.smiles,
        "image_url": state.image_url(&query.smiles),
    }))
}
