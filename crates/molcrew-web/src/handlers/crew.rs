//! Control-panel submissions: start a crew run or the demo sequence.

use axum::{extract::State, Form, Json};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use molcrew_common::params::{OptimizationGoal, ResearchParams};

use crate::state::SharedState;

// ── Form input ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CrewForm {
    pub smiles: String,
    pub goal: String,
    pub similarity: f64,
    pub mw_min: f64,
    pub mw_max: f64,
}

// ── Handlers ──────────────────────────────────────────────────────────────────

pub async fn run_crew(
    State(state): State<SharedState>,
    Form(form): Form<CrewForm>,
) -> Json<serde_json::Value> {
    let Some(goal) = OptimizationGoal::parse(&form.goal) else {
        return Json(json!({
            "status": "error",
            "error": format!("unknown optimization goal: {}", form.goal),
        }));
    };

    let params = ResearchParams {
        smiles: form.smiles,
        goal,
        similarity: form.similarity,
        mw_min: form.mw_min,
        mw_max: form.mw_max,
    };

    match state.runs.start_crew(params) {
        Ok(run_id) => {
            info!("research crew started: run {}", run_id);
            Json(json!({ "status": "started", "run_id": run_id }))
        }
        Err(e) => Json(json!({ "status": "error", "error": e.to_string() })),
    }
}

pub async fn run_demo(State(state): State<SharedState>) -> Json<serde_json::Value> {
    let run_id = state.runs.start_demo();
    info!("demo run started: run {}", run_id);
    Json(json!({ "status": "started", "run_id": run_id }))
}
