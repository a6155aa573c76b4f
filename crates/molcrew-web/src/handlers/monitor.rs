//! Lab monitor page and its data feeds.

use axum::{extract::State, response::Html, Json};
use serde_json::{json, Value};

use molcrew_common::params::OptimizationGoal;
use molcrew_common::stream::MonitorEvent;

use crate::handlers::annotate::render_segments;
use crate::state::SharedState;

/// Navigation HTML template shared across all pages
pub const NAV_HTML: &str = include_str!("../../templates/nav.html");

pub async fn monitor_page(State(_state): State<SharedState>) -> Html<String> {
    Html(render_monitor())
}

/// Current run log with every agent message annotated for display.
///
/// Segments are produced on the fly per request; nothing annotated is
/// persisted.
pub async fn api_messages(State(state): State<SharedState>) -> Json<Value> {
    let log = state.runs.log_snapshot();

    let mut messages: Vec<Value> = Vec::new();
    for ev in &log.events {
        match &ev.event {
            MonitorEvent::AgentThought { agent, message, timestamp } => {
                let structures: Vec<Value> = state
                    .extractor
                    .extract(message)
                    .into_iter()
                    .map(|smiles| {
                        json!({ "image_url": state.image_url(&smiles), "smiles": smiles })
                    })
                    .collect();
                messages.push(json!({
                    "type": "agent_thought",
                    "agent": agent,
                    "timestamp": timestamp,
                    "segments": render_segments(&state, message),
                    "structures": structures,
                }));
            }
            MonitorEvent::FinalReport { data } => {
                messages.push(json!({
                    "type": "final_report",
                    "data": data,
                    "summary_segments": render_segments(&state, &data.executive_summary),
                    "final_structure": {
                        "smiles": data.final_smiles,
                        "image_url": state.image_url(&data.final_smiles),
                    },
                }));
            }
            _ => {}
        }
    }

    Json(json!({
        "run_id": log.run_id,
        "running": log.running,
        "messages": messages,
    }))
}

/// Property snapshots of the current run, for the evolution chart.
pub async fn api_snapshots(State(state): State<SharedState>) -> Json<Value> {
    let log = state.runs.log_snapshot();
    let snapshots: Vec<Value> = log
        .events
        .iter()
        .filter_map(|ev| match &ev.event {
            MonitorEvent::PropertySnapshot { snapshot } => {
                serde_json::to_value(snapshot).ok()
            }
            _ => None,
        })
        .collect();

    Json(json!({ "run_id": log.run_id, "snapshots": snapshots }))
}

// ── Renderer ──────────────────────────────────────────────────────────────────

fn render_monitor() -> String {
    let goal_options: String = OptimizationGoal::all()
        .iter()
        .map(|goal| {
            format!(
                r#"<option value="{}">{}</option>"#,
                goal.as_str(),
                goal.label()
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Lab Monitor — molcrew</title>
    <link rel="stylesheet" href="/static/css/main.css?v=1.0.0">
</head>
<body>
{}
<main class="layout">
    <!-- Control panel -->
    <section class="card">
        <div class="card-header">
            <h2>Control Panel</h2>
            <p class="text-muted">Define your molecular optimization task</p>
        </div>
        <form id="crew-form" class="panel-body">
            <label class="field-label" for="smiles">Enter Starting SMILES String</label>
            <div class="field-row">
                <input type="text" id="smiles" name="smiles" class="input mono"
                       placeholder="Enter SMILES notation..." autocomplete="off">
                <button type="button" id="load-example" class="btn btn-outline btn-sm">
                    Load Fexofenadine Example
                </button>
            </div>

            <label class="field-label" for="goal">Optimization Goal</label>
            <select id="goal" name="goal" class="input">
                <option value="">Select optimization goal...</option>
                {}
            </select>

            <h3 class="section-label">Guardrails</h3>
            <label class="field-label" for="similarity">
                Minimum Tanimoto Similarity
                <span id="similarity-value" class="mono text-muted">0.70</span>
            </label>
            <input type="range" id="similarity" name="similarity"
                   min="0" max="1" step="0.05" value="0.7">

            <label class="field-label">Molecular Weight Range</label>
            <div class="field-row">
                <input type="number" id="mw-min" name="mw_min" class="input" value="200" min="0">
                <input type="number" id="mw-max" name="mw_max" class="input" value="800" min="0">
            </div>

            <div class="field-row">
                <button type="submit" id="run-btn" class="btn btn-primary" disabled>
                    Run Research Crew
                </button>
                <button type="button" id="demo-btn" class="btn btn-outline">Demo Mode</button>
            </div>
        </form>
    </section>

    <!-- Lab monitor -->
    <section class="card">
        <div class="card-header">
            <h2>Lab Monitor</h2>
            <p class="text-muted">Real-time agent conversation</p>
        </div>
        <div id="monitor" class="monitor-body">
            <p class="monitor-empty">
                Configure your research parameters and click "Run Research Crew" to begin
            </p>
        </div>
    </section>

    <!-- Property evolution chart -->
    <section class="card card-wide" id="chart-card" style="display:none;">
        <div class="card-header">
            <h2>Property Evolution</h2>
            <p class="text-muted">Track how molecular properties change through optimization iterations</p>
        </div>
        <div id="chart-legend" class="chart-legend"></div>
        <svg id="chart" class="chart" viewBox="0 0 800 300" preserveAspectRatio="none"></svg>
    </section>

    <div id="notice" class="notice" style="display:none;"></div>
</main>
<script src="/static/js/monitor.js"></script>
</body>
</html>"#,
        NAV_HTML, goal_options
    )
}
