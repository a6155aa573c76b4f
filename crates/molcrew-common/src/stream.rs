//! Wire types for the simulated agent message stream.
//!
//! `MonitorEvent` is the envelope the lab monitor consumes; `RunEvent` wraps
//! it with the run id and a per-run monotonic sequence number so consumers
//! can detect stale events after a run has been superseded.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Final report payload emitted as the last message of a successful run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    pub executive_summary: String,
    pub final_smiles: String,
    /// Free-form mapping of scalars and nested mappings backing the summary.
    pub verifiable_data: serde_json::Value,
}

/// One point of the property-evolution chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySnapshot {
    pub iteration: u32,
    /// Agent responsible for this iteration ("Starting" for iteration 0).
    pub agent: String,
    /// Property key (range-table vocabulary) to value.
    pub properties: BTreeMap<String, f64>,
}

/// Events pushed to monitor clients.
///
/// `AgentThought` and `FinalReport` form the stream message envelope proper;
/// the remaining variants carry snapshots, run lifecycle, and notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MonitorEvent {
    AgentThought {
        agent: String,
        message: String,
        /// Milliseconds since the Unix epoch, stamped at emission time.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<i64>,
    },
    FinalReport {
        data: ReportData,
    },
    PropertySnapshot {
        snapshot: PropertySnapshot,
    },
    RunStarted {
        goal: String,
    },
    RunFinished {},
    Notification {
        level: String,
        message: String,
    },
}

/// A `MonitorEvent` wrapped with run ordering metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunEvent {
    pub run_id: Uuid,
    /// Strictly increasing within a run, starting at 0.
    pub seq: u64,
    #[serde(flatten)]
    pub event: MonitorEvent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_thought_envelope_shape() {
        let ev = MonitorEvent::AgentThought {
            agent: "Designer".to_string(),
            message: "Analyzing the starting molecule.".to_string(),
            timestamp: Some(1_700_000_000_000),
        };
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["type"], "agent_thought");
        assert_eq!(json["agent"], "Designer");
        assert!(json["message"].is_string());
    }

    #[test]
    fn test_final_report_envelope_shape() {
        let ev = MonitorEvent::FinalReport {
            data: ReportData {
                executive_summary: "Done.".to_string(),
                final_smiles: "CCO".to_string(),
                verifiable_data: serde_json::json!({
                    "constraints_satisfied": { "tanimoto_similarity": 0.82 }
                }),
            },
        };
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["type"], "final_report");
        assert_eq!(
            json["data"]["verifiable_data"]["constraints_satisfied"]["tanimoto_similarity"],
            0.82
        );
    }

    #[test]
    fn test_run_event_flattens_envelope() {
        let ev = RunEvent {
            run_id: Uuid::new_v4(),
            seq: 3,
            event: MonitorEvent::RunFinished {},
        };
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["seq"], 3);
        assert_eq!(json["type"], "run_finished");
    }

    #[test]
    fn test_timestamp_omitted_when_absent() {
        let ev = MonitorEvent::AgentThought {
            agent: "Validator".to_string(),
            message: "ok".to_string(),
            timestamp: None,
        };
        let json = serde_json::to_value(&ev).unwrap();
        assert!(json.get("timestamp").is_none());
    }
}
