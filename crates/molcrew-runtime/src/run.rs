//! Run lifecycle: one active producer at a time, superseded on restart.

use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tracing::info;
use uuid::Uuid;

use molcrew_common::error::Result;
use molcrew_common::params::ResearchParams;
use molcrew_common::stream::RunEvent;

use crate::producer::{self, ProducerCtx};
use crate::script::{self, RunScript};

/// Fixed delays between emitted events.
#[derive(Debug, Clone, Copy)]
pub struct StreamPacing {
    pub message_delay: Duration,
    pub snapshot_delay: Duration,
}

impl Default for StreamPacing {
    fn default() -> Self {
        Self {
            message_delay: Duration::from_millis(2500),
            snapshot_delay: Duration::from_millis(1500),
        }
    }
}

/// In-memory log of the current run, read by the page/API handlers.
///
/// Written only by the single producer task (and the manager on reset), so a
/// plain RwLock suffices. After a cancellation the log keeps every event up
/// to the cancellation point until the next run clears it.
#[derive(Debug, Clone, Default)]
pub struct RunLog {
    pub run_id: Option<Uuid>,
    pub params: Option<ResearchParams>,
    pub events: Vec<RunEvent>,
    pub running: bool,
}

struct ActiveRun {
    run_id: Uuid,
    cancel: watch::Sender<bool>,
}

/// Owns the broadcast channel and the single active run.
pub struct RunManager {
    event_tx: broadcast::Sender<RunEvent>,
    log: Arc<RwLock<RunLog>>,
    active: Mutex<Option<ActiveRun>>,
    pacing: StreamPacing,
}

impl RunManager {
    pub fn new(pacing: StreamPacing, channel_capacity: usize) -> Self {
        let (event_tx, _) = broadcast::channel(channel_capacity.max(1));
        Self {
            event_tx,
            log: Arc::new(RwLock::new(RunLog::default())),
            active: Mutex::new(None),
            pacing,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RunEvent> {
        self.event_tx.subscribe()
    }

    /// Start a mock run for a validated form submission.
    pub fn start_crew(&self, params: ResearchParams) -> Result<Uuid> {
        params.validate()?;
        let script = script::mock_script(&params);
        Ok(self.start(script, Some(params)))
    }

    /// Start the demonstration run.
    pub fn start_demo(&self) -> Uuid {
        self.start(script::demo_script(), None)
    }

    /// A copy of the current run log.
    pub fn log_snapshot(&self) -> RunLog {
        self.log.read().expect("run log lock").clone()
    }

    pub fn is_running(&self) -> bool {
        self.log.read().expect("run log lock").running
    }

    fn start(&self, script: RunScript, params: Option<ResearchParams>) -> Uuid {
        let run_id = Uuid::new_v4();
        let mut active = self.active.lock().expect("run manager lock");

        if let Some(prev) = active.take() {
            info!("run {} superseded by {}", prev.run_id, run_id);
            // The producer may already have finished; that is fine.
            let _ = prev.cancel.send(true);
        }

        {
            let mut log = self.log.write().expect("run log lock");
            *log = RunLog {
                run_id: Some(run_id),
                params,
                events: Vec::new(),
                running: true,
            };
        }

        let (cancel_tx, cancel_rx) = watch::channel(false);
        let ctx = ProducerCtx {
            run_id,
            event_tx: self.event_tx.clone(),
            log: Arc::clone(&self.log),
            cancel: cancel_rx,
            pacing: self.pacing,
        };
        info!("starting run {} ({})", run_id, script.goal_label);
        tokio::spawn(producer::drive(script, ctx));

        *active = Some(ActiveRun { run_id, cancel: cancel_tx });
        run_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use molcrew_common::params::OptimizationGoal;
    use molcrew_common::stream::MonitorEvent;

    fn fast_pacing() -> StreamPacing {
        StreamPacing {
            message_delay: Duration::from_millis(1),
            snapshot_delay: Duration::from_millis(1),
        }
    }

    fn params() -> ResearchParams {
        ResearchParams {
            smiles: "CC(C)(C(=O)O)c1ccc(cc1)C(O)CCCN2CCC(CC2)C(O)(c3ccccc3)c4ccccc4"
                .to_string(),
            goal: OptimizationGoal::DecreaseLogp,
            similarity: 0.7,
            mw_min: 200.0,
            mw_max: 800.0,
        }
    }

    async fn collect_run(
        rx: &mut broadcast::Receiver<RunEvent>,
        run_id: Uuid,
    ) -> Vec<RunEvent> {
        let mut events = Vec::new();
        loop {
            let ev = tokio::time::timeout(Duration::from_secs(5), rx.recv())
                .await
                .expect("producer stalled")
                .expect("broadcast closed");
            if ev.run_id != run_id {
                continue;
            }
            let finished = matches!(ev.event, MonitorEvent::RunFinished {});
            events.push(ev);
            if finished {
                return events;
            }
        }
    }

    #[tokio::test]
    async fn test_crew_run_ends_in_final_report() {
        let manager = RunManager::new(fast_pacing(), 64);
        let mut rx = manager.subscribe();
        let run_id = manager.start_crew(params()).unwrap();

        let events = collect_run(&mut rx, run_id).await;

        // seq is strictly increasing from zero.
        for (i, ev) in events.iter().enumerate() {
            assert_eq!(ev.seq, i as u64);
        }
        assert!(matches!(events.first().unwrap().event, MonitorEvent::RunStarted { .. }));

        let report = events
            .iter()
            .find_map(|ev| match &ev.event {
                MonitorEvent::FinalReport { data } => Some(data),
                _ => None,
            })
            .expect("run must end with a final report");
        let tanimoto = report.verifiable_data["constraints_satisfied"]["tanimoto_similarity"]
            .as_f64()
            .unwrap();
        assert!((0.0..=1.0).contains(&tanimoto));

        assert!(!manager.is_running());
        let log = manager.log_snapshot();
        assert_eq!(log.run_id, Some(run_id));
        assert_eq!(log.events.len(), events.len());
    }

    #[tokio::test]
    async fn test_crew_run_rejects_invalid_params() {
        let manager = RunManager::new(fast_pacing(), 64);
        let mut bad = params();
        bad.smiles = String::new();
        assert!(manager.start_crew(bad).is_err());
        assert!(!manager.is_running());
    }

    #[tokio::test]
    async fn test_new_run_supersedes_previous() {
        // Slow first run so it is still mid-stream when superseded.
        let manager = RunManager::new(
            StreamPacing {
                message_delay: Duration::from_millis(200),
                snapshot_delay: Duration::from_millis(200),
            },
            64,
        );
        let first = manager.start_demo();
        tokio::time::sleep(Duration::from_millis(10)).await;

        let mut rx = manager.subscribe();
        let second = manager.start_crew(params()).unwrap();
        assert_ne!(first, second);

        let events = collect_run(&mut rx, second).await;
        assert!(matches!(events.last().unwrap().event, MonitorEvent::RunFinished {}));

        // Only the successor's events are in the log.
        let log = manager.log_snapshot();
        assert_eq!(log.run_id, Some(second));
        assert!(log.events.iter().all(|ev| ev.run_id == second));
    }

    #[tokio::test]
    async fn test_demo_run_emits_snapshots_before_messages() {
        let manager = RunManager::new(fast_pacing(), 64);
        let mut rx = manager.subscribe();
        let run_id = manager.start_demo();

        let events = collect_run(&mut rx, run_id).await;
        let first_snapshot = events
            .iter()
            .position(|ev| matches!(ev.event, MonitorEvent::PropertySnapshot { .. }))
            .expect("demo emits snapshots");
        let first_thought = events
            .iter()
            .position(|ev| matches!(ev.event, MonitorEvent::AgentThought { .. }))
            .expect("demo emits thoughts");
        assert!(first_snapshot < first_thought);

        let snapshot_count = events
            .iter()
            .filter(|ev| matches!(ev.event, MonitorEvent::PropertySnapshot { .. }))
            .count();
        assert_eq!(snapshot_count, 5);
    }
}
