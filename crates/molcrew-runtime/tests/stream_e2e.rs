//! End-to-end check of a crew run: form params in, ordered event stream out.

use std::time::Duration;

use molcrew_common::params::{OptimizationGoal, ResearchParams};
use molcrew_common::stream::MonitorEvent;
use molcrew_runtime::{RunManager, StreamPacing};

#[tokio::test]
async fn test_decrease_logp_run_produces_verifiable_report() {
    let manager = RunManager::new(
        StreamPacing {
            message_delay: Duration::from_millis(1),
            snapshot_delay: Duration::from_millis(1),
        },
        64,
    );

    let mut rx = manager.subscribe();
    let run_id = manager
        .start_crew(ResearchParams {
            smiles: "CC(C)(C(=O)O)c1ccc(cc1)C(O)CCCN2CCC(CC2)C(O)(c3ccccc3)c4ccccc4"
                .to_string(),
            goal: OptimizationGoal::DecreaseLogp,
            similarity: 0.7,
            mw_min: 200.0,
            mw_max: 800.0,
        })
        .unwrap();

    let mut thoughts = 0;
    let mut report = None;
    let mut last_seq = None;

    loop {
        let ev = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("stream stalled")
            .expect("broadcast closed");
        assert_eq!(ev.run_id, run_id);

        // Ordering guarantee: seq strictly increases.
        if let Some(prev) = last_seq {
            assert!(ev.seq > prev, "seq went from {} to {}", prev, ev.seq);
        }
        last_seq = Some(ev.seq);

        match ev.event {
            MonitorEvent::AgentThought { timestamp, .. } => {
                assert!(timestamp.is_some(), "thoughts are stamped at emission");
                thoughts += 1;
            }
            MonitorEvent::FinalReport { data } => report = Some(data),
            MonitorEvent::RunFinished {} => break,
            _ => {}
        }
    }

    assert_eq!(thoughts, 5);
    let report = report.expect("run must end in a final report");
    let tanimoto = report.verifiable_data["constraints_satisfied"]["tanimoto_similarity"]
        .as_f64()
        .expect("tanimoto similarity is a number");
    assert!((0.0..=1.0).contains(&tanimoto));
    assert_eq!(
        report.verifiable_data["constraints_satisfied"]["molecular_weight_range"],
        "200-800"
    );
}
