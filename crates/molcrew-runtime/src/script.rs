//! Hard-coded message scripts for the simulated crew.
//!
//! Two scripts exist: a parameterized mock run driven by the submitted
//! research parameters, and a richer demo run that also feeds the
//! property-evolution chart.

use std::collections::BTreeMap;

use serde_json::json;

use molcrew_common::params::ResearchParams;
use molcrew_common::stream::{MonitorEvent, PropertySnapshot, ReportData};

/// A scripted run: property snapshots first, then the message sequence.
#[derive(Debug, Clone)]
pub struct RunScript {
    pub goal_label: String,
    pub snapshots: Vec<PropertySnapshot>,
    pub messages: Vec<MonitorEvent>,
}

fn thought(agent: &str, message: &str) -> MonitorEvent {
    MonitorEvent::AgentThought {
        agent: agent.to_string(),
        message: message.to_string(),
        // Stamped by the producer at emission time.
        timestamp: None,
    }
}

fn snapshot(iteration: u32, agent: &str, properties: &[(&str, f64)]) -> PropertySnapshot {
    PropertySnapshot {
        iteration,
        agent: agent.to_string(),
        properties: properties
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect::<BTreeMap<_, _>>(),
    }
}

/// Mock run produced for a form submission.
pub fn mock_script(params: &ResearchParams) -> RunScript {
    let final_smiles =
        "CC(C)(C(=O)O)c1ccc(cc1)C(O)CCCN2CCC(CC2)C(O)(c3ccc(C(=O)O)cc3)c4ccccc4";

    let messages = vec![
        thought(
            "Designer",
            "Analyzing the starting molecule. I will propose modifications to decrease LogP \
             by introducing polar groups. Let me suggest adding a hydroxyl group at position \
             C3. Proposed SMILES: \
             `CC(O)(C(=O)O)c1ccc(cc1)C(O)CCCN2CCC(CC2)C(O)(c3ccccc3)c4ccccc4`",
        ),
        thought(
            "Validator",
            "Validating the proposed structure... The SMILES string is chemically valid. \
             Calculating properties: LogP decreased from 4.8 to 4.2, molecular weight \
             increased slightly to 524.7. Tanimoto similarity is 0.85, within acceptable \
             range. Structure approved for synthesis review.",
        ),
        thought(
            "Synthesizer",
            "Evaluating synthetic feasibility... The addition of a hydroxyl group at the \
             tertiary carbon is synthetically challenging. Recommendation: Consider \
             alternative positions or protecting group strategies. However, the route is \
             feasible with 3-4 steps from the parent compound.",
        ),
        thought(
            "Designer",
            "Based on Synthesizer feedback, I propose an alternative: introducing a \
             carboxylic acid group on the aromatic ring instead. This is synthetically more \
             accessible. New proposal: \
             `CC(C)(C(=O)O)c1ccc(cc1)C(O)CCCN2CCC(CC2)C(O)(c3ccc(C(=O)O)cc3)c4ccccc4`",
        ),
        thought(
            "Validator",
            "Validating revised structure... Excellent! LogP now 3.9, significantly \
             improved. Molecular weight 568.7, still within range. Tanimoto similarity \
             0.82. All constraints satisfied. This is a strong candidate.",
        ),
        MonitorEvent::FinalReport {
            data: ReportData {
                executive_summary: "The research crew successfully optimized the starting \
                    molecule (Fexofenadine) to decrease LogP while maintaining structural \
                    similarity and synthetic feasibility.\n\nKey achievements:\n- LogP \
                    reduced from 4.8 to 3.9 (19% improvement)\n- Maintained Tanimoto \
                    similarity of 0.82 (above 0.7 threshold)\n- Molecular weight increased \
                    to 568.7 (within 200-800 range)\n- Synthetic route feasible with \
                    standard chemistry\n\nThe final optimized molecule introduces a \
                    carboxylic acid group on one of the diphenyl rings, increasing polarity \
                    and reducing lipophilicity without compromising the core pharmacophore."
                    .to_string(),
                final_smiles: final_smiles.to_string(),
                verifiable_data: json!({
                    "starting_molecule": {
                        "smiles": params.smiles,
                        "logP": 4.8,
                        "molecular_weight": 501.7,
                    },
                    "final_molecule": {
                        "smiles": final_smiles,
                        "logP": 3.9,
                        "molecular_weight": 568.7,
                    },
                    "improvements": {
                        "logP_change": -0.9,
                        "logP_percent_change": -18.75,
                    },
                    "constraints_satisfied": {
                        "tanimoto_similarity": 0.82,
                        "min_similarity": params.similarity,
                        "molecular_weight_range": format!("{}-{}", params.mw_min, params.mw_max),
                    },
                }),
            },
        },
    ];

    RunScript {
        goal_label: params.goal.label().to_string(),
        snapshots: Vec::new(),
        messages,
    }
}

/// Demonstration run: fixed message sequence plus chart snapshots.
pub fn demo_script() -> RunScript {
    let final_smiles = "CC(C)c1ccc(cc1)C(O)CCCN2CCC(CC2)C(O)(c3ccccc3)c4ccc(O)cc4";

    let snapshots = vec![
        snapshot(0, "Starting", &[
            ("LogP", 4.8), ("TPSA", 90.5), ("QED", 0.72),
            ("MW", 501.7), ("SA Score", 2.5), ("Tanimoto", 1.0),
        ]),
        snapshot(1, "Designer", &[
            ("LogP", 3.9), ("TPSA", 105.2), ("QED", 0.81),
            ("MW", 485.3), ("SA Score", 2.8), ("Tanimoto", 0.87),
        ]),
        snapshot(2, "Validator", &[
            ("LogP", 3.5), ("TPSA", 98.3), ("QED", 0.85),
            ("MW", 478.9), ("SA Score", 2.6), ("Tanimoto", 0.85),
        ]),
        snapshot(3, "Designer", &[
            ("LogP", 2.3), ("TPSA", 45.8), ("QED", 0.89),
            ("MW", 456.7), ("SA Score", 3.1), ("Tanimoto", 0.82),
        ]),
        snapshot(4, "Validator", &[
            ("LogP", 2.1), ("TPSA", 42.5), ("QED", 0.91),
            ("MW", 448.2), ("SA Score", 3.0), ("Tanimoto", 0.83),
        ]),
    ];

    let messages = vec![
        thought(
            "Designer",
            "Starting analysis of the base molecule. Current properties: LogP: 4.8 (high), \
             TPSA: 90.5 (optimal), QED: 0.72 (excellent drug-likeness). To improve \
             bioavailability, I propose reducing lipophilicity by adding polar groups. \
             Current permeability is adequate according to Lipinski's rule.",
        ),
        thought(
            "Validator",
            "Validating initial proposal. Calculating molecular descriptors: LogP: 3.9 \
             (significant improvement, now in optimal range), TPSA: 105.2 (acceptable for \
             ADME), MW: 485.3, QED: 0.81 (excellent), SA Score: 2.8 (feasible synthesis). \
             Tanimoto: 0.87 maintains structural similarity. Predicted affinity with \
             receptor improves by 15%.",
        ),
        thought(
            "Synthesizer",
            "Evaluating synthetic route. SA Score: 2.8 indicates that synthesis is viable \
             with 3-4 steps. Addition of hydroxyl group significantly improves solubility. \
             Confirmed: feasible route with standard chemistry. Proposed structure: \
             `CC(O)(C(=O)O)c1ccc(cc1)C(O)CCCN2CCC(CC2)C(O)(c3ccccc3)c4ccccc4`",
        ),
        thought(
            "Designer",
            "Refining the design. New variant with better selectivity towards the target. \
             Predicted properties: LogP: 2.3 (optimal for CNS penetration), TPSA: 45.8 \
             (excellent), MW: 456.7, QED: 0.89 (exceptional drug-like). Predicted toxicity \
             profile is low. SMILES: \
             `CC(C)c1ccc(cc1)C(O)CCCN2CCC(CC2)C(O)(c3ccccc3)c4ccc(O)cc4`",
        ),
        thought(
            "Validator",
            "Comprehensive analysis completed. Comparison with original molecule: LogP \
             improved from 4.8 to 2.3 (52% reduction, now optimal), TPSA: 45.8 (ideal for \
             permeability), MW: 456.7 (within range), Tanimoto: 0.82 (similarity \
             preserved). Lipinski violations: 0. SA Score: 3.1 (moderately easy synthesis). \
             Favorable ADME predictions across all parameters.",
        ),
        thought(
            "Synthesizer",
            "Optimized synthetic route identified. SA Score: 3.1 is acceptable. Proposed \
             synthesis in 4 steps: 1) Selective reduction, 2) Alkylation, 3) \
             Cross-coupling, 4) Deprotection. Overall estimated yield: 45-55%. Improved \
             solubility will facilitate purification and pharmaceutical formulation.",
        ),
        MonitorEvent::FinalReport {
            data: ReportData {
                executive_summary: "The research team successfully optimized the initial \
                    molecule to improve its pharmacological profile.\n\nKey achievements:\n\
                    - LogP reduced from 4.8 to 2.3 (52% improvement, now in optimal range)\n\
                    - TPSA optimized to 45.8 (excellent for permeability)\n\
                    - QED improved from 0.72 to 0.89 (exceptional drug-likeness)\n\
                    - Tanimoto 0.82 maintains the essential pharmacophore\n\
                    - SA Score 3.1 indicates feasible synthesis\n\
                    - 100% compliance with Lipinski's rule\n\
                    - Improved ADME and selectivity\n\nThe final molecule presents superior \
                    pharmacological profile with optimized bioavailability and \
                    permeability, maintaining low predicted toxicity."
                    .to_string(),
                final_smiles: final_smiles.to_string(),
                verifiable_data: json!({
                    "starting_molecule": {
                        "smiles": "CC(C)(C(=O)O)c1ccc(cc1)C(O)CCCN2CCC(CC2)C(O)(c3ccccc3)c4ccccc4",
                        "LogP": 4.8,
                        "TPSA": 90.5,
                        "MW": 501.7,
                        "QED": 0.72,
                    },
                    "final_molecule": {
                        "smiles": final_smiles,
                        "LogP": 2.3,
                        "TPSA": 45.8,
                        "MW": 456.7,
                        "QED": 0.89,
                        "SA Score": 3.1,
                    },
                    "improvements": {
                        "LogP_reduction": -2.5,
                        "LogP_percent_improvement": 52.1,
                        "TPSA_optimization": -44.7,
                        "QED_improvement": 0.17,
                    },
                    "constraints_satisfied": {
                        "tanimoto_similarity": 0.82,
                        "lipinski_violations": 0,
                        "synthetic_accessibility": "Feasible (SA Score 3.1)",
                    },
                }),
            },
        },
    ];

    RunScript {
        goal_label: "Demonstration".to_string(),
        snapshots,
        messages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use molcrew_common::params::OptimizationGoal;

    #[test]
    fn test_demo_script_shape() {
        let script = demo_script();
        assert_eq!(script.snapshots.len(), 5);
        assert_eq!(script.messages.len(), 7);
        assert!(matches!(
            script.messages.last(),
            Some(MonitorEvent::FinalReport { .. })
        ));
        // Snapshot iterations are dense from zero.
        for (i, snap) in script.snapshots.iter().enumerate() {
            assert_eq!(snap.iteration as usize, i);
        }
    }

    #[test]
    fn test_mock_script_carries_params() {
        let params = ResearchParams {
            smiles: "CC(C)(C(=O)O)c1ccccc1".to_string(),
            goal: OptimizationGoal::DecreaseLogp,
            similarity: 0.7,
            mw_min: 200.0,
            mw_max: 800.0,
        };
        let script = mock_script(&params);
        assert_eq!(script.messages.len(), 6);
        let Some(MonitorEvent::FinalReport { data }) = script.messages.last() else {
            panic!("last message must be the final report");
        };
        let constraints = &data.verifiable_data["constraints_satisfied"];
        let tanimoto = constraints["tanimoto_similarity"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&tanimoto));
        assert_eq!(constraints["min_similarity"].as_f64().unwrap(), 0.7);
        assert_eq!(
            data.verifiable_data["starting_molecule"]["smiles"],
            params.smiles
        );
    }
}
