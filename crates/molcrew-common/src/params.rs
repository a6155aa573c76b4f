//! Research run parameters submitted by the control form.

use serde::{Deserialize, Serialize};

use crate::error::{MolcrewError, Result};

/// Optimization goal selected in the control form.
///
/// Grouped the same way the form presents them: physicochemical properties,
/// structural features, and the broader "big bet" goals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationGoal {
    DecreaseLogp,
    IncreaseLogp,
    DecreaseTpsa,
    IncreaseTpsa,
    DecreaseMw,
    AddAromatic,
    RemoveAromatic,
    IncreaseHbd,
    DecreaseHbd,
    IncreaseHba,
    DecreaseHba,
    DecreaseRotatable,
    IncreaseRotatable,
    Lipinski,
    DecreaseToxicity,
}

impl OptimizationGoal {
    /// Serialize to the form value string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptimizationGoal::DecreaseLogp      => "decrease_logp",
            OptimizationGoal::IncreaseLogp      => "increase_logp",
            OptimizationGoal::DecreaseTpsa      => "decrease_tpsa",
            OptimizationGoal::IncreaseTpsa      => "increase_tpsa",
            OptimizationGoal::DecreaseMw        => "decrease_mw",
            OptimizationGoal::AddAromatic       => "add_aromatic",
            OptimizationGoal::RemoveAromatic    => "remove_aromatic",
            OptimizationGoal::IncreaseHbd       => "increase_hbd",
            OptimizationGoal::DecreaseHbd       => "decrease_hbd",
            OptimizationGoal::IncreaseHba       => "increase_hba",
            OptimizationGoal::DecreaseHba       => "decrease_hba",
            OptimizationGoal::DecreaseRotatable => "decrease_rotatable",
            OptimizationGoal::IncreaseRotatable => "increase_rotatable",
            OptimizationGoal::Lipinski          => "lipinski",
            OptimizationGoal::DecreaseToxicity  => "decrease_toxicity",
        }
    }

    /// Parse from the form value string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "decrease_logp"      => Some(OptimizationGoal::DecreaseLogp),
            "increase_logp"      => Some(OptimizationGoal::IncreaseLogp),
            "decrease_tpsa"      => Some(OptimizationGoal::DecreaseTpsa),
            "increase_tpsa"      => Some(OptimizationGoal::IncreaseTpsa),
            "decrease_mw"        => Some(OptimizationGoal::DecreaseMw),
            "add_aromatic"       => Some(OptimizationGoal::AddAromatic),
            "remove_aromatic"    => Some(OptimizationGoal::RemoveAromatic),
            "increase_hbd"       => Some(OptimizationGoal::IncreaseHbd),
            "decrease_hbd"       => Some(OptimizationGoal::DecreaseHbd),
            "increase_hba"       => Some(OptimizationGoal::IncreaseHba),
            "decrease_hba"       => Some(OptimizationGoal::DecreaseHba),
            "decrease_rotatable" => Some(OptimizationGoal::DecreaseRotatable),
            "increase_rotatable" => Some(OptimizationGoal::IncreaseRotatable),
            "lipinski"           => Some(OptimizationGoal::Lipinski),
            "decrease_toxicity"  => Some(OptimizationGoal::DecreaseToxicity),
            _                    => None,
        }
    }

    /// Human-readable label shown in the form and in run banners.
    pub fn label(&self) -> &'static str {
        match self {
            OptimizationGoal::DecreaseLogp      => "Decrease LogP (Make more hydrophilic)",
            OptimizationGoal::IncreaseLogp      => "Increase LogP (Make more lipophilic)",
            OptimizationGoal::DecreaseTpsa      => "Decrease Polar Surface Area (TPSA)",
            OptimizationGoal::IncreaseTpsa      => "Increase Polar Surface Area (TPSA)",
            OptimizationGoal::DecreaseMw        => "Decrease Molecular Weight",
            OptimizationGoal::AddAromatic       => "Add exactly one Aromatic Ring",
            OptimizationGoal::RemoveAromatic    => "Remove an Aromatic Ring",
            OptimizationGoal::IncreaseHbd       => "Increase Hydrogen Bond Donors",
            OptimizationGoal::DecreaseHbd       => "Decrease Hydrogen Bond Donors",
            OptimizationGoal::IncreaseHba       => "Increase Hydrogen Bond Acceptors",
            OptimizationGoal::DecreaseHba       => "Decrease Hydrogen Bond Acceptors",
            OptimizationGoal::DecreaseRotatable => "Decrease Rotatable Bonds (Make more rigid)",
            OptimizationGoal::IncreaseRotatable => "Increase Rotatable Bonds (Make more flexible)",
            OptimizationGoal::Lipinski          => "Improve 'Lipinski's Rule of 5' Profile",
            OptimizationGoal::DecreaseToxicity  => "Decrease Predicted Toxicity",
        }
    }

    /// All goals, in form display order.
    pub fn all() -> &'static [OptimizationGoal] {
        &[
            OptimizationGoal::DecreaseLogp,
            OptimizationGoal::IncreaseLogp,
            OptimizationGoal::DecreaseTpsa,
            OptimizationGoal::IncreaseTpsa,
            OptimizationGoal::DecreaseMw,
            OptimizationGoal::AddAromatic,
            OptimizationGoal::RemoveAromatic,
            OptimizationGoal::IncreaseHbd,
            OptimizationGoal::DecreaseHbd,
            OptimizationGoal::IncreaseHba,
            OptimizationGoal::DecreaseHba,
            OptimizationGoal::DecreaseRotatable,
            OptimizationGoal::IncreaseRotatable,
            OptimizationGoal::Lipinski,
            OptimizationGoal::DecreaseToxicity,
        ]
    }
}

/// Parameters for one research run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchParams {
    /// Starting structure in SMILES notation. Not validated chemically.
    pub smiles: String,
    pub goal: OptimizationGoal,
    /// Minimum Tanimoto similarity the crew must preserve, in [0, 1].
    pub similarity: f64,
    pub mw_min: f64,
    pub mw_max: f64,
}

impl ResearchParams {
    /// Validate form-level constraints.
    ///
    /// `mw_min <= mw_max` is expected but deliberately not enforced; both
    /// bounds must merely be non-negative finite numbers.
    pub fn validate(&self) -> Result<()> {
        if self.smiles.trim().is_empty() {
            return Err(MolcrewError::InvalidParams(
                "starting structure must not be empty".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.similarity) {
            return Err(MolcrewError::InvalidParams(format!(
                "similarity must be in [0, 1], got {}",
                self.similarity
            )));
        }
        for (name, v) in [("mw_min", self.mw_min), ("mw_max", self.mw_max)] {
            if !v.is_finite() || v < 0.0 {
                return Err(MolcrewError::InvalidParams(format!(
                    "{} must be a non-negative number, got {}",
                    name, v
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_roundtrip() {
        for goal in OptimizationGoal::all() {
            assert_eq!(OptimizationGoal::parse(goal.as_str()), Some(*goal));
        }
        assert_eq!(OptimizationGoal::parse("make_it_better"), None);
    }

    fn valid_params() -> ResearchParams {
        ResearchParams {
            smiles: "CC(C)(C(=O)O)c1ccccc1".to_string(),
            goal: OptimizationGoal::DecreaseLogp,
            similarity: 0.7,
            mw_min: 200.0,
            mw_max: 800.0,
        }
    }

    #[test]
    fn test_valid_params_pass() {
        assert!(valid_params().validate().is_ok());
    }

    #[test]
    fn test_empty_smiles_rejected() {
        let mut p = valid_params();
        p.smiles = "   ".to_string();
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_similarity_out_of_range_rejected() {
        let mut p = valid_params();
        p.similarity = 1.2;
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_inverted_mw_range_is_not_rejected() {
        let mut p = valid_params();
        p.mw_min = 800.0;
        p.mw_max = 200.0;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_negative_mw_rejected() {
        let mut p = valid_params();
        p.mw_min = -1.0;
        assert!(p.validate().is_err());
    }
}
