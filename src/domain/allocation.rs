//! Phase-to-allocation mapping.
//!
//! One unified fractional table with explicit coverage of every phase label.
//! The transitional fallback mirrors the efficiency-divergence posture.

use super::phase::Phase;
use super::tier::Tier;

/// Fractional portfolio weights across the five tiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierWeights {
    weights: [f64; 5],
}

impl TierWeights {
    pub const ZERO: TierWeights = TierWeights { weights: [0.0; 5] };

    pub const fn new(weights: [f64; 5]) -> Self {
        TierWeights { weights }
    }

    pub fn get(&self, tier: Tier) -> f64 {
        self.weights[tier.index()]
    }

    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    pub fn as_percentages(&self) -> [f64; 5] {
        let mut out = [0.0; 5];
        for (i, w) in self.weights.iter().enumerate() {
            out[i] = w * 100.0;
        }
        out
    }
}

/// Target weights for a phase. Total over all phase labels; every row sums
/// to 1.0.
pub fn allocation_for(phase: Phase) -> TierWeights {
    match phase {
        Phase::Expansion => TierWeights::new([0.35, 0.30, 0.15, 0.10, 0.10]),
        // Gradual exit from expansion: trim the accelerator sleeve, raise cash.
        Phase::ExpansionToDivergence => TierWeights::new([0.35, 0.25, 0.15, 0.10, 0.15]),
        Phase::EfficiencyDivergence => TierWeights::new([0.30, 0.15, 0.20, 0.20, 0.15]),
        Phase::Monetization => TierWeights::new([0.40, 0.10, 0.15, 0.20, 0.15]),
        Phase::Contraction => TierWeights::new([0.20, 0.05, 0.20, 0.30, 0.25]),
        // Unclassified quarters hold the divergence posture.
        Phase::Transitional => allocation_for(Phase::EfficiencyDivergence),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn every_phase_sums_to_one() {
        for phase in Phase::ALL {
            let weights = allocation_for(phase);
            assert_relative_eq!(weights.sum(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn weights_are_non_negative() {
        for phase in Phase::ALL {
            let weights = allocation_for(phase);
            for tier in Tier::ALL {
                assert!(weights.get(tier) >= 0.0, "{phase} {tier}");
            }
        }
    }

    #[test]
    fn expansion_weights() {
        let w = allocation_for(Phase::Expansion);
        assert_relative_eq!(w.get(Tier::CorePlatform), 0.35);
        assert_relative_eq!(w.get(Tier::AiAccelerator), 0.30);
        assert_relative_eq!(w.get(Tier::CashEquivalent), 0.10);
    }

    #[test]
    fn transition_trims_accelerator_and_raises_cash() {
        let expansion = allocation_for(Phase::Expansion);
        let transition = allocation_for(Phase::ExpansionToDivergence);
        assert_relative_eq!(
            transition.get(Tier::AiAccelerator),
            expansion.get(Tier::AiAccelerator) - 0.05
        );
        assert_relative_eq!(
            transition.get(Tier::CashEquivalent),
            expansion.get(Tier::CashEquivalent) + 0.05
        );
    }

    #[test]
    fn transitional_matches_divergence_posture() {
        assert_eq!(
            allocation_for(Phase::Transitional),
            allocation_for(Phase::EfficiencyDivergence)
        );
    }

    #[test]
    fn percentages_scale_by_one_hundred() {
        let pct = allocation_for(Phase::Contraction).as_percentages();
        assert_relative_eq!(pct[0], 20.0);
        assert_relative_eq!(pct[4], 25.0);
    }
}
