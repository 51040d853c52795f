//! Market-cycle phase labels and the ordered classification rules.

use std::fmt;

use super::indicators::IndicatorSet;

/// Discrete market-cycle label driving the target allocation.
///
/// `ExpansionToDivergence` is the curated transition between expansion and
/// efficiency divergence; it is only ever assigned by the quarterly signal
/// table, never by [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Expansion,
    ExpansionToDivergence,
    EfficiencyDivergence,
    Monetization,
    Contraction,
    Transitional,
}

impl Phase {
    pub const ALL: [Phase; 6] = [
        Phase::Expansion,
        Phase::ExpansionToDivergence,
        Phase::EfficiencyDivergence,
        Phase::Monetization,
        Phase::Contraction,
        Phase::Transitional,
    ];

    /// Short code used in logs and chart annotations.
    pub fn code(&self) -> &'static str {
        match self {
            Phase::Expansion => "Phase 1",
            Phase::ExpansionToDivergence => "Phase 1>2",
            Phase::EfficiencyDivergence => "Phase 2",
            Phase::Monetization => "Phase 3",
            Phase::Contraction => "Phase 4",
            Phase::Transitional => "Transitional",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Expansion => "Expansion",
            Phase::ExpansionToDivergence => "Expansion-to-Divergence Transition",
            Phase::EfficiencyDivergence => "Efficiency Divergence",
            Phase::Monetization => "Monetization",
            Phase::Contraction => "Contraction",
            Phase::Transitional => "Transitional",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classify a set of indicator scores into a phase.
///
/// Ordered first-match rules; total over all real-valued inputs. The
/// inequalities are exact: boundary values such as a CapEx momentum of
/// exactly 20 fall through strict `>` comparisons.
pub fn classify(ind: &IndicatorSet) -> Phase {
    let cm = ind.capex_momentum;
    let dr = ind.demand_realization;
    let mq = ind.margin_quality;
    let lp = ind.liquidity_pressure;
    let pc = ind.price_confirmation;

    if cm > 20.0 && dr > 30.0 && mq >= 0.0 && pc < 50.0 {
        Phase::Expansion
    } else if cm > 20.0 && dr < 30.0 {
        Phase::EfficiencyDivergence
    } else if (0.0..=10.0).contains(&cm) && mq > 0.0 {
        Phase::Monetization
    } else if cm < 0.0 && dr < 20.0 && lp > 0.0 {
        Phase::Contraction
    } else {
        Phase::Transitional
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ind(cm: f64, dr: f64, mq: f64, lp: f64, pc: f64) -> IndicatorSet {
        IndicatorSet {
            capex_momentum: cm,
            demand_realization: dr,
            margin_quality: mq,
            liquidity_pressure: lp,
            price_confirmation: pc,
        }
    }

    #[test]
    fn expansion_requires_price_not_confirmed() {
        assert_eq!(classify(&ind(25.0, 40.0, 5.0, 0.0, 0.0)), Phase::Expansion);
        // Neutral price confirmation (50) blocks expansion; demand above 30
        // also blocks the divergence rule, so this falls all the way through.
        assert_eq!(
            classify(&ind(25.0, 40.0, 5.0, 0.0, 50.0)),
            Phase::Transitional
        );
    }

    #[test]
    fn expansion_boundaries() {
        // capex momentum exactly 20 is not > 20
        assert_ne!(classify(&ind(20.0, 40.0, 5.0, 0.0, 0.0)), Phase::Expansion);
        // margin quality exactly 0 still qualifies (>= 0)
        assert_eq!(classify(&ind(25.0, 40.0, 0.0, 0.0, 0.0)), Phase::Expansion);
    }

    #[test]
    fn efficiency_divergence_rule() {
        assert_eq!(
            classify(&ind(25.0, 25.0, -10.0, 0.0, 50.0)),
            Phase::EfficiencyDivergence
        );
        // demand exactly 30 satisfies neither > 30 nor < 30
        assert_eq!(
            classify(&ind(25.0, 30.0, 5.0, 0.0, 0.0)),
            Phase::Transitional
        );
    }

    #[test]
    fn monetization_rule() {
        assert_eq!(classify(&ind(0.0, 60.0, 1.0, 0.0, 50.0)), Phase::Monetization);
        assert_eq!(classify(&ind(10.0, 60.0, 1.0, 0.0, 50.0)), Phase::Monetization);
        // margin quality must be strictly positive
        assert_eq!(classify(&ind(5.0, 60.0, 0.0, 0.0, 50.0)), Phase::Transitional);
        // capex momentum just above the band falls through
        assert_eq!(
            classify(&ind(10.5, 60.0, 1.0, 0.0, 50.0)),
            Phase::Transitional
        );
    }

    #[test]
    fn contraction_rule() {
        assert_eq!(
            classify(&ind(-5.0, 10.0, -3.0, 0.5, 50.0)),
            Phase::Contraction
        );
        // zero liquidity pressure is not > 0
        assert_eq!(
            classify(&ind(-5.0, 10.0, -3.0, 0.0, 50.0)),
            Phase::Transitional
        );
    }

    #[test]
    fn first_match_wins() {
        // Qualifies for both expansion and the monetization margin test;
        // expansion is evaluated first.
        assert_eq!(classify(&ind(25.0, 40.0, 5.0, 1.0, 0.0)), Phase::Expansion);
    }

    #[test]
    fn classifier_never_emits_the_transition_label() {
        let samples = [
            ind(25.0, 40.0, 5.0, 0.0, 0.0),
            ind(25.0, 25.0, -10.0, 0.0, 50.0),
            ind(5.0, 60.0, 1.0, 0.0, 50.0),
            ind(-5.0, 10.0, -3.0, 0.5, 50.0),
            ind(15.0, 30.0, 0.0, 0.0, 50.0),
        ];
        for s in &samples {
            assert_ne!(classify(s), Phase::ExpansionToDivergence);
        }
    }

    proptest! {
        #[test]
        fn classifier_is_total(
            cm in -1000.0..1000.0f64,
            dr in -1000.0..1000.0f64,
            mq in -1000.0..1000.0f64,
            lp in -10.0..10.0f64,
            pc in 0.0..100.0f64,
        ) {
            let phase = classify(&ind(cm, dr, mq, lp, pc));
            prop_assert!(Phase::ALL.contains(&phase));
            prop_assert_ne!(phase, Phase::ExpansionToDivergence);
        }
    }
}
