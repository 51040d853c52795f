//! The five asset tiers and their ticker baskets.

use std::fmt;

/// One of the five fixed asset buckets the strategy allocates across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    CorePlatform,
    AiAccelerator,
    PowerInfra,
    Defensive,
    CashEquivalent,
}

impl Tier {
    pub const ALL: [Tier; 5] = [
        Tier::CorePlatform,
        Tier::AiAccelerator,
        Tier::PowerInfra,
        Tier::Defensive,
        Tier::CashEquivalent,
    ];

    /// Stable position in weight and return arrays.
    pub fn index(&self) -> usize {
        match self {
            Tier::CorePlatform => 0,
            Tier::AiAccelerator => 1,
            Tier::PowerInfra => 2,
            Tier::Defensive => 3,
            Tier::CashEquivalent => 4,
        }
    }

    /// Short tier code used in reports and charts.
    pub fn code(&self) -> &'static str {
        match self {
            Tier::CorePlatform => "L1",
            Tier::AiAccelerator => "L2",
            Tier::PowerInfra => "L3",
            Tier::Defensive => "L4",
            Tier::CashEquivalent => "L5",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::CorePlatform => "Core Platform",
            Tier::AiAccelerator => "AI Accelerator",
            Tier::PowerInfra => "Power / Infrastructure",
            Tier::Defensive => "Defensive",
            Tier::CashEquivalent => "Cash Equivalent",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Immutable ticker baskets backing each tier, equal-weighted within a tier.
#[derive(Debug, Clone)]
pub struct TierBaskets {
    baskets: [Vec<String>; 5],
}

impl TierBaskets {
    pub fn new(baskets: [Vec<String>; 5]) -> Self {
        Self { baskets }
    }

    pub fn tickers(&self, tier: Tier) -> &[String] {
        &self.baskets[tier.index()]
    }

    /// All tickers across every tier, in tier order, without duplicates.
    pub fn all_tickers(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for basket in &self.baskets {
            for ticker in basket {
                if seen.insert(ticker.clone()) {
                    out.push(ticker.clone());
                }
            }
        }
        out
    }
}
