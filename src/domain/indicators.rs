//! The five scalar indicators derived from raw quarterly metrics.
//!
//! All transforms are pure arithmetic; the caller guarantees well-formed
//! numeric inputs.

/// CapEx momentum: capex growth minus revenue growth. Positive values mean
/// spend is outrunning the top line.
pub fn capex_momentum(capex_growth: f64, revenue_growth: f64) -> f64 {
    capex_growth - revenue_growth
}

/// Demand realization: average of cloud and data-center revenue growth.
pub fn demand_realization(cloud_growth: f64, dc_growth: f64) -> f64 {
    (cloud_growth + dc_growth) / 2.0
}

/// Margin quality: margin change plus free-cash-flow growth.
pub fn margin_quality(margin_change: f64, fcf_growth: f64) -> f64 {
    margin_change + fcf_growth
}

/// Liquidity pressure: 10Y rate change plus credit-spread change.
pub fn liquidity_pressure(rate_change: f64, credit_spread_change: f64) -> f64 {
    rate_change + credit_spread_change
}

/// Neutral price-confirmation score, also used when history is too short.
pub const PRICE_CONFIRMATION_NEUTRAL: f64 = 50.0;

/// Price confirmation against the trailing 200-period moving average.
///
/// Returns 50 when fewer than 200 closes exist, 0 when the latest close sits
/// below the 200-period mean, and 50 otherwise. The score never exceeds 50;
/// a close above the average is confirmation-neutral, not bullish.
pub fn price_confirmation(closes: &[f64]) -> f64 {
    if closes.len() < 200 {
        return PRICE_CONFIRMATION_NEUTRAL;
    }
    let window = &closes[closes.len() - 200..];
    let ma200 = window.iter().sum::<f64>() / 200.0;
    let last = closes[closes.len() - 1];
    if last < ma200 {
        0.0
    } else {
        PRICE_CONFIRMATION_NEUTRAL
    }
}

/// The five indicator scores for one observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSet {
    pub capex_momentum: f64,
    pub demand_realization: f64,
    pub margin_quality: f64,
    pub liquidity_pressure: f64,
    pub price_confirmation: f64,
}

impl IndicatorSet {
    /// Derive all five scores from raw metrics plus a precomputed
    /// price-confirmation value.
    #[allow(clippy::too_many_arguments)]
    pub fn from_metrics(
        capex_growth: f64,
        revenue_growth: f64,
        cloud_growth: f64,
        dc_growth: f64,
        margin_change: f64,
        fcf_growth: f64,
        rate_change: f64,
        credit_spread_change: f64,
        price_confirmation: f64,
    ) -> Self {
        IndicatorSet {
            capex_momentum: capex_momentum(capex_growth, revenue_growth),
            demand_realization: demand_realization(cloud_growth, dc_growth),
            margin_quality: margin_quality(margin_change, fcf_growth),
            liquidity_pressure: liquidity_pressure(rate_change, credit_spread_change),
            price_confirmation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capex_momentum_is_spread() {
        assert!((capex_momentum(22.0, 13.0) - 9.0).abs() < f64::EPSILON);
        assert!((capex_momentum(10.0, 15.0) - (-5.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn demand_realization_is_average() {
        assert!((demand_realization(28.0, 206.0) - 117.0).abs() < f64::EPSILON);
    }

    #[test]
    fn margin_quality_is_sum() {
        assert!((margin_quality(3.0, 15.0) - 18.0).abs() < f64::EPSILON);
        assert!((margin_quality(-1.0, -20.0) - (-21.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn liquidity_pressure_is_sum() {
        assert!((liquidity_pressure(0.4, 0.1) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn price_confirmation_short_history_is_neutral() {
        let closes: Vec<f64> = (0..199).map(|i| i as f64).collect();
        assert!((price_confirmation(&closes) - 50.0).abs() < f64::EPSILON);
        assert!((price_confirmation(&[]) - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn price_confirmation_below_ma_is_bearish() {
        // 200 flat closes at 100, then a drop to 50.
        let mut closes = vec![100.0; 200];
        closes.push(50.0);
        assert!((price_confirmation(&closes) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn price_confirmation_above_ma_is_capped_at_neutral() {
        // Rallying hard above the average still never scores above 50.
        let mut closes = vec![100.0; 200];
        closes.push(500.0);
        assert!((price_confirmation(&closes) - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn from_metrics_matches_individual_transforms() {
        let ind = IndicatorSet::from_metrics(22.0, 13.0, 28.0, 206.0, 3.0, 15.0, -0.7, 0.0, 50.0);
        assert!((ind.capex_momentum - 9.0).abs() < f64::EPSILON);
        assert!((ind.demand_realization - 117.0).abs() < f64::EPSILON);
        assert!((ind.margin_quality - 18.0).abs() < f64::EPSILON);
        assert!((ind.liquidity_pressure - (-0.7)).abs() < 1e-12);
        assert!((ind.price_confirmation - 50.0).abs() < f64::EPSILON);
    }
}
