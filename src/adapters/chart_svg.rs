//! SVG chart rendering for backtest reports.
//!
//! Plain standalone SVG text, one document per chart: NAV curve, allocation
//! history, and indicator evolution.

use crate::domain::backtest::{AllocationPoint, NavPoint, PhaseChange};
use crate::domain::quarters::QuarterRecord;
use crate::domain::tier::Tier;

const WIDTH: f64 = 960.0;
const HEIGHT: f64 = 420.0;
const PADDING: f64 = 60.0;

const PORTFOLIO_COLOR: &str = "#2196F3";
const BENCHMARK_COLOR: &str = "#9E9E9E";
const TIER_COLORS: [&str; 5] = ["#1565C0", "#E53935", "#43A047", "#FB8C00", "#8E24AA"];
const CAPEX_COLOR: &str = "#2196F3";
const DEMAND_COLOR: &str = "#4CAF50";
const MARGIN_COLOR: &str = "#FF9800";

struct Scale {
    min: f64,
    max: f64,
    len: usize,
}

impl Scale {
    fn new(min: f64, max: f64, len: usize) -> Self {
        Scale { min, max, len }
    }

    fn x(&self, i: usize) -> f64 {
        let plot_width = WIDTH - 2.0 * PADDING;
        if self.len > 1 {
            PADDING + i as f64 * plot_width / (self.len - 1) as f64
        } else {
            PADDING
        }
    }

    fn y(&self, value: f64) -> f64 {
        let plot_height = HEIGHT - 2.0 * PADDING;
        let range = self.max - self.min;
        if range > 0.0 {
            HEIGHT - PADDING - (value - self.min) * plot_height / range
        } else {
            HEIGHT - PADDING
        }
    }
}

fn polyline_points(scale: &Scale, values: impl Iterator<Item = f64>) -> String {
    values
        .enumerate()
        .map(|(i, v)| format!("{:.1},{:.1}", scale.x(i), scale.y(v)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn document(title: &str, body: &str) -> String {
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">
<rect width="{w:.0}" height="{h:.0}" fill="white"/>
<text x="{mid:.0}" y="28" text-anchor="middle" font-family="sans-serif" font-size="16" font-weight="bold">{title}</text>
<line x1="{pad:.0}" y1="{bottom:.0}" x2="{right:.0}" y2="{bottom:.0}" stroke="#333" stroke-width="1"/>
<line x1="{pad:.0}" y1="{pad:.0}" x2="{pad:.0}" y2="{bottom:.0}" stroke="#333" stroke-width="1"/>
{body}</svg>
"##,
        w = WIDTH,
        h = HEIGHT,
        mid = WIDTH / 2.0,
        pad = PADDING,
        bottom = HEIGHT - PADDING,
        right = WIDTH - PADDING,
        title = title,
        body = body,
    )
}

fn legend_entry(x: f64, y: f64, color: &str, dashed: bool, label: &str) -> String {
    let dash = if dashed {
        r#" stroke-dasharray="6,3""#
    } else {
        ""
    };
    format!(
        r#"<line x1="{x:.0}" y1="{y:.0}" x2="{x2:.0}" y2="{y:.0}" stroke="{color}" stroke-width="2"{dash}/>
<text x="{tx:.0}" y="{ty:.0}" font-family="sans-serif" font-size="11">{label}</text>
"#,
        x = x,
        x2 = x + 24.0,
        y = y,
        tx = x + 30.0,
        ty = y + 4.0,
        color = color,
        dash = dash,
        label = label,
    )
}

/// Chart 1: normalized portfolio NAV against the benchmark.
pub fn nav_chart(portfolio: &[NavPoint], benchmark: &[NavPoint]) -> String {
    if portfolio.is_empty() {
        return document("Portfolio NAV vs Benchmark", "");
    }

    let base_p = portfolio[0].value;
    let base_b = benchmark.first().map(|p| p.value).unwrap_or(base_p);
    let norm_p: Vec<f64> = portfolio.iter().map(|p| p.value / base_p).collect();
    let norm_b: Vec<f64> = benchmark.iter().map(|p| p.value / base_b).collect();

    let min = norm_p
        .iter()
        .chain(norm_b.iter())
        .fold(f64::INFINITY, |a, &b| a.min(b));
    let max = norm_p
        .iter()
        .chain(norm_b.iter())
        .fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    let scale = Scale::new(min, max, norm_p.len());

    let mut body = String::new();
    body.push_str(&format!(
        r#"<polyline fill="none" stroke="{}" stroke-width="2" stroke-dasharray="6,3" points="{}"/>
"#,
        BENCHMARK_COLOR,
        polyline_points(&scale, norm_b.iter().copied()),
    ));
    body.push_str(&format!(
        r#"<polyline fill="none" stroke="{}" stroke-width="2.5" points="{}"/>
"#,
        PORTFOLIO_COLOR,
        polyline_points(&scale, norm_p.iter().copied()),
    ));
    body.push_str(&legend_entry(
        PADDING + 10.0,
        PADDING + 12.0,
        PORTFOLIO_COLOR,
        false,
        "Portfolio",
    ));
    body.push_str(&legend_entry(
        PADDING + 10.0,
        PADDING + 28.0,
        BENCHMARK_COLOR,
        true,
        "Benchmark",
    ));
    body.push_str(&date_axis_labels(portfolio));

    document("Portfolio NAV vs Benchmark (start = 1.0)", &body)
}

/// Chart 2: stacked allocation history with phase-change markers.
pub fn allocation_chart(allocations: &[AllocationPoint], changes: &[PhaseChange]) -> String {
    if allocations.is_empty() {
        return document("Allocation History by Tier", "");
    }

    let scale = Scale::new(0.0, 100.0, allocations.len());
    let mut body = String::new();

    // Stack tiers bottom-up in reverse order so L1 ends on top.
    let mut lower = vec![0.0_f64; allocations.len()];
    for tier in Tier::ALL.iter().rev() {
        let upper: Vec<f64> = allocations
            .iter()
            .enumerate()
            .map(|(i, point)| lower[i] + point.percentages[tier.index()])
            .collect();

        let mut points: Vec<String> = upper
            .iter()
            .enumerate()
            .map(|(i, &v)| format!("{:.1},{:.1}", scale.x(i), scale.y(v)))
            .collect();
        points.extend(
            lower
                .iter()
                .enumerate()
                .rev()
                .map(|(i, &v)| format!("{:.1},{:.1}", scale.x(i), scale.y(v))),
        );

        body.push_str(&format!(
            r#"<polygon fill="{}" fill-opacity="0.85" stroke="none" points="{}"/>
"#,
            TIER_COLORS[tier.index()],
            points.join(" "),
        ));
        lower = upper;
    }

    for change in changes {
        if let Some(i) = allocations.iter().position(|p| p.date == change.date) {
            let x = scale.x(i);
            body.push_str(&format!(
                r##"<line x1="{x:.1}" y1="{top:.0}" x2="{x:.1}" y2="{bottom:.0}" stroke="#333" stroke-width="1" stroke-dasharray="3,3"/>
<text x="{x:.1}" y="{ty:.0}" text-anchor="middle" font-family="sans-serif" font-size="10">{q} {code}</text>
"##,
                x = x,
                top = PADDING,
                bottom = HEIGHT - PADDING,
                ty = PADDING - 6.0,
                q = change.quarter,
                code = change.phase.code(),
            ));
        }
    }

    for tier in Tier::ALL {
        body.push_str(&legend_entry(
            PADDING + 10.0 + tier.index() as f64 * 170.0,
            HEIGHT - 18.0,
            TIER_COLORS[tier.index()],
            false,
            &format!("{} {}", tier.code(), tier.label()),
        ));
    }

    document("Allocation History by Tier (%)", &body)
}

/// Chart 3: quarterly evolution of the three fundamental indicators.
pub fn indicator_chart(signals: &[QuarterRecord]) -> String {
    if signals.is_empty() {
        return document("Indicator Evolution", "");
    }

    let series: [(&str, &str, Vec<f64>); 3] = [
        (
            "CapEx Momentum",
            CAPEX_COLOR,
            signals.iter().map(|s| s.indicators.capex_momentum).collect(),
        ),
        (
            "Demand Realization",
            DEMAND_COLOR,
            signals
                .iter()
                .map(|s| s.indicators.demand_realization)
                .collect(),
        ),
        (
            "Margin Quality",
            MARGIN_COLOR,
            signals.iter().map(|s| s.indicators.margin_quality).collect(),
        ),
    ];

    let min = series
        .iter()
        .flat_map(|(_, _, v)| v.iter())
        .fold(f64::INFINITY, |a, &b| a.min(b));
    let max = series
        .iter()
        .flat_map(|(_, _, v)| v.iter())
        .fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    let scale = Scale::new(min.min(0.0), max, signals.len());

    let mut body = String::new();

    // Zero line for orientation.
    let zero_y = scale.y(0.0);
    body.push_str(&format!(
        r##"<line x1="{:.0}" y1="{zero_y:.1}" x2="{:.0}" y2="{zero_y:.1}" stroke="#999" stroke-width="0.8"/>
"##,
        PADDING,
        WIDTH - PADDING,
    ));

    for (_, color, values) in &series {
        body.push_str(&format!(
            r#"<polyline fill="none" stroke="{}" stroke-width="2.5" points="{}"/>
"#,
            color,
            polyline_points(&scale, values.iter().copied()),
        ));
        for (i, &v) in values.iter().enumerate() {
            body.push_str(&format!(
                r#"<circle cx="{:.1}" cy="{:.1}" r="4" fill="{}"/>
"#,
                scale.x(i),
                scale.y(v),
                color,
            ));
        }
    }

    for (row, (label, color, _)) in series.iter().enumerate() {
        body.push_str(&legend_entry(
            PADDING + 10.0,
            PADDING + 12.0 + row as f64 * 16.0,
            color,
            false,
            label,
        ));
    }

    for (i, signal) in signals.iter().enumerate() {
        body.push_str(&format!(
            r#"<text x="{:.1}" y="{:.0}" text-anchor="middle" font-family="sans-serif" font-size="10">{}</text>
"#,
            scale.x(i),
            HEIGHT - PADDING + 16.0,
            signal.quarter,
        ));
    }

    document("Indicator Evolution by Quarter", &body)
}

fn date_axis_labels(nav: &[NavPoint]) -> String {
    let mut out = String::new();
    if nav.is_empty() {
        return out;
    }
    let scale = Scale::new(0.0, 1.0, nav.len());
    for (i, point) in [(0, &nav[0]), (nav.len() - 1, &nav[nav.len() - 1])] {
        out.push_str(&format!(
            r#"<text x="{:.1}" y="{:.0}" text-anchor="middle" font-family="sans-serif" font-size="10">{}</text>
"#,
            scale.x(i),
            HEIGHT - PADDING + 16.0,
            point.date,
        ));
    }
    out
}
