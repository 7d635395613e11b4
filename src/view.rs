//! view.rs — presentation model for one assessment.
//!
//! Turns an `Assessment` into what the page (or the CLI) shows: the probability
//! as a percentage, a colored status, the key-factor line and a ranked bar list.

use serde::Serialize;
use std::fmt::Write as _;

use crate::scorer::{Assessment, Direction, Factor, RiskLevel};

/// Length of the longest bar, in blocks.
pub const BAR_WIDTH: usize = 20;
/// Bars with |contribution| at or below this are not rendered.
pub const BAR_MIN_MAGNITUDE: f64 = 0.01;

pub const DISCLAIMER: &str = "This estimate is based on a hypothetical model and provisional weights. \
It is for educational and research purposes only and is not medical advice or a substitute \
for clinical diagnosis. The weights and formula require further validation.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskColor {
    Green,
    Amber,
    Red,
}

impl RiskColor {
    pub fn for_risk(risk: RiskLevel) -> Self {
        match risk {
            RiskLevel::Low => RiskColor::Green,
            RiskLevel::Moderate => RiskColor::Amber,
            RiskLevel::High => RiskColor::Red,
        }
    }

    /// CSS color name.
    pub fn css(self) -> &'static str {
        match self {
            RiskColor::Green => "green",
            RiskColor::Amber => "orange",
            RiskColor::Red => "red",
        }
    }
}

/// One rendered contribution bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub factor: Factor,
    pub label: &'static str,
    pub contribution: f64,
    pub magnitude: f64,
    /// Bar length in blocks, `0..=BAR_WIDTH`.
    pub blocks: usize,
    /// Red for risk-raising factors, green otherwise.
    pub color: RiskColor,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarometerView {
    /// e.g. `"95.3%"`
    pub probability_text: String,
    pub risk_label: &'static str,
    pub risk_color: RiskColor,
    pub dominant_text: String,
    /// Sorted by magnitude, largest first.
    pub bars: Vec<Bar>,
    pub disclaimer: &'static str,
}

impl BarometerView {
    pub fn from_assessment(a: &Assessment) -> Self {
        Self {
            probability_text: format_percent(a.probability),
            risk_label: a.risk.label(),
            risk_color: RiskColor::for_risk(a.risk),
            dominant_text: a.dominant.description.clone(),
            bars: bars_for(a),
            disclaimer: DISCLAIMER,
        }
    }

    /// Plain-text rendering used by the CLI.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Damage probability P(d): {}", self.probability_text);
        let _ = writeln!(out, "Status: {}", self.risk_label);
        let _ = writeln!(out, "Key factor: {}", self.dominant_text);
        let _ = writeln!(out);

        if self.bars.is_empty() {
            let _ = writeln!(out, "(no factor has a noticeable contribution)");
        }
        let width = self
            .bars
            .iter()
            .map(|b| b.label.chars().count())
            .max()
            .unwrap_or(0);
        for b in &self.bars {
            let pad = width - b.label.chars().count();
            let _ = writeln!(
                out,
                "{}{} {} ({:.2})",
                b.label,
                " ".repeat(pad),
                "█".repeat(b.blocks),
                b.contribution
            );
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.disclaimer);
        out
    }
}

pub fn format_percent(p: f64) -> String {
    format!("{:.1}%", p * 100.0)
}

fn bars_for(a: &Assessment) -> Vec<Bar> {
    let max = a
        .contributions
        .iter()
        .map(|c| c.value.abs())
        .fold(0.0_f64, f64::max);

    let mut bars: Vec<Bar> = a
        .contributions
        .iter()
        .filter(|c| c.value.abs() > BAR_MIN_MAGNITUDE)
        .map(|c| {
            let magnitude = c.value.abs();
            // truncation, not rounding
            let blocks = if max > 0.0 {
                ((magnitude / max) * BAR_WIDTH as f64) as usize
            } else {
                0
            };
            Bar {
                factor: c.factor,
                label: c.factor.label(),
                contribution: c.value,
                magnitude,
                blocks,
                color: if c.value > 0.0 {
                    RiskColor::Red
                } else {
                    RiskColor::Green
                },
                direction: Direction::of(c.value),
            }
        })
        .collect();

    // stable: equal magnitudes keep enumeration order
    bars.sort_by(|x, y| y.magnitude.total_cmp(&x.magnitude));
    bars
}
