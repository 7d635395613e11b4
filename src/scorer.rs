//! # Scorer
//!
//! Pure damage-probability model for the cellular stress barometer.
//!
//! - Six inputs in `[0,1]`: ROS, ΔΨm, PEO/EFA, Zn, cPLA2, sPLA2.
//! - Weighted contributions (ROS enters squared, everything else linearly).
//! - `p = 1 / (1 + e^-logit)`, clamped to `[0,1]`.
//! - Dominant factor = largest |contribution|, first one wins on ties.
//!
//! No I/O, no shared state. Range checks belong to the caller (sliders, API, CLI).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::weights::WeightTable;

/// Dead zone around zero for the direction label of a contribution.
pub const DIRECTION_DEAD_ZONE: f64 = 0.01;

/// Upper (exclusive) probability bound of the `Low` bin.
pub const LOW_RISK_BELOW: f64 = 0.33;
/// Upper (exclusive) probability bound of the `Moderate` bin.
pub const MODERATE_RISK_BELOW: f64 = 0.66;

/// Model factors in their fixed enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Factor {
    Ros,
    Dpsi,
    Peo,
    Zn,
    Cpla2,
    Spla2,
}

impl Factor {
    /// Enumeration order; also the tie-break order for the dominant factor.
    pub const ALL: [Factor; 6] = [
        Factor::Ros,
        Factor::Dpsi,
        Factor::Peo,
        Factor::Zn,
        Factor::Cpla2,
        Factor::Spla2,
    ];

    /// Machine key used in query strings, JSON and config files.
    pub fn key(self) -> &'static str {
        match self {
            Factor::Ros => "ros",
            Factor::Dpsi => "dpsi",
            Factor::Peo => "peo",
            Factor::Zn => "zn",
            Factor::Cpla2 => "cpla2",
            Factor::Spla2 => "spla2",
        }
    }

    /// Short human label shown next to bars and in the dominant-factor line.
    pub fn label(self) -> &'static str {
        match self {
            Factor::Ros => "ROS",
            Factor::Dpsi => "ΔΨm",
            Factor::Peo => "Membrane (PEO/EFA)",
            Factor::Zn => "Zinc (Zn)",
            Factor::Cpla2 => "cPLA2",
            Factor::Spla2 => "sPLA2",
        }
    }

    /// Slider caption.
    pub fn title(self) -> &'static str {
        match self {
            Factor::Ros => "ROS level",
            Factor::Dpsi => "Mitochondrial potential (ΔΨm)",
            Factor::Peo => "Membrane quality (PEO/EFA)",
            Factor::Zn => "Zinc (Zn++) status",
            Factor::Cpla2 => "cPLA2 activity",
            Factor::Spla2 => "sPLA2 activity",
        }
    }

    /// Slider tooltip.
    pub fn help(self) -> &'static str {
        match self {
            Factor::Ros => "Reactive oxygen species level (0 = low, 1 = high)",
            Factor::Dpsi => "Mitochondrial membrane potential (0 = poor/low, 1 = optimal/high)",
            Factor::Peo => "Integrity and composition of cell membranes (0 = poor, 1 = good)",
            Factor::Zn => "Zinc status as an enzyme cofactor (0 = low/poor, 1 = optimal)",
            Factor::Cpla2 => "Cytosolic phospholipase A2 activity (0 = low, 1 = high)",
            Factor::Spla2 => "Secretory phospholipase A2 activity (0 = low, 1 = high)",
        }
    }

    /// Apply the per-factor transform (ROS is squared) and the weight.
    fn contribution(self, weight: f64, value: f64) -> f64 {
        match self {
            Factor::Ros => weight * value * value,
            _ => weight * value,
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Slider default for every factor.
pub const DEFAULT_INPUT: f64 = 0.5;

/// The six slider values. `Default` is the slider midpoint (0.5 everywhere).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inputs {
    pub ros: f64,
    pub dpsi: f64,
    pub peo: f64,
    pub zn: f64,
    pub cpla2: f64,
    pub spla2: f64,
}

impl Default for Inputs {
    fn default() -> Self {
        Self {
            ros: DEFAULT_INPUT,
            dpsi: DEFAULT_INPUT,
            peo: DEFAULT_INPUT,
            zn: DEFAULT_INPUT,
            cpla2: DEFAULT_INPUT,
            spla2: DEFAULT_INPUT,
        }
    }
}

impl Inputs {
    pub fn new(ros: f64, dpsi: f64, peo: f64, zn: f64, cpla2: f64, spla2: f64) -> Self {
        Self {
            ros,
            dpsi,
            peo,
            zn,
            cpla2,
            spla2,
        }
    }

    pub fn value(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Ros => self.ros,
            Factor::Dpsi => self.dpsi,
            Factor::Peo => self.peo,
            Factor::Zn => self.zn,
            Factor::Cpla2 => self.cpla2,
            Factor::Spla2 => self.spla2,
        }
    }

    /// Clamp every value to the slider bounds `[0,1]`.
    pub fn clamped(self) -> Self {
        let c = |x: f64| x.clamp(0.0, 1.0);
        Self {
            ros: c(self.ros),
            dpsi: c(self.dpsi),
            peo: c(self.peo),
            zn: c(self.zn),
            cpla2: c(self.cpla2),
            spla2: c(self.spla2),
        }
    }

    /// First factor (in enumeration order) holding a NaN or infinite value.
    pub fn first_non_finite(&self) -> Option<Factor> {
        Factor::ALL
            .into_iter()
            .find(|&f| !self.value(f).is_finite())
    }
}

/// Sign of a contribution, with a small dead zone around zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    IncreasesRisk,
    DecreasesRisk,
    MinimalImpact,
}

impl Direction {
    pub fn of(contribution: f64) -> Self {
        if contribution > DIRECTION_DEAD_ZONE {
            Direction::IncreasesRisk
        } else if contribution < -DIRECTION_DEAD_ZONE {
            Direction::DecreasesRisk
        } else {
            Direction::MinimalImpact
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::IncreasesRisk => "increases risk",
            Direction::DecreasesRisk => "decreases risk",
            Direction::MinimalImpact => "minimal impact",
        }
    }
}

/// Qualitative risk bin for a probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Half-open bins: `[0, 0.33)`, `[0.33, 0.66)`, `[0.66, 1]`.
    pub fn from_probability(p: f64) -> Self {
        if p < LOW_RISK_BELOW {
            RiskLevel::Low
        } else if p < MODERATE_RISK_BELOW {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One factor's weighted share of the logit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Contribution {
    pub factor: Factor,
    pub value: f64,
}

/// The factor with the largest absolute contribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DominantFactor {
    pub factor: Factor,
    pub contribution: f64,
    pub direction: Direction,
    /// e.g. `"ROS (increases risk)"`.
    pub description: String,
}

impl DominantFactor {
    fn new(factor: Factor, contribution: f64) -> Self {
        let direction = Direction::of(contribution);
        Self {
            factor,
            contribution,
            direction,
            description: format!("{} ({})", factor.label(), direction.label()),
        }
    }
}

/// Full scorer output for one input vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub probability: f64,
    pub logit: f64,
    pub risk: RiskLevel,
    pub dominant: DominantFactor,
    /// Always six entries, in `Factor::ALL` order.
    pub contributions: [Contribution; 6],
}

/// Score with the built-in weight table.
pub fn score(ros: f64, dpsi: f64, peo: f64, zn: f64, cpla2: f64, spla2: f64) -> Assessment {
    score_with(
        &WeightTable::default(),
        &Inputs::new(ros, dpsi, peo, zn, cpla2, spla2),
    )
}

/// Score with an explicit (possibly calibrated) weight table.
pub fn score_with(weights: &WeightTable, inputs: &Inputs) -> Assessment {
    let contributions = Factor::ALL.map(|factor| Contribution {
        factor,
        value: factor.contribution(weights.weight(factor), inputs.value(factor)),
    });

    let logit: f64 = contributions.iter().map(|c| c.value).sum();
    let probability = logistic(logit).clamp(0.0, 1.0);

    Assessment {
        probability,
        logit,
        risk: RiskLevel::from_probability(probability),
        dominant: dominant_of(&contributions),
        contributions,
    }
}

fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

// Strict `>` keeps the earliest factor on equal magnitudes.
fn dominant_of(contributions: &[Contribution; 6]) -> DominantFactor {
    let mut best = contributions[0];
    for c in &contributions[1..] {
        if c.value.abs() > best.value.abs() {
            best = *c;
        }
    }
    DominantFactor::new(best.factor, best.value)
}
