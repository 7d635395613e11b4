//! Weight table for the scorer, with optional calibration file.
//!
//! TOML shape (JSON with the same keys works too):
//! ```toml
//! ros = 3.0
//! dpsi = -2.5
//! peo = -1.5
//! zn = -2.0
//! cpla2 = 2.0
//! spla2 = 1.5
//! ```
//!
//! Keys that are missing keep their built-in value. The table is read once and
//! stays constant for the life of the process.

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::scorer::Factor;

/// Signed coefficient per factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeightTable {
    pub ros: f64,
    pub dpsi: f64,
    pub peo: f64,
    pub zn: f64,
    pub cpla2: f64,
    pub spla2: f64,
}

impl Default for WeightTable {
    /// Provisional, uncalibrated weights.
    fn default() -> Self {
        Self {
            ros: 3.0,
            dpsi: -2.5, // high potential protects
            peo: -1.5,  // good membranes protect
            zn: -2.0,   // adequate zinc protects
            cpla2: 2.0,
            spla2: 1.5,
        }
    }
}

impl WeightTable {
    pub fn weight(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Ros => self.ros,
            Factor::Dpsi => self.dpsi,
            Factor::Peo => self.peo,
            Factor::Zn => self.zn,
            Factor::Cpla2 => self.cpla2,
            Factor::Spla2 => self.spla2,
        }
    }

    /// Load from an explicit path. Format is picked by extension (`.json`
    /// or anything else as TOML).
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading weights from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let table = Self::parse(&content, &ext)
            .with_context(|| format!("parsing weights in {}", path.display()))?;
        table.validate()?;
        Ok(table)
    }

    /// Like `load_from_file`, but a missing file means "use the built-in table".
    /// A file that exists and is broken is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(path = %path.display(), "weights file not found, using built-in weights");
            return Ok(Self::default());
        }
        let table = Self::load_from_file(path)?;
        info!(path = %path.display(), ?table, "loaded weights");
        Ok(table)
    }

    fn parse(s: &str, hint_ext: &str) -> Result<Self> {
        if hint_ext == "json" {
            return serde_json::from_str(s).map_err(|e| anyhow!(e));
        }
        toml::from_str(s).map_err(|e| anyhow!(e))
    }

    fn validate(&self) -> Result<()> {
        for f in Factor::ALL {
            if !self.weight(f).is_finite() {
                bail!("weight for `{}` must be a finite number", f.key());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_model() {
        let w = WeightTable::default();
        let got: Vec<f64> = Factor::ALL.iter().map(|&f| w.weight(f)).collect();
        assert_eq!(got, vec![3.0, -2.5, -1.5, -2.0, 2.0, 1.5]);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let w = WeightTable::parse("ros = 4.0\nzn = -1.0\n", "toml").unwrap();
        assert_eq!(w.ros, 4.0);
        assert_eq!(w.zn, -1.0);
        assert_eq!(w.dpsi, -2.5);
        assert_eq!(w.spla2, 1.5);
    }

    #[test]
    fn json_is_accepted() {
        let w = WeightTable::parse(r#"{"cpla2": 0.5}"#, "json").unwrap();
        assert_eq!(w.cpla2, 0.5);
        assert_eq!(w.ros, 3.0);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(WeightTable::parse("ros = 1.0\nhba1c = 2.0\n", "toml").is_err());
    }

    #[test]
    fn non_finite_is_rejected() {
        let w = WeightTable::parse("peo = nan\n", "toml").unwrap();
        assert!(w.validate().is_err());
        let w = WeightTable::parse("spla2 = inf\n", "toml").unwrap();
        assert!(w.validate().is_err());
    }
}
