//! Command-line barometer: score one input vector and print the result.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

use stress_barometer::config::{AppConfig, ENV_WEIGHTS_PATH};
use stress_barometer::{score_with, BarometerView, Inputs, WeightTable};

#[derive(Parser)]
#[command(name = "barometer")]
#[command(about = "Estimate cellular damage probability from six stress/protection factors")]
struct Cli {
    /// ROS level (0 = low, 1 = high)
    #[arg(long, default_value_t = 0.5)]
    ros: f64,

    /// Mitochondrial membrane potential ΔΨm (0 = poor, 1 = optimal)
    #[arg(long, default_value_t = 0.5)]
    dpsi: f64,

    /// Membrane quality PEO/EFA (0 = poor, 1 = good)
    #[arg(long, default_value_t = 0.5)]
    peo: f64,

    /// Zinc status (0 = low, 1 = optimal)
    #[arg(long, default_value_t = 0.5)]
    zn: f64,

    /// cPLA2 activity (0 = low, 1 = high)
    #[arg(long, default_value_t = 0.5)]
    cpla2: f64,

    /// sPLA2 activity (0 = low, 1 = high)
    #[arg(long, default_value_t = 0.5)]
    spla2: f64,

    /// Weights file (TOML or JSON); defaults to $BAROMETER_WEIGHTS_PATH or config/weights.toml
    #[arg(long)]
    weights: Option<PathBuf>,

    /// Print assessment and view as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    stress_barometer::telemetry::init_tracing();

    let cli = Cli::parse();

    let raw = Inputs::new(cli.ros, cli.dpsi, cli.peo, cli.zn, cli.cpla2, cli.spla2);
    if let Some(f) = raw.first_non_finite() {
        bail!("--{} must be a finite number", f.key());
    }
    let inputs = raw.clamped();

    let weights_path = cli
        .weights
        .unwrap_or_else(|| AppConfig::from_env().weights_path);
    let weights = WeightTable::load_or_default(&weights_path)
        .with_context(|| format!("loading weights (override with --weights or {ENV_WEIGHTS_PATH})"))?;

    let assessment = score_with(&weights, &inputs);
    let view = BarometerView::from_assessment(&assessment);

    let rendered = if cli.json {
        let out = serde_json::json!({
            "inputs": inputs,
            "assessment": assessment,
            "view": view,
        });
        format!("{}\n", serde_json::to_string_pretty(&out)?)
    } else {
        view.render_text()
    };

    // A reader that closes early (`| head`) ends output, not the program.
    match io::stdout().lock().write_all(rendered.as_bytes()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other.context("writing to stdout"),
    }
}
