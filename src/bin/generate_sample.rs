//! Writes a synthetic predictive-maintenance CSV with the long sensor
//! headers of the public dataset.
//!
//! Usage: `generate_sample [OUTPUT] [ROWS]`
//! (defaults: `data/predictive_maintenance.csv`, 10000).

use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const HEADER: [&str; 10] = [
    "UDI",
    "Product ID",
    "Type",
    "Air temperature [K]",
    "Process temperature [K]",
    "Rotational speed [rpm]",
    "Torque [Nm]",
    "Tool wear [min]",
    "Target",
    "Failure Type",
];

/// Box-Muller transform for normal distribution
fn gauss(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    let u1 = rng.random::<f64>().max(1e-15);
    let u2 = rng.random::<f64>();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z
}

struct Reading {
    kind: char,
    air_k: f64,
    process_k: f64,
    rpm: f64,
    torque: f64,
    wear: u32,
}

impl Reading {
    fn sample(rng: &mut StdRng, wear: u32) -> Self {
        // 50% low, 30% medium, 20% high quality variants
        let kind = match rng.random_range(0..10) {
            0..=4 => 'L',
            5..=7 => 'M',
            _ => 'H',
        };
        let air_k = gauss(rng, 300.0, 2.0);
        let process_k = air_k + 10.0 + gauss(rng, 0.0, 1.0);
        let rpm = gauss(rng, 1540.0, 180.0).max(1100.0);
        // torque falls as speed rises so that power stays near 6 kW
        let torque = (gauss(rng, 40.0, 10.0) - (rpm - 1540.0) * 0.02).max(3.0);
        Reading {
            kind,
            air_k,
            process_k,
            rpm,
            torque,
            wear,
        }
    }

    fn failure(&self, rng: &mut StdRng) -> Option<&'static str> {
        let power_w = self.torque * self.rpm * 2.0 * std::f64::consts::PI / 60.0;
        let overstrain_limit = match self.kind {
            'L' => 11_000.0,
            'M' => 12_000.0,
            _ => 13_000.0,
        };

        if self.wear >= 200 && rng.random_bool(0.3) {
            Some("Tool Wear Failure")
        } else if self.process_k - self.air_k < 8.6 && self.rpm < 1380.0 {
            Some("Heat Dissipation Failure")
        } else if !(3500.0..=9000.0).contains(&power_w) {
            Some("Power Failure")
        } else if f64::from(self.wear) * self.torque > overstrain_limit {
            Some("Overstrain Failure")
        } else if rng.random_bool(0.001) {
            Some("Random Failures")
        } else {
            None
        }
    }
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let output_path = PathBuf::from(
        args.next()
            .unwrap_or_else(|| "data/predictive_maintenance.csv".to_string()),
    );
    let rows: usize = match args.next() {
        Some(n) => n.parse().with_context(|| format!("invalid row count '{n}'"))?,
        None => 10_000,
    };

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let mut rng = StdRng::seed_from_u64(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    writer.write_record(HEADER)?;

    let mut wear = 0u32;
    let mut failures = 0usize;
    for udi in 1..=rows {
        let reading = Reading::sample(&mut rng, wear);
        let failure = reading.failure(&mut rng);
        // tools are replaced after a failure or at the end of their life
        wear = if failure.is_some() || wear >= 240 {
            0
        } else {
            wear + rng.random_range(1..=5)
        };
        failures += usize::from(failure.is_some());

        writer.write_record([
            udi.to_string(),
            format!("{}{}", reading.kind, 10_000 + udi),
            reading.kind.to_string(),
            format!("{:.1}", reading.air_k),
            format!("{:.1}", reading.process_k),
            format!("{:.0}", reading.rpm),
            format!("{:.1}", reading.torque),
            reading.wear.to_string(),
            usize::from(failure.is_some()).to_string(),
            failure.unwrap_or("No Failure").to_string(),
        ])?;
    }
    writer.flush()?;

    println!(
        "Wrote {rows} readings ({failures} failures) to {}",
        output_path.display()
    );
    Ok(())
}
