use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// One row of the standardized red-wine-quality table.
#[derive(Debug, Serialize)]
struct WineSample {
    fixed_acidity: f64,
    volatile_acidity: f64,
    citric_acid: f64,
    residual_sugar: f64,
    chlorides: f64,
    free_sulfur_dioxide: f64,
    total_sulfur_dioxide: f64,
    density: f64,
    #[serde(rename = "pH")]
    ph: f64,
    sulphates: f64,
    alcohol: f64,
    quality: u8,
}

/// Box-Muller transform for a normal distribution
fn gauss(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    let u1 = rng.gen::<f64>().max(1e-15);
    let u2 = rng.gen::<f64>();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z
}

/// Rounded to four decimals, as a scaler export would be.
fn standardized(rng: &mut StdRng, mean: f64) -> f64 {
    (gauss(rng, mean, 1.0) * 10_000.0).round() / 10_000.0
}

fn generate_sample(rng: &mut StdRng, quality: u8) -> WineSample {
    // Centre of the quality scale; better wines drift towards more alcohol
    // and sulphates and less volatile acidity.
    let shift = (quality as f64 - 5.6) * 0.5;
    WineSample {
        fixed_acidity: standardized(rng, 0.1 * shift),
        volatile_acidity: standardized(rng, -0.8 * shift),
        citric_acid: standardized(rng, 0.4 * shift),
        residual_sugar: standardized(rng, 0.0),
        chlorides: standardized(rng, -0.2 * shift),
        free_sulfur_dioxide: standardized(rng, 0.0),
        total_sulfur_dioxide: standardized(rng, -0.3 * shift),
        density: standardized(rng, -0.3 * shift),
        ph: standardized(rng, 0.0),
        sulphates: standardized(rng, 0.5 * shift),
        alcohol: standardized(rng, 0.9 * shift),
        quality,
    }
}

fn main() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(42);

    // Class sizes follow the skew of the red-wine quality scores.
    let quotas: [(u8, usize); 6] = [(3, 10), (4, 53), (5, 681), (6, 638), (7, 199), (8, 18)];

    let mut samples: Vec<WineSample> = quotas
        .iter()
        .flat_map(|&(quality, n)| std::iter::repeat(quality).take(n))
        .collect::<Vec<u8>>()
        .into_iter()
        .map(|quality| generate_sample(&mut rng, quality))
        .collect();
    samples.shuffle(&mut rng);

    let output_path = "wine_quality_preprocessed.csv";
    let mut writer = csv::Writer::from_path(output_path).context("creating output file")?;
    for sample in &samples {
        writer.serialize(sample).context("writing sample row")?;
    }
    writer.flush().context("flushing output file")?;

    println!("Wrote {} samples to {output_path}", samples.len());
    Ok(())
}
