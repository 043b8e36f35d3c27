use std::{env, fs, process};

use anyhow::Context;
use log::info;
use ndarray::{array, s, Array2};
use rand::{distr::Uniform, rngs::StdRng, Rng, SeedableRng};
use rand_distr::Normal;

use gradient_regression::{
    training::{GradientMode, TrainingConfig},
    LinearRegression,
};

const SAMPLES: usize = 400;
const TEST_SAMPLES: usize = 50;
const DEFAULT_SEED: u64 = 42;

/// Generates `(horsepower, weight, displacement) -> mpg` rows following a noisy linear law.
fn synthetic_cars(rng: &mut StdRng) -> anyhow::Result<(Array2<f32>, Array2<f32>)> {
    let horsepower = Uniform::new(50.0f32, 230.0)?;
    let weight = Uniform::new(1.5f32, 5.0)?;
    let displacement = Uniform::new(70.0f32, 455.0)?;
    let noise = Normal::new(0.0f32, 1.5)?;

    let mut x = Array2::<f32>::zeros((SAMPLES, 3));
    let mut y = Array2::<f32>::zeros((SAMPLES, 1));

    for (mut row, mut label) in x.rows_mut().into_iter().zip(y.rows_mut()) {
        let (hp, w, disp) = (
            rng.sample(&horsepower),
            rng.sample(&weight),
            rng.sample(&displacement),
        );
        row.assign(&array![hp, w, disp]);
        label[0] = 46.0 - 0.04 * hp - 3.5 * w - 0.012 * disp + rng.sample(&noise);
    }

    Ok((x, y))
}

fn run() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let config = match args.get(1) {
        Some(path) => {
            let json = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            TrainingConfig::from_json(&json)?
        }
        None => TrainingConfig::default(),
    };

    let mode = match args.get(2) {
        Some(mode) => mode.parse()?,
        None => GradientMode::MiniBatch,
    };

    let seed = match env::var("SEED") {
        Ok(seed) => seed.parse().context("SEED must be an unsigned integer")?,
        Err(_) => DEFAULT_SEED,
    };

    let mut rng = StdRng::seed_from_u64(seed);
    let (x, y) = synthetic_cars(&mut rng)?;
    let split = SAMPLES - TEST_SAMPLES;
    let (train_x, test_x) = (x.slice(s![..split, ..]), x.slice(s![split.., ..]));
    let (train_y, test_y) = (y.slice(s![..split, ..]), y.slice(s![split.., ..]));

    info!("training on {split} rows, testing on {TEST_SAMPLES}, config: {config:?}");
    let mut regression = LinearRegression::new(train_x.to_owned(), train_y.to_owned(), config)?;
    regression.train(mode)?;

    let r2 = regression.test(test_x, test_y)?;
    println!("[R2]: {r2}");

    let observations = array![[130., 1.75, 307.], [150., 1.72, 304.], [95., 1.19, 113.]];
    let predictions = regression.predict(observations.view())?;
    println!("[PREDICTIONS]: {predictions}");

    println!("{}", serde_json::to_string_pretty(&regression.report())?);

    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        eprintln!(
            "Usage: {} [config.json] [single-batch|mini-batch]",
            env::args().next().unwrap_or_default()
        );
        process::exit(1);
    }
}
