//! ember command line renderer.

mod scenes;

use anyhow::{bail, Context, Result};
use ember_render::{render, save, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use std::time::Instant;

const USAGE: &str = "usage: ember <output.{png,jpg,bmp}> \
[--width N] [--height N] [--samples N] [--seed N]";

struct Args {
    output: String,
    config: RenderConfig,
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args().skip(1);

    // The output filename is the one required argument.
    let output = match args.next() {
        Some(name) => name,
        None => bail!("missing output filename\n{USAGE}"),
    };

    let mut config = RenderConfig::default();
    while let Some(flag) = args.next() {
        let value = args
            .next()
            .with_context(|| format!("{flag} needs a value\n{USAGE}"))?;
        match flag.as_str() {
            "--width" => config.width = value.parse().context("invalid --width")?,
            "--height" => config.height = value.parse().context("invalid --height")?,
            "--samples" => {
                config.samples_per_pixel = value.parse().context("invalid --samples")?
            }
            "--seed" => config.seed = value.parse().context("invalid --seed")?,
            _ => bail!("unknown flag {flag}\n{USAGE}"),
        }
    }

    if config.width == 0 || config.height == 0 {
        bail!("image dimensions must be non-zero");
    }

    Ok(Args { output, config })
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Args { output, config } = parse_args()?;

    log::info!("threads available: {}", rayon::current_num_threads());
    log::info!(
        "rendering {}x{} at {} samples per pixel",
        config.width,
        config.height,
        config.samples_per_pixel
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    let aspect = config.width as f64 / config.height as f64;
    let scene = scenes::random_scene(&mut rng, aspect);

    let start = Instant::now();
    let image = render(&scene, &config);
    log::info!("time spent raytracing: {:.2}s", start.elapsed().as_secs_f64());

    save(&image, Path::new(&output), 100)
        .with_context(|| format!("failed to write {output}"))?;

    Ok(())
}
