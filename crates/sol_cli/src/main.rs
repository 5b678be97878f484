use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use sol_core::{demo_scene, load_scene, save_image, Image32, Scene};
use sol_renderer::{
    render, render_parallel, Camera, RenderConfig, XorShift32, DEFAULT_BUCKET_ROWS,
    DEFAULT_MAX_BOUNCES, DEFAULT_SAMPLES_PER_PIXEL,
};

/// Render a scene of planes and spheres with a Monte Carlo path tracer.
#[derive(Parser, Debug)]
#[command(name = "sol", author, version, about)]
#[command(next_line_help = true)]
struct Args {
    /// Samples per pixel. Missing, non-numeric or zero values fall back to
    /// --default-samples.
    #[arg(allow_negative_numbers = true)]
    samples: Option<String>,
    /// Samples per pixel used when none is given.
    #[arg(long, default_value_t = DEFAULT_SAMPLES_PER_PIXEL)]
    default_samples: u32,
    /// Image width in pixels.
    #[arg(short = 'W', long, default_value_t = 1920)]
    width: u32,
    /// Image height in pixels.
    #[arg(short = 'H', long, default_value_t = 1280)]
    height: u32,
    /// Output file; `.png` writes a PNG, anything else a bitmap.
    #[arg(short, long, default_value = "test.bmp")]
    output: PathBuf,
    /// JSON scene file. The built-in demo scene is used without one.
    #[arg(long)]
    scene: Option<PathBuf>,
    /// Base random seed (0 selects the default).
    #[arg(long, default_value_t = 0)]
    seed: u32,
    /// Maximum surface bounces per path.
    #[arg(long, default_value_t = DEFAULT_MAX_BOUNCES)]
    bounces: u32,
    /// Render on one thread with a single random stream.
    #[arg(long)]
    serial: bool,
    /// Worker threads for the parallel renderer (0 = one per core).
    #[arg(long, default_value_t = 0)]
    threads: usize,
    /// Image rows per parallel work item.
    #[arg(long, default_value_t = DEFAULT_BUCKET_ROWS)]
    bucket_rows: u32,
}

impl Args {
    fn render_config(&self) -> RenderConfig {
        RenderConfig::default()
            .with_samples(samples_per_pixel(self.samples.as_deref(), self.default_samples))
            .with_max_bounces(self.bounces)
            .with_seed(self.seed)
            .with_bucket_rows(self.bucket_rows)
    }
}

/// Parse the positional sample count, falling back to `default` for
/// anything that is not a positive integer.
fn samples_per_pixel(arg: Option<&str>, default: u32) -> u32 {
    match arg.and_then(|s| s.trim().parse::<u32>().ok()) {
        Some(samples) if samples > 0 => samples,
        _ => {
            if let Some(arg) = arg {
                log::debug!("Ignoring sample count '{}', using {}", arg, default);
            }
            default.max(1)
        }
    }
}

fn load(args: &Args) -> Result<Scene> {
    match &args.scene {
        Some(path) => load_scene(path)
            .with_context(|| format!("Failed to load scene {}", path.display())),
        None => demo_scene().context("Failed to build the demo scene"),
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.render_config();
    let scene = load(args)?;
    let mut image = Image32::new(args.width, args.height)?;
    let camera = Camera::from_settings(&scene.camera);

    log::info!(
        "Rendering '{}' at {}x{}, {} rays per pixel, {} bounces",
        scene.name,
        image.width(),
        image.height(),
        config.samples_per_pixel,
        config.max_bounces
    );

    let start = Instant::now();
    if args.serial {
        let mut rng = XorShift32::from_u32(config.seed);
        render(&camera, &scene.world, &config, &mut image, &mut rng);
    } else if args.threads > 0 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build()
            .context("Failed to build the render thread pool")?;
        pool.install(|| render_parallel(&camera, &scene.world, &config, &mut image));
    } else {
        render_parallel(&camera, &scene.world, &config, &mut image);
    }
    log::info!("Raycasting done in {:.2?}", start.elapsed());

    // A failed write does not fail the run
    match save_image(&image, &args.output) {
        Ok(()) => log::info!("Wrote {}", args.output.display()),
        Err(err) => log::error!(
            "Unable to write output file {}: {}",
            args.output.display(),
            err
        ),
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    run(&args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["sol"]).unwrap();
        assert_eq!((args.width, args.height), (1920, 1280));
        assert_eq!(args.output, PathBuf::from("test.bmp"));
        assert!(args.scene.is_none());

        let config = args.render_config();
        assert_eq!(config.samples_per_pixel, 128);
        assert_eq!(config.max_bounces, 8);
        assert_eq!(config, RenderConfig::default());
    }

    #[test]
    fn test_sample_count_fallbacks() {
        assert_eq!(samples_per_pixel(Some("16"), 128), 16);
        assert_eq!(samples_per_pixel(Some("0"), 128), 128);
        assert_eq!(samples_per_pixel(Some("lots"), 128), 128);
        assert_eq!(samples_per_pixel(Some("-4"), 128), 128);
        assert_eq!(samples_per_pixel(None, 32), 32);
    }

    #[test]
    fn test_flags() {
        let args = Args::try_parse_from([
            "sol", "many", "-W", "64", "-H", "32", "-o", "out.png", "--seed", "9", "--serial",
        ])
        .unwrap();

        assert_eq!(args.samples.as_deref(), Some("many"));
        assert_eq!((args.width, args.height), (64, 32));
        assert!(args.serial);

        let config = args.render_config();
        assert_eq!(config.samples_per_pixel, 128);
        assert_eq!(config.seed, 9);
    }

    #[test]
    fn test_bad_output_path_is_not_fatal() {
        let args = Args::try_parse_from([
            "sol",
            "1",
            "-W",
            "4",
            "-H",
            "2",
            "--bounces",
            "2",
            "-o",
            "/definitely/not/here/out.bmp",
        ])
        .unwrap();
        assert!(run(&args).is_ok());
    }

    #[test]
    fn test_missing_scene_is_fatal() {
        let args = Args::try_parse_from(["sol", "--scene", "/definitely/not/here.json"]).unwrap();
        assert!(run(&args).is_err());
    }
}
