use anyhow::{bail, Context, Result};
use clap::Parser;
use lumen_render::{Scene, SceneDescription};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Instant;

mod scenes;

/// Render a sphere scene with a Monte Carlo path tracer.
///
/// The image is written as plain PPM to stdout unless `--output` is given.
#[derive(Parser, Debug)]
#[command(name = "lumen", version, about)]
struct Args {
    /// Builtin scene name (two-spheres, materials, cover) or a path to a JSON scene file
    #[arg(short, long, default_value = "two-spheres")]
    scene: String,

    /// Image width in pixels; height follows the scene's aspect ratio
    #[arg(short, long)]
    width: Option<u32>,

    /// Samples per pixel
    #[arg(long)]
    samples: Option<u32>,

    /// Maximum number of bounces per path
    #[arg(long)]
    max_depth: Option<u32>,

    /// Seed for every random choice, rendering included
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Worker threads; defaults to one per core, 1 renders serially
    #[arg(short, long)]
    threads: Option<usize>,

    /// Output file (.png or .ppm); PPM on stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let start = Instant::now();
    let mut scene = load_scene(&args.scene, args.seed)?;
    log::info!(
        "Loaded scene '{}' with {} objects in {:?}",
        args.scene,
        scene.world.len(),
        start.elapsed()
    );

    if let Some(width) = args.width {
        scene.camera.image_width = width;
    }
    if let Some(samples) = args.samples {
        scene.camera.samples_per_pixel = samples;
    }
    if let Some(max_depth) = args.max_depth {
        scene.camera.max_depth = max_depth;
    }

    let camera = scene
        .camera
        .build()
        .context("Invalid camera configuration")?;

    let image = match args.threads {
        Some(0) => {
            log::warn!("Ignoring --threads 0, using the default thread count");
            camera.render(&scene.world, args.seed)
        }
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .context("Failed to build render thread pool")?;
            pool.install(|| camera.render(&scene.world, args.seed))
        }
        None => camera.render(&scene.world, args.seed),
    };

    match &args.output {
        Some(path) => image
            .save(path)
            .with_context(|| format!("Failed to save image to {}", path.display()))?,
        None => {
            let mut out = BufWriter::new(io::stdout().lock());
            image
                .write_ppm(&mut out)
                .context("Failed to write image to stdout")?;
        }
    }

    log::info!("Done.");
    Ok(())
}

/// Resolve `--scene` to a builtin or a JSON scene file.
fn load_scene(name: &str, seed: u64) -> Result<Scene> {
    if let Some(scene) = scenes::builtin(name, seed) {
        return Ok(scene);
    }

    let path = Path::new(name);
    if !path.exists() {
        bail!(
            "Unknown scene '{}': expected one of {} or a path to a JSON scene file",
            name,
            scenes::BUILTIN_SCENES.join(", ")
        );
    }

    let description = SceneDescription::load(path)
        .with_context(|| format!("Failed to load scene file {}", path.display()))?;
    let scene = description
        .build()
        .with_context(|| format!("Failed to build scene from {}", path.display()))?;
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["lumen"]);
        assert_eq!(args.scene, "two-spheres");
        assert_eq!(args.seed, 0);
        assert!(args.width.is_none());
        assert!(args.output.is_none());
    }

    #[test]
    fn test_args_overrides() {
        let args = Args::parse_from([
            "lumen", "--scene", "cover", "-w", "320", "--samples", "8", "--max-depth", "4",
            "--seed", "9", "-t", "2", "-o", "out.png",
        ]);
        assert_eq!(args.scene, "cover");
        assert_eq!(args.width, Some(320));
        assert_eq!(args.samples, Some(8));
        assert_eq!(args.max_depth, Some(4));
        assert_eq!(args.seed, 9);
        assert_eq!(args.threads, Some(2));
        assert_eq!(args.output, Some(PathBuf::from("out.png")));
    }

    #[test]
    fn test_load_unknown_scene() {
        let err = load_scene("no-such-scene", 0).err().unwrap();
        assert!(err.to_string().contains("two-spheres"));
    }

    #[test]
    fn test_load_scene_file() {
        let path = std::env::temp_dir().join(format!("lumen_scene_{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{ "materials": { "m": { "type": "metal", "albedo": [1, 1, 1], "fuzz": 0.1 } },
                 "spheres": [ { "center": [0, 0, -1], "radius": 0.5, "material": "m" } ] }"#,
        )
        .unwrap();

        let scene = load_scene(path.to_str().unwrap(), 0).unwrap();
        assert_eq!(scene.world.len(), 1);

        std::fs::remove_file(&path).unwrap();
    }
}
