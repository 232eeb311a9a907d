//! `lumen`: renders a scene with photon mapping and writes PNG images.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use lumen_renderer::{
    output, render, render_photon_preview, Integrator, PhotonIndex, PhotonTracer, RenderConfig,
};
use lumen_scene::Scene;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Command-line options. Anything given here overrides the config file.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct Options {
    /// Render configuration file (JSON).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Scene file (JSON). Renders the built-in Cornell box if omitted.
    #[arg(long, value_name = "FILE")]
    scene: Option<PathBuf>,

    /// Number of photons emitted from the light.
    #[arg(long, value_name = "NUM")]
    photons: Option<usize>,

    /// Total power of the area light.
    #[arg(long, value_name = "WATTS")]
    light_power: Option<f32>,

    /// Photons gathered per density estimate.
    #[arg(short = 'k', long = "neighbors", value_name = "NUM")]
    k_neighbors: Option<usize>,

    /// Camera samples per pixel.
    #[arg(long, value_name = "NUM")]
    spp: Option<u32>,

    /// Image width in pixels.
    #[arg(long, value_name = "PIXELS")]
    width: Option<u32>,

    /// Image height in pixels.
    #[arg(long, value_name = "PIXELS")]
    height: Option<u32>,

    /// Base random seed.
    #[arg(long, value_name = "NUM")]
    seed: Option<u64>,

    /// Number of rendering threads (defaults to one per core).
    #[arg(long, short = 't', value_name = "NUM")]
    threads: Option<usize>,

    /// Write the final image to the given file.
    #[arg(long, short = 'o', value_name = "FILE", default_value = "output.png")]
    output: PathBuf,

    /// Write the diffuse photon preview to the given file.
    #[arg(long, value_name = "FILE", default_value = "diffuse.png")]
    diffuse_preview: PathBuf,

    /// Write the caustic photon preview to the given file.
    #[arg(long, value_name = "FILE", default_value = "caustic.png")]
    caustic_preview: PathBuf,

    /// Skip the photon preview images.
    #[arg(long)]
    no_preview: bool,
}

impl Options {
    /// Configuration file (or defaults) with command-line overrides applied.
    fn render_config(&self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => RenderConfig::default(),
        };

        if let Some(photons) = self.photons {
            config.photon_count = photons;
        }
        if let Some(k) = self.k_neighbors {
            config.k_neighbors = k;
        }
        if let Some(spp) = self.spp {
            config.samples_per_pixel = spp;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }

        config.validate()?;
        Ok(config)
    }

    /// Scene file (or the built-in scene) with the light power taken from
    /// the command line, then the config file.
    fn scene(&self, config: &RenderConfig) -> Result<Scene> {
        let mut scene = match &self.scene {
            Some(path) => Scene::from_json_file(path)
                .with_context(|| format!("Failed to load scene {}", path.display()))?,
            None => Scene::cornell_box(),
        };

        if let Some(power) = self.light_power.or(config.light_power) {
            scene.light.power = power;
            scene.validate()?;
        }
        Ok(scene)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let options = Options::parse();
    log::info!("Starting lumen");

    if let Some(threads) = options.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the thread pool")?;
    }

    let config = options.render_config()?;
    let scene = options.scene(&config)?;
    let camera = scene.camera.with_resolution(config.width, config.height);

    let start = Instant::now();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let (maps, _) = PhotonTracer::new(&scene, &config).trace_photons(&mut rng);
    log::info!("Photon transport took {:?}", start.elapsed());
    if maps.is_empty() {
        log::warn!("No photons were stored; only direct light will be rendered");
    }

    let start = Instant::now();
    let diffuse = PhotonIndex::build(&maps.diffuse);
    let caustic = PhotonIndex::build(&maps.caustic);
    log::info!(
        "Built photon indices in {:?}: {} diffuse (depth {}), {} caustic (depth {})",
        start.elapsed(),
        diffuse.len(),
        diffuse.depth(),
        caustic.len(),
        caustic.depth()
    );

    if !options.no_preview {
        let preview = render_photon_preview(&camera, &diffuse, &config);
        output::save_rgb_png(&preview, &options.diffuse_preview)?;
        let preview = render_photon_preview(&camera, &caustic, &config);
        output::save_rgb_png(&preview, &options.caustic_preview)?;
    }

    let integrator = Integrator::new(&scene, diffuse, caustic, &config);
    let start = Instant::now();
    let image = render(&camera, &integrator, &config);
    log::info!("Rendered in {:?}", start.elapsed());

    output::save_rgba_png(&image, &options.output)?;
    Ok(())
}
