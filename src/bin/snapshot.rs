use anyhow::Context;
use ascii_raymarch::camera::Camera;
use ascii_raymarch::driver::config::RenderArgs;
use ascii_raymarch::driver::{export, orbit_light, START_POSITION};
use ascii_raymarch::marcher::Scene;
use ascii_raymarch::math::O;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

/// Renders the demo scene once, as text or as a grayscale PNG.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    render: RenderArgs,

    /// Light orbit time in seconds
    #[arg(short, long, default_value_t = 0.)]
    time: f64,

    /// Write the text frame here instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Also save a grayscale PNG
    #[arg(long)]
    png: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let scene = Scene::demo()?;
    let mut settings = args.render.settings()?;
    if args.render.fit {
        if let Ok((w, h)) = crossterm::terminal::size() {
            settings.width = (w as usize).max(3);
            settings.height = (h as usize).saturating_sub(1).max(3);
        }
    }
    let mut camera = Camera::new(settings)?;
    camera.position = START_POSITION;
    camera.look_at(&O);
    camera.light = orbit_light(args.time);

    let (fov_x, fov_y) = args.render.fov();
    let start = Instant::now();
    camera.render(&scene, fov_x, fov_y);
    log::info!("render took {} s", start.elapsed().as_secs_f32());

    match &args.out {
        Some(path) => std::fs::write(path, camera.frame())
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => std::io::stdout().write_all(camera.frame())?,
    }

    if let Some(path) = &args.png {
        export::to_gray(camera.frame(), camera.width(), camera.height(), camera.palette())
            .context("frame is shorter than the camera size")?
            .save(path)
            .with_context(|| format!("failed to save {}", path.display()))?;
    }

    Ok(())
}
