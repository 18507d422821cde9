//! Interactive ASCII ray marcher. See `driver::controls` for the key map.

use anyhow::Context;
use ascii_raymarch::camera::Camera;
use ascii_raymarch::driver::config::RenderArgs;
use ascii_raymarch::driver::controls::{self, Action, Controls};
use ascii_raymarch::driver::display::{telemetry, TerminalDisplay};
use ascii_raymarch::driver::pacer::{FramePacer, SystemClock};
use ascii_raymarch::driver::{orbit_light, START_POSITION};
use ascii_raymarch::marcher::Scene;
use ascii_raymarch::math::O;
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    render: RenderArgs,

    #[arg(long, default_value_t = 60)]
    max_fps: u32,

    /// Log output goes here so it never lands on the frame
    #[arg(long, default_value = "ascii-raymarch.log")]
    log_file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_file = File::create(&args.log_file)
        .with_context(|| format!("failed to create log file {}", args.log_file.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let scene = Scene::demo()?;
    let mut settings = args.render.settings()?;
    let mut display = TerminalDisplay::new().context("failed to initialize terminal")?;
    if args.render.fit {
        let (width, height) = display.size();
        settings.width = width.max(3);
        settings.height = height.max(3);
    }
    let mut camera = Camera::new(settings)?;
    camera.position = START_POSITION;
    camera.look_at(&O);
    log::info!("rendering {}x{}", camera.width(), camera.height());

    let (fov_x, fov_y) = args.render.fov();
    let mut pacer = FramePacer::new(SystemClock, args.max_fps);
    let mut controls = Controls::default();

    loop {
        let tick = pacer.tick();

        if args.render.fit && display.check_resize() {
            let (width, height) = display.size();
            camera.resize(width.max(3), height.max(3))?;
        }

        let active = controls::poll_active().context("failed to read input")?;
        if active.contains(&Action::Quit) {
            break;
        }
        controls
            .motion(&active, &camera.orientation, tick.dt)
            .apply(&mut camera);
        camera.light = orbit_light(tick.now);

        let status = telemetry(&camera.position, tick.fps);
        let zoom = controls.zoom_multiplier();
        let frame = camera.render(&scene, fov_x * zoom, fov_y * zoom);
        if let Err(e) = display.present(frame, &status) {
            if e.kind() == std::io::ErrorKind::BrokenPipe {
                break;
            }
            return Err(e).context("failed to draw frame");
        }
    }

    Ok(())
}
