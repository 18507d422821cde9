//! Camera state, ray generation and the parallel render pass into an owned
//! character framebuffer.

use crate::error::{Error, Result};
use crate::marcher::{Lighting, Marcher, Renderable, EPS, MAX_STEPS};
use crate::math::{normalize, v, O, V3};
use rayon::prelude::*;

pub mod palette;

pub use palette::Palette;

const BORDER_SIDE: u8 = b'|';
const BORDER_TOP: u8 = b'-';
const CROSSHAIR: u8 = b'#';
const CROSSHAIR_REACH: usize = 2;

/// Construction-time parameters. Defaults give a 360x100 frame.
#[derive(Clone, Debug)]
pub struct Settings {
    pub width: usize,
    pub height: usize,
    pub min_dist: f64,
    pub fog_dist: f64,
    pub max_view_dist: f64,
    pub max_steps: usize,
    pub epsilon: f64,
    pub palette: Palette,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            width: 360,
            height: 100,
            min_dist: 3.,
            fog_dist: 100.,
            max_view_dist: 500.,
            max_steps: MAX_STEPS,
            epsilon: EPS,
            palette: Palette::default(),
        }
    }
}

impl Settings {
    /// Checks the parameters the renderer divides by or steps with.
    pub fn validate(&self) -> Result<()> {
        check_dimensions(self.width, self.height)?;
        if !(self.epsilon > 0.) {
            return Err(Error::InvalidSettings(format!(
                "epsilon must be positive, got {}",
                self.epsilon
            )));
        }
        if !(self.min_dist >= 0.) {
            return Err(Error::InvalidSettings(format!(
                "min_dist must not be negative, got {}",
                self.min_dist
            )));
        }
        if !(self.fog_dist < self.max_view_dist) {
            return Err(Error::InvalidSettings(format!(
                "fog_dist ({}) must be less than max_view_dist ({})",
                self.fog_dist, self.max_view_dist
            )));
        }
        if self.max_steps == 0 {
            return Err(Error::InvalidSettings("max_steps must be at least 1".into()));
        }
        Ok(())
    }
}

/// Euler angles in radians. Yaw turns about the vertical axis, pitch tilts
/// the view up and down, roll spins it around the view axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Orientation {
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

/// Precomputed sines and cosines of the negated orientation angles.
#[derive(Clone, Copy, Debug)]
pub struct Rotation {
    cx: f64,
    sx: f64,
    cy: f64,
    sy: f64,
    cz: f64,
    sz: f64,
}

impl Rotation {
    pub fn new(o: &Orientation) -> Rotation {
        Rotation {
            cx: (-o.yaw).cos(),
            sx: (-o.yaw).sin(),
            cy: (-o.pitch).cos(),
            sy: (-o.pitch).sin(),
            cz: (-o.roll).cos(),
            sz: (-o.roll).sin(),
        }
    }

    /// Roll in the xy-plane, then pitch in the yz-plane, then yaw in the
    /// xz-plane. Each stage feeds the next.
    pub fn apply(&self, d: &V3) -> V3 {
        let x = d.x * self.cz - d.y * self.sz;
        let y = d.y * self.cz + d.x * self.sz;

        let z = d.z * self.cy + y * self.sy;
        let y = y * self.cy - d.z * self.sy;

        let xr = x * self.cx - z * self.sx;
        let z = z * self.cx + x * self.sx;
        v(xr, y, z)
    }
}

/// Everything a pixel needs, copied out of the camera once per frame.
#[derive(Clone, Copy, Debug)]
struct View {
    position: V3,
    min_dist: f64,
    max_view_dist: f64,
    lighting: Lighting,
    marcher: Marcher,
    rotation: Rotation,
    kx: f64,
    ky: f64,
    width: usize,
    height: usize,
}

impl View {
    fn ray_direction(&self, x: usize, y: usize) -> Result<V3> {
        let rx = (x as f64 / (self.width - 1) as f64 - 0.5) * self.kx;
        let ry = (y as f64 / (self.height - 1) as f64 - 0.5) * self.ky;
        let dir = normalize(&v(rx, ry, 1.))?;
        Ok(self.rotation.apply(&dir))
    }

    fn brightness(&self, scene: &impl Renderable, x: usize, y: usize) -> Result<f64> {
        let dir = self.ray_direction(x, y)?;
        let origin = self.position + self.min_dist * dir;
        self.marcher.march(
            scene,
            origin,
            &dir,
            self.max_view_dist,
            Some(&self.lighting),
        )
    }
}

fn overlay(x: usize, y: usize, width: usize, height: usize) -> Option<u8> {
    if x == 0 || x == width - 1 {
        return Some(BORDER_SIDE);
    }
    if y == 0 || y == height - 1 {
        return Some(BORDER_TOP);
    }
    let (cx, cy) = (width / 2, height / 2);
    if (x == cx && y.abs_diff(cy) <= CROSSHAIR_REACH)
        || (y == cy && x.abs_diff(cx) <= CROSSHAIR_REACH)
    {
        return Some(CROSSHAIR);
    }
    None
}

fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width < 3 || height < 3 {
        return Err(Error::InvalidDimensions { width, height });
    }
    Ok(())
}

pub struct Camera {
    pub position: V3,
    pub orientation: Orientation,
    pub light: V3,
    pub min_dist: f64,
    pub fog_dist: f64,
    pub max_view_dist: f64,
    pub marcher: Marcher,
    palette: Palette,
    width: usize,
    height: usize,
    buffer: Vec<u8>,
}

impl Camera {
    pub fn new(settings: Settings) -> Result<Camera> {
        settings.validate()?;
        log::debug!(
            "camera framebuffer {}x{}, palette of {}",
            settings.width,
            settings.height,
            settings.palette.len()
        );
        Ok(Camera {
            position: O,
            orientation: Orientation::default(),
            light: O,
            min_dist: settings.min_dist,
            fog_dist: settings.fog_dist,
            max_view_dist: settings.max_view_dist,
            marcher: Marcher {
                max_steps: settings.max_steps,
                epsilon: settings.epsilon,
            },
            palette: settings.palette,
            width: settings.width,
            height: settings.height,
            buffer: vec![b' '; (settings.width + 1) * settings.height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Last rendered frame: `height` rows of `width` cells, each row ended
    /// by `\n`.
    pub fn frame(&self) -> &[u8] {
        &self.buffer
    }

    /// Reallocates the framebuffer. Rendering never does.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        check_dimensions(width, height)?;
        if width != self.width || height != self.height {
            log::debug!("camera resized to {}x{}", width, height);
            self.width = width;
            self.height = height;
            self.buffer = vec![b' '; (width + 1) * height];
        }
        Ok(())
    }

    /// Points the view axis at `point`, leaving roll alone.
    pub fn look_at(&mut self, point: &V3) {
        let delta = self.position - *point;
        let yaw = -delta.x.atan2(-delta.z);
        let nz = delta.x * yaw.sin() + delta.z * yaw.cos();
        self.orientation.yaw = yaw;
        self.orientation.pitch = (-delta.y).atan2(-nz);
    }

    fn view(&self, fov_x: f64, fov_y: f64) -> View {
        View {
            position: self.position,
            min_dist: self.min_dist,
            max_view_dist: self.max_view_dist,
            lighting: Lighting {
                light: self.light,
                fog_dist: self.fog_dist,
                max_view_dist: self.max_view_dist,
            },
            marcher: self.marcher,
            rotation: Rotation::new(&self.orientation),
            kx: (fov_x / 2.).tan(),
            ky: (fov_y / 2.).tan(),
            width: self.width,
            height: self.height,
        }
    }

    /// World-space unit direction of the ray through pixel `(x, y)`.
    pub fn ray_direction(&self, fov_x: f64, fov_y: f64, x: usize, y: usize) -> Result<V3> {
        self.view(fov_x, fov_y).ray_direction(x, y)
    }

    /// Brightness of pixel `(x, y)` without the border and crosshair.
    pub fn sample(
        &self,
        scene: &impl Renderable,
        fov_x: f64,
        fov_y: f64,
        x: usize,
        y: usize,
    ) -> Result<f64> {
        self.view(fov_x, fov_y).brightness(scene, x, y)
    }

    /// Renders one frame into the owned framebuffer, rows in parallel.
    /// Field of view angles are in radians.
    pub fn render<S>(&mut self, scene: &S, fov_x: f64, fov_y: f64) -> &[u8]
    where
        S: Renderable + Sync,
    {
        let view = self.view(fov_x, fov_y);
        let (width, height) = (self.width, self.height);
        let palette = &self.palette;

        self.buffer
            .par_chunks_mut(width + 1)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, cell) in row[..width].iter_mut().enumerate() {
                    *cell = match overlay(x, y, width, height) {
                        Some(c) => c,
                        None => {
                            let b = view.brightness(scene, x, y).unwrap_or_else(|e| {
                                log::trace!("pixel ({}, {}) left dark: {}", x, y, e);
                                0.
                            });
                            palette.char_for(b)
                        }
                    };
                }
                row[width] = b'\n';
            });

        &self.buffer
    }
}
