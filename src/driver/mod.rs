//! Thin wrappers around the renderer: options, keyboard mapping, frame
//! pacing, terminal output and image export.

use crate::math::{v, V3};

pub mod config;
pub mod controls;
pub mod display;
pub mod export;
pub mod pacer;

/// Where the interactive camera starts.
pub const START_POSITION: V3 = V3 {
    x: -5.,
    y: -4.,
    z: -5.,
};

/// Light circling in front of the scene, one radian per second.
pub fn orbit_light(t: f64) -> V3 {
    v(t.cos() * 5., t.sin() * 5., -10.)
}
