//! Keyboard input mapped to camera motion.
//!
//! Controls:
//! - Left/Right arrows: turn
//! - Up/Down arrows: look up/down
//! - K/L: roll
//! - W/S: move forward/back, A/D: strafe
//! - PageUp/PageDown: move up/down
//! - Space: move faster
//! - C: toggle zoom (narrows the view and slows turning)
//! - Q or Escape: quit

use crate::camera::{Camera, Orientation};
use crate::math::{v, O, V3};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use std::collections::HashSet;
use std::f64::consts::FRAC_PI_2;
use std::io;
use std::time::Duration;

const TURN_RATE: f64 = 1.5;
const ROLL_RATE: f64 = 1.;
const WALK_SPEED: f64 = 10.;
const CLIMB_SPEED: f64 = 20.;
const BOOST: f64 = 10.;
pub const ZOOM: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    TurnLeft,
    TurnRight,
    LookUp,
    LookDown,
    RollLeft,
    RollRight,
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    Up,
    Down,
    Boost,
    ToggleZoom,
    Quit,
}

pub fn parse_key_event(event: KeyEvent) -> Option<Action> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let action = match event.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Left => Action::TurnLeft,
        KeyCode::Right => Action::TurnRight,
        KeyCode::Up => Action::LookUp,
        KeyCode::Down => Action::LookDown,
        KeyCode::Char('l') => Action::RollLeft,
        KeyCode::Char('k') => Action::RollRight,
        KeyCode::Char('w') => Action::Forward,
        KeyCode::Char('s') => Action::Back,
        KeyCode::Char('a') => Action::StrafeLeft,
        KeyCode::Char('d') => Action::StrafeRight,
        KeyCode::PageUp => Action::Up,
        KeyCode::PageDown => Action::Down,
        KeyCode::Char(' ') => Action::Boost,
        KeyCode::Char('c') => Action::ToggleZoom,
        _ => return None,
    };
    Some(action)
}

/// Drains pending terminal events without blocking. Terminals only report
/// presses and auto-repeats, so a held key shows up as active on the ticks
/// its repeats land on.
pub fn poll_active() -> io::Result<HashSet<Action>> {
    let mut active = HashSet::new();
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key_event) = event::read()? {
            if let Some(action) = parse_key_event(key_event) {
                active.insert(action);
            }
        }
    }
    Ok(active)
}

/// Camera change produced by one tick of input.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Motion {
    pub translation: V3,
    pub rotation: Orientation,
}

impl Motion {
    /// Applies the deltas, keeping pitch within straight up and straight down.
    pub fn apply(&self, camera: &mut Camera) {
        camera.position = camera.position + self.translation;
        let o = &mut camera.orientation;
        o.yaw += self.rotation.yaw;
        o.pitch = (o.pitch + self.rotation.pitch).clamp(-FRAC_PI_2, FRAC_PI_2);
        o.roll += self.rotation.roll;
    }
}

#[derive(Debug, Default)]
pub struct Controls {
    zoomed: bool,
}

impl Controls {
    pub fn zoomed(&self) -> bool {
        self.zoomed
    }

    /// Scale for turn rates and field of view.
    pub fn zoom_multiplier(&self) -> f64 {
        if self.zoomed {
            ZOOM
        } else {
            1.
        }
    }

    pub fn motion(&mut self, active: &HashSet<Action>, facing: &Orientation, dt: f64) -> Motion {
        if active.contains(&Action::ToggleZoom) {
            self.zoomed = !self.zoomed;
        }
        let on = |a: Action| active.contains(&a);
        let zm = self.zoom_multiplier();

        let mut rotation = Orientation::default();
        if on(Action::TurnLeft) {
            rotation.yaw -= dt * TURN_RATE * zm;
        }
        if on(Action::TurnRight) {
            rotation.yaw += dt * TURN_RATE * zm;
        }
        if on(Action::LookUp) {
            rotation.pitch -= dt * TURN_RATE * zm;
        }
        if on(Action::LookDown) {
            rotation.pitch += dt * TURN_RATE * zm;
        }
        if on(Action::RollLeft) {
            rotation.roll -= dt * ROLL_RATE * zm;
        }
        if on(Action::RollRight) {
            rotation.roll += dt * ROLL_RATE * zm;
        }

        let (yaw, pitch) = (facing.yaw, facing.pitch);
        let mut movement = O;
        if on(Action::Up) {
            movement.y -= CLIMB_SPEED;
        }
        if on(Action::Down) {
            movement.y += CLIMB_SPEED;
        }
        if on(Action::Forward) || on(Action::Back) {
            let forward = v(yaw.sin() * pitch.cos(), pitch.sin(), yaw.cos() * pitch.cos());
            let sign = if on(Action::Forward) { 1. } else { -1. };
            movement = movement + forward * (WALK_SPEED * sign);
        }
        let right = v((-yaw).cos(), 0., (-yaw).sin()) * WALK_SPEED;
        if on(Action::StrafeRight) {
            movement = movement + right;
        }
        if on(Action::StrafeLeft) {
            movement = movement - right;
        }
        if on(Action::Boost) {
            movement = movement * BOOST;
        }

        Motion {
            translation: movement * dt,
            rotation,
        }
    }
}
