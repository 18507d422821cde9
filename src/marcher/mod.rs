//! Sphere tracing against signed distance fields, plus the diffuse, fog and
//! shadow model used to turn a hit into a brightness in `[0, 1]`.

use crate::error::Result;
use crate::math::{abs, dot, normalize, V3};

pub mod scene;
pub mod shape;

pub use scene::Scene;
pub use shape::{Primitive, Shape};

/// Hard cap on marching steps per ray.
pub const MAX_STEPS: usize = 100;

/// A ray is considered to have hit once the field drops below this.
pub const EPS: f64 = 0.01;

/// Offset along the normal before casting a shadow ray.
const SHADOW_BIAS: f64 = 0.01;

/// Fraction of the diffuse term that survives full occlusion.
const AMBIENT: f64 = 0.4;

pub trait Renderable {
    /// Signed distance: negative inside, positive outside.
    fn sdf(&self, x: &V3) -> f64;
    /// Unit surface normal near `x`.
    fn normal(&self, x: &V3) -> Result<V3>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub point: V3,
    pub traveled: f64,
    pub steps: usize,
}

/// Point light plus the fog band in which brightness falls off linearly.
#[derive(Clone, Copy, Debug)]
pub struct Lighting {
    pub light: V3,
    pub fog_dist: f64,
    pub max_view_dist: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct Marcher {
    pub max_steps: usize,
    pub epsilon: f64,
}

impl Default for Marcher {
    fn default() -> Self {
        Marcher {
            max_steps: MAX_STEPS,
            epsilon: EPS,
        }
    }
}

impl Marcher {
    /// Walks from `origin` along unit `dir`, stepping by the field value.
    /// Gives up once the accumulated or the local distance exceeds
    /// `max_distance`, or after `max_steps` steps.
    pub fn intersect(
        &self,
        r: &impl Renderable,
        origin: V3,
        dir: &V3,
        max_distance: f64,
    ) -> Option<Hit> {
        let mut y = origin;
        let mut traveled = 0.;
        for step in 0..self.max_steps {
            let sdf = r.sdf(&y);
            traveled += sdf;
            if traveled > max_distance || sdf > max_distance {
                return None;
            }
            if sdf < self.epsilon {
                return Some(Hit {
                    point: y,
                    traveled,
                    steps: step + 1,
                });
            }
            y = y + sdf * *dir;
        }
        None
    }

    /// Brightness seen along a ray. With `lighting` the hit is shaded,
    /// without it the result is a plain occlusion test (`1` on hit).
    /// Misses are `0`.
    pub fn march(
        &self,
        r: &impl Renderable,
        origin: V3,
        dir: &V3,
        max_distance: f64,
        lighting: Option<&Lighting>,
    ) -> Result<f64> {
        match (self.intersect(r, origin, dir, max_distance), lighting) {
            (None, _) => Ok(0.),
            (Some(hit), Some(lighting)) => self.shade(r, &hit.point, lighting),
            (Some(_), None) => Ok(1.),
        }
    }

    pub fn shade(&self, r: &impl Renderable, point: &V3, lighting: &Lighting) -> Result<f64> {
        let delta = lighting.light - *point;
        let normal = r.normal(point)?;
        let dist = abs(&delta);
        let dir = normalize(&delta)?;

        let facing = dot(&normal, &dir);
        let mut val = (facing + 1.) * 0.5;

        if dist > lighting.fog_dist {
            val -= (dist - lighting.fog_dist) / (lighting.max_view_dist - lighting.fog_dist);
        }

        let lit = if facing > 0. {
            let origin = *point + SHADOW_BIAS * normal;
            1. - self.march(r, origin, &dir, dist, None)?
        } else {
            0.
        };
        val *= lit * (1. - AMBIENT) + AMBIENT;

        Ok(val.max(0.))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{normalize, v, O};

    const TOL: f64 = 1e-9;

    fn unit_sphere() -> Scene {
        Scene::new(vec![Shape::sphere(O, 1.).unwrap()]).unwrap()
    }

    fn lighting(light: V3) -> Lighting {
        Lighting {
            light,
            fog_dist: 100.,
            max_view_dist: 500.,
        }
    }

    // finer than the shadow bias so shadow rays never count as self hits
    fn fine() -> Marcher {
        Marcher {
            epsilon: 0.001,
            ..Marcher::default()
        }
    }

    #[test]
    fn test_miss_returns_zero() {
        let scene = Scene::new(vec![Shape::sphere(v(0., 0., 10.), 1.).unwrap()]).unwrap();
        let m = Marcher::default();
        let dir = v(0., 0., -1.);
        assert!(m.intersect(&scene, O, &dir, 500.).is_none());
        assert_eq!(
            m.march(&scene, O, &dir, 500., Some(&lighting(v(0., 0., -10.))))
                .unwrap(),
            0.
        );
    }

    #[test]
    fn test_hit_within_step_cap_and_epsilon() {
        let scene = unit_sphere();
        let m = Marcher::default();
        for dir in [v(0., 0., 1.), normalize(&v(0.1, 0., 1.)).unwrap()] {
            let hit = m.intersect(&scene, v(0., 0., -5.), &dir, 500.).unwrap();
            assert!(hit.steps <= MAX_STEPS);
            assert!(scene.sdf(&hit.point).abs() < EPS);
        }
    }

    #[test]
    fn test_step_cap_exhaustion_is_miss() {
        let scene = unit_sphere();
        let m = Marcher {
            max_steps: 1,
            ..Marcher::default()
        };
        let dir = v(0., 0., 1.);
        assert!(m.intersect(&scene, v(0., 0., -5.), &dir, 500.).is_none());
        assert_eq!(m.march(&scene, v(0., 0., -5.), &dir, 500., None).unwrap(), 0.);
    }

    #[test]
    fn test_max_distance_limits_reach() {
        let scene = unit_sphere();
        let m = Marcher::default();
        let dir = v(0., 0., 1.);
        assert!(m.intersect(&scene, v(0., 0., -5.), &dir, 3.).is_none());
        assert_eq!(m.march(&scene, v(0., 0., -5.), &dir, 10., None).unwrap(), 1.);
    }

    #[test]
    fn test_shade_facing_light() {
        let scene = unit_sphere();
        let b = fine()
            .shade(&scene, &v(0., 0., -1.), &lighting(v(0., 0., -10.)))
            .unwrap();
        assert!((b - 1.).abs() < TOL);
    }

    #[test]
    fn test_shade_light_behind_is_dark() {
        let scene = unit_sphere();
        let b = fine()
            .shade(&scene, &v(0., 0., -1.), &lighting(v(0., 0., 10.)))
            .unwrap();
        assert_eq!(b, 0.);
    }

    #[test]
    fn test_shade_grazing_light_keeps_ambient_floor() {
        let scene = unit_sphere();
        let b = fine()
            .shade(&scene, &v(0., 0., -1.), &lighting(v(5., 0., -1.)))
            .unwrap();
        assert!((b - 0.2).abs() < TOL);
    }

    #[test]
    fn test_shade_occluded() {
        let scene = Scene::new(vec![
            Shape::sphere(O, 1.).unwrap(),
            Shape::sphere(v(0., 0., -3.), 0.5).unwrap(),
        ])
        .unwrap();
        let b = fine()
            .shade(&scene, &v(0., 0., -1.), &lighting(v(0., 0., -10.)))
            .unwrap();
        assert!((b - 0.4).abs() < TOL);
    }

    #[test]
    fn test_shade_fog_and_lower_clamp() {
        let scene = unit_sphere();
        let foggy = fine()
            .shade(&scene, &v(0., 0., -1.), &lighting(v(0., 0., -201.)))
            .unwrap();
        assert!((foggy - 0.75).abs() < TOL);
        let gone = fine()
            .shade(&scene, &v(0., 0., -1.), &lighting(v(0., 0., -1001.)))
            .unwrap();
        assert_eq!(gone, 0.);
    }

    #[test]
    fn test_shade_at_light_position_fails() {
        let scene = unit_sphere();
        let p = v(0., 0., -1.);
        assert!(fine().shade(&scene, &p, &lighting(p)).is_err());
    }
}
