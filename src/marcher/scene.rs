use crate::error::{Error, Result};
use crate::marcher::shape::Shape;
use crate::marcher::Renderable;
use crate::math::{v, O, V3};

/// Union of shapes: the nearest surface wins.
#[derive(Clone, Debug)]
pub struct Scene {
    shapes: Vec<Shape>,
}

impl Scene {
    pub fn new(shapes: Vec<Shape>) -> Result<Scene> {
        if shapes.is_empty() {
            return Err(Error::EmptyScene);
        }
        log::debug!("scene built with {} shapes", shapes.len());
        Ok(Scene { shapes })
    }

    pub fn add(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Shape with the smallest distance to `x`. The first one in insertion
    /// order wins on exact ties.
    pub fn nearest(&self, x: &V3) -> (&Shape, f64) {
        let mut best = &self.shapes[0];
        let mut best_d = best.sdf(x);
        for shape in &self.shapes[1..] {
            let d = shape.sdf(x);
            if d < best_d {
                best = shape;
                best_d = d;
            }
        }
        (best, best_d)
    }

    /// A blocky figure standing in front of a wall.
    pub fn demo() -> Result<Scene> {
        Scene::new(vec![
            Shape::block(O, 2., 3., 2.)?,
            Shape::block(v(0., -0.4, 1.3), 1., 1.5, 1.)?,
            Shape::block(v(0., -0.8, -1.1), 1.5, 0.75, 0.75)?,
            Shape::block(v(0.5, 1.8, 0.), 0.8, 1., 0.8)?,
            Shape::block(v(-0.5, 1.8, 0.), 0.8, 1., 0.8)?,
            Shape::block(v(0., 0., 10.), 25., 25., 1.)?,
        ])
    }
}

impl Renderable for Scene {
    fn sdf(&self, x: &V3) -> f64 {
        self.shapes
            .iter()
            .fold(f64::INFINITY, |acc, s| acc.min(s.sdf(x)))
    }

    fn normal(&self, x: &V3) -> Result<V3> {
        self.nearest(x).0.normal(x)
    }
}
