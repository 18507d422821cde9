use crate::error::{Error, Result};
use crate::marcher::Renderable;
use crate::math::{abs, normalize, sign, sub, v, V3};

/// Geometry of a single solid. Both variants are axis-aligned around `center`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    Sphere { center: V3, radius: f64 },
    Cuboid { center: V3, half_extent: V3 },
}

/// A primitive plus an inversion flag. An inverted shape treats the
/// complement of the solid as the surface, so it is solid everywhere outside
/// the primitive (useful for enclosing rooms).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shape {
    primitive: Primitive,
    inverted: bool,
}

impl Shape {
    pub fn sphere(center: V3, radius: f64) -> Result<Shape> {
        Shape::try_from(Primitive::Sphere { center, radius })
    }

    pub fn cuboid(center: V3, half_extent: V3) -> Result<Shape> {
        Shape::try_from(Primitive::Cuboid {
            center,
            half_extent,
        })
    }

    /// Box from full width/height/depth.
    pub fn block(center: V3, w: f64, h: f64, d: f64) -> Result<Shape> {
        Shape::cuboid(center, v(w * 0.5, h * 0.5, d * 0.5))
    }

    /// Returns the complement of this shape. Inverting twice gives back the
    /// original.
    pub fn invert(self) -> Shape {
        Shape {
            inverted: !self.inverted,
            ..self
        }
    }

    pub fn primitive(&self) -> &Primitive {
        &self.primitive
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }
}

/// Rejects non-positive radii and half extents.
impl TryFrom<Primitive> for Shape {
    type Error = Error;

    fn try_from(primitive: Primitive) -> Result<Shape> {
        match primitive {
            Primitive::Sphere { radius, .. } => {
                if !(radius > 0.) {
                    return Err(Error::InvalidPrimitive(format!(
                        "sphere radius must be positive, got {}",
                        radius
                    )));
                }
            }
            Primitive::Cuboid { half_extent, .. } => {
                if !(half_extent.x > 0. && half_extent.y > 0. && half_extent.z > 0.) {
                    return Err(Error::InvalidPrimitive(format!(
                        "cuboid half extents must be positive, got ({}, {}, {})",
                        half_extent.x, half_extent.y, half_extent.z
                    )));
                }
            }
        }
        Ok(Shape {
            primitive,
            inverted: false,
        })
    }
}

impl Renderable for Primitive {
    fn sdf(&self, x: &V3) -> f64 {
        match self {
            Primitive::Sphere { center, radius } => abs(&sub(x, center)) - radius,
            Primitive::Cuboid {
                center,
                half_extent,
            } => ((center.x - x.x).abs() - half_extent.x)
                .max((center.y - x.y).abs() - half_extent.y)
                .max((center.z - x.z).abs() - half_extent.z),
        }
    }

    fn normal(&self, x: &V3) -> Result<V3> {
        match self {
            Primitive::Sphere { center, .. } => normalize(&sub(x, center)),
            Primitive::Cuboid {
                center,
                half_extent,
            } => {
                // nearest face plane wins; earlier axes win ties
                let faces = [
                    (center.x - x.x, half_extent.x, v(1., 0., 0.)),
                    (center.y - x.y, half_extent.y, v(0., 1., 0.)),
                    (center.z - x.z, half_extent.z, v(0., 0., 1.)),
                ];
                let mut best = f64::INFINITY;
                let mut n = faces[0].2;
                for (delta, half, axis) in faces {
                    let to_face = (delta.abs() - half).abs();
                    if to_face < best {
                        best = to_face;
                        n = -sign(delta) * axis;
                    }
                }
                Ok(n)
            }
        }
    }
}

impl Renderable for Shape {
    fn sdf(&self, x: &V3) -> f64 {
        let d = self.primitive.sdf(x);
        if self.inverted {
            -d
        } else {
            d
        }
    }

    fn normal(&self, x: &V3) -> Result<V3> {
        let n = self.primitive.normal(x)?;
        Ok(if self.inverted { -n } else { n })
    }
}
