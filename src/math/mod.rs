use crate::error::{Error, Result};
use std::ops;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct V3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl V3 {
    pub fn len(&self) -> f64 {
        abs(self)
    }

    pub fn dot(&self, rhs: &V3) -> f64 {
        dot(self, rhs)
    }

    pub fn normalize(&self) -> Result<V3> {
        normalize(self)
    }
}

pub fn sub(x: &V3, y: &V3) -> V3 {
    V3 {
        x: x.x - y.x,
        y: x.y - y.y,
        z: x.z - y.z,
    }
}

pub fn abs2(x: &V3) -> f64 {
    x.x * x.x + x.y * x.y + x.z * x.z
}

pub fn abs(x: &V3) -> f64 {
    abs2(x).sqrt()
}

pub fn v(x: f64, y: f64, z: f64) -> V3 {
    V3 { x, y, z }
}

pub fn mul(scalar: f64, x: &V3) -> V3 {
    V3 {
        x: x.x * scalar,
        y: x.y * scalar,
        z: x.z * scalar,
    }
}

pub fn add(x: &V3, y: &V3) -> V3 {
    V3 {
        x: x.x + y.x,
        y: x.y + y.y,
        z: x.z + y.z,
    }
}

pub fn dist(x: &V3, y: &V3) -> f64 {
    abs(&sub(x, y))
}

/// Scales `x` to unit length. A zero-length input has no direction and is
/// reported as [`Error::DivideByZero`] instead of producing NaN components.
pub fn normalize(x: &V3) -> Result<V3> {
    let len = abs(x);
    if len == 0. {
        return Err(Error::DivideByZero);
    }
    Ok(mul(1. / len, x))
}

pub fn dot(x: &V3, y: &V3) -> f64 {
    x.x * y.x + x.y * y.y + x.z * y.z
}

/// `-1` for negative input, `1` otherwise (zero counts as positive).
pub fn sign(x: f64) -> f64 {
    if x < 0. {
        -1.
    } else {
        1.
    }
}

impl ops::Add<V3> for V3 {
    type Output = V3;

    fn add(self, rhs: V3) -> V3 {
        add(&self, &rhs)
    }
}

impl ops::Sub<V3> for V3 {
    type Output = V3;

    fn sub(self, rhs: V3) -> V3 {
        sub(&self, &rhs)
    }
}

impl ops::Neg for V3 {
    type Output = V3;

    fn neg(self) -> V3 {
        mul(-1., &self)
    }
}

impl ops::Mul<V3> for f64 {
    type Output = V3;

    fn mul(self, rhs: V3) -> Self::Output {
        mul(self, &rhs)
    }
}

impl ops::Mul<f64> for V3 {
    type Output = V3;

    fn mul(self, rhs: f64) -> Self::Output {
        mul(rhs, &self)
    }
}

pub const B1: V3 = V3 {
    x: 1.,
    y: 0.,
    z: 0.,
};

pub const B2: V3 = V3 {
    x: 0.,
    y: 1.,
    z: 0.,
};

pub const B3: V3 = V3 {
    x: 0.,
    y: 0.,
    z: 1.,
};

pub const O: V3 = V3 {
    x: 0.,
    y: 0.,
    z: 0.,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = v(1., 2., 3.);
        let b = v(-4., 0.5, 2.);
        assert_eq!(a + b, v(-3., 2.5, 5.));
        assert_eq!(a - b, v(5., 1.5, 1.));
        assert_eq!(-a, v(-1., -2., -3.));
        assert_eq!(2. * a, v(2., 4., 6.));
        assert_eq!(a * 0.5, v(0.5, 1., 1.5));
        assert_eq!(dot(&a, &b), -4. + 1. + 6.);
    }

    #[test]
    fn test_length() {
        assert_eq!(v(3., 4., 0.).len(), 5.);
        assert_eq!(dist(&v(1., 1., 1.), &v(1., 1., 3.)), 2.);
    }

    #[test]
    fn test_normalize() {
        let n = normalize(&v(0., -3., 4.)).unwrap();
        assert!((n.len() - 1.).abs() < 1e-12);
        assert!((n.y + 0.6).abs() < 1e-12);
        assert!((n.z - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_zero_fails() {
        assert_eq!(normalize(&O), Err(Error::DivideByZero));
        assert_eq!(O.normalize(), Err(Error::DivideByZero));
    }

    #[test]
    fn test_sign() {
        assert_eq!(sign(-0.5), -1.);
        assert_eq!(sign(0.), 1.);
        assert_eq!(sign(2.), 1.);
    }
}
