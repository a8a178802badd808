use std::ops::{Add, Mul, Neg, Sub};

use nalgebra::Vector3;

use crate::error::{MatrixError, Result};

/// Single-precision 3-vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FloatVector3 {
    inner: Vector3<f32>,
}

impl FloatVector3 {
    #[must_use]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            inner: Vector3::new(x, y, z),
        }
    }

    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn x(&self) -> f32 {
        self.inner.x
    }

    #[must_use]
    pub fn y(&self) -> f32 {
        self.inner.y
    }

    #[must_use]
    pub fn z(&self) -> f32 {
        self.inner.z
    }

    #[must_use]
    pub fn dot(&self, other: &FloatVector3) -> f32 {
        self.inner.dot(&other.inner)
    }

    #[must_use]
    pub fn cross(&self, other: &FloatVector3) -> FloatVector3 {
        FloatVector3 {
            inner: self.inner.cross(&other.inner),
        }
    }

    #[must_use]
    pub fn length(&self) -> f32 {
        self.inner.norm()
    }

    /// Returns the unit vector in this direction, or zero for a zero vector.
    #[must_use]
    pub fn normalize(&self) -> FloatVector3 {
        let len = self.length();
        if len == 0.0 {
            return FloatVector3::zero();
        }
        FloatVector3 {
            inner: self.inner / len,
        }
    }

    /// Component-wise division; a zero divisor component yields zero.
    #[must_use]
    pub fn div_components(&self, other: &FloatVector3) -> FloatVector3 {
        let div = |a: f32, b: f32| if b == 0.0 { 0.0 } else { a / b };
        FloatVector3::new(
            div(self.x(), other.x()),
            div(self.y(), other.y()),
            div(self.z(), other.z()),
        )
    }

    /// Divides every component by `divisor`.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::DivideByZero` if `divisor` is zero.
    pub fn try_div(&self, divisor: f32) -> Result<FloatVector3> {
        if divisor == 0.0 {
            return Err(MatrixError::DivideByZero.into());
        }
        Ok(FloatVector3 {
            inner: self.inner / divisor,
        })
    }
}

impl Add for FloatVector3 {
    type Output = FloatVector3;

    fn add(self, rhs: FloatVector3) -> FloatVector3 {
        FloatVector3 {
            inner: self.inner + rhs.inner,
        }
    }
}

impl Sub for FloatVector3 {
    type Output = FloatVector3;

    fn sub(self, rhs: FloatVector3) -> FloatVector3 {
        FloatVector3 {
            inner: self.inner - rhs.inner,
        }
    }
}

impl Neg for FloatVector3 {
    type Output = FloatVector3;

    fn neg(self) -> FloatVector3 {
        FloatVector3 { inner: -self.inner }
    }
}

impl Mul<f32> for FloatVector3 {
    type Output = FloatVector3;

    fn mul(self, rhs: f32) -> FloatVector3 {
        FloatVector3 {
            inner: self.inner * rhs,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic() {
        let a = FloatVector3::new(1.0, 2.0, 3.0);
        let b = FloatVector3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, FloatVector3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, FloatVector3::new(3.0, 3.0, 3.0));
        assert_eq!(-a, FloatVector3::new(-1.0, -2.0, -3.0));
        assert_eq!(a * 2.0, FloatVector3::new(2.0, 4.0, 6.0));
        assert_eq!(a.dot(&b), 32.0);
    }

    #[test]
    fn cross_and_normalize() {
        let x = FloatVector3::new(1.0, 0.0, 0.0);
        let y = FloatVector3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y), FloatVector3::new(0.0, 0.0, 1.0));
        let n = FloatVector3::new(3.0, 0.0, 4.0).normalize();
        assert!((n.length() - 1.0).abs() < 1e-6);
        assert_eq!(FloatVector3::zero().normalize(), FloatVector3::zero());
    }

    #[test]
    fn component_division_by_zero_is_zero() {
        let a = FloatVector3::new(2.0, 4.0, 6.0);
        let d = a.div_components(&FloatVector3::new(2.0, 0.0, 3.0));
        assert_eq!(d, FloatVector3::new(1.0, 0.0, 2.0));
    }

    #[test]
    fn scalar_division() {
        let a = FloatVector3::new(2.0, 4.0, 6.0);
        assert_eq!(a.try_div(2.0).unwrap(), FloatVector3::new(1.0, 2.0, 3.0));
        assert!(a.try_div(0.0).is_err());
    }
}
