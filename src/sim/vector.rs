//! 2D vector math in cartesian and polar form
//!
//! Rotation goes through a polar round trip: convert, add to the angle,
//! convert back. Division by zero is an error rather than an infinite vector.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::{cartesian_to_polar, polar_to_cartesian};

/// Cartesian 2D vector
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector2d(DVec2);

impl Vector2d {
    pub const ZERO: Self = Self(DVec2::ZERO);

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self(DVec2::new(x, y))
    }

    #[inline]
    pub fn x(self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn coords(self) -> (f64, f64) {
        (self.0.x, self.0.y)
    }

    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.0.dot(other.0)
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.0.length()
    }

    #[inline]
    pub fn length_squared(self) -> f64 {
        self.0.length_squared()
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Uniform scaling
    #[inline]
    pub fn scale(self, k: f64) -> Self {
        Self(self.0 * k)
    }

    /// Component-wise division by a scalar
    pub fn divide(self, k: f64) -> Result<Self> {
        if k == 0.0 {
            return Err(Error::DivisionByZero);
        }
        Ok(Self(self.0 / k))
    }

    /// Polar form: rho = Euclidean norm, phi = atan2(y, x)
    pub fn to_polar(self) -> VectorPolar {
        let (rho, phi) = cartesian_to_polar(self.0);
        VectorPolar { rho, phi }
    }

    /// Rotate counter-clockwise by `phi` radians
    pub fn rotate(self, phi: f64) -> Self {
        let mut polar = self.to_polar();
        polar.phi += phi;
        polar.to_cartesian()
    }

    /// Reflect across the vertical axis (horizontal wall bounce)
    #[inline]
    pub fn flip_x(self) -> Self {
        Self::new(-self.0.x, self.0.y)
    }

    /// Reflect across the horizontal axis (vertical wall bounce)
    #[inline]
    pub fn flip_y(self) -> Self {
        Self::new(self.0.x, -self.0.y)
    }
}

impl From<DVec2> for Vector2d {
    fn from(v: DVec2) -> Self {
        Self(v)
    }
}

impl From<Vector2d> for DVec2 {
    fn from(v: Vector2d) -> Self {
        v.0
    }
}

impl From<(f64, f64)> for Vector2d {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Vector2d {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Vector2d {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Vector2d {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul<f64> for Vector2d {
    type Output = Self;

    fn mul(self, k: f64) -> Self {
        self.scale(k)
    }
}

impl Neg for Vector2d {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

/// Polar 2D vector (magnitude, angle in radians)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VectorPolar {
    pub rho: f64,
    pub phi: f64,
}

impl VectorPolar {
    pub fn new(rho: f64, phi: f64) -> Self {
        Self { rho, phi }
    }

    pub fn to_cartesian(self) -> Vector2d {
        polar_to_cartesian(self.rho, self.phi).into()
    }

    /// Scales the magnitude, keeps the angle
    pub fn scale(self, k: f64) -> Self {
        Self {
            rho: self.rho * k,
            phi: self.phi,
        }
    }
}
