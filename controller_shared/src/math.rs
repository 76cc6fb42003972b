//! Math types.
//!
//! This module intentionally stays small and deterministic.
//! It avoids SIMD/unsafe and focuses on stable semantics.
//!
//! Conventions: Y is up, a character's forward axis is +Z.

use std::ops::{Add, AddAssign, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Lengths below this are treated as zero when normalizing.
const NORMALIZE_EPSILON: f32 = 1e-6;

/// 2D vector, used for stick/axis input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Clamps each component to `[-1, 1]`.
    pub fn clamped_unit(self) -> Self {
        Self::new(self.x.clamp(-1.0, 1.0), self.y.clamp(-1.0, 1.0))
    }
}

/// 3D vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const UP: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };

    pub const FORWARD: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    pub fn len_sq(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.len_sq().sqrt()
    }

    pub fn is_zero(self) -> bool {
        self.len_sq() <= NORMALIZE_EPSILON * NORMALIZE_EPSILON
    }

    /// Unit vector in the same direction, or `ZERO` for a degenerate input.
    pub fn normalize_or_zero(self) -> Self {
        let len = self.length();
        if len <= NORMALIZE_EPSILON {
            Self::ZERO
        } else {
            self * (1.0 / len)
        }
    }

    pub fn lerp(self, to: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(
            self.x + (to.x - self.x) * t,
            self.y + (to.y - self.y) * t,
            self.z + (to.z - self.z) * t,
        )
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Unit quaternion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    pub const fn from_xyzw(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle` radians about `axis` (need not be normalized).
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let axis = axis.normalize_or_zero();
        let (s, c) = (angle * 0.5).sin_cos();
        Self::from_xyzw(axis.x * s, axis.y * s, axis.z * s, c)
    }

    /// Rotation whose forward (+Z) axis points along `forward`, keeping `up`
    /// as close to its up axis as possible.
    ///
    /// Returns `IDENTITY` when `forward` is zero or parallel to `up`.
    pub fn look_rotation(forward: Vec3, up: Vec3) -> Self {
        let z = forward.normalize_or_zero();
        let x = up.cross(z).normalize_or_zero();
        if z.is_zero() || x.is_zero() {
            return Self::IDENTITY;
        }
        let y = z.cross(x);

        // Columns are the rotated basis vectors.
        let (m00, m01, m02) = (x.x, y.x, z.x);
        let (m10, m11, m12) = (x.y, y.y, z.y);
        let (m20, m21, m22) = (x.z, y.z, z.z);

        let trace = m00 + m11 + m22;
        let q = if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Self::from_xyzw((m21 - m12) / s, (m02 - m20) / s, (m10 - m01) / s, 0.25 * s)
        } else if m00 > m11 && m00 > m22 {
            let s = (1.0 + m00 - m11 - m22).sqrt() * 2.0;
            Self::from_xyzw(0.25 * s, (m01 + m10) / s, (m02 + m20) / s, (m21 - m12) / s)
        } else if m11 > m22 {
            let s = (1.0 + m11 - m00 - m22).sqrt() * 2.0;
            Self::from_xyzw((m01 + m10) / s, 0.25 * s, (m12 + m21) / s, (m02 - m20) / s)
        } else {
            let s = (1.0 + m22 - m00 - m11).sqrt() * 2.0;
            Self::from_xyzw((m02 + m20) / s, (m12 + m21) / s, 0.25 * s, (m10 - m01) / s)
        };
        q.normalize()
    }

    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z + self.w * rhs.w
    }

    pub fn normalize(self) -> Self {
        let len = self.dot(self).sqrt();
        if len <= NORMALIZE_EPSILON {
            return Self::IDENTITY;
        }
        let inv = 1.0 / len;
        Self::from_xyzw(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
    }

    /// Spherical interpolation along the shortest arc. `t` is clamped to
    /// `[0, 1]`.
    pub fn slerp(self, to: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mut to = to;
        let mut cos = self.dot(to);
        if cos < 0.0 {
            to = Self::from_xyzw(-to.x, -to.y, -to.z, -to.w);
            cos = -cos;
        }

        // Nearly parallel: fall back to normalized lerp.
        if cos > 0.9995 {
            return Self::from_xyzw(
                self.x + (to.x - self.x) * t,
                self.y + (to.y - self.y) * t,
                self.z + (to.z - self.z) * t,
                self.w + (to.w - self.w) * t,
            )
            .normalize();
        }

        let theta = cos.acos();
        let sin = theta.sin();
        let a = ((1.0 - t) * theta).sin() / sin;
        let b = (t * theta).sin() / sin;
        Self::from_xyzw(
            self.x * a + to.x * b,
            self.y * a + to.y * b,
            self.z * a + to.z * b,
            self.w * a + to.w * b,
        )
    }

    /// Angle in radians between two orientations.
    pub fn angle_to(self, other: Self) -> f32 {
        2.0 * self.dot(other).abs().min(1.0).acos()
    }

    /// Rotates a vector by this quaternion.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let q = Vec3::new(self.x, self.y, self.z);
        let t = q.cross(v) * 2.0;
        v + t * self.w + q.cross(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn approx_vec(a: Vec3, b: Vec3) -> bool {
        approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
    }

    fn same_rotation(a: Quat, b: Quat) -> bool {
        a.dot(b).abs() > 1.0 - 1e-5
    }

    #[test]
    fn vec3_lerp_midpoint() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(2.0, 4.0, 6.0);
        let mid = a.lerp(b, 0.5);
        assert_eq!(mid, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn normalize_zero_stays_zero() {
        assert_eq!(Vec3::ZERO.normalize_or_zero(), Vec3::ZERO);
        let n = Vec3::new(3.0, 0.0, 4.0).normalize_or_zero();
        assert!(approx(n.length(), 1.0));
        assert!(approx(n.x, 0.6) && approx(n.z, 0.8));
    }

    #[test]
    fn look_rotation_points_forward_axis() {
        for dir in [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, 1.0).normalize_or_zero(),
        ] {
            let q = Quat::look_rotation(dir, Vec3::UP);
            assert!(approx_vec(q.rotate(Vec3::FORWARD), dir), "dir {dir:?}");
        }
    }

    #[test]
    fn look_rotation_degenerate_is_identity() {
        assert_eq!(Quat::look_rotation(Vec3::ZERO, Vec3::UP), Quat::IDENTITY);
        assert_eq!(Quat::look_rotation(Vec3::UP, Vec3::UP), Quat::IDENTITY);
    }

    #[test]
    fn slerp_endpoints_and_midpoint() {
        let a = Quat::IDENTITY;
        let b = Quat::from_axis_angle(Vec3::UP, std::f32::consts::FRAC_PI_2);
        assert!(same_rotation(a.slerp(b, 0.0), a));
        assert!(same_rotation(a.slerp(b, 1.0), b));
        let mid = a.slerp(b, 0.5);
        assert!(approx(mid.angle_to(a), std::f32::consts::FRAC_PI_4));
        // t is clamped like an engine slerp.
        assert!(same_rotation(a.slerp(b, 3.0), b));
    }
}
