use serde::{Deserialize, Serialize};

/// Three-vector used for positions (mm) and momentum directions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(&self, other: &Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector along `self`. A zero-length vector is returned unchanged.
    pub fn unit(&self) -> Vec3 {
        let n = self.norm();
        if n > 0.0 && n.is_finite() {
            Vec3::new(self.x / n, self.y / n, self.z / n)
        } else {
            *self
        }
    }

    /// Opening angle to `other` in degrees.
    ///
    /// The cosine is clamped to `[-1, 1]` before `acos`, so rounding on
    /// nearly parallel directions and degenerate inputs never yield NaN.
    pub fn angle_between_deg(&self, other: &Vec3) -> f64 {
        let cos = self.unit().dot(&other.unit());
        let cos = if cos.is_nan() { 1.0 } else { cos.clamp(-1.0, 1.0) };
        cos.acos().to_degrees()
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(v: [f64; 3]) -> Self {
        Vec3::new(v[0], v[1], v[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_of_zero_is_zero() {
        assert_eq!(Vec3::ZERO.unit(), Vec3::ZERO);
    }

    #[test]
    fn test_angle_between_parallel_is_zero() {
        let a = Vec3::new(0.0, 0.0, 2.0);
        let b = Vec3::new(0.0, 0.0, 0.5);
        assert!(a.angle_between_deg(&b).abs() < 1e-9);
    }

    #[test]
    fn test_angle_between_antiparallel() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(-3.0, 0.0, 0.0);
        assert!((a.angle_between_deg(&b) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_angle_with_degenerate_direction_is_finite() {
        let a = Vec3::ZERO;
        let b = Vec3::new(0.0, 1.0, 0.0);
        assert!(a.angle_between_deg(&b).is_finite());
    }
}
