//! Weighted points in component coordinates.
//!
//! The x axis runs along the rocket from nose to tail; y and z span the
//! cross-section. The weight carries a mass when the point is a CG.

use nalgebra::Vector3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub position: Vector3<f64>,
    pub weight: f64,
}

impl Coordinate {
    /// Origin with zero weight
    pub fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self::weighted(x, y, z, 0.0)
    }

    pub fn weighted(x: f64, y: f64, z: f64, weight: f64) -> Self {
        Self {
            position: Vector3::new(x, y, z),
            weight,
        }
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn z(&self) -> f64 {
        self.position.z
    }

    /// Translate the point, keeping its weight.
    pub fn add(&self, dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            position: self.position + Vector3::new(dx, dy, dz),
            weight: self.weight,
        }
    }

    pub fn with_weight(&self, weight: f64) -> Self {
        Self {
            position: self.position,
            weight,
        }
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.position.x, self.position.y, self.position.z]
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::origin()
    }
}
