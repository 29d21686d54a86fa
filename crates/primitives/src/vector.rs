use std::fmt;

use serde::{Deserialize, Serialize};

/// Double-precision three-component vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3d {
	pub x: f64,
	pub y: f64,
	pub z: f64,
}

impl Vector3d {
	pub const ZERO: Vector3d = Vector3d::new(0.0, 0.0, 0.0);

	pub const fn new(x: f64, y: f64, z: f64) -> Self {
		Self { x, y, z }
	}

	/// Euclidean length.
	pub fn length(self) -> f64 {
		(self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
	}

	/// Scales every component.
	pub fn scale(self, factor: f64) -> Self {
		Self::new(self.x * factor, self.y * factor, self.z * factor)
	}
}

impl fmt::Display for Vector3d {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({}, {}, {})", self.x, self.y, self.z)
	}
}
