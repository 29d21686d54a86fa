use std::any::Any;
use std::cmp::Ordering;

use sponge_primitives::keys::{HEALTH, MAX_HEALTH};
use sponge_primitives::{
	BaseValue, BoundedValue, Bounds, DataView, MutableValue, RawKey, double_comparator,
};

use super::{DataManipulator, ImmutableDataManipulator};
use crate::cache::Canonical;
use crate::error::ConstructError;

pub const DEFAULT_MAX_HEALTH: f64 = 20.0;

/// Health may range from zero to the current max health.
pub fn health_bounds(max_health: f64) -> Bounds<f64> {
	Bounds::new(0.0, max_health, double_comparator)
}

pub fn max_health_bounds() -> Bounds<f64> {
	Bounds::new(1.0, f64::from(f32::MAX), double_comparator)
}

/// Health and max health of a living entity.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthData {
	health: f64,
	max_health: f64,
}

impl HealthData {
	pub fn new(health: f64, max_health: f64) -> Self {
		Self { health, max_health }
	}

	pub fn health(&self) -> BoundedValue<f64> {
		BoundedValue::new(HEALTH, self.max_health, self.health, health_bounds(self.max_health))
	}

	pub fn max_health(&self) -> BoundedValue<f64> {
		BoundedValue::new(MAX_HEALTH, DEFAULT_MAX_HEALTH, self.max_health, max_health_bounds())
	}

	/// Raw elements as `(health, max_health)`.
	pub fn elements(&self) -> (f64, f64) {
		(self.health, self.max_health)
	}
}

impl Default for HealthData {
	fn default() -> Self {
		Self::new(DEFAULT_MAX_HEALTH, DEFAULT_MAX_HEALTH)
	}
}

impl DataManipulator for HealthData {
	type Immutable = ImmutableHealthData;

	fn keys(&self) -> Vec<RawKey> {
		vec![HEALTH.raw(), MAX_HEALTH.raw()]
	}

	fn value_any(&self, key: RawKey) -> Option<Box<dyn Any>> {
		if HEALTH == key {
			Some(Box::new(self.health()))
		} else if MAX_HEALTH == key {
			Some(Box::new(self.max_health()))
		} else {
			None
		}
	}

	/// Lowering max health below the current health also lowers health.
	fn set_any(&mut self, key: RawKey, element: &dyn Any) -> bool {
		let Some(&element) = element.downcast_ref::<f64>() else {
			return false;
		};
		if HEALTH == key {
			let mut value = self.health();
			let accepted = value.set(element);
			self.health = *value.get();
			accepted
		} else if MAX_HEALTH == key {
			let mut value = self.max_health();
			if !value.set(element) {
				return false;
			}
			self.max_health = *value.get();
			self.health = self.health.min(self.max_health);
			true
		} else {
			false
		}
	}

	fn to_container(&self) -> DataView {
		DataView::new()
			.with(HEALTH.query(), self.health)
			.with(MAX_HEALTH.query(), self.max_health)
	}

	fn as_immutable(&self) -> ImmutableHealthData {
		ImmutableHealthData {
			health: self.health,
			max_health: self.max_health,
		}
	}

	fn compare_to(&self, other: &Self) -> Ordering {
		self.health
			.total_cmp(&other.health)
			.then_with(|| self.max_health.total_cmp(&other.max_health))
	}
}

/// Canonical immutable health.
#[derive(Debug, Clone, PartialEq)]
pub struct ImmutableHealthData {
	health: f64,
	max_health: f64,
}

impl ImmutableHealthData {
	pub fn health(&self) -> f64 {
		self.health
	}

	pub fn max_health(&self) -> f64 {
		self.max_health
	}
}

impl ImmutableDataManipulator for ImmutableHealthData {
	type Mutable = HealthData;

	fn as_mutable(&self) -> HealthData {
		HealthData::new(self.health, self.max_health)
	}
}

impl Canonical for ImmutableHealthData {
	const CANONICAL_NAME: &'static str = "ImmutableHealthData";
	type Args = (f64, f64);

	fn construct((health, max_health): (f64, f64)) -> Result<Self, ConstructError> {
		if !max_health_bounds().contains(&max_health) {
			return Err(ConstructError::InvalidArgument(format!(
				"max health {max_health} out of range"
			)));
		}
		if !health_bounds(max_health).contains(&health) {
			return Err(ConstructError::InvalidArgument(format!(
				"health {health} outside 0..={max_health}"
			)));
		}
		Ok(Self { health, max_health })
	}

	fn canonical_args(&self) -> (f64, f64) {
		(self.health, self.max_health)
	}
}
