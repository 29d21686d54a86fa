use std::any::Any;
use std::cmp::Ordering;

use sponge_primitives::keys::{EXHAUSTION, FOOD_LEVEL, SATURATION};
use sponge_primitives::{
	BaseValue, BoundedValue, Bounds, DataView, MutableValue, RawKey, double_comparator,
	int_comparator,
};

use super::{DataManipulator, ImmutableDataManipulator};
use crate::cache::Canonical;
use crate::error::ConstructError;

const MAX_FOOD_LEVEL: i32 = 20;
pub const DEFAULT_FOOD_LEVEL: i32 = 20;
const MAX_SATURATION: f64 = 20.0;
pub const DEFAULT_SATURATION: f64 = 20.0;
const MAX_EXHAUSTION: f64 = 20.0;
pub const DEFAULT_EXHAUSTION: f64 = 0.0;

pub fn food_level_bounds() -> Bounds<i32> {
	Bounds::new(0, MAX_FOOD_LEVEL, int_comparator)
}

pub fn saturation_bounds() -> Bounds<f64> {
	Bounds::new(0.0, MAX_SATURATION, double_comparator)
}

pub fn exhaustion_bounds() -> Bounds<f64> {
	Bounds::new(0.0, MAX_EXHAUSTION, double_comparator)
}

/// A player's food stats, written and read as one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodData {
	food_level: i32,
	exhaustion: f64,
	saturation: f64,
}

impl FoodData {
	pub fn new(food_level: i32, exhaustion: f64, saturation: f64) -> Self {
		Self {
			food_level,
			exhaustion,
			saturation,
		}
	}

	pub fn food_level(&self) -> BoundedValue<i32> {
		BoundedValue::new(FOOD_LEVEL, DEFAULT_FOOD_LEVEL, self.food_level, food_level_bounds())
	}

	pub fn exhaustion(&self) -> BoundedValue<f64> {
		BoundedValue::new(EXHAUSTION, DEFAULT_EXHAUSTION, self.exhaustion, exhaustion_bounds())
	}

	pub fn saturation(&self) -> BoundedValue<f64> {
		BoundedValue::new(SATURATION, DEFAULT_SATURATION, self.saturation, saturation_bounds())
	}

	/// Raw elements as `(food_level, exhaustion, saturation)`.
	pub fn elements(&self) -> (i32, f64, f64) {
		(self.food_level, self.exhaustion, self.saturation)
	}
}

impl Default for FoodData {
	fn default() -> Self {
		Self::new(DEFAULT_FOOD_LEVEL, DEFAULT_EXHAUSTION, DEFAULT_SATURATION)
	}
}

impl DataManipulator for FoodData {
	type Immutable = ImmutableFoodData;

	fn keys(&self) -> Vec<RawKey> {
		vec![FOOD_LEVEL.raw(), EXHAUSTION.raw(), SATURATION.raw()]
	}

	fn value_any(&self, key: RawKey) -> Option<Box<dyn Any>> {
		if FOOD_LEVEL == key {
			Some(Box::new(self.food_level()))
		} else if EXHAUSTION == key {
			Some(Box::new(self.exhaustion()))
		} else if SATURATION == key {
			Some(Box::new(self.saturation()))
		} else {
			None
		}
	}

	fn set_any(&mut self, key: RawKey, element: &dyn Any) -> bool {
		if FOOD_LEVEL == key {
			let mut value = self.food_level();
			let accepted = element.downcast_ref::<i32>().is_some_and(|e| value.set(*e));
			self.food_level = *value.get();
			accepted
		} else if EXHAUSTION == key {
			let mut value = self.exhaustion();
			let accepted = element.downcast_ref::<f64>().is_some_and(|e| value.set(*e));
			self.exhaustion = *value.get();
			accepted
		} else if SATURATION == key {
			let mut value = self.saturation();
			let accepted = element.downcast_ref::<f64>().is_some_and(|e| value.set(*e));
			self.saturation = *value.get();
			accepted
		} else {
			false
		}
	}

	fn to_container(&self) -> DataView {
		DataView::new()
			.with(FOOD_LEVEL.query(), self.food_level)
			.with(SATURATION.query(), self.saturation)
			.with(EXHAUSTION.query(), self.exhaustion)
	}

	fn as_immutable(&self) -> ImmutableFoodData {
		ImmutableFoodData {
			food_level: self.food_level,
			exhaustion: self.exhaustion,
			saturation: self.saturation,
		}
	}

	fn compare_to(&self, other: &Self) -> Ordering {
		self.food_level
			.cmp(&other.food_level)
			.then_with(|| self.exhaustion.total_cmp(&other.exhaustion))
			.then_with(|| self.saturation.total_cmp(&other.saturation))
	}
}

/// Canonical immutable food stats.
#[derive(Debug, Clone, PartialEq)]
pub struct ImmutableFoodData {
	food_level: i32,
	exhaustion: f64,
	saturation: f64,
}

impl ImmutableFoodData {
	pub fn food_level(&self) -> i32 {
		self.food_level
	}

	pub fn exhaustion(&self) -> f64 {
		self.exhaustion
	}

	pub fn saturation(&self) -> f64 {
		self.saturation
	}
}

impl ImmutableDataManipulator for ImmutableFoodData {
	type Mutable = FoodData;

	fn as_mutable(&self) -> FoodData {
		FoodData::new(self.food_level, self.exhaustion, self.saturation)
	}
}

impl Canonical for ImmutableFoodData {
	const CANONICAL_NAME: &'static str = "ImmutableFoodData";
	type Args = (i32, f64, f64);

	fn construct((food_level, exhaustion, saturation): (i32, f64, f64)) -> Result<Self, ConstructError> {
		if food_level < 0 || exhaustion < 0.0 || saturation < 0.0 {
			return Err(ConstructError::InvalidArgument(format!(
				"negative food stats ({food_level}, {exhaustion}, {saturation})"
			)));
		}
		Ok(Self {
			food_level,
			exhaustion,
			saturation,
		})
	}

	fn canonical_args(&self) -> (i32, f64, f64) {
		(self.food_level, self.exhaustion, self.saturation)
	}
}
