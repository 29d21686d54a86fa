use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use sponge_primitives::keys::{EXHAUSTION, FOOD_LEVEL, SATURATION};
use sponge_primitives::{BoundedValue, Bounds, Key, ValueElement};

use super::write_outcome;
use crate::cache::{CacheArg, ImmutableCaches};
use crate::error::EngineError;
use crate::holder::{DataHolder, HungerAccess};
use crate::manipulator::{
	DEFAULT_EXHAUSTION, DEFAULT_FOOD_LEVEL, DEFAULT_SATURATION, exhaustion_bounds,
	food_level_bounds, saturation_bounds,
};
use crate::processor::ValueProcessor;
use crate::transaction::DataTransactionResult;

/// One bounded field of a player's food stats.
pub trait HungerStat: Send + Sync + 'static {
	type Element: ValueElement + CacheArg + Copy;

	fn key() -> Key<BoundedValue<Self::Element>>;

	fn default_element() -> Self::Element;

	fn bounds() -> Bounds<Self::Element>;

	fn read(hunger: &dyn HungerAccess) -> Self::Element;

	fn write(hunger: &mut dyn HungerAccess, element: Self::Element) -> Result<(), EngineError>;
}

pub struct FoodLevel;

impl HungerStat for FoodLevel {
	type Element = i32;

	fn key() -> Key<BoundedValue<i32>> {
		FOOD_LEVEL
	}

	fn default_element() -> i32 {
		DEFAULT_FOOD_LEVEL
	}

	fn bounds() -> Bounds<i32> {
		food_level_bounds()
	}

	fn read(hunger: &dyn HungerAccess) -> i32 {
		hunger.food_level()
	}

	fn write(hunger: &mut dyn HungerAccess, level: i32) -> Result<(), EngineError> {
		hunger.set_food_level(level)
	}
}

pub struct Saturation;

impl HungerStat for Saturation {
	type Element = f64;

	fn key() -> Key<BoundedValue<f64>> {
		SATURATION
	}

	fn default_element() -> f64 {
		DEFAULT_SATURATION
	}

	fn bounds() -> Bounds<f64> {
		saturation_bounds()
	}

	fn read(hunger: &dyn HungerAccess) -> f64 {
		hunger.saturation()
	}

	fn write(hunger: &mut dyn HungerAccess, saturation: f64) -> Result<(), EngineError> {
		hunger.set_saturation(saturation)
	}
}

pub struct Exhaustion;

impl HungerStat for Exhaustion {
	type Element = f64;

	fn key() -> Key<BoundedValue<f64>> {
		EXHAUSTION
	}

	fn default_element() -> f64 {
		DEFAULT_EXHAUSTION
	}

	fn bounds() -> Bounds<f64> {
		exhaustion_bounds()
	}

	fn read(hunger: &dyn HungerAccess) -> f64 {
		hunger.exhaustion()
	}

	fn write(hunger: &mut dyn HungerAccess, exhaustion: f64) -> Result<(), EngineError> {
		hunger.set_exhaustion(exhaustion)
	}
}

/// Processor for one food stat of players.
pub struct HungerValueProcessor<S> {
	caches: Arc<ImmutableCaches>,
	_stat: PhantomData<fn() -> S>,
}

pub type FoodLevelValueProcessor = HungerValueProcessor<FoodLevel>;
pub type SaturationValueProcessor = HungerValueProcessor<Saturation>;
pub type ExhaustionValueProcessor = HungerValueProcessor<Exhaustion>;

impl<S: HungerStat> HungerValueProcessor<S> {
	pub fn new(caches: Arc<ImmutableCaches>) -> Self {
		Self {
			caches,
			_stat: PhantomData,
		}
	}
}

impl<S: HungerStat> fmt::Debug for HungerValueProcessor<S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("HungerValueProcessor")
			.field(&S::key().id())
			.finish()
	}
}

impl<S: HungerStat> ValueProcessor<BoundedValue<S::Element>> for HungerValueProcessor<S> {
	fn key(&self) -> Key<BoundedValue<S::Element>> {
		S::key()
	}

	fn supports(&self, holder: &dyn DataHolder) -> bool {
		holder.as_hunger().is_some()
	}

	fn get(&self, holder: &dyn DataHolder) -> Option<S::Element> {
		holder.as_hunger().map(S::read)
	}

	fn api_value(&self, holder: &dyn DataHolder) -> Option<BoundedValue<S::Element>> {
		let current = self.get(holder)?;
		Some(BoundedValue::new(
			S::key(),
			S::default_element(),
			current,
			S::bounds(),
		))
	}

	fn offer(&self, holder: &mut dyn DataHolder, element: S::Element) -> DataTransactionResult {
		let bounds = S::bounds();
		let proposed =
			self.caches
				.immutable_bounded(S::key(), S::default_element(), element, &bounds);
		let Some(hunger) = holder.as_hunger_mut() else {
			return DataTransactionResult::fail_result(proposed);
		};
		if !bounds.contains(&element) {
			return DataTransactionResult::error_result(proposed);
		}
		let old = self.caches.immutable_bounded(
			S::key(),
			S::default_element(),
			S::read(&*hunger),
			&bounds,
		);
		write_outcome(S::key().id(), S::write(hunger, element), proposed, old)
	}
}
