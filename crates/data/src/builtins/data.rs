use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use sponge_primitives::keys::{EXHAUSTION, FOOD_LEVEL, HEALTH, MAX_HEALTH, SATURATION};
use sponge_primitives::DataView;

use super::single::SingleDataAccess;
use super::write_outcome;
use crate::cache::ImmutableCaches;
use crate::error::{CacheError, EngineError};
use crate::holder::{DataHolder, HungerAccess, LivingAccess};
use crate::manipulator::{
	DEFAULT_EXHAUSTION, DEFAULT_FOOD_LEVEL, DEFAULT_MAX_HEALTH, DEFAULT_SATURATION, FoodData,
	HealthData, ImmutableFoodData, ImmutableHealthData, ImmutableSingleData, SingleData,
	exhaustion_bounds, food_level_bounds, health_bounds, max_health_bounds, saturation_bounds,
};
use crate::processor::{DataManipulatorBuilder, DataPriority, DataProcessor};
use crate::transaction::{DataTransactionResult, ErasedValue, ResultType};

fn rejected(proposed: Vec<ErasedValue>) -> DataTransactionResult {
	proposed
		.into_iter()
		.fold(DataTransactionResult::builder(), |builder, value| builder.reject(value))
		.result(ResultType::Error)
		.build()
}

fn restored(manipulator: &'static str, written: Result<(), EngineError>) {
	if let Err(error) = written {
		tracing::warn!(manipulator, %error, "engine refused restoring a partial write");
	}
}

fn committed(
	manipulator: &'static str,
	written: Result<(), EngineError>,
	proposed: Vec<ErasedValue>,
	replaced: Vec<ErasedValue>,
) -> DataTransactionResult {
	if let Err(error) = written {
		tracing::warn!(manipulator, %error, "engine refused manipulator write");
		return rejected(proposed);
	}
	let builder = proposed
		.into_iter()
		.fold(DataTransactionResult::builder(), |builder, value| builder.success(value));
	replaced
		.into_iter()
		.fold(builder, |builder, value| builder.replace(value))
		.result(ResultType::Success)
		.build()
}

/// Food level, exhaustion and saturation of players, written together.
#[derive(Debug, Clone)]
pub struct FoodDataProcessor {
	caches: Arc<ImmutableCaches>,
}

impl FoodDataProcessor {
	pub fn new(caches: Arc<ImmutableCaches>) -> Self {
		Self { caches }
	}

	fn values(&self, food_level: i32, exhaustion: f64, saturation: f64) -> Vec<ErasedValue> {
		let food_level: ErasedValue = self.caches.immutable_bounded(
			FOOD_LEVEL,
			DEFAULT_FOOD_LEVEL,
			food_level,
			&food_level_bounds(),
		);
		let exhaustion: ErasedValue = self.caches.immutable_bounded(
			EXHAUSTION,
			DEFAULT_EXHAUSTION,
			exhaustion,
			&exhaustion_bounds(),
		);
		let saturation: ErasedValue = self.caches.immutable_bounded(
			SATURATION,
			DEFAULT_SATURATION,
			saturation,
			&saturation_bounds(),
		);
		vec![food_level, exhaustion, saturation]
	}
}

fn apply_food(
	hunger: &mut dyn HungerAccess,
	(food_level, exhaustion, saturation): (i32, f64, f64),
) -> Result<(), EngineError> {
	hunger.set_food_level(food_level)?;
	hunger.set_exhaustion(exhaustion)?;
	hunger.set_saturation(saturation)
}

/// Writes `next`; if the engine refuses a field, puts every field back to
/// `prior` before reporting the refusal.
fn write_food(
	hunger: &mut dyn HungerAccess,
	next: (i32, f64, f64),
	prior: (i32, f64, f64),
) -> Result<(), EngineError> {
	let written = apply_food(hunger, next);
	if written.is_err() {
		let (food_level, exhaustion, saturation) = prior;
		restored("FoodData", hunger.set_food_level(food_level));
		restored("FoodData", hunger.set_exhaustion(exhaustion));
		restored("FoodData", hunger.set_saturation(saturation));
	}
	written
}

impl DataProcessor<FoodData> for FoodDataProcessor {
	fn supports(&self, holder: &dyn DataHolder) -> bool {
		holder.as_hunger().is_some()
	}

	fn from_holder(&self, holder: &dyn DataHolder) -> Option<FoodData> {
		let hunger = holder.as_hunger()?;
		Some(FoodData::new(
			hunger.food_level(),
			hunger.exhaustion(),
			hunger.saturation(),
		))
	}

	fn set(
		&self,
		holder: &mut dyn DataHolder,
		manipulator: &FoodData,
		priority: DataPriority,
	) -> DataTransactionResult {
		let Some(hunger) = holder.as_hunger_mut() else {
			return DataTransactionResult::fail_no_data();
		};
		if priority == DataPriority::DataHolder {
			return DataTransactionResult::success_no_data();
		}
		let elements = manipulator.elements();
		let (food_level, exhaustion, saturation) = elements;
		let proposed = self.values(food_level, exhaustion, saturation);
		if !(food_level_bounds().contains(&food_level)
			&& exhaustion_bounds().contains(&exhaustion)
			&& saturation_bounds().contains(&saturation))
		{
			return rejected(proposed);
		}
		let prior = (hunger.food_level(), hunger.exhaustion(), hunger.saturation());
		let replaced = self.values(prior.0, prior.1, prior.2);
		committed("FoodData", write_food(hunger, elements, prior), proposed, replaced)
	}

	fn immutable_from(
		&self,
		holder: &dyn DataHolder,
	) -> Result<Option<Arc<ImmutableFoodData>>, CacheError> {
		holder
			.as_hunger()
			.map(|hunger| {
				self.caches.manipulator::<ImmutableFoodData>((
					hunger.food_level(),
					hunger.exhaustion(),
					hunger.saturation(),
				))
			})
			.transpose()
	}

	fn build(&self, view: &DataView) -> Option<FoodData> {
		let food_level = i32::try_from(view.get_int(FOOD_LEVEL.query()).ok()?).ok()?;
		let saturation = view.get_double(SATURATION.query()).ok()?;
		let exhaustion = view.get_double(EXHAUSTION.query()).ok()?;
		Some(FoodData::new(food_level, exhaustion, saturation))
	}
}

impl DataManipulatorBuilder<FoodData> for FoodDataProcessor {
	fn create(&self) -> FoodData {
		FoodData::default()
	}

	fn create_from(&self, holder: &dyn DataHolder) -> Option<FoodData> {
		self.from_holder(holder)
	}

	fn build_from(&self, view: &DataView) -> Option<FoodData> {
		self.build(view)
	}
}

/// Health and max health of living entities, written together.
#[derive(Debug, Clone)]
pub struct HealthDataProcessor {
	caches: Arc<ImmutableCaches>,
}

impl HealthDataProcessor {
	pub fn new(caches: Arc<ImmutableCaches>) -> Self {
		Self { caches }
	}

	fn values(&self, health: f64, max_health: f64) -> Vec<ErasedValue> {
		let health: ErasedValue = self.caches.immutable_bounded(
			HEALTH,
			max_health,
			health,
			&health_bounds(max_health),
		);
		let max_health: ErasedValue = self.caches.immutable_bounded(
			MAX_HEALTH,
			DEFAULT_MAX_HEALTH,
			max_health,
			&max_health_bounds(),
		);
		vec![health, max_health]
	}
}

fn apply_health(
	living: &mut dyn LivingAccess,
	(health, max_health): (f64, f64),
) -> Result<(), EngineError> {
	living.set_max_health(max_health)?;
	living.set_health(health)
}

/// Writes `next`, restoring `prior` when the engine refuses either field.
/// Max health goes back first so the old health fits under it.
fn write_health(
	living: &mut dyn LivingAccess,
	next: (f64, f64),
	prior: (f64, f64),
) -> Result<(), EngineError> {
	let written = apply_health(living, next);
	if written.is_err() {
		let (health, max_health) = prior;
		restored("HealthData", living.set_max_health(max_health));
		restored("HealthData", living.set_health(health));
	}
	written
}

impl DataProcessor<HealthData> for HealthDataProcessor {
	fn supports(&self, holder: &dyn DataHolder) -> bool {
		holder.as_living().is_some()
	}

	fn from_holder(&self, holder: &dyn DataHolder) -> Option<HealthData> {
		let living = holder.as_living()?;
		Some(HealthData::new(living.health(), living.max_health()))
	}

	fn set(
		&self,
		holder: &mut dyn DataHolder,
		manipulator: &HealthData,
		priority: DataPriority,
	) -> DataTransactionResult {
		let Some(living) = holder.as_living_mut() else {
			return DataTransactionResult::fail_no_data();
		};
		if priority == DataPriority::DataHolder {
			return DataTransactionResult::success_no_data();
		}
		let elements = manipulator.elements();
		let (health, max_health) = elements;
		let proposed = self.values(health, max_health);
		if !(max_health_bounds().contains(&max_health)
			&& health_bounds(max_health).contains(&health))
		{
			return rejected(proposed);
		}
		let prior = (living.health(), living.max_health());
		let replaced = self.values(prior.0, prior.1);
		committed("HealthData", write_health(living, elements, prior), proposed, replaced)
	}

	fn immutable_from(
		&self,
		holder: &dyn DataHolder,
	) -> Result<Option<Arc<ImmutableHealthData>>, CacheError> {
		holder
			.as_living()
			.map(|living| {
				self.caches
					.manipulator::<ImmutableHealthData>((living.health(), living.max_health()))
			})
			.transpose()
	}

	fn build(&self, view: &DataView) -> Option<HealthData> {
		let health = view.get_double(HEALTH.query()).ok()?;
		let max_health = view.get_double(MAX_HEALTH.query()).ok()?;
		Some(HealthData::new(health, max_health))
	}
}

impl DataManipulatorBuilder<HealthData> for HealthDataProcessor {
	fn create(&self) -> HealthData {
		HealthData::default()
	}

	fn create_from(&self, holder: &dyn DataHolder) -> Option<HealthData> {
		self.from_holder(holder)
	}

	fn build_from(&self, view: &DataView) -> Option<HealthData> {
		self.build(view)
	}
}

/// Data processor and builder for a single-value manipulator.
pub struct SingleDataProcessor<S> {
	caches: Arc<ImmutableCaches>,
	_kind: PhantomData<fn() -> S>,
}

impl<S: SingleDataAccess> SingleDataProcessor<S> {
	pub fn new(caches: Arc<ImmutableCaches>) -> Self {
		Self {
			caches,
			_kind: PhantomData,
		}
	}
}

impl<S: SingleDataAccess> fmt::Debug for SingleDataProcessor<S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("SingleDataProcessor")
			.field(&S::IMMUTABLE_NAME)
			.finish()
	}
}

impl<S: SingleDataAccess> DataProcessor<SingleData<S>> for SingleDataProcessor<S> {
	fn supports(&self, holder: &dyn DataHolder) -> bool {
		S::read_holder(holder).is_some()
	}

	fn from_holder(&self, holder: &dyn DataHolder) -> Option<SingleData<S>> {
		S::read_holder(holder).map(SingleData::new)
	}

	fn set(
		&self,
		holder: &mut dyn DataHolder,
		manipulator: &SingleData<S>,
		priority: DataPriority,
	) -> DataTransactionResult {
		let Some(current) = S::read_holder(&*holder) else {
			return DataTransactionResult::fail_no_data();
		};
		if priority == DataPriority::DataHolder {
			return DataTransactionResult::success_no_data();
		}
		let element = manipulator.element().clone();
		let proposed = self
			.caches
			.immutable_value(S::key(), S::default_element(), element.clone());
		let old = self
			.caches
			.immutable_value(S::key(), S::default_element(), current);
		match S::write_holder(holder, element) {
			Some(written) => write_outcome(S::key().id(), written, proposed, old),
			None => DataTransactionResult::fail_no_data(),
		}
	}

	fn immutable_from(
		&self,
		holder: &dyn DataHolder,
	) -> Result<Option<Arc<ImmutableSingleData<S>>>, CacheError> {
		S::read_holder(holder)
			.map(|element| self.caches.manipulator::<ImmutableSingleData<S>>((element,)))
			.transpose()
	}

	fn build(&self, view: &DataView) -> Option<SingleData<S>> {
		S::read(view).map(SingleData::new)
	}
}

impl<S: SingleDataAccess> DataManipulatorBuilder<SingleData<S>> for SingleDataProcessor<S> {
	fn create(&self) -> SingleData<S> {
		SingleData::default()
	}

	fn create_from(&self, holder: &dyn DataHolder) -> Option<SingleData<S>> {
		self.from_holder(holder)
	}

	fn build_from(&self, view: &DataView) -> Option<SingleData<S>> {
		self.build(view)
	}
}
