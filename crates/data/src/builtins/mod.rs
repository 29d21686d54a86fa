//! Builtin processors for the vanilla attributes.
//!
//! Every processor holds the shared [`ImmutableCaches`] and returns canonical
//! immutable values in its transaction results. Bounded attributes follow
//! one write protocol: build the proposed value, reject it with `error` if
//! it is out of range, read the old value, then write. An engine refusal is
//! logged and reported as `error`.

use std::sync::Arc;

use crate::cache::ImmutableCaches;
use crate::db::DataRegistry;
use crate::error::{EngineError, RegistryError};
use crate::manipulator::{
	CareerData, ColoredData, FoodData, HealthData, ImmutableDecayableData,
};
use crate::transaction::{DataTransactionResult, ErasedValue};

mod block;
mod data;
mod entity;
mod hunger;
mod living;
mod single;

pub use block::{DecayableBlockProcessor, LEAVES};
pub use data::{FoodDataProcessor, HealthDataProcessor, SingleDataProcessor};
pub use entity::{DisplayNameVisibleValueProcessor, VelocityValueProcessor};
pub use hunger::{
	Exhaustion, ExhaustionValueProcessor, FoodLevel, FoodLevelValueProcessor, HungerStat,
	HungerValueProcessor, Saturation, SaturationValueProcessor,
};
pub use living::{HealthValueProcessor, LastAttackerValueProcessor, MaxHealthValueProcessor};
pub use single::{
	CareerDataProcessor, CareerValueProcessor, ColorValueProcessor, ColoredDataProcessor,
	SingleDataAccess, SingleValueProcessor,
};


/// Registers every builtin processor and builder.
pub fn register_all(
	registry: &DataRegistry,
	caches: &Arc<ImmutableCaches>,
) -> Result<(), RegistryError> {
	registry.register_value_processor(HealthValueProcessor::new(caches.clone()))?;
	registry.register_value_processor(MaxHealthValueProcessor::new(caches.clone()))?;
	registry.register_value_processor(LastAttackerValueProcessor::new(caches.clone()))?;
	registry.register_value_processor(FoodLevelValueProcessor::new(caches.clone()))?;
	registry.register_value_processor(SaturationValueProcessor::new(caches.clone()))?;
	registry.register_value_processor(ExhaustionValueProcessor::new(caches.clone()))?;
	registry.register_value_processor(VelocityValueProcessor::new(caches.clone()))?;
	registry.register_value_processor(DisplayNameVisibleValueProcessor::new(caches.clone()))?;
	registry.register_value_processor(CareerValueProcessor::new(caches.clone()))?;
	registry.register_value_processor(ColorValueProcessor::new(caches.clone()))?;

	let food = Arc::new(FoodDataProcessor::new(caches.clone()));
	registry.register_data_processor_and_builder::<FoodData, _>(food)?;
	let health = Arc::new(HealthDataProcessor::new(caches.clone()));
	registry.register_data_processor_and_builder::<HealthData, _>(health)?;
	let career = Arc::new(CareerDataProcessor::new(caches.clone()));
	registry.register_data_processor_and_builder::<CareerData, _>(career)?;
	let colored = Arc::new(ColoredDataProcessor::new(caches.clone()));
	registry.register_data_processor_and_builder::<ColoredData, _>(colored)?;

	registry.register_block_processor::<ImmutableDecayableData>(Arc::new(
		DecayableBlockProcessor::new(caches.clone()),
	))?;
	Ok(())
}

/// Packages the outcome of an engine write whose old value was already
/// read.
fn write_outcome(
	key: &'static str,
	written: Result<(), EngineError>,
	proposed: ErasedValue,
	replaced: ErasedValue,
) -> DataTransactionResult {
	match written {
		Ok(()) => DataTransactionResult::success_replace_result(proposed, replaced),
		Err(error) => {
			tracing::warn!(key, %error, "engine refused data write");
			DataTransactionResult::error_result(proposed)
		}
	}
}
