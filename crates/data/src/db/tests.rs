use std::sync::Arc;

use pretty_assertions::assert_eq;
use sponge_primitives::keys::{HEALTH, HEALTH_DEF};
use sponge_primitives::{BoundedValue, DataView, Key, Value};

use super::*;
use crate::builtins::{DecayableBlockProcessor, FoodDataProcessor, HealthValueProcessor};
use crate::cache::ImmutableCaches;
use crate::holder::DataHolder;
use crate::manipulator::{FoodData, ImmutableDecayableData, ImmutableFoodData, health_bounds};
use crate::test_fixtures::{Player, Rock};
use crate::transaction::{DataTransactionResult, ResultType};

/// Reports its own priority as the health of any living holder.
struct Constant<const PRIORITY: i32>;

impl<const PRIORITY: i32> ValueProcessor<BoundedValue<f64>> for Constant<PRIORITY> {
	fn key(&self) -> Key<BoundedValue<f64>> {
		HEALTH
	}

	fn priority(&self) -> i32 {
		PRIORITY
	}

	fn supports(&self, holder: &dyn DataHolder) -> bool {
		holder.as_living().is_some()
	}

	fn get(&self, holder: &dyn DataHolder) -> Option<f64> {
		self.supports(holder).then_some(f64::from(PRIORITY))
	}

	fn api_value(&self, holder: &dyn DataHolder) -> Option<BoundedValue<f64>> {
		let health = self.get(holder)?;
		Some(BoundedValue::new(HEALTH, health, health, health_bounds(1000.0)))
	}

	fn offer(&self, _holder: &mut dyn DataHolder, _element: f64) -> DataTransactionResult {
		DataTransactionResult::success_no_data()
	}
}

static HEALTH_AS_FLAG: Key<Value<bool>> = Key::new(&HEALTH_DEF);

/// Claims the health key with the wrong value type.
struct Flag;

impl ValueProcessor<Value<bool>> for Flag {
	fn key(&self) -> Key<Value<bool>> {
		HEALTH_AS_FLAG
	}

	fn supports(&self, _holder: &dyn DataHolder) -> bool {
		false
	}

	fn get(&self, _holder: &dyn DataHolder) -> Option<bool> {
		None
	}

	fn api_value(&self, _holder: &dyn DataHolder) -> Option<Value<bool>> {
		None
	}

	fn offer(&self, _holder: &mut dyn DataHolder, _element: bool) -> DataTransactionResult {
		DataTransactionResult::fail_no_data()
	}
}

/// A builder that ignores holders and views.
struct Blank;

impl DataManipulatorBuilder<FoodData> for Blank {
	fn create(&self) -> FoodData {
		FoodData::default()
	}

	fn create_from(&self, _holder: &dyn DataHolder) -> Option<FoodData> {
		None
	}

	fn build_from(&self, _view: &DataView) -> Option<FoodData> {
		None
	}
}

fn food_processor() -> Arc<FoodDataProcessor> {
	Arc::new(FoodDataProcessor::new(Arc::new(ImmutableCaches::default())))
}

/// Value processors are collected while open and only served once sealed.
#[test]
fn test_value_processors_hidden_until_finalize() {
	let registry = DataRegistry::new();
	registry.register_value_processor(Constant::<100>).expect("open");
	assert!(registry.value_processor(HEALTH).is_none());
	assert!(registry.wild_value_processor(HEALTH.raw()).is_none());
	assert_eq!(registry.get(&Player::new(1), HEALTH), None);

	registry.finalize_registration().expect("first finalize");
	assert!(registry.is_finalized());
	assert_eq!(registry.get(&Player::new(1), HEALTH), Some(100.0));
}

/// The higher priority processor answers regardless of registration order.
#[test]
fn test_priority_decides_dispatch() {
	let registry = DataRegistry::new();
	registry.register_value_processor(Constant::<100>).expect("open");
	registry.register_value_processor(Constant::<200>).expect("open");
	registry.finalize_registration().expect("finalize");

	let delegate = registry.value_processor(HEALTH).expect("sealed");
	let priorities: Vec<_> = delegate.processors().iter().map(|p| p.priority()).collect();
	assert_eq!(priorities, vec![200, 100]);
	assert_eq!(registry.get(&Player::new(1), HEALTH), Some(200.0));
	assert_eq!(registry.get(&Rock, HEALTH), None);
	assert_eq!(registry.offer(&mut Rock, HEALTH, 5.0).kind(), ResultType::Failure);
}

#[test]
fn test_duplicate_value_processor_rejected() {
	let registry = DataRegistry::new();
	registry.register_value_processor(Constant::<100>).expect("open");
	assert_eq!(
		registry.register_value_processor(Constant::<100>),
		Err(RegistryError::DuplicateValueProcessor {
			key: "sponge:health",
			processor: type_name::<Constant<100>>(),
		})
	);
	registry.finalize_registration().expect("finalize");
	assert_eq!(registry.value_processor(HEALTH).map(|d| d.processors().len()), Some(1));
}

/// Delegates are built by the registry and never accepted as processors.
#[test]
fn test_delegate_registration_rejected() {
	let registry = DataRegistry::new();
	let processor: Arc<dyn ValueProcessor<BoundedValue<f64>>> = Arc::new(Constant::<100>);
	let delegate = ValueProcessorDelegate::new(HEALTH, vec![processor]);
	assert_eq!(
		registry.register_value_processor(delegate),
		Err(RegistryError::DelegateRegistration { key: "sponge:health" })
	);
	registry.finalize_registration().expect("finalize");
	assert!(registry.delegates().is_empty());
}

/// One key id cannot serve two value types.
#[test]
fn test_key_bound_to_one_value_type() {
	let registry = DataRegistry::new();
	registry.register_value_processor(Constant::<100>).expect("open");
	assert_eq!(
		registry.register_value_processor(Flag),
		Err(RegistryError::KeyTypeMismatch { key: "sponge:health" })
	);
}

/// A second builder for a manipulator is refused and the first stays.
#[test]
fn test_duplicate_builder_keeps_first() {
	let registry = DataRegistry::new();
	let first: Arc<dyn DataManipulatorBuilder<FoodData>> = food_processor();
	registry.register_builder(first.clone()).expect("open");
	assert_eq!(
		registry.register_builder::<FoodData>(Arc::new(Blank)),
		Err(RegistryError::DuplicateBuilder {
			manipulator: type_name::<FoodData>(),
		})
	);
	let kept = registry.builder::<FoodData>().expect("registered");
	assert!(Arc::ptr_eq(&kept, &first));
}

/// Registering a processor-and-builder needs both slots free.
#[test]
fn test_pair_registration_is_all_or_nothing() {
	let registry = DataRegistry::new();
	registry.register_builder::<FoodData>(Arc::new(Blank)).expect("open");
	assert_eq!(
		registry.register_data_processor_and_builder::<FoodData, _>(food_processor()),
		Err(RegistryError::DuplicateBuilder {
			manipulator: type_name::<FoodData>(),
		})
	);
	assert!(registry.processor::<FoodData>().is_none());
}

/// Immutable lookups resolve through the mutable counterpart.
#[test]
fn test_immutable_lookups_use_mutable_registration() {
	let registry = DataRegistry::new();
	registry
		.register_data_processor_and_builder::<FoodData, _>(food_processor())
		.expect("open");
	assert!(registry.immutable_processor::<ImmutableFoodData>().is_some());
	assert_eq!(
		registry
			.builder_for_immutable::<ImmutableFoodData>()
			.map(|builder| builder.create()),
		Some(FoodData::default())
	);
	assert_eq!(
		registry
			.get_immutable_manipulator::<ImmutableFoodData>(&Player::new(1).with_food(9))
			.expect("constructible")
			.map(|food| food.food_level()),
		Some(9)
	);
	assert_eq!(registry.get_immutable_manipulator::<ImmutableFoodData>(&Rock), Ok(None));
}

/// Immutable manipulator reads go through the manipulator cache: equal
/// snapshots are one allocation.
#[test]
fn test_immutable_manipulator_reads_are_canonical() {
	let caches = Arc::new(ImmutableCaches::default());
	let registry = DataRegistry::new();
	registry
		.register_data_processor_and_builder::<FoodData, _>(Arc::new(FoodDataProcessor::new(
			caches.clone(),
		)))
		.expect("open");
	assert!(caches.manipulators().is_empty());

	let first = registry
		.get_immutable_manipulator::<ImmutableFoodData>(&Player::new(1).with_food(9))
		.expect("constructible")
		.expect("player");
	let second = registry
		.get_immutable_manipulator::<ImmutableFoodData>(&Player::new(2).with_food(9))
		.expect("constructible")
		.expect("player");
	assert!(Arc::ptr_eq(&first, &second));
	assert_eq!(caches.manipulators().len(), 1);
}

/// Processor equality is type equality: a second instance of a registered
/// type is refused even when it was built from different state.
#[test]
fn test_second_instance_of_processor_type_is_duplicate() {
	let registry = DataRegistry::new();
	registry
		.register_value_processor(HealthValueProcessor::new(Arc::new(ImmutableCaches::default())))
		.expect("open");
	assert_eq!(
		registry
			.register_value_processor(HealthValueProcessor::new(Arc::new(ImmutableCaches::default()))),
		Err(RegistryError::DuplicateValueProcessor {
			key: "sponge:health",
			processor: type_name::<HealthValueProcessor>(),
		})
	);
}

/// After finalize every registration fails and nothing changes.
#[test]
fn test_finalized_registry_is_frozen() {
	let registry = DataRegistry::new();
	registry.register_value_processor(Constant::<100>).expect("open");
	registry.finalize_registration().expect("finalize");

	assert_eq!(
		registry.register_value_processor(Constant::<200>),
		Err(RegistryError::Finalized {
			what: "value processor"
		})
	);
	assert_eq!(
		registry.register_builder::<FoodData>(Arc::new(Blank)),
		Err(RegistryError::Finalized { what: "builder" })
	);
	assert_eq!(
		registry.register_data_processor::<FoodData>(food_processor()),
		Err(RegistryError::Finalized {
			what: "data processor"
		})
	);
	let caches = Arc::new(ImmutableCaches::default());
	assert_eq!(
		registry.register_block_processor::<ImmutableDecayableData>(Arc::new(
			DecayableBlockProcessor::new(caches)
		)),
		Err(RegistryError::Finalized {
			what: "block processor"
		})
	);
	assert_eq!(
		registry.finalize_registration(),
		Err(RegistryError::Finalized { what: "finalize" })
	);

	assert!(registry.builder::<FoodData>().is_none());
	assert!(registry.processor::<FoodData>().is_none());
	assert!(registry.block_processor::<ImmutableDecayableData>().is_none());
	assert_eq!(registry.value_processor(HEALTH).map(|d| d.processors().len()), Some(1));
}

/// Untyped lookups see the same delegate as typed ones.
#[test]
fn test_wild_lookup_matches_typed_lookup() {
	let registry = DataRegistry::new();
	registry.register_value_processor(Constant::<100>).expect("open");
	registry.register_value_processor(Constant::<200>).expect("open");
	registry.finalize_registration().expect("finalize");

	let wild = registry.wild_value_processor(HEALTH.raw()).expect("sealed");
	assert_eq!(wild.raw_key(), HEALTH.raw());
	assert_eq!(wild.len(), 2);
	assert!(wild.supports_holder(&Player::new(1)));
	assert!(!wild.supports_holder(&Rock));
	assert!(
		wild.erased_value(&Player::new(1))
			.is_some_and(|value| value.element::<f64>() == Some(&200.0))
	);
	assert_eq!(registry.remove_key(&mut Player::new(1), HEALTH.raw()).kind(), ResultType::Failure);
}

#[test]
fn test_debug_lists_registrations() {
	let registry = DataRegistry::new();
	registry.register_value_processor(Constant::<100>).expect("open");
	let rendered = format!("{registry:?}");
	assert!(rendered.contains("finalized: false"));
	assert!(rendered.contains("sponge:health"));
}
