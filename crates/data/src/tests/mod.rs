//! End-to-end behavior of a bootstrapped data layer.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use sponge_primitives::keys::{
	CAREER, DECAYABLE, FOOD_LEVEL, HEALTH, LAST_ATTACKER, SATURATION, VELOCITY,
};
use sponge_primitives::{BaseValue, BoundedValue, Career, EntityId, Key, MutableValue, Vector3d};

use crate::builtins::HealthValueProcessor;
use crate::manipulator::{
	CareerData, DataManipulator, FoodData, HealthData, ImmutableDataManipulator,
	ImmutableDecayableData, ImmutableFoodData, health_bounds,
};
use crate::test_fixtures::{Player, Rock, Villager};
use crate::{
	BlockState, BootstrapError, DataConfig, DataHolder, DataPriority, DataTransactionResult,
	RegistryError, ResultType, SpongeData, ValueProcessor,
};

fn data() -> SpongeData {
	SpongeData::bootstrap(DataConfig::default()).expect("builtins register cleanly")
}

/// Offering food levels to a player with 14: out of range is refused,
/// in range replaces.
#[test]
fn test_food_level_offer_scenario() {
	let data = data();
	let registry = data.registry();
	let mut player = Player::new(1).with_food(14);

	let result = registry.offer(&mut player, FOOD_LEVEL, 25);
	assert_eq!(result.kind(), ResultType::Error);
	assert_eq!(result.rejected_value(FOOD_LEVEL).map(|v| *v.get()), Some(25));
	assert_eq!(registry.get(&player, FOOD_LEVEL), Some(14));

	let result = registry.offer(&mut player, FOOD_LEVEL, 18);
	assert_eq!(result.kind(), ResultType::Success);
	assert_eq!(result.replaced_value(FOOD_LEVEL).map(|v| *v.get()), Some(14));
	assert_eq!(result.success_value(FOOD_LEVEL).map(|v| *v.get()), Some(18));
	assert_eq!(registry.get(&player, FOOD_LEVEL), Some(18));
}

/// Holders without the facet are left alone by every builtin key.
#[test]
fn test_unsupported_holder_is_untouched() {
	let data = data();
	let registry = data.registry();
	let mut rock = Rock;

	assert!(registry.values_of(&rock).is_empty());
	assert!(!registry.supports(&rock, FOOD_LEVEL));
	assert_eq!(registry.get(&rock, VELOCITY), None);
	assert_eq!(registry.offer(&mut rock, FOOD_LEVEL, 10).kind(), ResultType::Failure);
	assert_eq!(registry.offer(&mut rock, CAREER, Career::Farmer).kind(), ResultType::Failure);
	assert_eq!(registry.remove(&mut rock, LAST_ATTACKER).kind(), ResultType::Failure);
	assert!(registry.get_manipulator::<FoodData>(&rock).is_none());
}

/// A holder's values come back ordered by key id.
#[test]
fn test_values_of_player() {
	let data = data();
	let player = Player::new(1);
	let ids: Vec<_> = data
		.registry()
		.values_of(&player)
		.iter()
		.map(|value| value.value_key().id())
		.collect();
	assert_eq!(
		ids,
		vec![
			"sponge:exhaustion",
			"sponge:food_level",
			"sponge:health",
			"sponge:last_attacker",
			"sponge:max_health",
			"sponge:saturation",
			"sponge:shows_display_name",
			"sponge:velocity",
		]
	);
}

/// Transforming with the identity reports equal replaced and applied
/// values.
#[test]
fn test_identity_transform() {
	let data = data();
	let registry = data.registry();
	let mut player = Player::new(1);
	let results = [
		registry.transform(&mut player, FOOD_LEVEL, &|level| level),
		registry.transform(&mut player, HEALTH, &|health| health),
		registry.transform(&mut player, VELOCITY, &|motion| motion),
	];
	for result in results {
		assert!(result.is_successful());
		let replaced = &result.replaced_data()[0];
		let applied = &result.success_data()[0];
		assert!(replaced.eq_dyn(&**applied));
		assert!(Arc::ptr_eq(replaced, applied));
	}
}

/// A value's own key routes the offer.
#[test]
fn test_offer_value_uses_the_value_key() {
	let data = data();
	let registry = data.registry();
	let mut player = Player::new(1);

	let mut value = registry.api_value(&player, VELOCITY).expect("entity");
	let motion = Vector3d {
		x: 0.0,
		y: 1.0,
		z: 0.0,
	};
	assert!(value.set(motion));
	let result = registry.offer_value(&mut player, &value);
	assert!(result.is_successful());
	assert_eq!(player.body.motion, motion);
}

#[test]
fn test_last_attacker_through_registry() {
	let data = data();
	let registry = data.registry();
	let mut player = Player::new(1);

	assert!(registry.offer(&mut player, LAST_ATTACKER, Some(EntityId(3))).is_successful());
	assert_eq!(registry.get(&player, LAST_ATTACKER), Some(Some(EntityId(3))));
	let result = registry.remove_key(&mut player, LAST_ATTACKER.raw());
	assert!(result.is_successful());
	assert_eq!(registry.get(&player, LAST_ATTACKER), Some(None));
}

/// Manipulators move through the registry as one unit.
#[test]
fn test_manipulator_facade() {
	let data = data();
	let registry = data.registry();
	let mut player = Player::new(1).with_food(6);

	let food = registry.get_manipulator::<FoodData>(&player).expect("player");
	assert_eq!(food.elements(), (6, 0.0, 5.0));

	let result = registry.offer_manipulator(
		&mut player,
		&FoodData::new(12, 1.0, 4.0),
		DataPriority::DataManipulator,
	);
	assert!(result.is_successful());
	assert_eq!(registry.get(&player, SATURATION), Some(4.0));

	let frozen = registry
		.get_immutable_manipulator::<ImmutableFoodData>(&player)
		.expect("constructible")
		.expect("player");
	assert_eq!((frozen.food_level(), frozen.exhaustion()), (12, 1.0));
	let again = registry
		.get_immutable_manipulator::<ImmutableFoodData>(&player)
		.expect("constructible")
		.expect("player");
	assert!(Arc::ptr_eq(&frozen, &again));

	let view = HealthData::new(4.0, 8.0).to_container();
	assert_eq!(
		registry.build_manipulator::<HealthData>(&view),
		Some(HealthData::new(4.0, 8.0))
	);
	assert_eq!(
		registry.remove_manipulator::<HealthData>(&mut player).kind(),
		ResultType::Failure
	);

	let mut villager = Villager::new(2, Career::Librarian);
	let result = registry.offer_manipulator(
		&mut villager,
		&CareerData::new(Career::Cleric),
		DataPriority::DataManipulator,
	);
	assert!(result.is_successful());
	assert_eq!(registry.get(&villager, CAREER), Some(Career::Cleric));
}

/// Block data is canonical: equal states share one instance.
#[test]
fn test_block_data_through_registry() {
	let data = data();
	let registry = data.registry();
	let leaves = BlockState::new("minecraft:leaves2");

	let read = || {
		registry
			.block_data::<ImmutableDecayableData>(&leaves)
			.expect("constructible")
			.expect("leaves")
	};
	let first = read();
	let second = read();
	assert!(*first.element());
	assert!(Arc::ptr_eq(&first, &second));

	let kept = first.with(DECAYABLE, false).expect("own key");
	let state = registry.with_block_data(&leaves, &kept).expect("leaves");
	assert_eq!(state.property("decayable"), Some("false"));
	assert!(registry.without_block_data::<ImmutableDecayableData>(&state).is_none());
	assert_eq!(
		registry.block_data::<ImmutableDecayableData>(&BlockState::new("minecraft:dirt")),
		Ok(None)
	);
}

/// The bootstrapped registry is frozen.
#[test]
fn test_bootstrapped_registry_is_finalized() {
	let data = data();
	assert!(data.registry().is_finalized());
	assert_eq!(
		data.registry().finalize_registration(),
		Err(RegistryError::Finalized { what: "finalize" })
	);
	assert_eq!(data.caches().values().capacity(), data.config().cache.value_capacity);
}

/// Reports a fixed health for players, above the builtin processor.
struct Overriding;

impl ValueProcessor<BoundedValue<f64>> for Overriding {
	fn key(&self) -> Key<BoundedValue<f64>> {
		HEALTH
	}

	fn priority(&self) -> i32 {
		200
	}

	fn supports(&self, holder: &dyn DataHolder) -> bool {
		holder.as_hunger().is_some()
	}

	fn get(&self, holder: &dyn DataHolder) -> Option<f64> {
		self.supports(holder).then_some(1.5)
	}

	fn api_value(&self, holder: &dyn DataHolder) -> Option<BoundedValue<f64>> {
		let health = self.get(holder)?;
		Some(BoundedValue::new(HEALTH, health, health, health_bounds(20.0)))
	}

	fn offer(&self, _holder: &mut dyn DataHolder, _element: f64) -> DataTransactionResult {
		DataTransactionResult::fail_no_data()
	}
}

/// Extensions registered at bootstrap outrank builtins by priority and
/// fall back to them for holders they do not support.
#[test]
fn test_bootstrap_extension_outranks_builtin() {
	let data = SpongeData::bootstrap_with(DataConfig::default(), |registry, _| {
		registry.register_value_processor(Overriding)
	})
	.expect("extension registers");
	let registry = data.registry();

	assert_eq!(registry.get(&Player::new(1), HEALTH), Some(1.5));
	assert_eq!(registry.get(&Villager::new(2, Career::Farmer), HEALTH), Some(20.0));
	assert_eq!(registry.value_processor(HEALTH).map(|d| d.processors().len()), Some(2));
}

/// A failing extension aborts bootstrap.
#[test]
fn test_bootstrap_extension_error_propagates() {
	let caught = SpongeData::bootstrap_with(DataConfig::default(), |registry, caches| {
		registry.register_value_processor(HealthValueProcessor::new(caches.clone()))
	});
	assert!(matches!(
		caught,
		Err(RegistryError::DuplicateValueProcessor {
			key: "sponge:health",
			..
		})
	));
}

#[rstest]
#[case("")]
#[case("[cache]\nvalue_capacity = 128\nvalue_stripes = 2\n")]
fn test_bootstrap_from_toml(#[case] input: &str) {
	let data = SpongeData::from_toml_str(input).expect("valid config");
	assert!(data.registry().is_finalized());
}

#[test]
fn test_bootstrap_rejects_bad_toml() {
	assert!(matches!(
		SpongeData::from_toml_str("[cache]\nvalue_stripes = 0\n"),
		Err(BootstrapError::Config(_))
	));
}

proptest! {
	/// Any out-of-range food level is refused without touching the holder.
	#[test]
	fn out_of_range_food_level_is_refused(
		start in 0..=20i32,
		offered in prop_oneof![i32::MIN..0, 21..=i32::MAX],
	) {
		let data = data();
		let mut player = Player::new(1).with_food(start);
		let result = data.registry().offer(&mut player, FOOD_LEVEL, offered);
		prop_assert_eq!(result.kind(), ResultType::Error);
		prop_assert_eq!(player.hunger.food_level, start);
		prop_assert!(result.success_data().is_empty());
	}

	/// In-range food levels are stored and reported with the old level.
	#[test]
	fn in_range_food_level_is_applied(start in 0..=20i32, offered in 0..=20i32) {
		let data = data();
		let mut player = Player::new(1).with_food(start);
		let result = data.registry().offer(&mut player, FOOD_LEVEL, offered);
		prop_assert!(result.is_successful());
		prop_assert_eq!(player.hunger.food_level, offered);
		prop_assert_eq!(result.replaced_value(FOOD_LEVEL).map(|v| *v.get()), Some(start));
	}
}
