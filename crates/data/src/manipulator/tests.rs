use std::cmp::Ordering;

use pretty_assertions::assert_eq;
use sponge_primitives::keys::{CAREER, COLOR, EXHAUSTION, FOOD_LEVEL, HEALTH, MAX_HEALTH, VELOCITY};
use sponge_primitives::{BaseValue, Career, Color, DataView, Vector3d};

use super::*;
use crate::cache::Canonical;
use crate::error::ConstructError;

#[test]
fn test_food_values_by_key() {
	let mut food = FoodData::new(14, 1.5, 5.0);
	assert_eq!(food.get(FOOD_LEVEL).map(|v| *v.get()), Some(14));
	assert_eq!(food.get(EXHAUSTION).map(|v| *v.upper()), Some(20.0));
	assert!(food.get(HEALTH).is_none());

	assert!(food.set(FOOD_LEVEL, 18));
	assert!(!food.set(FOOD_LEVEL, 25));
	assert!(!food.set(HEALTH, 3.0));
	assert_eq!(food.elements(), (18, 1.5, 5.0));

	assert!(food.transform(EXHAUSTION, |e| e * 2.0));
	assert_eq!(food.elements().1, 3.0);
}

#[test]
fn test_food_container_layout() {
	let view = FoodData::new(14, 0.5, 3.0).to_container();
	let expected = DataView::new()
		.with("FoodLevel", 14)
		.with("Saturation", 3.0)
		.with("Exhaustion", 0.5);
	assert_eq!(view, expected);
}

#[test]
fn test_immutable_with_leaves_original() {
	let original = FoodData::new(14, 0.0, 20.0).as_immutable();
	let fed = original.with(FOOD_LEVEL, 20).expect("in range");
	assert_eq!(original.food_level(), 14);
	assert_eq!(fed.food_level(), 20);
	assert!(original.with(FOOD_LEVEL, 21).is_none());
	assert!(original.with(VELOCITY, Vector3d::ZERO).is_none());
	assert_eq!(original.compare_to(&fed), Ordering::Less);
	assert_eq!(original.get(FOOD_LEVEL).map(|v| *v.get()), Some(14));
}

#[test]
fn test_lowering_max_health_caps_health() {
	let mut health = HealthData::new(18.0, 20.0);
	assert!(!health.set(HEALTH, 25.0));
	assert!(health.set(MAX_HEALTH, 10.0));
	assert_eq!(health.elements(), (10.0, 10.0));
	assert!(!health.set(MAX_HEALTH, 0.5));
}

#[test]
fn test_single_value_data() {
	let mut career = CareerData::default();
	assert_eq!(*career.element(), Career::Armorer);
	assert!(career.set(CAREER, Career::Librarian));
	assert!(!career.set(COLOR, Color::WHITE));

	let view = career.to_container();
	assert_eq!(view.get_string("Career"), Ok("minecraft:librarian"));
	assert_eq!(CareerKind::read(&view), Some(Career::Librarian));

	let frozen = career.as_immutable();
	assert_eq!(frozen.as_mutable(), career);
	assert_eq!(
		ColoredData::new(Color::WHITE).compare_to(&ColoredData::default()),
		Ordering::Greater
	);
}

#[test]
fn test_canonical_factories_validate() {
	assert!(ImmutableFoodData::construct((20, 0.0, 20.0)).is_ok());
	assert!(matches!(
		ImmutableFoodData::construct((-1, 0.0, 20.0)),
		Err(ConstructError::InvalidArgument(_))
	));
	assert!(ImmutableHealthData::construct((20.0, 20.0)).is_ok());
	assert!(ImmutableHealthData::construct((21.0, 20.0)).is_err());
	assert_eq!(
		ImmutableCareerData::cache_key(&(Career::Cleric,)).as_str(),
		"ImmutableCareerData:{minecraft:cleric}"
	);
}
