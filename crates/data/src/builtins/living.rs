use std::sync::Arc;

use sponge_primitives::keys::{HEALTH, LAST_ATTACKER, MAX_HEALTH};
use sponge_primitives::{BoundedValue, EntityId, EntityValue, Key, OptionalValue};

use super::write_outcome;
use crate::cache::ImmutableCaches;
use crate::holder::DataHolder;
use crate::manipulator::{DEFAULT_MAX_HEALTH, health_bounds, max_health_bounds};
use crate::processor::ValueProcessor;
use crate::transaction::{DataTransactionResult, ResultType};

/// Health of living entities, bounded by their current max health.
#[derive(Debug, Clone)]
pub struct HealthValueProcessor {
	caches: Arc<ImmutableCaches>,
}

impl HealthValueProcessor {
	pub fn new(caches: Arc<ImmutableCaches>) -> Self {
		Self { caches }
	}
}

impl ValueProcessor<BoundedValue<f64>> for HealthValueProcessor {
	fn key(&self) -> Key<BoundedValue<f64>> {
		HEALTH
	}

	fn supports(&self, holder: &dyn DataHolder) -> bool {
		holder.as_living().is_some()
	}

	fn get(&self, holder: &dyn DataHolder) -> Option<f64> {
		holder.as_living().map(|living| living.health())
	}

	fn api_value(&self, holder: &dyn DataHolder) -> Option<BoundedValue<f64>> {
		let living = holder.as_living()?;
		let max_health = living.max_health();
		Some(BoundedValue::new(
			HEALTH,
			max_health,
			living.health(),
			health_bounds(max_health),
		))
	}

	fn offer(&self, holder: &mut dyn DataHolder, health: f64) -> DataTransactionResult {
		let Some(living) = holder.as_living_mut() else {
			return DataTransactionResult::fail_result(self.caches.immutable_bounded(
				HEALTH,
				DEFAULT_MAX_HEALTH,
				health,
				&max_health_bounds(),
			));
		};
		let max_health = living.max_health();
		let bounds = health_bounds(max_health);
		let proposed = self
			.caches
			.immutable_bounded(HEALTH, max_health, health, &bounds);
		if !bounds.contains(&health) {
			return DataTransactionResult::error_result(proposed);
		}
		let old = self
			.caches
			.immutable_bounded(HEALTH, max_health, living.health(), &bounds);
		write_outcome(HEALTH.id(), living.set_health(health), proposed, old)
	}
}

/// Max health of living entities.
#[derive(Debug, Clone)]
pub struct MaxHealthValueProcessor {
	caches: Arc<ImmutableCaches>,
}

impl MaxHealthValueProcessor {
	pub fn new(caches: Arc<ImmutableCaches>) -> Self {
		Self { caches }
	}
}

impl ValueProcessor<BoundedValue<f64>> for MaxHealthValueProcessor {
	fn key(&self) -> Key<BoundedValue<f64>> {
		MAX_HEALTH
	}

	fn supports(&self, holder: &dyn DataHolder) -> bool {
		holder.as_living().is_some()
	}

	fn get(&self, holder: &dyn DataHolder) -> Option<f64> {
		holder.as_living().map(|living| living.max_health())
	}

	fn api_value(&self, holder: &dyn DataHolder) -> Option<BoundedValue<f64>> {
		let max_health = self.get(holder)?;
		Some(BoundedValue::new(
			MAX_HEALTH,
			DEFAULT_MAX_HEALTH,
			max_health,
			max_health_bounds(),
		))
	}

	fn offer(&self, holder: &mut dyn DataHolder, max_health: f64) -> DataTransactionResult {
		let bounds = max_health_bounds();
		let proposed = self
			.caches
			.immutable_bounded(MAX_HEALTH, DEFAULT_MAX_HEALTH, max_health, &bounds);
		let Some(living) = holder.as_living_mut() else {
			return DataTransactionResult::fail_result(proposed);
		};
		if !bounds.contains(&max_health) {
			return DataTransactionResult::error_result(proposed);
		}
		let old = self.caches.immutable_bounded(
			MAX_HEALTH,
			DEFAULT_MAX_HEALTH,
			living.max_health(),
			&bounds,
		);
		write_outcome(MAX_HEALTH.id(), living.set_max_health(max_health), proposed, old)
	}
}

/// Last attacker of living entities, held as an entity id.
///
/// The only builtin attribute that can be removed.
#[derive(Debug, Clone)]
pub struct LastAttackerValueProcessor {
	caches: Arc<ImmutableCaches>,
}

impl LastAttackerValueProcessor {
	pub fn new(caches: Arc<ImmutableCaches>) -> Self {
		Self { caches }
	}
}

impl ValueProcessor<EntityValue> for LastAttackerValueProcessor {
	fn key(&self) -> Key<OptionalValue<EntityId>> {
		LAST_ATTACKER
	}

	fn supports(&self, holder: &dyn DataHolder) -> bool {
		holder.as_living().is_some()
	}

	fn get(&self, holder: &dyn DataHolder) -> Option<Option<EntityId>> {
		holder.as_living().map(|living| living.last_attacker())
	}

	fn api_value(&self, holder: &dyn DataHolder) -> Option<EntityValue> {
		self.get(holder)
			.map(|attacker| OptionalValue::new(LAST_ATTACKER, attacker))
	}

	fn offer(
		&self,
		holder: &mut dyn DataHolder,
		attacker: Option<EntityId>,
	) -> DataTransactionResult {
		let proposed = self.caches.immutable_optional(LAST_ATTACKER, attacker);
		let Some(living) = holder.as_living_mut() else {
			return DataTransactionResult::fail_result(proposed);
		};
		let old = self
			.caches
			.immutable_optional(LAST_ATTACKER, living.last_attacker());
		write_outcome(
			LAST_ATTACKER.id(),
			living.set_last_attacker(attacker),
			proposed,
			old,
		)
	}

	/// Clears the attacker. Nothing to remove yields `success` with no data.
	fn remove(&self, holder: &mut dyn DataHolder) -> DataTransactionResult {
		let Some(living) = holder.as_living_mut() else {
			return DataTransactionResult::fail_no_data();
		};
		let Some(attacker) = living.last_attacker() else {
			return DataTransactionResult::success_no_data();
		};
		let old = self
			.caches
			.immutable_optional(LAST_ATTACKER, Some(attacker));
		match living.set_last_attacker(None) {
			Ok(()) => DataTransactionResult::builder()
				.replace(old)
				.result(ResultType::Success)
				.build(),
			Err(error) => {
				tracing::warn!(key = LAST_ATTACKER.id(), %error, "engine refused data removal");
				DataTransactionResult::error_result(old)
			}
		}
	}
}
