use std::sync::Arc;

use sponge_primitives::keys::{SHOWS_DISPLAY_NAME, VELOCITY};
use sponge_primitives::{Key, Value, Vector3d};

use super::write_outcome;
use crate::cache::ImmutableCaches;
use crate::holder::DataHolder;
use crate::processor::ValueProcessor;
use crate::transaction::DataTransactionResult;

/// Motion of any entity.
#[derive(Debug, Clone)]
pub struct VelocityValueProcessor {
	caches: Arc<ImmutableCaches>,
}

impl VelocityValueProcessor {
	pub fn new(caches: Arc<ImmutableCaches>) -> Self {
		Self { caches }
	}
}

impl ValueProcessor<Value<Vector3d>> for VelocityValueProcessor {
	fn key(&self) -> Key<Value<Vector3d>> {
		VELOCITY
	}

	fn supports(&self, holder: &dyn DataHolder) -> bool {
		holder.as_entity().is_some()
	}

	fn get(&self, holder: &dyn DataHolder) -> Option<Vector3d> {
		holder.as_entity().map(|entity| entity.motion())
	}

	fn api_value(&self, holder: &dyn DataHolder) -> Option<Value<Vector3d>> {
		self.get(holder)
			.map(|motion| Value::new(VELOCITY, Vector3d::ZERO, motion))
	}

	fn offer(&self, holder: &mut dyn DataHolder, motion: Vector3d) -> DataTransactionResult {
		let proposed = self
			.caches
			.immutable_value(VELOCITY, Vector3d::ZERO, motion);
		let Some(entity) = holder.as_entity_mut() else {
			return DataTransactionResult::fail_result(proposed);
		};
		let old = self
			.caches
			.immutable_value(VELOCITY, Vector3d::ZERO, entity.motion());
		write_outcome(VELOCITY.id(), entity.set_motion(motion), proposed, old)
	}
}

/// Whether a name tag is always rendered.
///
/// Entities store the flag. Items and nameable tile entities always show
/// their name and refuse writes.
#[derive(Debug, Clone)]
pub struct DisplayNameVisibleValueProcessor {
	caches: Arc<ImmutableCaches>,
}

impl DisplayNameVisibleValueProcessor {
	pub fn new(caches: Arc<ImmutableCaches>) -> Self {
		Self { caches }
	}
}

impl ValueProcessor<Value<bool>> for DisplayNameVisibleValueProcessor {
	fn key(&self) -> Key<Value<bool>> {
		SHOWS_DISPLAY_NAME
	}

	fn supports(&self, holder: &dyn DataHolder) -> bool {
		holder.as_entity().is_some() || holder.as_item().is_some() || holder.as_nameable().is_some()
	}

	fn get(&self, holder: &dyn DataHolder) -> Option<bool> {
		if let Some(entity) = holder.as_entity() {
			return Some(entity.always_render_name_tag());
		}
		(holder.as_item().is_some() || holder.as_nameable().is_some()).then_some(true)
	}

	fn api_value(&self, holder: &dyn DataHolder) -> Option<Value<bool>> {
		self.get(holder)
			.map(|shown| Value::new(SHOWS_DISPLAY_NAME, true, shown))
	}

	fn offer(&self, holder: &mut dyn DataHolder, shown: bool) -> DataTransactionResult {
		let proposed = self
			.caches
			.immutable_value(SHOWS_DISPLAY_NAME, true, shown);
		let Some(entity) = holder.as_entity_mut() else {
			return DataTransactionResult::fail_result(proposed);
		};
		let old = self
			.caches
			.immutable_value(SHOWS_DISPLAY_NAME, true, entity.always_render_name_tag());
		write_outcome(
			SHOWS_DISPLAY_NAME.id(),
			entity.set_always_render_name_tag(shown),
			proposed,
			old,
		)
	}
}
