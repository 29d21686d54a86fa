//! Data manipulators: bundles of related values.
//!
//! # Mental Model
//!
//! A mutable manipulator is a detached snapshot of one facet of a holder
//! (food = level + saturation + exhaustion). Editing it never touches the
//! holder; a data processor writes it back. Immutable manipulators are
//! canonical: processors obtain them through
//! [`ImmutableCaches::manipulator`](crate::cache::ImmutableCaches::manipulator).
//!
//! Field access by key goes through an erased pair
//! ([`DataManipulator::value_any`], [`DataManipulator::set_any`]) wrapped by
//! typed helpers, so a key typed `Key<V>` always reads back a `V`.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;

use sponge_primitives::{DataView, Key, MutableValue, RawKey};

mod food;
mod health;
mod single;

pub use food::{
	DEFAULT_EXHAUSTION, DEFAULT_FOOD_LEVEL, DEFAULT_SATURATION, FoodData, ImmutableFoodData,
	exhaustion_bounds, food_level_bounds, saturation_bounds,
};
pub use health::{
	DEFAULT_MAX_HEALTH, HealthData, ImmutableHealthData, health_bounds, max_health_bounds,
};
pub use single::{
	CareerData, CareerKind, ColoredData, ColoredKind, DecayableData, DecayableKind,
	ImmutableCareerData, ImmutableColoredData, ImmutableDecayableData, ImmutableSingleData,
	SingleData, SingleValueData,
};

#[cfg(test)]
mod tests;

/// A detached, editable bundle of values.
pub trait DataManipulator: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
	/// Canonical immutable counterpart.
	type Immutable: ImmutableDataManipulator<Mutable = Self>;

	/// Keys carried by this manipulator.
	fn keys(&self) -> Vec<RawKey>;

	/// Returns the mutable value for `key`, boxed.
	fn value_any(&self, key: RawKey) -> Option<Box<dyn Any>>;

	/// Sets the element for `key`. Returns false for a foreign key, an
	/// element of the wrong type, or an element the value rejects.
	fn set_any(&mut self, key: RawKey, element: &dyn Any) -> bool;

	/// Writes every value into a view under its key's query path.
	fn to_container(&self) -> DataView;

	/// Freezes a detached copy. Shared instances come from
	/// [`ImmutableCaches::canonical`](crate::cache::ImmutableCaches::canonical).
	fn as_immutable(&self) -> Self::Immutable;

	fn compare_to(&self, other: &Self) -> Ordering;

	fn copy(&self) -> Self {
		self.clone()
	}

	fn supports_key(&self, key: RawKey) -> bool {
		self.keys().contains(&key)
	}

	/// Returns the value for `key`, or `None` if the key is foreign.
	fn get<V: MutableValue>(&self, key: Key<V>) -> Option<V> {
		self.value_any(key.raw())?.downcast::<V>().ok().map(|value| *value)
	}

	/// Sets the element for `key`.
	fn set<V: MutableValue>(&mut self, key: Key<V>, element: V::Element) -> bool {
		self.set_any(key.raw(), &element)
	}

	/// Applies `f` to the element for `key`.
	fn transform<V: MutableValue>(
		&mut self,
		key: Key<V>,
		f: impl FnOnce(V::Element) -> V::Element,
	) -> bool {
		match self.get(key) {
			Some(value) => self.set(key, f(value.get().clone())),
			None => false,
		}
	}
}

/// An immutable bundle of values. Updates produce new instances.
pub trait ImmutableDataManipulator: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
	/// Mutable counterpart.
	type Mutable: DataManipulator<Immutable = Self>;

	fn as_mutable(&self) -> Self::Mutable;

	fn to_container(&self) -> DataView {
		self.as_mutable().to_container()
	}

	fn compare_to(&self, other: &Self) -> Ordering {
		self.as_mutable().compare_to(&other.as_mutable())
	}

	/// Returns the immutable value for `key`.
	fn get<V: MutableValue>(&self, key: Key<V>) -> Option<V::Immutable> {
		self.as_mutable().get(key).map(|value| value.as_immutable())
	}

	/// Returns a detached copy with `key` set to `element`, or `None` if the
	/// key is foreign or the element is rejected. See
	/// [`ImmutableCaches::with_element`](crate::cache::ImmutableCaches::with_element)
	/// for the shared instance.
	fn with<V: MutableValue>(&self, key: Key<V>, element: V::Element) -> Option<Self> {
		let mut mutable = self.as_mutable();
		mutable.set(key, element).then(|| mutable.as_immutable())
	}
}
