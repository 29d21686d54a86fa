use std::fmt;

use super::{BaseValue, FrozenValue, MutableValue, ValueElement};
use crate::{EntityId, EntityLookup, Key, RawKey};

/// Mutable value for an attribute that may be absent. The default is
/// always `None`.
#[derive(Clone)]
pub struct OptionalValue<E> {
	key: Key<OptionalValue<E>>,
	actual: Option<E>,
}

/// Back-reference to another entity, held as an id and resolved on demand.
pub type EntityValue = OptionalValue<EntityId>;

impl<E: ValueElement> OptionalValue<E> {
	pub fn new(key: Key<OptionalValue<E>>, actual: Option<E>) -> Self {
		Self { key, actual }
	}

	/// Creates an absent value.
	pub fn empty(key: Key<OptionalValue<E>>) -> Self {
		Self::new(key, None)
	}

	pub fn typed_key(&self) -> Key<OptionalValue<E>> {
		self.key
	}

	/// Returns the element or `default` when absent.
	pub fn or(&self, default: E) -> E {
		self.actual.clone().unwrap_or(default)
	}

	/// Sets or clears the element.
	pub fn set_to(&mut self, value: Option<E>) -> &mut Self {
		self.actual = value;
		self
	}
}

impl OptionalValue<EntityId> {
	/// Resolves the referenced entity. Returns `None` when no entity is
	/// referenced or the referenced one is gone.
	pub fn resolve<L: EntityLookup + ?Sized>(&self, lookup: &L) -> Option<L::Entity> {
		self.actual.and_then(|id| lookup.lookup(id))
	}

	/// Returns true if the referenced entity is still alive.
	pub fn is_alive<L: EntityLookup + ?Sized>(&self, lookup: &L) -> bool {
		self.resolve(lookup).is_some()
	}
}

impl<E: ValueElement> BaseValue for OptionalValue<E> {
	type Element = Option<E>;

	fn key(&self) -> RawKey {
		self.key.raw()
	}

	fn get(&self) -> &Option<E> {
		&self.actual
	}

	fn default_value(&self) -> &Option<E> {
		&None
	}

	fn exists(&self) -> bool {
		self.actual.is_some()
	}
}

impl<E: ValueElement> MutableValue for OptionalValue<E> {
	type Immutable = ImmutableOptionalValue<E>;

	fn set(&mut self, value: Option<E>) -> bool {
		self.actual = value;
		true
	}

	fn as_immutable(&self) -> ImmutableOptionalValue<E> {
		ImmutableOptionalValue::new(self.key, self.actual.clone())
	}
}

impl<E: ValueElement> PartialEq for OptionalValue<E> {
	fn eq(&self, other: &Self) -> bool {
		self.key == other.key && self.actual == other.actual
	}
}

impl<E: fmt::Debug> fmt::Debug for OptionalValue<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("OptionalValue")
			.field("key", &self.key)
			.field("actual", &self.actual)
			.finish()
	}
}

/// Immutable counterpart of [`OptionalValue`].
#[derive(Clone)]
pub struct ImmutableOptionalValue<E> {
	key: Key<OptionalValue<E>>,
	actual: Option<E>,
}

impl<E: ValueElement> ImmutableOptionalValue<E> {
	pub fn new(key: Key<OptionalValue<E>>, actual: Option<E>) -> Self {
		Self { key, actual }
	}

	pub fn typed_key(&self) -> Key<OptionalValue<E>> {
		self.key
	}

	pub fn or(&self, default: E) -> E {
		self.actual.clone().unwrap_or(default)
	}
}

impl<E: ValueElement> BaseValue for ImmutableOptionalValue<E> {
	type Element = Option<E>;

	fn key(&self) -> RawKey {
		self.key.raw()
	}

	fn get(&self) -> &Option<E> {
		&self.actual
	}

	fn default_value(&self) -> &Option<E> {
		&None
	}

	fn exists(&self) -> bool {
		self.actual.is_some()
	}
}

impl<E: ValueElement> FrozenValue for ImmutableOptionalValue<E> {
	type Mutable = OptionalValue<E>;

	fn with(&self, value: Option<E>) -> Self {
		Self::new(self.key, value)
	}

	fn as_mutable(&self) -> OptionalValue<E> {
		OptionalValue::new(self.key, self.actual.clone())
	}
}

impl<E: ValueElement> PartialEq for ImmutableOptionalValue<E> {
	fn eq(&self, other: &Self) -> bool {
		self.key == other.key && self.actual == other.actual
	}
}

impl<E: fmt::Debug> fmt::Debug for ImmutableOptionalValue<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ImmutableOptionalValue")
			.field("key", &self.key)
			.field("actual", &self.actual)
			.finish()
	}
}
