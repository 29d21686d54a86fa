use std::fmt;

use super::{BaseValue, FrozenValue, MutableValue, ValueElement};
use crate::{Key, RawKey};

/// Mutable `(key, default, actual)` value.
#[derive(Clone)]
pub struct Value<E> {
	key: Key<Value<E>>,
	default: E,
	actual: E,
}

impl<E: ValueElement> Value<E> {
	pub fn new(key: Key<Value<E>>, default: E, actual: E) -> Self {
		Self {
			key,
			default,
			actual,
		}
	}

	/// Creates a value whose actual element is its default.
	pub fn of_default(key: Key<Value<E>>, default: E) -> Self {
		Self::new(key, default.clone(), default)
	}

	/// Returns the typed key.
	pub fn typed_key(&self) -> Key<Value<E>> {
		self.key
	}
}

impl<E: ValueElement> BaseValue for Value<E> {
	type Element = E;

	fn key(&self) -> RawKey {
		self.key.raw()
	}

	fn get(&self) -> &E {
		&self.actual
	}

	fn default_value(&self) -> &E {
		&self.default
	}
}

impl<E: ValueElement> MutableValue for Value<E> {
	type Immutable = ImmutableValue<E>;

	fn set(&mut self, value: E) -> bool {
		self.actual = value;
		true
	}

	fn as_immutable(&self) -> ImmutableValue<E> {
		ImmutableValue::new(self.key, self.default.clone(), self.actual.clone())
	}
}

impl<E: ValueElement> PartialEq for Value<E> {
	fn eq(&self, other: &Self) -> bool {
		self.key == other.key && self.default == other.default && self.actual == other.actual
	}
}

impl<E: fmt::Debug> fmt::Debug for Value<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Value")
			.field("key", &self.key)
			.field("default", &self.default)
			.field("actual", &self.actual)
			.finish()
	}
}

/// Immutable `(key, default, actual)` value.
#[derive(Clone)]
pub struct ImmutableValue<E> {
	key: Key<Value<E>>,
	default: E,
	actual: E,
}

impl<E: ValueElement> ImmutableValue<E> {
	pub fn new(key: Key<Value<E>>, default: E, actual: E) -> Self {
		Self {
			key,
			default,
			actual,
		}
	}

	/// Returns the typed key.
	pub fn typed_key(&self) -> Key<Value<E>> {
		self.key
	}
}

impl<E: ValueElement> BaseValue for ImmutableValue<E> {
	type Element = E;

	fn key(&self) -> RawKey {
		self.key.raw()
	}

	fn get(&self) -> &E {
		&self.actual
	}

	fn default_value(&self) -> &E {
		&self.default
	}
}

impl<E: ValueElement> FrozenValue for ImmutableValue<E> {
	type Mutable = Value<E>;

	fn with(&self, value: E) -> Self {
		Self::new(self.key, self.default.clone(), value)
	}

	fn as_mutable(&self) -> Value<E> {
		Value::new(self.key, self.default.clone(), self.actual.clone())
	}
}

impl<E: ValueElement> PartialEq for ImmutableValue<E> {
	fn eq(&self, other: &Self) -> bool {
		self.key == other.key && self.default == other.default && self.actual == other.actual
	}
}

impl<E: fmt::Debug> fmt::Debug for ImmutableValue<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ImmutableValue")
			.field("key", &self.key)
			.field("default", &self.default)
			.field("actual", &self.actual)
			.finish()
	}
}
