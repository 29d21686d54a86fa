//! Value containers.
//!
//! # Mental Model
//!
//! A value is a `(key, default, actual)` triple. Mutable values are
//! detached snapshots a caller may edit freely; editing one never touches a
//! holder. Immutable values (`FrozenValue`) never change after construction:
//! `with` and `transform` return new instances. Bounded variants carry a
//! [`Bounds`] used for range checks and ordering.
//!
//! Immutable values are the currency of transaction results, where they are
//! stored type-erased behind [`AnyValue`].

use std::any::Any;
use std::fmt;

use crate::RawKey;

mod bounded;
mod optional;
mod simple;

pub use bounded::{
	BoundedValue, Bounds, Comparator, ImmutableBoundedValue, double_comparator, int_comparator,
	natural_order,
};
pub use optional::{EntityValue, ImmutableOptionalValue, OptionalValue};
pub use simple::{ImmutableValue, Value};


/// Element types a value can carry.
pub trait ValueElement: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {}

impl<T> ValueElement for T where T: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {}

/// Common read surface of every value.
pub trait BaseValue: Clone + fmt::Debug + Send + Sync + 'static {
	/// Type of the wrapped element.
	type Element: ValueElement;

	/// Returns the key this value belongs to.
	fn key(&self) -> RawKey;

	/// Returns the current element.
	fn get(&self) -> &Self::Element;

	/// Returns the element used when the attribute is absent.
	fn default_value(&self) -> &Self::Element;

	/// Returns false when the value stands for an absent attribute.
	fn exists(&self) -> bool {
		true
	}
}

/// A detached, editable value.
pub trait MutableValue: BaseValue {
	/// Immutable counterpart produced by [`MutableValue::as_immutable`].
	type Immutable: FrozenValue<Element = Self::Element, Mutable = Self>;

	/// Replaces the element. Returns false when the value rejects it
	/// (bounded values ignore out-of-range elements).
	fn set(&mut self, value: Self::Element) -> bool;

	/// Applies `f` to the current element and stores the result.
	fn transform(&mut self, f: impl FnOnce(Self::Element) -> Self::Element) -> bool {
		let next = f(self.get().clone());
		self.set(next)
	}

	/// Freezes a copy of this value.
	fn as_immutable(&self) -> Self::Immutable;
}

/// An immutable value. Updates produce new instances.
pub trait FrozenValue: BaseValue + PartialEq {
	/// Mutable counterpart produced by [`FrozenValue::as_mutable`].
	type Mutable: MutableValue<Element = Self::Element, Immutable = Self>;

	/// Returns a copy carrying `value`.
	fn with(&self, value: Self::Element) -> Self;

	/// Returns a copy carrying `f` applied to the current element.
	fn transform(&self, f: impl FnOnce(Self::Element) -> Self::Element) -> Self {
		self.with(f(self.get().clone()))
	}

	/// Thaws a detached, editable copy.
	fn as_mutable(&self) -> Self::Mutable;
}

/// Type-erased immutable value, as stored in transaction results.
pub trait AnyValue: fmt::Debug + Send + Sync + 'static {
	/// Returns the key this value belongs to.
	fn value_key(&self) -> RawKey;

	/// Returns the element for downcasting.
	fn element_any(&self) -> &dyn Any;

	/// Returns the value itself for downcasting.
	fn as_any(&self) -> &dyn Any;

	/// Structural equality across erased values.
	fn eq_dyn(&self, other: &dyn AnyValue) -> bool;
}

impl<T: FrozenValue> AnyValue for T {
	fn value_key(&self) -> RawKey {
		self.key()
	}

	fn element_any(&self) -> &dyn Any {
		self.get()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn eq_dyn(&self, other: &dyn AnyValue) -> bool {
		other.as_any().downcast_ref::<T>().is_some_and(|other| other == self)
	}
}

impl dyn AnyValue {
	/// Downcasts the element to a concrete type.
	pub fn element<E: 'static>(&self) -> Option<&E> {
		self.element_any().downcast_ref::<E>()
	}
}

impl PartialEq for dyn AnyValue {
	fn eq(&self, other: &Self) -> bool {
		self.eq_dyn(other)
	}
}
