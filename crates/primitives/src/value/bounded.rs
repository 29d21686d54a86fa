use std::cmp::Ordering;
use std::fmt;

use super::{BaseValue, FrozenValue, MutableValue, ValueElement};
use crate::{Key, RawKey};

/// Total order used by bounded values.
pub type Comparator<E> = fn(&E, &E) -> Ordering;

/// Orders integers numerically.
pub fn int_comparator(a: &i32, b: &i32) -> Ordering {
	a.cmp(b)
}

/// Orders doubles with [`f64::total_cmp`].
pub fn double_comparator(a: &f64, b: &f64) -> Ordering {
	a.total_cmp(b)
}

/// Orders any [`Ord`] type by its natural order.
pub fn natural_order<T: Ord>(a: &T, b: &T) -> Ordering {
	a.cmp(b)
}

/// Inclusive range plus the comparator that defines it.
#[derive(Clone)]
pub struct Bounds<E> {
	lower: E,
	upper: E,
	comparator: Comparator<E>,
}

impl<E: ValueElement> Bounds<E> {
	pub fn new(lower: E, upper: E, comparator: Comparator<E>) -> Self {
		Self {
			lower,
			upper,
			comparator,
		}
	}

	pub fn lower(&self) -> &E {
		&self.lower
	}

	pub fn upper(&self) -> &E {
		&self.upper
	}

	pub fn comparator(&self) -> Comparator<E> {
		self.comparator
	}

	/// Returns true if `value` lies in `lower..=upper`.
	pub fn contains(&self, value: &E) -> bool {
		(self.comparator)(value, &self.lower) != Ordering::Less
			&& (self.comparator)(value, &self.upper) != Ordering::Greater
	}

	/// Compares two elements with this range's comparator.
	pub fn compare(&self, a: &E, b: &E) -> Ordering {
		(self.comparator)(a, b)
	}
}

impl<E: PartialEq> PartialEq for Bounds<E> {
	fn eq(&self, other: &Self) -> bool {
		self.lower == other.lower && self.upper == other.upper
	}
}

impl<E: fmt::Debug> fmt::Debug for Bounds<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:?}..={:?}", self.lower, self.upper)
	}
}

/// Mutable value confined to a [`Bounds`].
#[derive(Clone)]
pub struct BoundedValue<E> {
	key: Key<BoundedValue<E>>,
	default: E,
	actual: E,
	bounds: Bounds<E>,
}

impl<E: ValueElement> BoundedValue<E> {
	/// Creates a bounded value. The actual element is taken as given; use
	/// [`BoundedValue::in_bounds`] to check it.
	pub fn new(key: Key<BoundedValue<E>>, default: E, actual: E, bounds: Bounds<E>) -> Self {
		Self {
			key,
			default,
			actual,
			bounds,
		}
	}

	pub fn typed_key(&self) -> Key<BoundedValue<E>> {
		self.key
	}

	pub fn bounds(&self) -> &Bounds<E> {
		&self.bounds
	}

	pub fn lower(&self) -> &E {
		self.bounds.lower()
	}

	pub fn upper(&self) -> &E {
		self.bounds.upper()
	}

	/// Returns true if the actual element lies within the bounds.
	pub fn in_bounds(&self) -> bool {
		self.bounds.contains(&self.actual)
	}

	/// Orders by actual element using the value's comparator.
	pub fn compare_to(&self, other: &Self) -> Ordering {
		self.bounds.compare(&self.actual, &other.actual)
	}
}

impl<E: ValueElement> BaseValue for BoundedValue<E> {
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

impl<E: ValueElement> MutableValue for BoundedValue<E> {
	type Immutable = ImmutableBoundedValue<E>;

	/// Out-of-range elements are ignored and leave the value unchanged.
	fn set(&mut self, value: E) -> bool {
		if !self.bounds.contains(&value) {
			return false;
		}
		self.actual = value;
		true
	}

	fn as_immutable(&self) -> ImmutableBoundedValue<E> {
		ImmutableBoundedValue::new(
			self.key,
			self.default.clone(),
			self.actual.clone(),
			self.bounds.clone(),
		)
	}
}

impl<E: ValueElement> PartialEq for BoundedValue<E> {
	fn eq(&self, other: &Self) -> bool {
		self.key == other.key
			&& self.default == other.default
			&& self.actual == other.actual
			&& self.bounds == other.bounds
	}
}

impl<E: fmt::Debug> fmt::Debug for BoundedValue<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("BoundedValue")
			.field("key", &self.key)
			.field("default", &self.default)
			.field("actual", &self.actual)
			.field("bounds", &self.bounds)
			.finish()
	}
}

/// Immutable bounded value.
///
/// May carry an out-of-range element: rejected proposals are reported as
/// bounded values so callers can see the range they violated.
#[derive(Clone)]
pub struct ImmutableBoundedValue<E> {
	key: Key<BoundedValue<E>>,
	default: E,
	actual: E,
	bounds: Bounds<E>,
}

impl<E: ValueElement> ImmutableBoundedValue<E> {
	pub fn new(key: Key<BoundedValue<E>>, default: E, actual: E, bounds: Bounds<E>) -> Self {
		Self {
			key,
			default,
			actual,
			bounds,
		}
	}

	pub fn typed_key(&self) -> Key<BoundedValue<E>> {
		self.key
	}

	pub fn bounds(&self) -> &Bounds<E> {
		&self.bounds
	}

	pub fn lower(&self) -> &E {
		self.bounds.lower()
	}

	pub fn upper(&self) -> &E {
		self.bounds.upper()
	}

	pub fn in_bounds(&self) -> bool {
		self.bounds.contains(&self.actual)
	}

	pub fn compare_to(&self, other: &Self) -> Ordering {
		self.bounds.compare(&self.actual, &other.actual)
	}
}

impl<E: ValueElement> BaseValue for ImmutableBoundedValue<E> {
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

impl<E: ValueElement> FrozenValue for ImmutableBoundedValue<E> {
	type Mutable = BoundedValue<E>;

	fn with(&self, value: E) -> Self {
		Self::new(self.key, self.default.clone(), value, self.bounds.clone())
	}

	fn as_mutable(&self) -> BoundedValue<E> {
		BoundedValue::new(
			self.key,
			self.default.clone(),
			self.actual.clone(),
			self.bounds.clone(),
		)
	}
}

impl<E: ValueElement> PartialEq for ImmutableBoundedValue<E> {
	fn eq(&self, other: &Self) -> bool {
		self.key == other.key
			&& self.default == other.default
			&& self.actual == other.actual
			&& self.bounds == other.bounds
	}
}

impl<E: fmt::Debug> fmt::Debug for ImmutableBoundedValue<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ImmutableBoundedValue")
			.field("key", &self.key)
			.field("default", &self.default)
			.field("actual", &self.actual)
			.field("bounds", &self.bounds)
			.finish()
	}
}
