//! Canonicalizing caches for immutable values and manipulators.
//!
//! # Mental Model
//!
//! An immutable instance is a pure function of its [`CacheKey`]: the
//! type's canonical name plus the string form of every constructor
//! argument (catalog types by id). Equal keys therefore always map to
//! equal instances, and under a cache hit to the same allocation.
//! Eviction only costs a rebuild.
//!
//! Types opt in by implementing [`Canonical`], which names the type and
//! supplies its factory. Values use dedicated entry points since their
//! constructors cannot fail.
//!
//! # Invariants
//!
//! - Concurrent misses on one key run the factory exactly once.
//! - A failed factory leaves no entry and surfaces as
//!   [`CacheError::Construct`] to the builder and to every caller queued
//!   behind it; none of them runs the factory again.

use std::any::type_name;
use std::num::NonZeroUsize;
use std::sync::Arc;

use sponge_primitives::{
	BoundedValue, Bounds, ImmutableBoundedValue, ImmutableOptionalValue, ImmutableValue, Key,
	MutableValue, OptionalValue, Value, ValueElement,
};

use crate::config::CacheConfig;
use crate::error::{CacheError, ConstructError};
use crate::manipulator::ImmutableDataManipulator;

mod key;
mod striped;

pub use key::{CacheArg, CacheArgs, CacheKey};
pub use striped::CanonicalCache;


/// A type whose immutable instances are deduplicated through a cache.
pub trait Canonical: Send + Sync + Sized + 'static {
	/// Stable name used as the cache key prefix.
	const CANONICAL_NAME: &'static str;

	/// Constructor arguments, as a tuple.
	type Args: CacheArgs;

	/// Builds an instance from its arguments.
	fn construct(args: Self::Args) -> Result<Self, ConstructError>;

	/// Arguments that rebuild an instance equal to `self`.
	fn canonical_args(&self) -> Self::Args;

	/// Returns the cache key for `args`.
	fn cache_key(args: &Self::Args) -> CacheKey {
		args.append_to(CacheKey::new(Self::CANONICAL_NAME))
	}
}

/// The two process-wide caches: whole manipulators and single values.
#[derive(Debug)]
pub struct ImmutableCaches {
	manipulators: CanonicalCache,
	values: CanonicalCache,
}

impl ImmutableCaches {
	/// Creates both caches sized from `config`. Zero sizes fall back to one.
	pub fn new(config: &CacheConfig) -> Self {
		let size = |n: usize| NonZeroUsize::new(n).unwrap_or(NonZeroUsize::MIN);
		Self {
			manipulators: CanonicalCache::new(
				"manipulators",
				size(config.manipulator_capacity),
				size(config.manipulator_stripes),
			),
			values: CanonicalCache::new(
				"values",
				size(config.value_capacity),
				size(config.value_stripes),
			),
		}
	}

	pub fn manipulators(&self) -> &CanonicalCache {
		&self.manipulators
	}

	pub fn values(&self) -> &CanonicalCache {
		&self.values
	}

	/// Returns the canonical immutable manipulator for `args`.
	pub fn manipulator<I: Canonical>(&self, args: I::Args) -> Result<Arc<I>, CacheError> {
		let key = I::cache_key(&args);
		self.manipulators
			.get_or_try_init(&key, || I::construct(args))
			.map_err(|source| {
				tracing::error!(
					type_name = I::CANONICAL_NAME,
					key = %key,
					error = %source,
					"canonical construction failed"
				);
				CacheError::Construct {
					type_name: I::CANONICAL_NAME,
					key: key.into_string(),
					source,
				}
			})
	}

	/// Returns the shared instance equal to `instance`.
	pub fn canonical<I: Canonical>(&self, instance: &I) -> Result<Arc<I>, CacheError> {
		self.manipulator::<I>(instance.canonical_args())
	}

	/// Cached form of [`ImmutableDataManipulator::with`]: equal results
	/// share one allocation.
	pub fn with_element<I, V>(
		&self,
		data: &I,
		key: Key<V>,
		element: V::Element,
	) -> Result<Option<Arc<I>>, CacheError>
	where
		I: ImmutableDataManipulator + Canonical,
		V: MutableValue,
	{
		data.with(key, element)
			.map(|next| self.canonical(&next))
			.transpose()
	}

	/// Returns the canonical immutable value for `(key, default, actual)`.
	pub fn immutable_value<E>(
		&self,
		key: Key<Value<E>>,
		default: E,
		actual: E,
	) -> Arc<ImmutableValue<E>>
	where
		E: ValueElement + CacheArg,
	{
		let cache_key = CacheKey::new("ImmutableValue")
			.arg(&key)
			.arg(type_name::<E>())
			.arg(&default)
			.arg(&actual);
		self.values
			.get_or_init(&cache_key, || ImmutableValue::new(key, default, actual))
	}

	/// Returns the canonical immutable bounded value. The actual element
	/// may lie outside `bounds`.
	pub fn immutable_bounded<E>(
		&self,
		key: Key<BoundedValue<E>>,
		default: E,
		actual: E,
		bounds: &Bounds<E>,
	) -> Arc<ImmutableBoundedValue<E>>
	where
		E: ValueElement + CacheArg,
	{
		let cache_key = CacheKey::new("ImmutableBoundedValue")
			.arg(&key)
			.arg(type_name::<E>())
			.arg(&default)
			.arg(&actual)
			.arg(bounds.lower())
			.arg(bounds.upper());
		self.values.get_or_init(&cache_key, || {
			ImmutableBoundedValue::new(key, default, actual, bounds.clone())
		})
	}

	/// Returns the canonical immutable optional value.
	pub fn immutable_optional<E>(
		&self,
		key: Key<OptionalValue<E>>,
		actual: Option<E>,
	) -> Arc<ImmutableOptionalValue<E>>
	where
		E: ValueElement + CacheArg,
	{
		let cache_key = CacheKey::new("ImmutableOptionalValue")
			.arg(&key)
			.arg(type_name::<E>())
			.arg(&actual);
		self.values
			.get_or_init(&cache_key, || ImmutableOptionalValue::new(key, actual))
	}
}

impl Default for ImmutableCaches {
	fn default() -> Self {
		Self::new(&CacheConfig::default())
	}
}
