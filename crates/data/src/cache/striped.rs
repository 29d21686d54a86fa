use std::any::Any;
use std::convert::Infallible;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;
use rustc_hash::FxHasher;

use super::CacheKey;

type Shared = Arc<dyn Any + Send + Sync>;

/// Outcome of the construction guarded by a slot.
#[derive(Default)]
enum SlotState {
	#[default]
	Empty,
	Built(Shared),
	/// The factory's error, handed to callers queued behind the builder.
	Failed(Shared),
}

/// Per-key construction slot. Whoever holds the slot lock builds the
/// instance; everyone queued behind it observes the result, success or
/// failure.
type Slot = Arc<Mutex<SlotState>>;

/// Bounded, lock-striped map from [`CacheKey`]s to shared instances.
///
/// Each stripe is an LRU with an equal share of the capacity. Concurrent
/// misses on one key run the factory once; misses on different keys only
/// contend for the stripe lock while the slot is looked up.
pub struct CanonicalCache {
	label: &'static str,
	stripes: Box<[Mutex<LruCache<String, Slot>>]>,
}

impl CanonicalCache {
	/// Creates a cache holding at most `capacity` entries (rounded up to a
	/// multiple of the stripe count).
	pub fn new(label: &'static str, capacity: NonZeroUsize, stripes: NonZeroUsize) -> Self {
		let count = stripes.min(capacity);
		let per_stripe =
			NonZeroUsize::new(capacity.get().div_ceil(count.get())).unwrap_or(NonZeroUsize::MIN);
		let stripes = (0..count.get())
			.map(|_| Mutex::new(LruCache::new(per_stripe)))
			.collect();
		Self { label, stripes }
	}

	pub fn label(&self) -> &'static str {
		self.label
	}

	/// Returns the number of resident entries, including slots whose
	/// construction is still running.
	pub fn len(&self) -> usize {
		self.stripes.iter().map(|s| s.lock().len()).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns the total capacity across all stripes.
	pub fn capacity(&self) -> usize {
		self.stripes.iter().map(|s| s.lock().cap().get()).sum()
	}

	/// Returns the cached instance for `key`, building it with `make` on a
	/// miss.
	pub fn get_or_init<T>(&self, key: &CacheKey, make: impl FnOnce() -> T) -> Arc<T>
	where
		T: Any + Send + Sync,
	{
		match self.get_or_try_init(key, || Ok::<T, Infallible>(make())) {
			Ok(value) => value,
			Err(never) => match never {},
		}
	}

	/// Fallible form of [`CanonicalCache::get_or_init`].
	///
	/// A failed construction leaves no entry behind. Callers already queued
	/// on the key receive the same error without running their factory;
	/// later callers try again.
	pub fn get_or_try_init<T, E>(
		&self,
		key: &CacheKey,
		make: impl FnOnce() -> Result<T, E>,
	) -> Result<Arc<T>, E>
	where
		T: Any + Send + Sync,
		E: Any + Clone + Send + Sync,
	{
		let slot = self.slot(key.as_str());
		let mut state = slot.lock();

		let resident = match &*state {
			SlotState::Empty => None,
			SlotState::Built(existing) => Arc::clone(existing).downcast::<T>().ok().map(Ok),
			SlotState::Failed(error) => error.downcast_ref::<E>().cloned().map(Err),
		};
		if let Some(outcome) = resident {
			return outcome;
		}
		if !matches!(*state, SlotState::Empty) {
			tracing::warn!(
				cache = self.label,
				key = %key,
				"cache key maps to another type, building uncached"
			);
			return make().map(Arc::new);
		}

		match make() {
			Ok(value) => {
				let value = Arc::new(value);
				let shared: Shared = value.clone();
				*state = SlotState::Built(shared);
				Ok(value)
			}
			Err(err) => {
				*state = SlotState::Failed(Arc::new(err.clone()));
				drop(state);
				self.evict_slot(key.as_str(), &slot);
				Err(err)
			}
		}
	}

	fn stripe(&self, key: &str) -> &Mutex<LruCache<String, Slot>> {
		let mut hasher = FxHasher::default();
		key.hash(&mut hasher);
		let index = (hasher.finish() % self.stripes.len() as u64) as usize;
		&self.stripes[index]
	}

	fn slot(&self, key: &str) -> Slot {
		let mut stripe = self.stripe(key).lock();
		if let Some(slot) = stripe.get(key) {
			return Arc::clone(slot);
		}
		let slot = Slot::default();
		stripe.put(key.to_string(), Arc::clone(&slot));
		slot
	}

	fn evict_slot(&self, key: &str, slot: &Slot) {
		let mut stripe = self.stripe(key).lock();
		if stripe.peek(key).is_some_and(|resident| Arc::ptr_eq(resident, slot)) {
			stripe.pop(key);
		}
	}
}

impl std::fmt::Debug for CanonicalCache {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CanonicalCache")
			.field("label", &self.label)
			.field("stripes", &self.stripes.len())
			.field("len", &self.len())
			.finish()
	}
}
