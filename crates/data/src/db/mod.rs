//! The data registry: processors and builders by manipulator type and key.
//!
//! # Mental Model
//!
//! The registry is built once during startup and then frozen. While open,
//! registrations accumulate in locked tables: at most one builder, one data
//! processor and one block processor per manipulator type, and a list of
//! value processors per key. [`DataRegistry::finalize_registration`] wraps
//! every key's list in a [`ValueProcessorDelegate`] and publishes the
//! resulting table through an [`ArcSwap`]; readers after that point see
//! fully built delegates without taking a lock.
//!
//! Registration is expected to run on a single startup thread. Lookups
//! never fail: a missing entry is `None`.
//!
//! # Invariants
//!
//! - Once finalized, every registration fails with
//!   [`RegistryError::Finalized`] and no table changes.
//! - A rejected registration leaves the existing entry in place.
//! - Value delegates are only visible after finalization.

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arc_swap::ArcSwap;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use sponge_primitives::{Key, MutableValue, RawKey};

use crate::error::RegistryError;
use crate::manipulator::{DataManipulator, ImmutableDataManipulator};
use crate::processor::{
	BlockDataProcessor, DataManipulatorBuilder, DataProcessor, ErasedDelegate, ValueProcessor,
	ValueProcessorDelegate,
};

mod access;
mod chain;

use chain::{DelegateEntry, PendingChain, TypedChain};

#[cfg(test)]
mod tests;

type Handle = Arc<dyn Any + Send + Sync>;

/// A registered strategy: its type name for diagnostics plus the typed
/// `Arc<dyn ...>` behind an `Any`.
struct Slot {
	name: &'static str,
	handle: Handle,
}

impl Slot {
	fn new<T: Send + Sync + 'static>(name: &'static str, value: T) -> Self {
		Self {
			name,
			handle: Arc::new(value),
		}
	}

	fn typed<T: Clone + 'static>(&self) -> Option<T> {
		self.handle.downcast_ref::<T>().cloned()
	}
}

#[derive(Default)]
struct Tables {
	builders: FxHashMap<TypeId, Slot>,
	processors: FxHashMap<TypeId, Slot>,
	block_processors: FxHashMap<TypeId, Slot>,
	value_chains: FxHashMap<RawKey, Box<dyn PendingChain>>,
}

type DelegateTable = FxHashMap<RawKey, DelegateEntry>;

/// Registry of processors and builders.
pub struct DataRegistry {
	open: AtomicBool,
	tables: RwLock<Tables>,
	delegates: ArcSwap<DelegateTable>,
}

impl DataRegistry {
	/// Creates an open, empty registry.
	pub fn new() -> Self {
		Self {
			open: AtomicBool::new(true),
			tables: RwLock::new(Tables::default()),
			delegates: ArcSwap::from_pointee(DelegateTable::default()),
		}
	}

	pub fn is_finalized(&self) -> bool {
		!self.open.load(Ordering::Acquire)
	}

	fn ensure_open(&self, what: &'static str) -> Result<(), RegistryError> {
		if self.is_finalized() {
			tracing::warn!(what, "registration attempted after finalize");
			return Err(RegistryError::Finalized { what });
		}
		Ok(())
	}

	/// Registers the builder for `M`.
	pub fn register_builder<M: DataManipulator>(
		&self,
		builder: Arc<dyn DataManipulatorBuilder<M>>,
	) -> Result<(), RegistryError> {
		let mut tables = self.tables.write();
		self.ensure_open("builder")?;
		let manipulator = type_name::<M>();
		if tables.builders.contains_key(&TypeId::of::<M>()) {
			return Err(RegistryError::DuplicateBuilder { manipulator });
		}
		tables
			.builders
			.insert(TypeId::of::<M>(), Slot::new(manipulator, builder));
		tracing::debug!(manipulator, "registered builder");
		Ok(())
	}

	/// Registers the data processor for `M`. The processor also serves
	/// `M::Immutable`.
	pub fn register_data_processor<M: DataManipulator>(
		&self,
		processor: Arc<dyn DataProcessor<M>>,
	) -> Result<(), RegistryError> {
		let mut tables = self.tables.write();
		self.ensure_open("data processor")?;
		let manipulator = type_name::<M>();
		if tables.processors.contains_key(&TypeId::of::<M>()) {
			return Err(RegistryError::DuplicateDataProcessor { manipulator });
		}
		let priority = processor.priority();
		tables
			.processors
			.insert(TypeId::of::<M>(), Slot::new(manipulator, processor));
		tracing::debug!(manipulator, priority, "registered data processor");
		Ok(())
	}

	/// Registers one object as both the builder and the data processor for
	/// `M`. Nothing is registered unless both slots are free.
	pub fn register_data_processor_and_builder<M, P>(
		&self,
		processor: Arc<P>,
	) -> Result<(), RegistryError>
	where
		M: DataManipulator,
		P: DataProcessor<M> + DataManipulatorBuilder<M>,
	{
		let mut tables = self.tables.write();
		self.ensure_open("data processor")?;
		let manipulator = type_name::<M>();
		let id = TypeId::of::<M>();
		if tables.builders.contains_key(&id) {
			return Err(RegistryError::DuplicateBuilder { manipulator });
		}
		if tables.processors.contains_key(&id) {
			return Err(RegistryError::DuplicateDataProcessor { manipulator });
		}
		let builder: Arc<dyn DataManipulatorBuilder<M>> = processor.clone();
		let priority = DataProcessor::<M>::priority(&*processor);
		let processor: Arc<dyn DataProcessor<M>> = processor;
		tables.builders.insert(id, Slot::new(manipulator, builder));
		tables.processors.insert(id, Slot::new(manipulator, processor));
		tracing::debug!(
			manipulator,
			processor = type_name::<P>(),
			priority,
			"registered data processor and builder"
		);
		Ok(())
	}

	/// Registers the block processor for `I`.
	pub fn register_block_processor<I: ImmutableDataManipulator>(
		&self,
		processor: Arc<dyn BlockDataProcessor<I>>,
	) -> Result<(), RegistryError> {
		let mut tables = self.tables.write();
		self.ensure_open("block processor")?;
		let manipulator = type_name::<I>();
		if tables.block_processors.contains_key(&TypeId::of::<I>()) {
			return Err(RegistryError::DuplicateBlockProcessor { manipulator });
		}
		let priority = processor.priority();
		tables
			.block_processors
			.insert(TypeId::of::<I>(), Slot::new(manipulator, processor));
		tracing::debug!(manipulator, priority, "registered block processor");
		Ok(())
	}

	/// Appends `processor` to the list for its key.
	///
	/// Fails for delegates, for a duplicate processor on one key, and for a
	/// key already bound to a different value type. Processors are
	/// stateless, so processor equality is type equality: a second instance
	/// of an already registered type is a duplicate whatever its fields.
	pub fn register_value_processor<V, P>(&self, processor: P) -> Result<(), RegistryError>
	where
		V: MutableValue,
		P: ValueProcessor<V>,
	{
		let key = processor.key();
		if TypeId::of::<P>() == TypeId::of::<ValueProcessorDelegate<V>>() {
			return Err(RegistryError::DelegateRegistration { key: key.id() });
		}

		let mut tables = self.tables.write();
		self.ensure_open("value processor")?;
		let chain = tables
			.value_chains
			.entry(key.raw())
			.or_insert_with(|| Box::new(TypedChain::new(key)));
		let Some(chain) = chain.as_any_mut().downcast_mut::<TypedChain<V>>() else {
			return Err(RegistryError::KeyTypeMismatch { key: key.id() });
		};
		let name = type_name::<P>();
		if chain.contains::<P>() {
			return Err(RegistryError::DuplicateValueProcessor {
				key: key.id(),
				processor: name,
			});
		}
		let priority = processor.priority();
		chain.push::<P>(name, Arc::new(processor));
		tracing::debug!(key = key.id(), processor = name, priority, "registered value processor");
		Ok(())
	}

	/// Freezes the registry and publishes one delegate per key.
	///
	/// Fails if already finalized.
	pub fn finalize_registration(&self) -> Result<(), RegistryError> {
		let tables = self.tables.write();
		self.ensure_open("finalize")?;
		let table: DelegateTable = tables
			.value_chains
			.iter()
			.map(|(key, chain)| (*key, chain.seal()))
			.collect();
		let delegates = table.len();
		let processors: usize = table.values().map(|entry| entry.erased.len()).sum();
		self.delegates.store(Arc::new(table));
		self.open.store(false, Ordering::Release);
		tracing::info!(
			delegates,
			processors,
			builders = tables.builders.len(),
			data_processors = tables.processors.len(),
			block_processors = tables.block_processors.len(),
			"data registration finalized"
		);
		Ok(())
	}

	pub fn builder<M: DataManipulator>(&self) -> Option<Arc<dyn DataManipulatorBuilder<M>>> {
		self.tables.read().builders.get(&TypeId::of::<M>())?.typed()
	}

	/// Builder of the mutable counterpart of `I`.
	pub fn builder_for_immutable<I: ImmutableDataManipulator>(
		&self,
	) -> Option<Arc<dyn DataManipulatorBuilder<I::Mutable>>> {
		self.builder::<I::Mutable>()
	}

	pub fn processor<M: DataManipulator>(&self) -> Option<Arc<dyn DataProcessor<M>>> {
		self.tables.read().processors.get(&TypeId::of::<M>())?.typed()
	}

	/// Data processor serving `I` through its mutable counterpart.
	pub fn immutable_processor<I: ImmutableDataManipulator>(
		&self,
	) -> Option<Arc<dyn DataProcessor<I::Mutable>>> {
		self.processor::<I::Mutable>()
	}

	pub fn block_processor<I: ImmutableDataManipulator>(
		&self,
	) -> Option<Arc<dyn BlockDataProcessor<I>>> {
		self.tables.read().block_processors.get(&TypeId::of::<I>())?.typed()
	}

	/// The delegate for `key`. `None` before finalization.
	pub fn value_processor<V: MutableValue>(
		&self,
		key: Key<V>,
	) -> Option<Arc<ValueProcessorDelegate<V>>> {
		self.typed_delegate(key.raw())
	}

	/// The delegate for `key`, without its value type.
	pub fn wild_value_processor(&self, key: RawKey) -> Option<Arc<dyn ErasedDelegate>> {
		self.delegates.load().get(&key).map(|entry| entry.erased.clone())
	}

	/// Every published delegate, ordered by key id.
	pub fn delegates(&self) -> Vec<Arc<dyn ErasedDelegate>> {
		let mut delegates: Vec<_> = self
			.delegates
			.load()
			.values()
			.map(|entry| entry.erased.clone())
			.collect();
		delegates.sort_by_key(|delegate| delegate.raw_key().id());
		delegates
	}

	fn typed_delegate<V: MutableValue>(&self, key: RawKey) -> Option<Arc<ValueProcessorDelegate<V>>> {
		let typed = self.delegates.load().get(&key)?.typed.clone();
		typed.downcast::<ValueProcessorDelegate<V>>().ok()
	}
}

impl Default for DataRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for DataRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let tables = self.tables.read();
		let mut builders: Vec<_> = tables.builders.values().map(|slot| slot.name).collect();
		builders.sort_unstable();
		let mut processors: Vec<_> = tables.processors.values().map(|slot| slot.name).collect();
		processors.sort_unstable();
		let mut keys: Vec<_> = tables
			.value_chains
			.values()
			.map(|chain| (chain.key_id(), chain.processor_names()))
			.collect();
		keys.sort_unstable();
		f.debug_struct("DataRegistry")
			.field("finalized", &self.is_finalized())
			.field("builders", &builders)
			.field("processors", &processors)
			.field("value_processors", &keys)
			.finish()
	}
}
