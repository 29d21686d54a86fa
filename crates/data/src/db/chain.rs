//! Per-key processor lists awaiting finalization.

use std::any::{Any, TypeId};
use std::sync::Arc;

use sponge_primitives::{Key, MutableValue};

use crate::processor::{ErasedDelegate, ValueProcessor, ValueProcessorDelegate};

/// A published delegate in both its erased and its typed form.
pub(super) struct DelegateEntry {
	pub(super) erased: Arc<dyn ErasedDelegate>,
	/// `Arc<ValueProcessorDelegate<V>>` for the key's value type.
	pub(super) typed: Arc<dyn Any + Send + Sync>,
}

/// Key-agnostic handle on a [`TypedChain`].
pub(super) trait PendingChain: Send + Sync {
	fn key_id(&self) -> &'static str;

	/// Type names of the registered processors, in registration order.
	fn processor_names(&self) -> Vec<&'static str>;

	fn as_any_mut(&mut self) -> &mut dyn Any;

	/// Builds the delegate for the processors registered so far.
	fn seal(&self) -> DelegateEntry;
}

struct Registered<V: MutableValue> {
	type_id: TypeId,
	name: &'static str,
	processor: Arc<dyn ValueProcessor<V>>,
}

/// Processors registered for one key, in registration order.
pub(super) struct TypedChain<V: MutableValue> {
	key: Key<V>,
	entries: Vec<Registered<V>>,
}

impl<V: MutableValue> TypedChain<V> {
	pub(super) fn new(key: Key<V>) -> Self {
		Self {
			key,
			entries: Vec::new(),
		}
	}

	pub(super) fn contains<P: 'static>(&self) -> bool {
		let type_id = TypeId::of::<P>();
		self.entries.iter().any(|entry| entry.type_id == type_id)
	}

	pub(super) fn push<P: ValueProcessor<V>>(&mut self, name: &'static str, processor: Arc<P>) {
		self.entries.push(Registered {
			type_id: TypeId::of::<P>(),
			name,
			processor,
		});
	}
}

impl<V: MutableValue> PendingChain for TypedChain<V> {
	fn key_id(&self) -> &'static str {
		self.key.id()
	}

	fn processor_names(&self) -> Vec<&'static str> {
		self.entries.iter().map(|entry| entry.name).collect()
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}

	fn seal(&self) -> DelegateEntry {
		let processors = self
			.entries
			.iter()
			.map(|entry| entry.processor.clone())
			.collect();
		let delegate = Arc::new(ValueProcessorDelegate::new(self.key, processors));
		DelegateEntry {
			erased: delegate.clone(),
			typed: delegate,
		}
	}
}
