use std::cmp::Reverse;
use std::fmt;
use std::sync::Arc;

use sponge_primitives::{Key, MutableValue, RawKey};

use super::ValueProcessor;
use crate::holder::DataHolder;
use crate::transaction::{DataTransactionResult, ErasedValue};

/// Every processor registered for one key, ordered by descending priority.
///
/// Processors of equal priority keep registration order. Each call is
/// handled in full by the first processor that supports the holder. Only
/// the registry builds delegates, and a delegate cannot be registered as a
/// processor.
pub struct ValueProcessorDelegate<V: MutableValue> {
	key: Key<V>,
	processors: Box<[Arc<dyn ValueProcessor<V>>]>,
}

impl<V: MutableValue> ValueProcessorDelegate<V> {
	pub(crate) fn new(key: Key<V>, mut processors: Vec<Arc<dyn ValueProcessor<V>>>) -> Self {
		processors.sort_by_key(|processor| Reverse(processor.priority()));
		Self {
			key,
			processors: processors.into_boxed_slice(),
		}
	}

	/// Processors in dispatch order.
	pub fn processors(&self) -> &[Arc<dyn ValueProcessor<V>>] {
		&self.processors
	}

	/// Returns the processor that handles `holder`.
	pub fn handler(&self, holder: &dyn DataHolder) -> Option<&dyn ValueProcessor<V>> {
		self.processors
			.iter()
			.find(|processor| processor.supports(holder))
			.map(|processor| &**processor)
	}
}

impl<V: MutableValue> ValueProcessor<V> for ValueProcessorDelegate<V> {
	fn key(&self) -> Key<V> {
		self.key
	}

	fn supports(&self, holder: &dyn DataHolder) -> bool {
		self.handler(holder).is_some()
	}

	fn get(&self, holder: &dyn DataHolder) -> Option<V::Element> {
		self.handler(holder)?.get(holder)
	}

	fn api_value(&self, holder: &dyn DataHolder) -> Option<V> {
		self.handler(holder)?.api_value(holder)
	}

	fn offer(&self, holder: &mut dyn DataHolder, element: V::Element) -> DataTransactionResult {
		match self.handler(&*holder) {
			Some(processor) => processor.offer(holder, element),
			None => DataTransactionResult::fail_no_data(),
		}
	}

	fn offer_value(&self, holder: &mut dyn DataHolder, value: &V) -> DataTransactionResult {
		match self.handler(&*holder) {
			Some(processor) => processor.offer_value(holder, value),
			None => DataTransactionResult::fail_no_data(),
		}
	}

	fn transform(
		&self,
		holder: &mut dyn DataHolder,
		f: &dyn Fn(V::Element) -> V::Element,
	) -> DataTransactionResult {
		match self.handler(&*holder) {
			Some(processor) => processor.transform(holder, f),
			None => DataTransactionResult::fail_no_data(),
		}
	}

	fn remove(&self, holder: &mut dyn DataHolder) -> DataTransactionResult {
		match self.handler(&*holder) {
			Some(processor) => processor.remove(holder),
			None => DataTransactionResult::fail_no_data(),
		}
	}
}

impl<V: MutableValue> fmt::Debug for ValueProcessorDelegate<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ValueProcessorDelegate")
			.field("key", &self.key)
			.field(
				"priorities",
				&self.processors.iter().map(|p| p.priority()).collect::<Vec<_>>(),
			)
			.finish()
	}
}

/// Key-agnostic view of a delegate, for callers that only hold a
/// [`RawKey`].
pub trait ErasedDelegate: Send + Sync {
	fn raw_key(&self) -> RawKey;

	/// Number of processors in the chain.
	fn len(&self) -> usize;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn supports_holder(&self, holder: &dyn DataHolder) -> bool;

	/// Reads the holder's value in frozen, type-erased form.
	fn erased_value(&self, holder: &dyn DataHolder) -> Option<ErasedValue>;

	fn remove_from(&self, holder: &mut dyn DataHolder) -> DataTransactionResult;
}

impl<V: MutableValue> ErasedDelegate for ValueProcessorDelegate<V> {
	fn raw_key(&self) -> RawKey {
		self.key.raw()
	}

	fn len(&self) -> usize {
		self.processors.len()
	}

	fn supports_holder(&self, holder: &dyn DataHolder) -> bool {
		self.handler(holder).is_some()
	}

	fn erased_value(&self, holder: &dyn DataHolder) -> Option<ErasedValue> {
		let value = self.handler(holder)?.immutable_value(holder)?;
		Some(Arc::new(value))
	}

	fn remove_from(&self, holder: &mut dyn DataHolder) -> DataTransactionResult {
		ValueProcessor::remove(self, holder)
	}
}
