//! Holder-level data access routed through the registry.
//!
//! Every call resolves the registered delegate or processor and forwards to
//! it. When nothing is registered, reads are `None` and writes report
//! `fail_no_data`.

use std::sync::Arc;

use sponge_primitives::{DataView, Key, MutableValue, RawKey};

use super::DataRegistry;
use crate::error::CacheError;
use crate::holder::{BlockState, DataHolder};
use crate::manipulator::{DataManipulator, ImmutableDataManipulator};
use crate::processor::{DataPriority, ValueProcessor};
use crate::transaction::{DataTransactionResult, ErasedValue};

impl DataRegistry {
	pub fn supports<V: MutableValue>(&self, holder: &dyn DataHolder, key: Key<V>) -> bool {
		self.value_processor(key)
			.is_some_and(|delegate| delegate.supports(holder))
	}

	pub fn get<V: MutableValue>(&self, holder: &dyn DataHolder, key: Key<V>) -> Option<V::Element> {
		self.value_processor(key)?.get(holder)
	}

	pub fn api_value<V: MutableValue>(&self, holder: &dyn DataHolder, key: Key<V>) -> Option<V> {
		self.value_processor(key)?.api_value(holder)
	}

	pub fn offer<V: MutableValue>(
		&self,
		holder: &mut dyn DataHolder,
		key: Key<V>,
		element: V::Element,
	) -> DataTransactionResult {
		match self.value_processor(key) {
			Some(delegate) => delegate.offer(holder, element),
			None => DataTransactionResult::fail_no_data(),
		}
	}

	/// Offers the element carried by `value` under the value's own key.
	pub fn offer_value<V: MutableValue>(
		&self,
		holder: &mut dyn DataHolder,
		value: &V,
	) -> DataTransactionResult {
		match self.typed_delegate::<V>(value.key()) {
			Some(delegate) => delegate.offer_value(holder, value),
			None => DataTransactionResult::fail_no_data(),
		}
	}

	pub fn transform<V: MutableValue>(
		&self,
		holder: &mut dyn DataHolder,
		key: Key<V>,
		f: &dyn Fn(V::Element) -> V::Element,
	) -> DataTransactionResult {
		match self.value_processor(key) {
			Some(delegate) => delegate.transform(holder, f),
			None => DataTransactionResult::fail_no_data(),
		}
	}

	pub fn remove<V: MutableValue>(
		&self,
		holder: &mut dyn DataHolder,
		key: Key<V>,
	) -> DataTransactionResult {
		self.remove_key(holder, key.raw())
	}

	/// Removes the attribute behind an untyped key.
	pub fn remove_key(&self, holder: &mut dyn DataHolder, key: RawKey) -> DataTransactionResult {
		match self.wild_value_processor(key) {
			Some(delegate) => delegate.remove_from(holder),
			None => DataTransactionResult::fail_no_data(),
		}
	}

	/// Immutable values of every registered key the holder supports,
	/// ordered by key id.
	pub fn values_of(&self, holder: &dyn DataHolder) -> Vec<ErasedValue> {
		self.delegates()
			.iter()
			.filter_map(|delegate| delegate.erased_value(holder))
			.collect()
	}

	pub fn get_manipulator<M: DataManipulator>(&self, holder: &dyn DataHolder) -> Option<M> {
		self.processor::<M>()?.from_holder(holder)
	}

	/// Canonical immutable snapshot of the holder's data. `Ok(None)` when
	/// nothing registered supports the holder.
	pub fn get_immutable_manipulator<I: ImmutableDataManipulator>(
		&self,
		holder: &dyn DataHolder,
	) -> Result<Option<Arc<I>>, CacheError> {
		match self.immutable_processor::<I>() {
			Some(processor) => processor.immutable_from(holder),
			None => Ok(None),
		}
	}

	pub fn offer_manipulator<M: DataManipulator>(
		&self,
		holder: &mut dyn DataHolder,
		manipulator: &M,
		priority: DataPriority,
	) -> DataTransactionResult {
		match self.processor::<M>() {
			Some(processor) => processor.set(holder, manipulator, priority),
			None => DataTransactionResult::fail_no_data(),
		}
	}

	pub fn remove_manipulator<M: DataManipulator>(
		&self,
		holder: &mut dyn DataHolder,
	) -> DataTransactionResult {
		match self.processor::<M>() {
			Some(processor) => processor.remove(holder),
			None => DataTransactionResult::fail_no_data(),
		}
	}

	/// Rebuilds a manipulator from its serialized view.
	pub fn build_manipulator<M: DataManipulator>(&self, view: &DataView) -> Option<M> {
		self.processor::<M>()?.build(view)
	}

	pub fn block_data<I: ImmutableDataManipulator>(
		&self,
		state: &BlockState,
	) -> Result<Option<Arc<I>>, CacheError> {
		match self.block_processor::<I>() {
			Some(processor) => processor.from_block_state(state),
			None => Ok(None),
		}
	}

	/// Returns `state` carrying `data`, or `None` if no processor accepts it.
	pub fn with_block_data<I: ImmutableDataManipulator>(
		&self,
		state: &BlockState,
		data: &I,
	) -> Option<BlockState> {
		self.block_processor::<I>()?.with_data(state, data)
	}

	pub fn without_block_data<I: ImmutableDataManipulator>(
		&self,
		state: &BlockState,
	) -> Option<BlockState> {
		self.block_processor::<I>()?.remove_from(state)
	}
}
