//! Processor contracts.
//!
//! A [`ValueProcessor`] reads and writes one key on the holders it
//! supports; a [`DataProcessor`] does the same for a whole manipulator.
//! Processors are stateless strategies shared behind `Arc`s. Several
//! processors may serve one key; the registry wraps them in a
//! [`ValueProcessorDelegate`] that dispatches by priority.
//!
//! # Write protocol
//!
//! An offer reads the prior value, validates the proposal, then writes.
//! Unsupported holders get `fail` with nothing changed. Rejected proposals
//! and engine refusals get `error` carrying the proposed value.

use std::sync::Arc;

use sponge_primitives::{DataView, Key, MutableValue};

use crate::error::CacheError;
use crate::holder::{BlockState, DataHolder};
use crate::manipulator::{DataManipulator, ImmutableDataManipulator};
use crate::transaction::DataTransactionResult;

mod delegate;

pub use delegate::{ErasedDelegate, ValueProcessorDelegate};


/// Priority of processors that do not override it.
pub const DEFAULT_PRIORITY: i32 = 100;

/// Reads and writes one key on the holders it supports.
pub trait ValueProcessor<V: MutableValue>: Send + Sync + 'static {
	fn key(&self) -> Key<V>;

	/// Higher wins when several processors support a holder.
	fn priority(&self) -> i32 {
		DEFAULT_PRIORITY
	}

	/// Side-effect free capability check.
	fn supports(&self, holder: &dyn DataHolder) -> bool;

	/// Raw read; `None` when unsupported or absent.
	fn get(&self, holder: &dyn DataHolder) -> Option<V::Element>;

	/// Read wrapped with default and bounds.
	fn api_value(&self, holder: &dyn DataHolder) -> Option<V>;

	/// Writes `element`, reporting the applied and replaced values.
	fn offer(&self, holder: &mut dyn DataHolder, element: V::Element) -> DataTransactionResult;

	/// Writes the element carried by `value`.
	fn offer_value(&self, holder: &mut dyn DataHolder, value: &V) -> DataTransactionResult {
		self.offer(holder, value.get().clone())
	}

	/// Reads, applies `f`, and offers the result.
	fn transform(
		&self,
		holder: &mut dyn DataHolder,
		f: &dyn Fn(V::Element) -> V::Element,
	) -> DataTransactionResult {
		match self.get(&*holder) {
			Some(current) => self.offer(holder, f(current)),
			None => DataTransactionResult::fail_no_data(),
		}
	}

	/// Removes the attribute. Intrinsic attributes cannot be removed.
	fn remove(&self, _holder: &mut dyn DataHolder) -> DataTransactionResult {
		DataTransactionResult::fail_no_data()
	}

	/// Frozen form of [`ValueProcessor::api_value`].
	fn immutable_value(&self, holder: &dyn DataHolder) -> Option<V::Immutable> {
		self.api_value(holder).map(|value| value.as_immutable())
	}
}

/// Which side wins when a holder's data meets a manipulator's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataPriority {
	/// Keep what the holder has.
	DataHolder,
	/// Take what the manipulator has.
	DataManipulator,
}

/// Reads and writes a whole manipulator on the holders it supports.
pub trait DataProcessor<M: DataManipulator>: Send + Sync + 'static {
	fn priority(&self) -> i32 {
		DEFAULT_PRIORITY
	}

	fn supports(&self, holder: &dyn DataHolder) -> bool;

	/// Snapshots the holder's data.
	fn from_holder(&self, holder: &dyn DataHolder) -> Option<M>;

	/// Canonical immutable snapshot of the holder's data, shared through
	/// the manipulator cache. `Ok(None)` when unsupported.
	fn immutable_from(
		&self,
		holder: &dyn DataHolder,
	) -> Result<Option<Arc<M::Immutable>>, CacheError>;

	/// Merges the holder's data into `manipulator`.
	fn fill(
		&self,
		holder: &dyn DataHolder,
		manipulator: M,
		priority: DataPriority,
	) -> Option<M> {
		if !self.supports(holder) {
			return None;
		}
		match priority {
			DataPriority::DataHolder => self.from_holder(holder),
			DataPriority::DataManipulator => Some(manipulator),
		}
	}

	/// Writes `manipulator` to the holder.
	fn set(
		&self,
		holder: &mut dyn DataHolder,
		manipulator: &M,
		priority: DataPriority,
	) -> DataTransactionResult;

	/// Removes the facet. Intrinsic facets cannot be removed.
	fn remove(&self, _holder: &mut dyn DataHolder) -> DataTransactionResult {
		DataTransactionResult::fail_no_data()
	}

	/// Rebuilds a manipulator from its serialized view.
	fn build(&self, view: &DataView) -> Option<M>;
}

/// Creates manipulators of one type.
pub trait DataManipulatorBuilder<M: DataManipulator>: Send + Sync + 'static {
	/// A manipulator holding defaults.
	fn create(&self) -> M;

	/// Snapshots a holder, if supported.
	fn create_from(&self, holder: &dyn DataHolder) -> Option<M>;

	/// Rebuilds a manipulator from its serialized view.
	fn build_from(&self, view: &DataView) -> Option<M>;
}

/// Reads and writes immutable data on immutable block states.
pub trait BlockDataProcessor<I: ImmutableDataManipulator>: Send + Sync + 'static {
	fn priority(&self) -> i32 {
		DEFAULT_PRIORITY
	}

	fn supports(&self, state: &BlockState) -> bool;

	/// Reads the canonical data carried by `state`. `Ok(None)` when the
	/// state does not carry it.
	fn from_block_state(&self, state: &BlockState) -> Result<Option<Arc<I>>, CacheError>;

	/// Returns the state carrying `data`, or `None` if unsupported.
	fn with_data(&self, state: &BlockState, data: &I) -> Option<BlockState>;

	/// Returns the state without the data, or `None` if it cannot be removed.
	fn remove_from(&self, _state: &BlockState) -> Option<BlockState> {
		None
	}
}
