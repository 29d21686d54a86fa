//! Outcome of a data mutation.
//!
//! Every write reports a [`DataTransactionResult`] instead of erroring:
//! the result kind plus the immutable values that were applied, replaced
//! or rejected. Values are stored type-erased and read back by key.

use std::sync::Arc;

use sponge_primitives::{AnyValue, Key, MutableValue};

/// Shared, type-erased immutable value.
pub type ErasedValue = Arc<dyn AnyValue>;

/// Kind of a transaction outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ResultType {
	/// Nothing has been decided yet.
	#[default]
	Undefined,
	/// The data was applied.
	Success,
	/// The holder does not support the data; nothing changed.
	Failure,
	/// The data was refused (out of range, engine refusal).
	Error,
	/// A listener cancelled the change.
	Cancelled,
}

/// Outcome of an offer, transform or remove.
#[derive(Debug, Clone, Default)]
pub struct DataTransactionResult {
	kind: ResultType,
	success: Vec<ErasedValue>,
	replaced: Vec<ErasedValue>,
	rejected: Vec<ErasedValue>,
}

impl DataTransactionResult {
	pub fn builder() -> DataTransactionBuilder {
		DataTransactionBuilder::default()
	}

	/// The holder has no data for the request.
	pub fn fail_no_data() -> Self {
		Self::builder().result(ResultType::Failure).build()
	}

	/// The holder does not support `value`.
	pub fn fail_result(value: ErasedValue) -> Self {
		Self::builder()
			.reject(value)
			.result(ResultType::Failure)
			.build()
	}

	/// `value` was refused.
	pub fn error_result(value: ErasedValue) -> Self {
		Self::builder()
			.reject(value)
			.result(ResultType::Error)
			.build()
	}

	/// `value` was applied where nothing was before.
	pub fn success_result(value: ErasedValue) -> Self {
		Self::builder()
			.success(value)
			.result(ResultType::Success)
			.build()
	}

	/// `value` was applied, replacing `replaced`.
	pub fn success_replace_result(value: ErasedValue, replaced: ErasedValue) -> Self {
		Self::builder()
			.success(value)
			.replace(replaced)
			.result(ResultType::Success)
			.build()
	}

	/// The request succeeded without changing any data.
	pub fn success_no_data() -> Self {
		Self::builder().result(ResultType::Success).build()
	}

	pub fn kind(&self) -> ResultType {
		self.kind
	}

	pub fn is_successful(&self) -> bool {
		self.kind == ResultType::Success
	}

	pub fn success_data(&self) -> &[ErasedValue] {
		&self.success
	}

	pub fn replaced_data(&self) -> &[ErasedValue] {
		&self.replaced
	}

	pub fn rejected_data(&self) -> &[ErasedValue] {
		&self.rejected
	}

	/// Returns the applied value for `key`.
	pub fn success_value<V: MutableValue>(&self, key: Key<V>) -> Option<&V::Immutable> {
		find(&self.success, key)
	}

	/// Returns the value `key` held before the change.
	pub fn replaced_value<V: MutableValue>(&self, key: Key<V>) -> Option<&V::Immutable> {
		find(&self.replaced, key)
	}

	/// Returns the refused value for `key`.
	pub fn rejected_value<V: MutableValue>(&self, key: Key<V>) -> Option<&V::Immutable> {
		find(&self.rejected, key)
	}
}

fn find<V: MutableValue>(values: &[ErasedValue], key: Key<V>) -> Option<&V::Immutable> {
	values
		.iter()
		.filter(|value| key == value.value_key())
		.find_map(|value| value.as_any().downcast_ref::<V::Immutable>())
}

/// Accumulates the parts of a [`DataTransactionResult`].
#[derive(Debug, Default)]
pub struct DataTransactionBuilder {
	kind: ResultType,
	success: Vec<ErasedValue>,
	replaced: Vec<ErasedValue>,
	rejected: Vec<ErasedValue>,
}

impl DataTransactionBuilder {
	pub fn success(mut self, value: ErasedValue) -> Self {
		self.success.push(value);
		self
	}

	pub fn replace(mut self, value: ErasedValue) -> Self {
		self.replaced.push(value);
		self
	}

	pub fn reject(mut self, value: ErasedValue) -> Self {
		self.rejected.push(value);
		self
	}

	/// Appends every value of another result.
	pub fn absorb(mut self, other: DataTransactionResult) -> Self {
		self.success.extend(other.success);
		self.replaced.extend(other.replaced);
		self.rejected.extend(other.rejected);
		self
	}

	pub fn result(mut self, kind: ResultType) -> Self {
		self.kind = kind;
		self
	}

	pub fn build(self) -> DataTransactionResult {
		DataTransactionResult {
			kind: self.kind,
			success: self.success,
			replaced: self.replaced,
			rejected: self.rejected,
		}
	}
}
