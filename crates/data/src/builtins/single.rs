use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use sponge_primitives::{Career, Color, Key, Value};

use super::data::SingleDataProcessor;
use super::write_outcome;
use crate::cache::ImmutableCaches;
use crate::error::EngineError;
use crate::holder::DataHolder;
use crate::manipulator::{CareerKind, ColoredKind, SingleValueData};
use crate::processor::ValueProcessor;
use crate::transaction::DataTransactionResult;

/// Where a single-value attribute lives on a holder.
pub trait SingleDataAccess: SingleValueData {
	/// `None` when the holder lacks the facet.
	fn read_holder(holder: &dyn DataHolder) -> Option<Self::Element>;

	/// `None` when the holder lacks the facet.
	fn write_holder(
		holder: &mut dyn DataHolder,
		element: Self::Element,
	) -> Option<Result<(), EngineError>>;
}

impl SingleDataAccess for CareerKind {
	fn read_holder(holder: &dyn DataHolder) -> Option<Career> {
		holder.as_villager().map(|villager| villager.career())
	}

	fn write_holder(holder: &mut dyn DataHolder, career: Career) -> Option<Result<(), EngineError>> {
		holder
			.as_villager_mut()
			.map(|villager| villager.set_career(career))
	}
}

impl SingleDataAccess for ColoredKind {
	fn read_holder(holder: &dyn DataHolder) -> Option<Color> {
		holder.as_colorable().map(|colorable| colorable.color())
	}

	fn write_holder(holder: &mut dyn DataHolder, color: Color) -> Option<Result<(), EngineError>> {
		holder
			.as_colorable_mut()
			.map(|colorable| colorable.set_color(color))
	}
}

/// Value processor for an attribute backed by a single-value manipulator.
pub struct SingleValueProcessor<S> {
	caches: Arc<ImmutableCaches>,
	_kind: PhantomData<fn() -> S>,
}

pub type CareerValueProcessor = SingleValueProcessor<CareerKind>;
pub type ColorValueProcessor = SingleValueProcessor<ColoredKind>;
pub type CareerDataProcessor = SingleDataProcessor<CareerKind>;
pub type ColoredDataProcessor = SingleDataProcessor<ColoredKind>;

impl<S: SingleDataAccess> SingleValueProcessor<S> {
	pub fn new(caches: Arc<ImmutableCaches>) -> Self {
		Self {
			caches,
			_kind: PhantomData,
		}
	}
}

impl<S: SingleDataAccess> fmt::Debug for SingleValueProcessor<S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("SingleValueProcessor")
			.field(&S::key().id())
			.finish()
	}
}

impl<S: SingleDataAccess> ValueProcessor<Value<S::Element>> for SingleValueProcessor<S> {
	fn key(&self) -> Key<Value<S::Element>> {
		S::key()
	}

	fn supports(&self, holder: &dyn DataHolder) -> bool {
		S::read_holder(holder).is_some()
	}

	fn get(&self, holder: &dyn DataHolder) -> Option<S::Element> {
		S::read_holder(holder)
	}

	fn api_value(&self, holder: &dyn DataHolder) -> Option<Value<S::Element>> {
		S::read_holder(holder).map(|element| Value::new(S::key(), S::default_element(), element))
	}

	fn offer(&self, holder: &mut dyn DataHolder, element: S::Element) -> DataTransactionResult {
		let proposed =
			self.caches
				.immutable_value(S::key(), S::default_element(), element.clone());
		let Some(current) = S::read_holder(&*holder) else {
			return DataTransactionResult::fail_result(proposed);
		};
		let old = self
			.caches
			.immutable_value(S::key(), S::default_element(), current);
		match S::write_holder(holder, element) {
			Some(written) => write_outcome(S::key().id(), written, proposed, old),
			None => DataTransactionResult::fail_result(proposed),
		}
	}
}
