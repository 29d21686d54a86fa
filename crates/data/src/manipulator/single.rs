use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use sponge_primitives::keys::{CAREER, COLOR, DECAYABLE};
use sponge_primitives::{Career, CatalogType, Color, DataView, Key, RawKey, Value, ValueElement};

use super::{DataManipulator, ImmutableDataManipulator};
use crate::cache::{CacheArg, Canonical};
use crate::error::ConstructError;

/// Describes a manipulator holding exactly one plain value.
pub trait SingleValueData: Send + Sync + 'static {
	type Element: ValueElement + CacheArg;

	/// Cache name of the immutable manipulator.
	const IMMUTABLE_NAME: &'static str;

	fn key() -> Key<Value<Self::Element>>;

	fn default_element() -> Self::Element;

	fn write(element: &Self::Element, view: &mut DataView);

	fn read(view: &DataView) -> Option<Self::Element>;

	fn order(a: &Self::Element, b: &Self::Element) -> Ordering;
}

/// Mutable manipulator over one value.
pub struct SingleData<S: SingleValueData> {
	element: S::Element,
	_kind: PhantomData<fn() -> S>,
}

impl<S: SingleValueData> SingleData<S> {
	pub fn new(element: S::Element) -> Self {
		Self {
			element,
			_kind: PhantomData,
		}
	}

	/// The wrapped element.
	pub fn element(&self) -> &S::Element {
		&self.element
	}

	pub fn value(&self) -> Value<S::Element> {
		Value::new(S::key(), S::default_element(), self.element.clone())
	}
}

impl<S: SingleValueData> Default for SingleData<S> {
	fn default() -> Self {
		Self::new(S::default_element())
	}
}

impl<S: SingleValueData> Clone for SingleData<S> {
	fn clone(&self) -> Self {
		Self::new(self.element.clone())
	}
}

impl<S: SingleValueData> PartialEq for SingleData<S> {
	fn eq(&self, other: &Self) -> bool {
		self.element == other.element
	}
}

impl<S: SingleValueData> fmt::Debug for SingleData<S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("SingleData")
			.field(&S::key().name())
			.field(&self.element)
			.finish()
	}
}

impl<S: SingleValueData> DataManipulator for SingleData<S> {
	type Immutable = ImmutableSingleData<S>;

	fn keys(&self) -> Vec<RawKey> {
		vec![S::key().raw()]
	}

	fn value_any(&self, key: RawKey) -> Option<Box<dyn Any>> {
		(S::key() == key).then(|| Box::new(self.value()) as Box<dyn Any>)
	}

	fn set_any(&mut self, key: RawKey, element: &dyn Any) -> bool {
		if S::key() != key {
			return false;
		}
		match element.downcast_ref::<S::Element>() {
			Some(element) => {
				self.element = element.clone();
				true
			}
			None => false,
		}
	}

	fn to_container(&self) -> DataView {
		let mut view = DataView::new();
		S::write(&self.element, &mut view);
		view
	}

	fn as_immutable(&self) -> ImmutableSingleData<S> {
		ImmutableSingleData::new(self.element.clone())
	}

	fn compare_to(&self, other: &Self) -> Ordering {
		S::order(&self.element, &other.element)
	}
}

/// Immutable manipulator over one value.
pub struct ImmutableSingleData<S: SingleValueData> {
	element: S::Element,
	_kind: PhantomData<fn() -> S>,
}

impl<S: SingleValueData> ImmutableSingleData<S> {
	pub fn new(element: S::Element) -> Self {
		Self {
			element,
			_kind: PhantomData,
		}
	}

	pub fn element(&self) -> &S::Element {
		&self.element
	}
}

impl<S: SingleValueData> Clone for ImmutableSingleData<S> {
	fn clone(&self) -> Self {
		Self::new(self.element.clone())
	}
}

impl<S: SingleValueData> PartialEq for ImmutableSingleData<S> {
	fn eq(&self, other: &Self) -> bool {
		self.element == other.element
	}
}

impl<S: SingleValueData> fmt::Debug for ImmutableSingleData<S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("ImmutableSingleData")
			.field(&S::key().name())
			.field(&self.element)
			.finish()
	}
}

impl<S: SingleValueData> ImmutableDataManipulator for ImmutableSingleData<S> {
	type Mutable = SingleData<S>;

	fn as_mutable(&self) -> SingleData<S> {
		SingleData::new(self.element.clone())
	}
}

impl<S: SingleValueData> Canonical for ImmutableSingleData<S> {
	const CANONICAL_NAME: &'static str = S::IMMUTABLE_NAME;
	type Args = (S::Element,);

	fn construct((element,): (S::Element,)) -> Result<Self, ConstructError> {
		Ok(Self::new(element))
	}

	fn canonical_args(&self) -> (S::Element,) {
		(self.element.clone(),)
	}
}

/// Villager career.
pub struct CareerKind;

impl SingleValueData for CareerKind {
	type Element = Career;
	const IMMUTABLE_NAME: &'static str = "ImmutableCareerData";

	fn key() -> Key<Value<Career>> {
		CAREER
	}

	fn default_element() -> Career {
		Career::Armorer
	}

	fn write(element: &Career, view: &mut DataView) {
		view.set(CAREER.query(), element.id());
	}

	fn read(view: &DataView) -> Option<Career> {
		Career::from_id(view.get_string(CAREER.query()).ok()?)
	}

	fn order(a: &Career, b: &Career) -> Ordering {
		a.id().cmp(b.id())
	}
}

pub type CareerData = SingleData<CareerKind>;
pub type ImmutableCareerData = ImmutableSingleData<CareerKind>;

/// Dye color.
pub struct ColoredKind;

impl SingleValueData for ColoredKind {
	type Element = Color;
	const IMMUTABLE_NAME: &'static str = "ImmutableColoredData";

	fn key() -> Key<Value<Color>> {
		COLOR
	}

	fn default_element() -> Color {
		Color::BLACK
	}

	fn write(element: &Color, view: &mut DataView) {
		view.set(COLOR.query(), element.rgb());
	}

	fn read(view: &DataView) -> Option<Color> {
		let rgb = u32::try_from(view.get_int(COLOR.query()).ok()?).ok()?;
		Some(Color::from_packed(rgb))
	}

	fn order(a: &Color, b: &Color) -> Ordering {
		a.rgb().cmp(&b.rgb())
	}
}

pub type ColoredData = SingleData<ColoredKind>;
pub type ImmutableColoredData = ImmutableSingleData<ColoredKind>;

/// Leaf decay flag.
pub struct DecayableKind;

impl SingleValueData for DecayableKind {
	type Element = bool;
	const IMMUTABLE_NAME: &'static str = "ImmutableDecayableData";

	fn key() -> Key<Value<bool>> {
		DECAYABLE
	}

	fn default_element() -> bool {
		true
	}

	fn write(element: &bool, view: &mut DataView) {
		view.set(DECAYABLE.query(), *element);
	}

	fn read(view: &DataView) -> Option<bool> {
		view.get_bool(DECAYABLE.query()).ok()
	}

	fn order(a: &bool, b: &bool) -> Ordering {
		a.cmp(b)
	}
}

pub type DecayableData = SingleData<DecayableKind>;
pub type ImmutableDecayableData = ImmutableSingleData<DecayableKind>;

