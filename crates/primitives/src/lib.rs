//! Core types for the data-access layer: keys, values, catalog types and data views.

/// Catalog types identified by stable string ids.
pub mod catalog;
/// RGB colors.
pub mod color;
/// Entity identifiers and on-demand lookup.
pub mod entity;
/// Typed attribute keys.
pub mod key;
/// Builtin attribute keys.
pub mod keys;
/// Mutable, immutable and bounded value containers.
pub mod value;
/// Three-component vectors.
pub mod vector;
/// Flat serialized form of manipulators.
pub mod view;

pub use catalog::{Career, CatalogType};
pub use color::Color;
pub use entity::{EntityId, EntityLookup};
pub use key::{Key, KeyDef, RawKey};
pub use value::{
	AnyValue, BaseValue, BoundedValue, Bounds, Comparator, EntityValue, FrozenValue,
	ImmutableBoundedValue, ImmutableOptionalValue, ImmutableValue, MutableValue, OptionalValue,
	Value, ValueElement, double_comparator, int_comparator, natural_order,
};
pub use vector::Vector3d;
pub use view::{DataValue, DataView, ViewError};

#[doc(hidden)]
pub use paste as __paste;
