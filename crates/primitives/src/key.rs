use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Static definition behind a [`Key`].
///
/// Keys are compared by the address of their definition, so every
/// definition must live in its own `static`. Use the [`key!`](crate::key)
/// macro rather than building these by hand.
#[derive(Debug)]
pub struct KeyDef {
	/// Namespaced identifier, e.g. `sponge:health`.
	pub id: &'static str,
	/// Human-readable name.
	pub name: &'static str,
	/// Query path used when the value is written to a [`DataView`](crate::DataView).
	pub query: &'static str,
}

/// Untyped handle to a key definition.
///
/// Equality and hashing use the identity of the definition, never its
/// contents.
#[derive(Clone, Copy)]
pub struct RawKey(&'static KeyDef);

impl RawKey {
	/// Wraps a static key definition.
	pub const fn new(def: &'static KeyDef) -> Self {
		Self(def)
	}

	/// Returns the underlying definition.
	pub fn def(self) -> &'static KeyDef {
		self.0
	}

	/// Returns the namespaced identifier.
	pub fn id(self) -> &'static str {
		self.0.id
	}

	/// Returns the data query path.
	pub fn query(self) -> &'static str {
		self.0.query
	}
}

impl PartialEq for RawKey {
	fn eq(&self, other: &Self) -> bool {
		std::ptr::eq(self.0, other.0)
	}
}

impl Eq for RawKey {}

impl Hash for RawKey {
	fn hash<H: Hasher>(&self, state: &mut H) {
		std::ptr::hash(self.0, state);
	}
}

impl fmt::Debug for RawKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("RawKey").field(&self.0.id).finish()
	}
}

impl fmt::Display for RawKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.0.id)
	}
}

/// Typed handle to a key definition.
///
/// `V` is the mutable value type handed out for this attribute (for example
/// [`BoundedValue<f64>`](crate::BoundedValue) for health). The type
/// parameter only exists at compile time; at runtime a key is the address
/// of its [`KeyDef`].
pub struct Key<V> {
	def: &'static KeyDef,
	_marker: PhantomData<fn() -> V>,
}

impl<V> Clone for Key<V> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<V> Copy for Key<V> {}

impl<V> Key<V> {
	/// Creates a typed key from a static definition.
	pub const fn new(def: &'static KeyDef) -> Self {
		Self {
			def,
			_marker: PhantomData,
		}
	}

	/// Returns the untyped key.
	#[inline]
	pub fn raw(self) -> RawKey {
		RawKey(self.def)
	}

	/// Returns the namespaced identifier.
	pub fn id(self) -> &'static str {
		self.def.id
	}

	/// Returns the human-readable name.
	pub fn name(self) -> &'static str {
		self.def.name
	}

	/// Returns the data query path.
	pub fn query(self) -> &'static str {
		self.def.query
	}
}

impl<V> PartialEq for Key<V> {
	fn eq(&self, other: &Self) -> bool {
		std::ptr::eq(self.def, other.def)
	}
}

impl<V> Eq for Key<V> {}

impl<V> PartialEq<RawKey> for Key<V> {
	fn eq(&self, other: &RawKey) -> bool {
		std::ptr::eq(self.def, other.0)
	}
}

impl<V> Hash for Key<V> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		std::ptr::hash(self.def, state);
	}
}

impl<V> fmt::Debug for Key<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Key").field(&self.def.id).finish()
	}
}

impl<V> fmt::Display for Key<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.def.id)
	}
}

impl<V> From<Key<V>> for RawKey {
	fn from(key: Key<V>) -> Self {
		key.raw()
	}
}

/// Declares a key: a static [`KeyDef`] plus a typed [`Key`] pointing at it.
///
/// ```ignore
/// key!(pub HEALTH: BoundedValue<f64> = "sponge:health", "Health", "Health");
/// ```
///
/// The definition is emitted as `<NAME>_DEF` next to the key.
#[macro_export]
macro_rules! key {
	($(#[$meta:meta])* $vis:vis $name:ident: $value:ty = $id:literal, $display:literal, $query:literal) => {
		$crate::__paste::paste! {
			#[doc(hidden)]
			$vis static [<$name _DEF>]: $crate::KeyDef = $crate::KeyDef {
				id: $id,
				name: $display,
				query: $query,
			};

			$(#[$meta])*
			$vis static $name: $crate::Key<$value> = $crate::Key::new(&[<$name _DEF>]);
		}
	};
}
