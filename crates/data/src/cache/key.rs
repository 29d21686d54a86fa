use sponge_primitives::{Career, CatalogType, Color, EntityId, Key, Vector3d};

/// Structural cache key: `{name}:{arg}{arg}...`.
///
/// Two keys are equal exactly when they were built from the same name and
/// the same argument strings, so a key fully determines the instance it
/// maps to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
	/// Starts a key for the type with the given canonical name.
	pub fn new(name: &str) -> Self {
		let mut key = String::with_capacity(name.len() + 32);
		key.push_str(name);
		key.push(':');
		Self(key)
	}

	/// Appends one argument wrapped in braces.
	pub fn arg<A: CacheArg + ?Sized>(mut self, arg: &A) -> Self {
		self.0.push('{');
		arg.write_arg(&mut self.0);
		self.0.push('}');
		self
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn into_string(self) -> String {
		self.0
	}
}

impl std::fmt::Display for CacheKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

/// A value that can contribute to a [`CacheKey`].
///
/// Catalog types write their stable id. Everything else writes its string
/// form, which must distinguish every pair of unequal values and must not
/// contain an unescaped brace.
pub trait CacheArg {
	fn write_arg(&self, out: &mut String);
}

macro_rules! display_arg {
	($($ty:ty),+ $(,)?) => {
		$(
			impl CacheArg for $ty {
				fn write_arg(&self, out: &mut String) {
					use std::fmt::Write;
					let _ = write!(out, "{self}");
				}
			}
		)+
	};
}

macro_rules! catalog_arg {
	($($ty:ty),+ $(,)?) => {
		$(
			impl CacheArg for $ty {
				fn write_arg(&self, out: &mut String) {
					out.push_str(self.id());
				}
			}
		)+
	};
}

display_arg!(bool, i32, i64, u32, u64, usize, f32, f64, EntityId);
catalog_arg!(Career);

/// Free text is escaped so braces inside it cannot end the argument.
impl CacheArg for str {
	fn write_arg(&self, out: &mut String) {
		for c in self.chars() {
			if matches!(c, '{' | '}' | '\\') {
				out.push('\\');
			}
			out.push(c);
		}
	}
}

impl CacheArg for String {
	fn write_arg(&self, out: &mut String) {
		self.as_str().write_arg(out);
	}
}

impl CacheArg for Color {
	fn write_arg(&self, out: &mut String) {
		use std::fmt::Write;
		let _ = write!(out, "{}", self.rgb());
	}
}

impl CacheArg for Vector3d {
	fn write_arg(&self, out: &mut String) {
		use std::fmt::Write;
		let _ = write!(out, "{},{},{}", self.x, self.y, self.z);
	}
}

impl<V> CacheArg for Key<V> {
	fn write_arg(&self, out: &mut String) {
		out.push_str(self.id());
	}
}

impl<T: CacheArg> CacheArg for Option<T> {
	fn write_arg(&self, out: &mut String) {
		match self {
			Some(inner) => {
				out.push_str("Some(");
				inner.write_arg(out);
				out.push(')');
			}
			None => out.push_str("None"),
		}
	}
}

impl<T: CacheArg + ?Sized> CacheArg for &T {
	fn write_arg(&self, out: &mut String) {
		(**self).write_arg(out);
	}
}

/// Constructor arguments of a canonical type, as a tuple.
pub trait CacheArgs {
	/// Appends every argument to `key` in order.
	fn append_to(&self, key: CacheKey) -> CacheKey;
}

impl CacheArgs for () {
	fn append_to(&self, key: CacheKey) -> CacheKey {
		key
	}
}

macro_rules! tuple_args {
	($($name:ident),+) => {
		impl<$($name: CacheArg),+> CacheArgs for ($($name,)+) {
			#[allow(non_snake_case)]
			fn append_to(&self, key: CacheKey) -> CacheKey {
				let ($($name,)+) = self;
				key$(.arg($name))+
			}
		}
	};
}

tuple_args!(A);
tuple_args!(A, B);
tuple_args!(A, B, C);
tuple_args!(A, B, C, D);
