//! Flat serialized form of manipulators.
//!
//! A [`DataView`] maps key query paths to plain data. Manipulators write
//! themselves into views and data processors rebuild manipulators from
//! them; encoding a view to bytes is left to the serialization service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Typed read failure on a [`DataView`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ViewError {
	#[error("no data at {0}")]
	Missing(String),
	#[error("expected {expected} at {query}, found {found}")]
	TypeMismatch {
		query: String,
		expected: &'static str,
		found: &'static str,
	},
}

/// Plain data stored in a view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
	Bool(bool),
	Int(i64),
	Double(f64),
	String(String),
	List(Vec<DataValue>),
}

impl DataValue {
	/// Returns the type name of this value.
	pub fn type_name(&self) -> &'static str {
		match self {
			DataValue::Bool(_) => "bool",
			DataValue::Int(_) => "int",
			DataValue::Double(_) => "double",
			DataValue::String(_) => "string",
			DataValue::List(_) => "list",
		}
	}
}

impl From<bool> for DataValue {
	fn from(v: bool) -> Self {
		DataValue::Bool(v)
	}
}

impl From<i32> for DataValue {
	fn from(v: i32) -> Self {
		DataValue::Int(v.into())
	}
}

impl From<i64> for DataValue {
	fn from(v: i64) -> Self {
		DataValue::Int(v)
	}
}

impl From<u32> for DataValue {
	fn from(v: u32) -> Self {
		DataValue::Int(v.into())
	}
}

impl From<f64> for DataValue {
	fn from(v: f64) -> Self {
		DataValue::Double(v)
	}
}

impl From<String> for DataValue {
	fn from(v: String) -> Self {
		DataValue::String(v)
	}
}

impl From<&str> for DataValue {
	fn from(v: &str) -> Self {
		DataValue::String(v.to_string())
	}
}

impl<T: Into<DataValue>> From<Vec<T>> for DataValue {
	fn from(v: Vec<T>) -> Self {
		DataValue::List(v.into_iter().map(Into::into).collect())
	}
}

/// Ordered map from query paths to [`DataValue`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataView {
	entries: BTreeMap<String, DataValue>,
}

impl DataView {
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores `value` at `query`, replacing any previous entry.
	pub fn set(&mut self, query: &str, value: impl Into<DataValue>) -> &mut Self {
		self.entries.insert(query.to_string(), value.into());
		self
	}

	/// Builder form of [`DataView::set`].
	pub fn with(mut self, query: &str, value: impl Into<DataValue>) -> Self {
		self.set(query, value);
		self
	}

	pub fn get(&self, query: &str) -> Option<&DataValue> {
		self.entries.get(query)
	}

	pub fn contains(&self, query: &str) -> bool {
		self.entries.contains_key(query)
	}

	pub fn remove(&mut self, query: &str) -> Option<DataValue> {
		self.entries.remove(query)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates entries in query order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &DataValue)> + '_ {
		self.entries.iter().map(|(k, v)| (k.as_str(), v))
	}

	pub fn get_bool(&self, query: &str) -> Result<bool, ViewError> {
		match self.require(query)? {
			DataValue::Bool(v) => Ok(*v),
			other => Err(mismatch(query, "bool", other)),
		}
	}

	pub fn get_int(&self, query: &str) -> Result<i64, ViewError> {
		match self.require(query)? {
			DataValue::Int(v) => Ok(*v),
			other => Err(mismatch(query, "int", other)),
		}
	}

	/// Reads a double. Integers are widened.
	pub fn get_double(&self, query: &str) -> Result<f64, ViewError> {
		match self.require(query)? {
			DataValue::Double(v) => Ok(*v),
			DataValue::Int(v) => Ok(*v as f64),
			other => Err(mismatch(query, "double", other)),
		}
	}

	pub fn get_string(&self, query: &str) -> Result<&str, ViewError> {
		match self.require(query)? {
			DataValue::String(v) => Ok(v),
			other => Err(mismatch(query, "string", other)),
		}
	}

	fn require(&self, query: &str) -> Result<&DataValue, ViewError> {
		self.entries
			.get(query)
			.ok_or_else(|| ViewError::Missing(query.to_string()))
	}
}

fn mismatch(query: &str, expected: &'static str, found: &DataValue) -> ViewError {
	ViewError::TypeMismatch {
		query: query.to_string(),
		expected,
		found: found.type_name(),
	}
}
