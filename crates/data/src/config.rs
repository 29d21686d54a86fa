//! Runtime configuration.
//!
//! Every field has a default, so an empty document is a valid config:
//!
//! ```toml
//! [cache]
//! manipulator_capacity = 3000
//! manipulator_stripes = 4
//! value_capacity = 4000
//! value_stripes = 4
//! ```

use serde::Deserialize;

use crate::error::ConfigError;

/// Top-level configuration of the data core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
	pub cache: CacheConfig,
}

/// Sizing of the canonical caches.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
	/// Max immutable manipulators kept.
	pub manipulator_capacity: usize,
	/// Independently locked stripes of the manipulator cache.
	pub manipulator_stripes: usize,
	/// Max immutable values kept.
	pub value_capacity: usize,
	/// Independently locked stripes of the value cache.
	pub value_stripes: usize,
}

impl Default for CacheConfig {
	fn default() -> Self {
		Self {
			manipulator_capacity: 3000,
			manipulator_stripes: 4,
			value_capacity: 4000,
			value_stripes: 4,
		}
	}
}

impl DataConfig {
	/// Parses and validates a TOML document.
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	/// Checks sizes are non-zero and no cache has more stripes than entries.
	pub fn validate(&self) -> Result<(), ConfigError> {
		self.cache.validate()
	}
}

impl CacheConfig {
	fn validate(&self) -> Result<(), ConfigError> {
		check_cache("manipulator", self.manipulator_capacity, self.manipulator_stripes)?;
		check_cache("value", self.value_capacity, self.value_stripes)
	}
}

fn check_cache(name: &str, capacity: usize, stripes: usize) -> Result<(), ConfigError> {
	if capacity == 0 || stripes == 0 {
		return Err(ConfigError::Invalid(format!(
			"{name} cache needs a non-zero capacity and stripe count"
		)));
	}
	if stripes > capacity {
		return Err(ConfigError::Invalid(format!(
			"{name} cache has {stripes} stripes for {capacity} entries"
		)));
	}
	Ok(())
}
