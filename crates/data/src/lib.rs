//! Data access for live game objects.
//!
//! Callers read and write typed attributes on holders (entities, items,
//! blocks) through a [`DataRegistry`] that routes each request to the
//! processors registered for the attribute's key or manipulator type.
//! Every write reports a [`DataTransactionResult`]; immutable values and
//! manipulators are deduplicated through [`ImmutableCaches`].
//!
//! # Modules
//!
//! - [`db`] - the registry and its holder-level facade
//! - [`processor`] - value, data and block processor contracts
//! - [`manipulator`] - bundles of related values
//! - [`cache`] - canonicalizing caches
//! - [`builtins`] - processors for the vanilla attributes
//! - [`lifecycle`] - bootstrap of the whole layer

pub mod builtins;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod holder;
pub mod lifecycle;
pub mod manipulator;
pub mod processor;
pub mod transaction;

pub use cache::{CacheKey, Canonical, ImmutableCaches};
pub use config::{CacheConfig, DataConfig};
pub use db::DataRegistry;
pub use error::{
	BootstrapError, CacheError, ConfigError, ConstructError, EngineError, RegistryError,
};
pub use holder::{BlockState, DataHolder};
pub use lifecycle::SpongeData;
pub use manipulator::{DataManipulator, ImmutableDataManipulator};
pub use processor::{
	BlockDataProcessor, DataManipulatorBuilder, DataPriority, DataProcessor, ErasedDelegate,
	ValueProcessor, ValueProcessorDelegate,
};
pub use transaction::{DataTransactionBuilder, DataTransactionResult, ErasedValue, ResultType};

#[cfg(test)]
mod test_fixtures;
#[cfg(test)]
mod tests;
