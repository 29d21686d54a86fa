//! Error types for registration, caching, configuration and holder writes.
//!
//! Per-operation data failures are never errors: they are reported through
//! [`DataTransactionResult`](crate::DataTransactionResult). The types here
//! cover programmer errors (registry misuse, unconstructible canonical
//! instances), bad configuration, and failures reported by the engine.

/// Registry misuse. Fatal to startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	#[error("registry is finalized: cannot register {what}")]
	Finalized { what: &'static str },
	#[error("duplicate builder for {manipulator}")]
	DuplicateBuilder { manipulator: &'static str },
	#[error("duplicate data processor for {manipulator}")]
	DuplicateDataProcessor { manipulator: &'static str },
	#[error("duplicate block processor for {manipulator}")]
	DuplicateBlockProcessor { manipulator: &'static str },
	#[error("cannot register a processor delegate for {key}")]
	DelegateRegistration { key: &'static str },
	#[error("value processor {processor} already registered for {key}")]
	DuplicateValueProcessor {
		key: &'static str,
		processor: &'static str,
	},
	#[error("key {key} is already bound to another value type")]
	KeyTypeMismatch { key: &'static str },
}

/// Failure of a canonical type's factory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstructError {
	#[error("invalid argument: {0}")]
	InvalidArgument(String),
}

/// Failure to produce a canonical instance from a cache.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
	#[error("cannot construct {type_name} for cache key {key}")]
	Construct {
		type_name: &'static str,
		key: String,
		#[source]
		source: ConstructError,
	},
}

/// Failure reported by a holder when writing engine state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
	#[error("engine rejected {field}: {reason}")]
	Rejected { field: &'static str, reason: String },
	#[error("holder is no longer available")]
	Unavailable,
}

/// Invalid configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("config parse error: {0}")]
	Parse(#[from] toml::de::Error),
	#[error("invalid cache config: {0}")]
	Invalid(String),
}

/// Failure to bring the data layer up.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
	#[error(transparent)]
	Config(#[from] ConfigError),
	#[error(transparent)]
	Registry(#[from] RegistryError),
}
