//! Startup of the data layer.
//!
//! Bootstrapping runs three phases in order on the calling thread:
//!
//! 1. `pre_init` sizes the canonical caches from config.
//! 2. `init` registers the builtin processors, then any caller extensions.
//! 3. `post_init` finalizes the registry.
//!
//! The resulting [`SpongeData`] is the context callers pass around; there
//! is no global instance.

use std::sync::Arc;

use crate::builtins;
use crate::cache::ImmutableCaches;
use crate::config::DataConfig;
use crate::db::DataRegistry;
use crate::error::{BootstrapError, RegistryError};

/// A bootstrapped data layer: config, caches and the frozen registry.
#[derive(Debug)]
pub struct SpongeData {
	config: DataConfig,
	caches: Arc<ImmutableCaches>,
	registry: DataRegistry,
}

impl SpongeData {
	/// Bootstraps with the builtin processors only.
	pub fn bootstrap(config: DataConfig) -> Result<Self, RegistryError> {
		Self::bootstrap_with(config, |_, _| Ok(()))
	}

	/// Bootstraps, running `extend` after the builtins are registered and
	/// before the registry is finalized.
	pub fn bootstrap_with<F>(config: DataConfig, extend: F) -> Result<Self, RegistryError>
	where
		F: FnOnce(&DataRegistry, &Arc<ImmutableCaches>) -> Result<(), RegistryError>,
	{
		let caches = pre_init(&config);
		let registry = DataRegistry::new();
		init(&registry, &caches, extend)?;
		post_init(&registry)?;
		Ok(Self {
			config,
			caches,
			registry,
		})
	}

	/// Parses `input` as TOML config and bootstraps with the builtins.
	pub fn from_toml_str(input: &str) -> Result<Self, BootstrapError> {
		let config = DataConfig::from_toml_str(input)?;
		Ok(Self::bootstrap(config)?)
	}

	pub fn config(&self) -> &DataConfig {
		&self.config
	}

	pub fn caches(&self) -> &Arc<ImmutableCaches> {
		&self.caches
	}

	pub fn registry(&self) -> &DataRegistry {
		&self.registry
	}
}

fn pre_init(config: &DataConfig) -> Arc<ImmutableCaches> {
	let caches = Arc::new(ImmutableCaches::new(&config.cache));
	tracing::info!(
		manipulators = caches.manipulators().capacity(),
		values = caches.values().capacity(),
		"data pre-init: caches ready"
	);
	caches
}

fn init<F>(registry: &DataRegistry, caches: &Arc<ImmutableCaches>, extend: F) -> Result<(), RegistryError>
where
	F: FnOnce(&DataRegistry, &Arc<ImmutableCaches>) -> Result<(), RegistryError>,
{
	builtins::register_all(registry, caches)?;
	extend(registry, caches)?;
	tracing::info!("data init: processors registered");
	Ok(())
}

fn post_init(registry: &DataRegistry) -> Result<(), RegistryError> {
	registry.finalize_registration()?;
	tracing::info!("data post-init: registry finalized");
	Ok(())
}
