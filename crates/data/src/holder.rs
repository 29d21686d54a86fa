//! Boundary to the engine's live objects.
//!
//! Processors never see concrete engine types. A holder exposes each facet
//! it has through a capability accessor; a processor's `supports` check is
//! a test for the accessors it needs. Missing facets default to `None`.
//!
//! Setters report engine refusal through [`EngineError`]; processors turn
//! that into an `error` transaction result.

use std::collections::BTreeMap;

use sponge_primitives::{Career, Color, EntityId, Vector3d};

use crate::error::EngineError;

/// A live object whose data can be queried and mutated.
pub trait DataHolder: Send + Sync {
	fn as_entity(&self) -> Option<&dyn EntityAccess> {
		None
	}

	fn as_entity_mut(&mut self) -> Option<&mut dyn EntityAccess> {
		None
	}

	fn as_living(&self) -> Option<&dyn LivingAccess> {
		None
	}

	fn as_living_mut(&mut self) -> Option<&mut dyn LivingAccess> {
		None
	}

	fn as_hunger(&self) -> Option<&dyn HungerAccess> {
		None
	}

	fn as_hunger_mut(&mut self) -> Option<&mut dyn HungerAccess> {
		None
	}

	fn as_villager(&self) -> Option<&dyn VillagerAccess> {
		None
	}

	fn as_villager_mut(&mut self) -> Option<&mut dyn VillagerAccess> {
		None
	}

	fn as_colorable(&self) -> Option<&dyn ColorAccess> {
		None
	}

	fn as_colorable_mut(&mut self) -> Option<&mut dyn ColorAccess> {
		None
	}

	/// Item stacks.
	fn as_item(&self) -> Option<&dyn ItemAccess> {
		None
	}

	/// Objects that can carry a custom name (tile entities, containers).
	fn as_nameable(&self) -> Option<&dyn NameableAccess> {
		None
	}
}

/// Any entity.
pub trait EntityAccess {
	fn entity_id(&self) -> EntityId;
	fn always_render_name_tag(&self) -> bool;
	fn set_always_render_name_tag(&mut self, visible: bool) -> Result<(), EngineError>;
	fn motion(&self) -> Vector3d;
	fn set_motion(&mut self, motion: Vector3d) -> Result<(), EngineError>;
}

/// Entities with health.
pub trait LivingAccess {
	fn health(&self) -> f64;
	fn set_health(&mut self, health: f64) -> Result<(), EngineError>;
	fn max_health(&self) -> f64;
	fn set_max_health(&mut self, max_health: f64) -> Result<(), EngineError>;
	fn last_attacker(&self) -> Option<EntityId>;
	fn set_last_attacker(&mut self, attacker: Option<EntityId>) -> Result<(), EngineError>;
}

/// Players' food stats.
pub trait HungerAccess {
	fn food_level(&self) -> i32;
	fn set_food_level(&mut self, level: i32) -> Result<(), EngineError>;
	fn saturation(&self) -> f64;
	fn set_saturation(&mut self, saturation: f64) -> Result<(), EngineError>;
	fn exhaustion(&self) -> f64;
	fn set_exhaustion(&mut self, exhaustion: f64) -> Result<(), EngineError>;
}

pub trait VillagerAccess {
	fn career(&self) -> Career;
	fn set_career(&mut self, career: Career) -> Result<(), EngineError>;
}

/// Dyeable things.
pub trait ColorAccess {
	fn color(&self) -> Color;
	fn set_color(&mut self, color: Color) -> Result<(), EngineError>;
}

pub trait ItemAccess {
	/// Item type id, e.g. `minecraft:stone`.
	fn item_id(&self) -> &str;
}

pub trait NameableAccess {
	fn custom_name(&self) -> Option<&str>;
}

/// Immutable snapshot of a block: its type id plus string properties.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockState {
	block: String,
	properties: BTreeMap<String, String>,
}

impl BlockState {
	pub fn new(block: impl Into<String>) -> Self {
		Self {
			block: block.into(),
			properties: BTreeMap::new(),
		}
	}

	pub fn block(&self) -> &str {
		&self.block
	}

	pub fn property(&self, name: &str) -> Option<&str> {
		self.properties.get(name).map(String::as_str)
	}

	/// Returns a copy with `name` set to `value`.
	pub fn with_property(&self, name: &str, value: impl Into<String>) -> Self {
		let mut next = self.clone();
		next.properties.insert(name.to_string(), value.into());
		next
	}

	/// Returns a copy without `name`.
	pub fn without_property(&self, name: &str) -> Self {
		let mut next = self.clone();
		next.properties.remove(name);
		next
	}
}
