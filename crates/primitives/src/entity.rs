use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of an entity.
///
/// Values that point at other entities store this id instead of a handle,
/// so they never keep the target alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "entity#{}", self.0)
	}
}

/// Resolves entity ids against whatever currently owns the entities.
pub trait EntityLookup {
	/// Handle type returned for live entities.
	type Entity;

	/// Returns the entity if it is still alive.
	fn lookup(&self, id: EntityId) -> Option<Self::Entity>;
}
