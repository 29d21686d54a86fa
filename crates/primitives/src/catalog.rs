use std::fmt;

use serde::{Deserialize, Serialize};

/// A type whose instances are identified by a stable, namespaced id.
///
/// Catalog ids are the only form of a catalog value that may leak into
/// cache keys or data views.
pub trait CatalogType {
	/// Returns the namespaced id, e.g. `minecraft:armorer`.
	fn id(&self) -> &'static str;

	/// Returns the display name.
	fn name(&self) -> &'static str;
}

/// Villager career.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Career {
	Farmer,
	Fisherman,
	Shepherd,
	Fletcher,
	Librarian,
	Cleric,
	Armorer,
	WeaponSmith,
	ToolSmith,
	Butcher,
	Leatherworker,
}

impl Career {
	/// Every career, in catalog order.
	pub const ALL: [Career; 11] = [
		Career::Farmer,
		Career::Fisherman,
		Career::Shepherd,
		Career::Fletcher,
		Career::Librarian,
		Career::Cleric,
		Career::Armorer,
		Career::WeaponSmith,
		Career::ToolSmith,
		Career::Butcher,
		Career::Leatherworker,
	];

	/// Resolves a career from its catalog id.
	pub fn from_id(id: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|career| career.id() == id)
	}
}

impl CatalogType for Career {
	fn id(&self) -> &'static str {
		match self {
			Career::Farmer => "minecraft:farmer",
			Career::Fisherman => "minecraft:fisherman",
			Career::Shepherd => "minecraft:shepherd",
			Career::Fletcher => "minecraft:fletcher",
			Career::Librarian => "minecraft:librarian",
			Career::Cleric => "minecraft:cleric",
			Career::Armorer => "minecraft:armorer",
			Career::WeaponSmith => "minecraft:weapon_smith",
			Career::ToolSmith => "minecraft:tool_smith",
			Career::Butcher => "minecraft:butcher",
			Career::Leatherworker => "minecraft:leatherworker",
		}
	}

	fn name(&self) -> &'static str {
		match self {
			Career::Farmer => "Farmer",
			Career::Fisherman => "Fisherman",
			Career::Shepherd => "Shepherd",
			Career::Fletcher => "Fletcher",
			Career::Librarian => "Librarian",
			Career::Cleric => "Cleric",
			Career::Armorer => "Armorer",
			Career::WeaponSmith => "Weapon Smith",
			Career::ToolSmith => "Tool Smith",
			Career::Butcher => "Butcher",
			Career::Leatherworker => "Leatherworker",
		}
	}
}

impl fmt::Display for Career {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.id())
	}
}
