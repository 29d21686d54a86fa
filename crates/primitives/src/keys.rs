//! Builtin attribute keys.
//!
//! Each key is typed by the mutable value handed out for it. Bounds and
//! defaults are owned by the processors that read the attribute, since they
//! may depend on the live holder (health is bounded by max health).

use crate::key;
use crate::{BoundedValue, Career, Color, EntityId, OptionalValue, Value, Vector3d};

key!(
	/// Current health of a living entity, bounded by its max health.
	pub HEALTH: BoundedValue<f64> = "sponge:health", "Health", "Health"
);
key!(
	/// Max health of a living entity.
	pub MAX_HEALTH: BoundedValue<f64> = "sponge:max_health", "Max Health", "MaxHealth"
);
key!(
	/// Food level of a player, `0..=20`.
	pub FOOD_LEVEL: BoundedValue<i32> = "sponge:food_level", "Food Level", "FoodLevel"
);
key!(
	/// Food saturation of a player.
	pub SATURATION: BoundedValue<f64> = "sponge:saturation", "Saturation", "Saturation"
);
key!(
	/// Food exhaustion of a player.
	pub EXHAUSTION: BoundedValue<f64> = "sponge:exhaustion", "Exhaustion", "Exhaustion"
);
key!(
	/// Motion vector of an entity.
	pub VELOCITY: Value<Vector3d> = "sponge:velocity", "Velocity", "Velocity"
);
key!(
	/// Career of a villager.
	pub CAREER: Value<Career> = "sponge:career", "Career", "Career"
);
key!(
	/// Whether a custom name is rendered.
	pub SHOWS_DISPLAY_NAME: Value<bool> = "sponge:shows_display_name", "Shows Display Name", "ShowsDisplayName"
);
key!(
	/// Dye color.
	pub COLOR: Value<Color> = "sponge:color", "Color", "Color"
);
key!(
	/// Whether a block decays (leaves).
	pub DECAYABLE: Value<bool> = "sponge:decayable", "Decayable", "Decayable"
);
key!(
	/// Last entity that damaged a living entity, held as an id.
	pub LAST_ATTACKER: OptionalValue<EntityId> = "sponge:last_attacker", "Last Attacker", "LastAttacker"
);
