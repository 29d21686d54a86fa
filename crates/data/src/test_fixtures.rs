//! Mock holders standing in for engine objects.

use sponge_primitives::{Career, Color, EntityId, EntityLookup, Vector3d};

use crate::error::EngineError;
use crate::holder::{
	ColorAccess, DataHolder, EntityAccess, HungerAccess, ItemAccess, LivingAccess, NameableAccess,
	VillagerAccess,
};

/// Refuses `field` when every write is refused or it is the one named.
fn refuse(all: bool, only: Option<&'static str>, field: &'static str) -> Result<(), EngineError> {
	if all || only == Some(field) {
		return Err(EngineError::Rejected {
			field,
			reason: "read-only in this test".into(),
		});
	}
	Ok(())
}

/// Entity and living state shared by the mock mobs.
#[derive(Debug, Clone)]
pub struct LivingBody {
	pub id: EntityId,
	pub health: f64,
	pub max_health: f64,
	pub last_attacker: Option<EntityId>,
	pub name_tag: bool,
	pub motion: Vector3d,
	pub refuse_writes: bool,
	pub refused_field: Option<&'static str>,
}

impl LivingBody {
	pub fn new(id: u64) -> Self {
		Self {
			id: EntityId(id),
			health: 20.0,
			max_health: 20.0,
			last_attacker: None,
			name_tag: false,
			motion: Vector3d::ZERO,
			refuse_writes: false,
			refused_field: None,
		}
	}
}

impl EntityAccess for LivingBody {
	fn entity_id(&self) -> EntityId {
		self.id
	}

	fn always_render_name_tag(&self) -> bool {
		self.name_tag
	}

	fn set_always_render_name_tag(&mut self, visible: bool) -> Result<(), EngineError> {
		refuse(self.refuse_writes, self.refused_field, "name_tag")?;
		self.name_tag = visible;
		Ok(())
	}

	fn motion(&self) -> Vector3d {
		self.motion
	}

	fn set_motion(&mut self, motion: Vector3d) -> Result<(), EngineError> {
		refuse(self.refuse_writes, self.refused_field, "motion")?;
		self.motion = motion;
		Ok(())
	}
}

impl LivingAccess for LivingBody {
	fn health(&self) -> f64 {
		self.health
	}

	fn set_health(&mut self, health: f64) -> Result<(), EngineError> {
		refuse(self.refuse_writes, self.refused_field, "health")?;
		self.health = health;
		Ok(())
	}

	fn max_health(&self) -> f64 {
		self.max_health
	}

	fn set_max_health(&mut self, max_health: f64) -> Result<(), EngineError> {
		refuse(self.refuse_writes, self.refused_field, "max_health")?;
		self.max_health = max_health;
		self.health = self.health.min(max_health);
		Ok(())
	}

	fn last_attacker(&self) -> Option<EntityId> {
		self.last_attacker
	}

	fn set_last_attacker(&mut self, attacker: Option<EntityId>) -> Result<(), EngineError> {
		refuse(self.refuse_writes, self.refused_field, "last_attacker")?;
		self.last_attacker = attacker;
		Ok(())
	}
}

#[derive(Debug, Clone)]
pub struct Hunger {
	pub food_level: i32,
	pub saturation: f64,
	pub exhaustion: f64,
	pub refuse_writes: bool,
	pub refused_field: Option<&'static str>,
}

impl HungerAccess for Hunger {
	fn food_level(&self) -> i32 {
		self.food_level
	}

	fn set_food_level(&mut self, level: i32) -> Result<(), EngineError> {
		refuse(self.refuse_writes, self.refused_field, "food_level")?;
		self.food_level = level;
		Ok(())
	}

	fn saturation(&self) -> f64 {
		self.saturation
	}

	fn set_saturation(&mut self, saturation: f64) -> Result<(), EngineError> {
		refuse(self.refuse_writes, self.refused_field, "saturation")?;
		self.saturation = saturation;
		Ok(())
	}

	fn exhaustion(&self) -> f64 {
		self.exhaustion
	}

	fn set_exhaustion(&mut self, exhaustion: f64) -> Result<(), EngineError> {
		refuse(self.refuse_writes, self.refused_field, "exhaustion")?;
		self.exhaustion = exhaustion;
		Ok(())
	}
}

#[derive(Debug, Clone)]
pub struct Player {
	pub body: LivingBody,
	pub hunger: Hunger,
}

impl Player {
	pub fn new(id: u64) -> Self {
		Self {
			body: LivingBody::new(id),
			hunger: Hunger {
				food_level: 20,
				saturation: 5.0,
				exhaustion: 0.0,
				refuse_writes: false,
				refused_field: None,
			},
		}
	}

	pub fn with_food(mut self, food_level: i32) -> Self {
		self.hunger.food_level = food_level;
		self
	}
}

impl DataHolder for Player {
	fn as_entity(&self) -> Option<&dyn EntityAccess> {
		Some(&self.body)
	}

	fn as_entity_mut(&mut self) -> Option<&mut dyn EntityAccess> {
		Some(&mut self.body)
	}

	fn as_living(&self) -> Option<&dyn LivingAccess> {
		Some(&self.body)
	}

	fn as_living_mut(&mut self) -> Option<&mut dyn LivingAccess> {
		Some(&mut self.body)
	}

	fn as_hunger(&self) -> Option<&dyn HungerAccess> {
		Some(&self.hunger)
	}

	fn as_hunger_mut(&mut self) -> Option<&mut dyn HungerAccess> {
		Some(&mut self.hunger)
	}
}

#[derive(Debug, Clone)]
pub struct Villager {
	pub body: LivingBody,
	pub career: Career,
}

impl Villager {
	pub fn new(id: u64, career: Career) -> Self {
		Self {
			body: LivingBody::new(id),
			career,
		}
	}
}

impl VillagerAccess for Villager {
	fn career(&self) -> Career {
		self.career
	}

	fn set_career(&mut self, career: Career) -> Result<(), EngineError> {
		refuse(self.body.refuse_writes, self.body.refused_field, "career")?;
		self.career = career;
		Ok(())
	}
}

impl DataHolder for Villager {
	fn as_entity(&self) -> Option<&dyn EntityAccess> {
		Some(&self.body)
	}

	fn as_entity_mut(&mut self) -> Option<&mut dyn EntityAccess> {
		Some(&mut self.body)
	}

	fn as_living(&self) -> Option<&dyn LivingAccess> {
		Some(&self.body)
	}

	fn as_living_mut(&mut self) -> Option<&mut dyn LivingAccess> {
		Some(&mut self.body)
	}

	fn as_villager(&self) -> Option<&dyn VillagerAccess> {
		Some(self)
	}

	fn as_villager_mut(&mut self) -> Option<&mut dyn VillagerAccess> {
		Some(self)
	}
}

#[derive(Debug, Clone)]
pub struct Sheep {
	pub body: LivingBody,
	pub color: Color,
}

impl ColorAccess for Sheep {
	fn color(&self) -> Color {
		self.color
	}

	fn set_color(&mut self, color: Color) -> Result<(), EngineError> {
		refuse(self.body.refuse_writes, self.body.refused_field, "color")?;
		self.color = color;
		Ok(())
	}
}

impl DataHolder for Sheep {
	fn as_entity(&self) -> Option<&dyn EntityAccess> {
		Some(&self.body)
	}

	fn as_entity_mut(&mut self) -> Option<&mut dyn EntityAccess> {
		Some(&mut self.body)
	}

	fn as_living(&self) -> Option<&dyn LivingAccess> {
		Some(&self.body)
	}

	fn as_living_mut(&mut self) -> Option<&mut dyn LivingAccess> {
		Some(&mut self.body)
	}

	fn as_colorable(&self) -> Option<&dyn ColorAccess> {
		Some(self)
	}

	fn as_colorable_mut(&mut self) -> Option<&mut dyn ColorAccess> {
		Some(self)
	}
}

#[derive(Debug, Clone)]
pub struct ItemStack(pub &'static str);

impl ItemAccess for ItemStack {
	fn item_id(&self) -> &str {
		self.0
	}
}

impl DataHolder for ItemStack {
	fn as_item(&self) -> Option<&dyn ItemAccess> {
		Some(self)
	}
}

#[derive(Debug, Clone, Default)]
pub struct Chest {
	pub name: Option<String>,
}

impl NameableAccess for Chest {
	fn custom_name(&self) -> Option<&str> {
		self.name.as_deref()
	}
}

impl DataHolder for Chest {
	fn as_nameable(&self) -> Option<&dyn NameableAccess> {
		Some(self)
	}
}

/// Supports nothing.
#[derive(Debug, Clone, Default)]
pub struct Rock;

impl DataHolder for Rock {}

/// Entities still loaded.
#[derive(Debug, Default)]
pub struct World {
	pub alive: Vec<EntityId>,
}

impl EntityLookup for World {
	type Entity = EntityId;

	fn lookup(&self, id: EntityId) -> Option<EntityId> {
		self.alive.contains(&id).then_some(id)
	}
}
