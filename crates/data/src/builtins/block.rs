use std::sync::Arc;

use crate::cache::ImmutableCaches;
use crate::error::CacheError;
use crate::holder::BlockState;
use crate::manipulator::ImmutableDecayableData;
use crate::processor::BlockDataProcessor;

/// Block types whose states carry the decay flag.
pub const LEAVES: &[&str] = &["minecraft:leaves", "minecraft:leaves2"];

const DECAYABLE_PROPERTY: &str = "decayable";

/// Decay flag of leaf blocks.
#[derive(Debug, Clone)]
pub struct DecayableBlockProcessor {
	caches: Arc<ImmutableCaches>,
}

impl DecayableBlockProcessor {
	pub fn new(caches: Arc<ImmutableCaches>) -> Self {
		Self { caches }
	}
}

impl BlockDataProcessor<ImmutableDecayableData> for DecayableBlockProcessor {
	fn supports(&self, state: &BlockState) -> bool {
		LEAVES.contains(&state.block())
	}

	fn from_block_state(
		&self,
		state: &BlockState,
	) -> Result<Option<Arc<ImmutableDecayableData>>, CacheError> {
		if !self.supports(state) {
			return Ok(None);
		}
		let decayable = match state.property(DECAYABLE_PROPERTY).map(str::parse::<bool>) {
			Some(Ok(flag)) => flag,
			Some(Err(_)) => return Ok(None),
			None => true,
		};
		self.caches
			.manipulator::<ImmutableDecayableData>((decayable,))
			.map(Some)
	}

	fn with_data(&self, state: &BlockState, data: &ImmutableDecayableData) -> Option<BlockState> {
		self.supports(state)
			.then(|| state.with_property(DECAYABLE_PROPERTY, data.element().to_string()))
	}
}
