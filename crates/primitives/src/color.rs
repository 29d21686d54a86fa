use std::fmt;

use serde::{Deserialize, Serialize};

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(u32);

impl Color {
	pub const BLACK: Color = Color(0x000000);
	pub const WHITE: Color = Color(0xFFFFFF);

	/// Creates a color from its components.
	pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
		Self(((red as u32) << 16) | ((green as u32) << 8) | blue as u32)
	}

	/// Creates a color from a packed `0xRRGGBB` value, ignoring the high byte.
	pub const fn from_packed(rgb: u32) -> Self {
		Self(rgb & 0xFFFFFF)
	}

	/// Returns the packed `0xRRGGBB` value.
	pub const fn rgb(self) -> u32 {
		self.0
	}

	pub const fn red(self) -> u8 {
		(self.0 >> 16) as u8
	}

	pub const fn green(self) -> u8 {
		(self.0 >> 8) as u8
	}

	pub const fn blue(self) -> u8 {
		self.0 as u8
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{:06x}", self.0)
	}
}
