//! Per-family detail/water/manual-vis classification of brushes.
//!
//! Every family maps to a [`BrushRules`] table through an exhaustive `match`, so adding a family to [`BspFamily`]
//! won't compile until someone decides how its bits are laid out.

use crate::*;

/// The detail bit of idTech3 texture contents and Quake 2/Source brush contents.
const CONTENTS_DETAIL_BIT: u32 = 27;
/// The water bit of idTech3 texture contents and Quake 2/Source brush contents.
const CONTENTS_WATER_BIT: u32 = 5;
/// Quake 1 stores leaf/brush contents as an enumeration rather than bits, water is `-3`.
const QUAKE_CONTENTS_WATER: i32 = -3;
const NIGHTFIRE_DETAIL_BIT: u32 = 9;
const NIGHTFIRE_WATER_BIT: u32 = 20;
/// MoHAA's manual vis brushes are the ones whose texture has exactly these surface flags.
const MOHAA_MANUAL_VIS_FLAGS: i32 = 0x40010990;

/// How one brush property is encoded in a specific family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagRule {
	/// This family has no way to express the property.
	Never,
	/// Bit `n` of the brush's own contents.
	BrushBit(u32),
	/// The brush's contents equal a sentinel value.
	BrushEquals(i32),
	/// Bit `n` of the contents of the texture the brush references.
	TextureContentBit(u32),
	/// The surface flags of the texture the brush references equal a sentinel value.
	TextureFlagsEquals(i32),
}

impl FlagRule {
	pub fn evaluate(self, brush: &BspBrush, textures: &[BspTexture]) -> bool {
		let texture = || brush.texture.and_then(|idx| textures.get(idx as usize));

		match self {
			Self::Never => false,
			Self::BrushBit(bit) => brush.contents & (1 << bit) != 0,
			Self::BrushEquals(value) => brush.contents == value,
			Self::TextureContentBit(bit) => texture().is_some_and(|texture| texture.contents & (1 << bit) != 0),
			Self::TextureFlagsEquals(value) => texture().is_some_and(|texture| texture.flags == value),
		}
	}
}

/// The rules for every brush property of a single family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushRules {
	pub detail: FlagRule,
	pub water: FlagRule,
	pub manual_vis: FlagRule,
}

impl BspFamily {
	pub const fn brush_rules(self) -> BrushRules {
		use FlagRule::*;

		match self {
			Self::Quake => BrushRules {
				detail: Never,
				water: BrushEquals(QUAKE_CONTENTS_WATER),
				manual_vis: Never,
			},
			Self::Nightfire => BrushRules {
				detail: BrushBit(NIGHTFIRE_DETAIL_BIT),
				water: BrushBit(NIGHTFIRE_WATER_BIT),
				manual_vis: Never,
			},
			Self::Quake3 | Self::Raven | Self::CoD | Self::CoD2 | Self::CoD4 | Self::STEF2 | Self::STEF2Demo | Self::FAKK => BrushRules {
				detail: TextureContentBit(CONTENTS_DETAIL_BIT),
				water: TextureContentBit(CONTENTS_WATER_BIT),
				manual_vis: Never,
			},
			Self::MOHAA => BrushRules {
				detail: TextureContentBit(CONTENTS_DETAIL_BIT),
				water: TextureContentBit(CONTENTS_WATER_BIT),
				manual_vis: TextureFlagsEquals(MOHAA_MANUAL_VIS_FLAGS),
			},
			Self::Quake2
			| Self::Daikatana
			| Self::SiN
			| Self::SoF
			| Self::Source17
			| Self::Source18
			| Self::Source19
			| Self::Source20
			| Self::Source21
			| Self::Source22
			| Self::Source23
			| Self::Source27
			| Self::Vindictus
			| Self::DMoMaM
			| Self::TacticalInterventionEncrypted => BrushRules {
				detail: BrushBit(CONTENTS_DETAIL_BIT),
				water: BrushBit(CONTENTS_WATER_BIT),
				manual_vis: Never,
			},
			// TODO L4D2 and Titanfall brushes very likely use the Source bits too, needs a map to confirm.
			Self::GoldSrc | Self::L4D2 | Self::Titanfall => BrushRules {
				detail: Never,
				water: Never,
				manual_vis: Never,
			},
		}
	}
}

impl BspModelData {
	/// Whether `brush` is a detail brush, i.e. it doesn't take part in vis.
	pub fn is_detail(&self, brush: &BspBrush) -> bool {
		self.family.brush_rules().detail.evaluate(brush, &self.textures)
	}

	pub fn is_water(&self, brush: &BspBrush) -> bool {
		self.family.brush_rules().water.evaluate(brush, &self.textures)
	}

	/// Whether `brush` is a MoHAA manual vis brush.
	pub fn is_manual_vis(&self, brush: &BspBrush) -> bool {
		self.family.brush_rules().manual_vis.evaluate(brush, &self.textures)
	}
}
