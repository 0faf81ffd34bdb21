//! The BSP format families (engine forks) a [`BspModelData`] can come from.

use crate::*;

/// The specific BSP format variant the input data was read from. This dictates field layout and the meaning of content and surface bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::EnumIter, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BspFamily {
	/// Original Quake format (BSP29 and BSP2).
	#[default]
	Quake,
	/// GoldSrc (BSP30).
	GoldSrc,
	/// James Bond 007: Nightfire (BSP42).
	Nightfire,
	Quake2,
	Daikatana,
	SiN,
	SoF,
	Quake3,
	/// Raven's idTech3 derivatives (Jedi Outcast/Academy, Soldier of Fortune 2).
	Raven,
	CoD,
	CoD2,
	CoD4,
	/// Star Trek: Elite Force 2.
	STEF2,
	STEF2Demo,
	/// Medal of Honor: Allied Assault.
	MOHAA,
	/// Heavy Metal: F.A.K.K.²
	FAKK,
	Source17,
	Source18,
	Source19,
	Source20,
	Source21,
	Source22,
	Source23,
	Source27,
	L4D2,
	Vindictus,
	/// Dark Messiah of Might and Magic.
	DMoMaM,
	TacticalInterventionEncrypted,
	Titanfall,
}

impl BspFamily {
	/// Call of Duty forks. These store the first six sides of every brush as implicit axial planes.
	pub const fn is_cod(self) -> bool {
		matches!(self, Self::CoD | Self::CoD2 | Self::CoD4)
	}

	/// Elite Force 2 forks, the only ones whose faces can be heightmap terrains.
	pub const fn is_ef2(self) -> bool {
		matches!(self, Self::STEF2 | Self::STEF2Demo)
	}

	/// Families where a brush side's texture index points into the texture info lump, which goes through
	/// texture data and a string table before reaching a name.
	pub const fn uses_texture_data_indirection(self) -> bool {
		matches!(
			self,
			Self::Source17
				| Self::Source18
				| Self::Source19
				| Self::Source20
				| Self::Source21
				| Self::Source22
				| Self::Source23
				| Self::Source27
				| Self::Vindictus
				| Self::DMoMaM
				| Self::L4D2
				| Self::TacticalInterventionEncrypted
				| Self::Titanfall
		)
	}
}
