use crate::*;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BspVertex {
	pub position: Vec3,
	pub tex_coord: Vec2,
}

impl BspVertex {
	/// A vertex at `position` with no texture coordinate.
	#[inline]
	pub const fn at(position: Vec3) -> Self {
		Self { position, tex_coord: Vec2::ZERO }
	}
}

/// A rendered surface. Depending on the family it is a plain polygon, a patch's control points,
/// a terrain heightmap, or the base of a displacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BspFace {
	pub plane: Option<u32>,
	pub texture: Option<u32>,
	pub material: Option<u32>,
	pub texture_info: Option<u32>,

	pub first_vertex: u32,
	pub num_vertices: u32,
	pub first_index: u32,
	pub num_indices: u32,

	/// Control point dimensions, for faces that are patches.
	pub patch_size: Option<UVec2>,
	pub displacement: Option<u32>,

	/// Surface flags, or the surface type for idTech3 forks.
	pub flags: i32,
}

/// The special surface a face describes, if it isn't a flat polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceSurface {
	Displacement(u32),
	Patch,
	Terrain,
}

impl BspFace {
	/// Faces with this bit set never became a brush side in the editor.
	pub const FLAG_IGNORED: i32 = 1 << 8;
	/// Nightfire's "wide surface" bit.
	pub const FLAG_WIDE_SURFACE: i32 = 1 << 9;
	pub const TYPE_PATCH: i32 = 2;
	/// Only a terrain in Elite Force 2.
	pub const TYPE_TERRAIN: i32 = 5;

	#[inline]
	pub fn is_ignored(&self) -> bool {
		self.flags & Self::FLAG_IGNORED != 0
	}

	#[inline]
	pub fn is_wide_surface(&self) -> bool {
		self.flags & Self::FLAG_WIDE_SURFACE != 0
	}

	pub fn special_surface(&self, family: BspFamily) -> Option<FaceSurface> {
		if let Some(displacement) = self.displacement {
			Some(FaceSurface::Displacement(displacement))
		} else if self.flags == Self::TYPE_PATCH {
			Some(FaceSurface::Patch)
		} else if self.flags == Self::TYPE_TERRAIN && family.is_ef2() {
			Some(FaceSurface::Terrain)
		} else {
			None
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn special_surfaces() {
		let face = |flags, displacement| BspFace {
			flags,
			displacement,
			..Default::default()
		};

		assert_eq!(face(2, Some(4)).special_surface(BspFamily::Source20), Some(FaceSurface::Displacement(4)));
		assert_eq!(face(2, None).special_surface(BspFamily::Quake3), Some(FaceSurface::Patch));
		assert_eq!(face(5, None).special_surface(BspFamily::STEF2Demo), Some(FaceSurface::Terrain));
		assert_eq!(face(5, None).special_surface(BspFamily::Quake3), None);
		assert_eq!(face(1, None).special_surface(BspFamily::STEF2), None);
	}
}
