//! Records for surfaces that aren't flat polygons.

use crate::*;

/// Source displacement, a grid of `2^power + 1` vertices per side stretched over a four sided face.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BspDisplacementInfo {
	pub power: u32,
	pub start_position: Vec3,
	/// Index into [`BspModelData::displacement_vertices`].
	pub first_vertex: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BspDisplacementVertex {
	/// Direction the vertex is offset in.
	pub normal: Vec3,
	/// How far the vertex is offset along `normal`.
	pub dist: f32,
	/// Blend between the face's two textures.
	pub alpha: f32,
}

/// A Call of Duty patch, stored separately from faces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BspPatch {
	pub texture: u32,
	/// Only type 0 patches are curved surfaces, others are terrain and are left out of Call of Duty 1 maps.
	pub patch_type: i32,
	/// Control point dimensions.
	pub dims: UVec2,
	/// Index into [`BspModelData::patch_vertices`].
	pub first_vertex: u32,
	pub num_vertices: u32,
}

/// A 9x9 MoHAA terrain patch placed on a 64 unit grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BspLodTerrain {
	pub flags: u8,
	pub x: i8,
	pub y: i8,
	pub base_z: i16,
	pub texture: u32,
	/// Row-major heights, in units of 2.
	pub heightmap: [[u8; 9]; 9],
}

impl BspLodTerrain {
	pub const SIZE: usize = 9;
	/// World units between cells of the MoHAA terrain grid.
	pub const GRID_SIZE: f64 = 64.;
	pub const FLAG_SURFACE: u8 = 1 << 6;
}
