//! Texture names, materials and projections.

use crate::*;

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BspTexture {
	pub name: String,
	/// Surface flags.
	pub flags: i32,
	/// Content flags, idTech3 forks put detail and water bits here.
	pub contents: i32,
	/// Families that index textures directly from brush sides store the projection with the texture.
	pub projection: Option<PlanarTextureProjection>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BspMaterial {
	pub name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BspTexInfo {
	pub projection: PlanarTextureProjection,
	/// Index into [`BspModelData::tex_data`].
	pub texture_data: Option<u32>,
	pub flags: i32,
}

impl BspTexInfo {
	pub fn new(projection: PlanarTextureProjection, texture_data: Option<u32>) -> Self {
		Self {
			projection,
			texture_data,
			flags: 0,
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BspTexData {
	/// Index into [`BspModelData::tex_data_string_table`].
	pub string_table_idx: u32,
}

/// Maps world positions to texture space. Scale is folded into the axes, a texel is `1 / axis.length()` units wide.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanarTextureProjection {
	pub u_axis: Vec3,
	pub u_offset: f32,

	pub v_axis: Vec3,
	pub v_offset: f32,
}

impl PlanarTextureProjection {
	/// Projects a position onto this plane.
	///
	/// Converts to double for calculation to minimise floating-point imprecision.
	pub fn project(&self, point: DVec3) -> DVec2 {
		dvec2(
			point.dot(self.u_axis.as_dvec3()) + self.u_offset as f64,
			point.dot(self.v_axis.as_dvec3()) + self.v_offset as f64,
		)
	}
}
