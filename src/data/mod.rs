//! The parsed BSP records decompiling works from.
//!
//! Reading these out of a file is the job of a BSP parser, this module only defines the shape they're handed over in,
//! and the accessors for following references between them.

pub mod brush;
pub mod decoration;
pub mod entity;
pub mod face;
pub mod surface;
pub mod texture;

pub use brush::*;
pub use decoration::*;
pub use entity::*;
pub use face::*;
pub use surface::*;
pub use texture::*;

use crate::*;

/// Everything a decompile needs from a parsed BSP file. Empty collections mean the lump doesn't exist in this [`BspFamily`].
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BspModelData {
	pub family: BspFamily,

	pub entities: Vec<BspEntity>,
	/// Model 0 is worldspawn, other models are used for entities using `*N` where N is the model number.
	pub models: Vec<BspModel>,

	pub brushes: Vec<BspBrush>,
	pub brush_sides: Vec<BspBrushSide>,
	pub planes: Vec<BspPlane>,

	pub faces: Vec<BspFace>,
	pub vertices: Vec<BspVertex>,
	/// Triangle list indices, relative to the `first_vertex` of the face they belong to.
	pub indices: Vec<u32>,

	pub textures: Vec<BspTexture>,
	pub materials: Vec<BspMaterial>,
	pub tex_info: Vec<BspTexInfo>,
	/// Source-style texture data, pointing into [`Self::tex_data_string_table`].
	pub tex_data: Vec<BspTexData>,
	/// Byte offsets into [`Self::tex_data_string_data`].
	pub tex_data_string_table: Vec<u32>,
	/// NUL-separated texture names.
	pub tex_data_string_data: Vec<u8>,

	pub displacements: Vec<BspDisplacementInfo>,
	pub displacement_vertices: Vec<BspDisplacementVertex>,

	/// Call of Duty patches, referenced from models through [`Self::leaf_patches`].
	pub patches: Vec<BspPatch>,
	pub patch_vertices: Vec<BspVertex>,
	/// Indices into [`Self::patches`], negative entries reference nothing.
	pub leaf_patches: Vec<i32>,

	/// MoHAA terrain patches, they always belong to the world.
	pub lod_terrains: Vec<BspLodTerrain>,

	pub static_props: Vec<BspStaticProp>,
	/// Model names indexed by [`BspStaticProp::model`].
	pub static_prop_dictionary: Vec<String>,
	pub static_models: Vec<BspStaticModel>,
	pub cubemaps: Vec<BspCubemap>,
}

impl BspModelData {
	pub fn new(family: BspFamily) -> Self {
		Self { family, ..Default::default() }
	}

	#[inline]
	pub fn plane(&self, plane_idx: u32) -> Option<&BspPlane> {
		self.planes.get(plane_idx as usize)
	}

	pub fn brushes_in_model(&self, model: &BspModel) -> &[BspBrush] {
		referenced(&self.brushes, model.first_brush, model.num_brushes)
	}

	pub fn faces_in_model(&self, model: &BspModel) -> &[BspFace] {
		referenced(&self.faces, model.first_face, model.num_faces)
	}

	/// The [`Self::leaf_patches`] entries referenced by `model`.
	pub fn leaf_patches_in_model(&self, model: &BspModel) -> &[i32] {
		referenced(&self.leaf_patches, model.first_leaf_patch, model.num_leaf_patches)
	}

	/// The patches `model` references, in the order they're first referenced. Each patch appears once, no matter how many
	/// leaves reference it.
	///
	/// Call of Duty only supports decompiling patches of type 0, so others are left out for that family.
	pub fn patches_in_model(&self, model: &BspModel) -> SmallVec<[&BspPatch; 16]> {
		if self.patches.is_empty() {
			return SmallVec::new();
		}

		let mut seen = HashSet::new();
		self.leaf_patches_in_model(model)
			.iter()
			.filter_map(|leaf_patch| usize::try_from(*leaf_patch).ok())
			.filter(|patch_idx| seen.insert(*patch_idx))
			.filter_map(|patch_idx| self.patches.get(patch_idx))
			.filter(|patch| self.family != BspFamily::CoD || patch.patch_type == 0)
			.collect()
	}

	/// The vertices a face references, for patches these are the control points.
	pub fn face_vertices(&self, face: &BspFace) -> &[BspVertex] {
		referenced(&self.vertices, face.first_vertex, face.num_vertices)
	}

	/// Returns an iterator over the triangles of `face`'s index buffer. Triangles referencing vertices that don't exist are skipped.
	pub fn face_triangles<'a>(&'a self, face: &BspFace) -> impl Iterator<Item = [DVec3; 3]> + 'a {
		let first_vertex = face.first_vertex as usize;

		referenced(&self.indices, face.first_index, face.num_indices)
			.chunks_exact(3)
			.filter_map(move |triangle| {
				let position = |idx: u32| self.vertices.get(first_vertex + idx as usize).map(|vertex| vertex.position.as_dvec3());
				Some([position(triangle[0])?, position(triangle[1])?, position(triangle[2])?])
			})
	}

	pub fn patch_control_points(&self, patch: &BspPatch) -> &[BspVertex] {
		referenced(&self.patch_vertices, patch.first_vertex, patch.num_vertices)
	}

	pub fn displacement_vertex_block(&self, first: u32, count: usize) -> &[BspDisplacementVertex] {
		let first = (first as usize).min(self.displacement_vertices.len());
		let last = first.saturating_add(count).min(self.displacement_vertices.len());
		&self.displacement_vertices[first..last]
	}

	/// Reads the NUL-terminated texture name starting at byte `offset` of [`Self::tex_data_string_data`].
	pub fn texture_name_at_offset(&self, offset: u32) -> Option<&str> {
		let bytes = self.tex_data_string_data.get(offset as usize..)?;
		let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
		std::str::from_utf8(&bytes[..end]).ok()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn texture_string_data() {
		let mut data = BspModelData::new(BspFamily::Source20);
		data.tex_data_string_data = b"TOOLS/TOOLSNODRAW\0BRICK/WALL01\0DEV/UNTERMINATED".to_vec();

		assert_eq!(data.texture_name_at_offset(0), Some("TOOLS/TOOLSNODRAW"));
		assert_eq!(data.texture_name_at_offset(18), Some("BRICK/WALL01"));
		assert_eq!(data.texture_name_at_offset(24), Some("WALL01"));
		assert_eq!(data.texture_name_at_offset(31), Some("DEV/UNTERMINATED"));
		assert_eq!(data.texture_name_at_offset(400), None);
	}

	#[test]
	fn patches_deduplicated() {
		let mut data = BspModelData::new(BspFamily::CoD);
		let patch = |patch_type| BspPatch {
			texture: 0,
			patch_type,
			dims: uvec2(3, 3),
			first_vertex: 0,
			num_vertices: 9,
		};
		data.patches = vec![patch(0), patch(1), patch(0)];
		data.leaf_patches = vec![2, -1, 0, 2, 1, 0, 9];
		let model = BspModel {
			num_leaf_patches: 7,
			..Default::default()
		};

		let patches = data.patches_in_model(&model);
		assert_eq!(patches.len(), 2);
		assert!(std::ptr::eq(patches[0], &data.patches[2]));
		assert!(std::ptr::eq(patches[1], &data.patches[0]));
		drop(patches);

		// Other families keep non-zero patch types.
		data.family = BspFamily::CoD2;
		assert_eq!(data.patches_in_model(&model).len(), 3);
	}

	#[test]
	fn face_triangles_skip_missing_vertices() {
		let mut data = BspModelData::new(BspFamily::Quake3);
		data.vertices = [Vec3::ZERO, Vec3::X, Vec3::Y].map(BspVertex::at).to_vec();
		data.indices = vec![0, 1, 2, 0, 2, 5];
		let face = BspFace {
			num_vertices: 3,
			num_indices: 6,
			..Default::default()
		};

		let triangles: Vec<_> = data.face_triangles(&face).collect();
		assert_eq!(triangles, vec![[DVec3::ZERO, DVec3::X, DVec3::Y]]);
	}
}
