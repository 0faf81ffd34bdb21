//! Rebuilding brushes side by side.

use crate::*;

/// Tracks where the next sequentially stored brush's sides start.
///
/// Call of Duty brushes don't say where their sides are, each one continues where the previous brush left off,
/// so brushes have to be built in the order they're stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SideCursor {
	next: usize,
}

impl SideCursor {
	pub fn new() -> Self {
		Self::default()
	}

	/// Takes the next `count` elements of `sides`, clamped to what exists. Always advances by `count`.
	pub fn take<'a, T>(&mut self, sides: &'a [T], count: u32) -> &'a [T] {
		let first = self.next.min(sides.len());
		let last = first.saturating_add(count as usize).min(sides.len());
		self.next = self.next.saturating_add(count as usize);
		&sides[first..last]
	}

	#[inline]
	pub fn position(&self) -> usize {
		self.next
	}
}

impl BspModelData {
	/// Returns the sides of `brush`. Sequential brushes consume their sides from `cursor`.
	pub fn brush_sides(&self, brush: &BspBrush, cursor: &mut SideCursor) -> &[BspBrushSide] {
		match brush.sides {
			BrushSides::Range { first, count } => referenced(&self.brush_sides, first, count),
			BrushSides::Sequential { count } => cursor.take(&self.brush_sides, count),
		}
	}
}

impl Decompiler<'_> {
	pub(crate) fn build_brush(&mut self, brush: &BspBrush, world_position: DVec3, cursor: &mut SideCursor) -> OutputBrush {
		let data = self.data;

		let sides = data
			.brush_sides(brush, cursor)
			.iter()
			.enumerate()
			.filter_map(|(i, side)| self.build_side(side, world_position, i))
			.collect();

		OutputBrush {
			is_detail: data.is_detail(brush),
			is_water: data.is_water(brush),
			is_manual_vis: data.is_manual_vis(brush),
			geometry: BrushGeometry::Sides(sides),
		}
	}

	/// Rebuilds the `index`th side of a brush. Returns `None` for sides that don't belong in the editor.
	pub(crate) fn build_side(&mut self, side: &BspBrushSide, world_position: DVec3, index: usize) -> Option<OutputSide> {
		if side.bevel {
			return None;
		}

		let data = self.data;
		if let Some(face_idx) = side.face {
			match data.faces.get(face_idx as usize) {
				Some(face) if face.is_ignored() => return None,
				Some(face) => return Some(self.face_side(face, Some(side), world_position)),
				None => self.warn(DecompileWarning::OutOfRangeReference {
					table: "faces",
					index: face_idx as usize,
					len: data.faces.len(),
				}),
			}
		}

		Some(self.faceless_side(side, world_position, index))
	}

	/// A side built from the face it produced, which also tells us its material and texture projection.
	pub(crate) fn face_side(&mut self, face: &BspFace, side: Option<&BspBrushSide>, world_position: DVec3) -> OutputSide {
		let data = self.data;

		let texture = if self.settings.convert_legacy_wide_surface_to_null && face.is_wide_surface() {
			NULL_TEXTURE.to_owned()
		} else {
			self.texture_name(face.texture)
		};

		let points = self.face_points(face, side);
		let plane = self.resolve_plane(face.plane.or(side.and_then(|side| side.plane)));

		let projection = match face.texture_info {
			Some(idx) => {
				let tex_info = data.tex_info.get(idx as usize);
				if tex_info.is_none() {
					self.warn(DecompileWarning::OutOfRangeTextureReference {
						table: "tex_info",
						index: Some(idx),
					});
				}
				tex_info.map(|tex_info| &tex_info.projection)
			}
			None => None,
		};
		let texture_axes = TextureAxes::project(projection, &plane, world_position);

		let material = match face.material {
			Some(idx) => match data.materials.get(idx as usize) {
				Some(material) => material.name.clone(),
				None => {
					self.warn(DecompileWarning::OutOfRangeReference {
						table: "materials",
						index: idx as usize,
						len: data.materials.len(),
					});
					DEFAULT_MATERIAL.to_owned()
				}
			},
			None => DEFAULT_MATERIAL.to_owned(),
		};

		OutputSide {
			points,
			plane,
			texture,
			texture_axes,
			flags: if self.settings.suppress_surface_flags { 0 } else { face.flags },
			material,
			lightmap_scale: DEFAULT_LIGHTMAP_SCALE,
			lightmap_rotation: 0.,
		}
	}

	/// A side that never produced a face, so all we have is its plane and texture reference.
	pub(crate) fn faceless_side(&mut self, side: &BspBrushSide, world_position: DVec3, index: usize) -> OutputSide {
		let data = self.data;

		let plane = if data.family.is_cod() && index < 6 {
			BspPlane::implicit_axial(index, side.dist)
		} else {
			self.resolve_plane(side.plane)
		};

		let (texture, projection) = match side.texture {
			None => (CLIP_TEXTURE.to_owned(), None),
			Some(idx) if data.family.uses_texture_data_indirection() => (
				self.indirect_texture_name(idx),
				data.tex_info.get(idx as usize).map(|tex_info| tex_info.projection),
			),
			Some(idx) => match data.textures.get(idx as usize) {
				Some(texture) => (texture.name.clone(), texture.projection),
				None => {
					self.warn(DecompileWarning::OutOfRangeTextureReference {
						table: "textures",
						index: Some(idx),
					});
					(SKIP_TEXTURE.to_owned(), None)
				}
			},
		};

		OutputSide {
			points: plane.three_points(),
			plane,
			texture,
			texture_axes: TextureAxes::project(projection.as_ref(), &plane, world_position),
			flags: 0,
			material: DEFAULT_MATERIAL.to_owned(),
			lightmap_scale: DEFAULT_LIGHTMAP_SCALE,
			lightmap_rotation: 0.,
		}
	}

	/// The name of the texture at `texture_idx`, or [`SKIP_TEXTURE`] if there isn't one.
	pub(crate) fn texture_name(&mut self, texture_idx: Option<u32>) -> String {
		match texture_idx.and_then(|idx| self.data.textures.get(idx as usize)) {
			Some(texture) => texture.name.clone(),
			None => {
				self.warn(DecompileWarning::OutOfRangeTextureReference {
					table: "textures",
					index: texture_idx,
				});
				SKIP_TEXTURE.to_owned()
			}
		}
	}

	/// Follows texture info, texture data and the string table to a texture name. Any link pointing nowhere gives [`SKIP_TEXTURE`].
	fn indirect_texture_name(&mut self, tex_info_idx: u32) -> String {
		let data = self.data;

		let Some(tex_info) = data.tex_info.get(tex_info_idx as usize) else {
			return self.skip_texture("tex_info", Some(tex_info_idx));
		};
		let Some(tex_data) = tex_info.texture_data.and_then(|idx| data.tex_data.get(idx as usize)) else {
			return self.skip_texture("tex_data", tex_info.texture_data);
		};
		let Some(name) = data
			.tex_data_string_table
			.get(tex_data.string_table_idx as usize)
			.and_then(|offset| data.texture_name_at_offset(*offset))
		else {
			return self.skip_texture("tex_data_string_table", Some(tex_data.string_table_idx));
		};

		name.to_owned()
	}

	fn skip_texture(&mut self, table: &'static str, index: Option<u32>) -> String {
		self.warn(DecompileWarning::OutOfRangeTextureReference { table, index });
		SKIP_TEXTURE.to_owned()
	}

	/// Looks up a plane, substituting [`BspPlane::ZERO`] if it doesn't exist.
	pub(crate) fn resolve_plane(&mut self, plane_idx: Option<u32>) -> BspPlane {
		match plane_idx.and_then(|idx| self.data.plane(idx)) {
			Some(plane) => *plane,
			None => {
				self.warn(DecompileWarning::MissingPlane { plane: plane_idx });
				BspPlane::ZERO
			}
		}
	}
}
