//! Surfaces that aren't made of planar sides: patches, terrains and displacements.

use crate::*;

/// Source never compiles displacements with a higher power than this.
pub const MAX_DISPLACEMENT_POWER: u32 = 4;
/// How far from a grid cell a terrain vertex can be, in cells, and still count as on it.
const TERRAIN_SNAP_TOLERANCE: f32 = 0.01;

impl Decompiler<'_> {
	/// An idTech3 patch, whose control points are the face's vertices.
	pub(crate) fn build_face_patch(&mut self, face: &BspFace) -> OutputPatch {
		let data = self.data;
		let texture = self.texture_name(face.texture);
		let points = data.face_vertices(face);

		let Some(dims) = face.patch_size else {
			self.warn(DecompileWarning::MissingPatchSize { found: points.len() });
			return OutputPatch {
				dims: UVec2::ZERO,
				texture,
				control_points: Vec::new(),
			};
		};
		self.patch_from_points(dims, texture, points)
	}

	/// A Call of Duty patch.
	pub(crate) fn build_patch(&mut self, patch: &BspPatch) -> OutputPatch {
		let data = self.data;
		let texture = self.texture_name(Some(patch.texture));
		self.patch_from_points(patch.dims, texture, data.patch_control_points(patch))
	}

	/// If there aren't enough control points for `dims`, the patch is shrunk to the rows that are there.
	fn patch_from_points(&mut self, mut dims: UVec2, texture: String, points: &[BspVertex]) -> OutputPatch {
		let expected = dims.x as usize * dims.y as usize;

		if points.len() < expected {
			self.warn(DecompileWarning::ShortPatch {
				dims,
				expected,
				found: points.len(),
			});
			dims.y = (points.len() / dims.x as usize) as u32;
		}

		OutputPatch {
			dims,
			texture,
			control_points: points[..dims.x as usize * dims.y as usize].to_vec(),
		}
	}

	/// An Elite Force 2 terrain. The face's vertices are a square grid, in no particular order.
	///
	/// Rows run along Y, columns along X. Both use the X extent for cell spacing.
	pub(crate) fn build_grid_terrain(&mut self, face: &BspFace) -> OutputGridTerrain {
		let data = self.data;
		let vertices = data.face_vertices(face);

		let bounds = if vertices.is_empty() {
			Rect { min: Vec2::ZERO, max: Vec2::ZERO }
		} else {
			vertices.iter().fold(Rect::EMPTY, |rect, vertex| rect.union_point(vertex.position.xy()))
		};

		let side = (vertices.len() as f64).sqrt().round() as usize;
		let spacing = if side > 1 { bounds.size().x / (side - 1) as f32 } else { 0. };

		let mut heights = Grid::filled(side, 0.);
		for vertex in vertices {
			let position = vertex.position.xy();
			// Without spacing only the start corner can be placed.
			let cell = if spacing > 0. && spacing.is_finite() {
				Some((position - bounds.min) / spacing)
			} else if position == bounds.min {
				Some(Vec2::ZERO)
			} else {
				None
			};

			let snapped = cell.map(|cell| (cell, cell.round())).and_then(|(cell, rounded)| {
				let on_grid = (cell - rounded).abs().max_element() <= TERRAIN_SNAP_TOLERANCE;
				(on_grid && rounded.min_element() >= 0.).then_some(rounded)
			});

			let height = match snapped {
				Some(rounded) => heights.get_mut(rounded.y as usize, rounded.x as usize),
				None => None,
			};
			match height {
				Some(height) => *height = vertex.position.z,
				None => self.warn(DecompileWarning::TerrainOffGrid { position: vertex.position }),
			}
		}

		let texture = self.texture_name(face.texture);
		let flags = face.texture.and_then(|idx| data.textures.get(idx as usize)).map(|texture| texture.flags).unwrap_or(0);

		OutputGridTerrain {
			heights,
			alphas: Grid::filled(side, 0.),
			texture,
			flags,
			start: dvec3(bounds.min.x as f64, bounds.min.y as f64, 0.),
			side_length: bounds.size().x as f64,
			texture_shift: DVec2::ZERO,
			texture_rotation: 0.,
			texture_scale: DVec2::ONE,
		}
	}

	/// A MoHAA terrain patch. Every partition gets the terrain's texture.
	pub(crate) fn build_partitioned_terrain(&mut self, terrain: &BspLodTerrain) -> OutputPartitionedTerrain {
		let texture = self.texture_name(Some(terrain.texture));

		OutputPartitionedTerrain {
			heights: Grid::from_fn(BspLodTerrain::SIZE, |row, col| terrain.heightmap[row][col] as f32 * 2.),
			partitions: std::array::from_fn(|_| TerrainPartition {
				texture: texture.clone(),
				texture_scale: DVec2::ONE,
			}),
			origin: dvec3(
				terrain.x as f64 * BspLodTerrain::GRID_SIZE,
				terrain.y as f64 * BspLodTerrain::GRID_SIZE,
				terrain.base_z as f64,
			),
			flags: (terrain.flags & BspLodTerrain::FLAG_SURFACE != 0) as u32,
		}
	}

	/// Reads the `2^power + 1` square block of vertices `info` references. Missing vertices are left at zero.
	pub(crate) fn build_displacement(&mut self, info: &BspDisplacementInfo) -> OutputDisplacement {
		let power = if info.power > MAX_DISPLACEMENT_POWER {
			self.warn(DecompileWarning::DisplacementPower {
				power: info.power,
				max: MAX_DISPLACEMENT_POWER,
			});
			MAX_DISPLACEMENT_POWER
		} else {
			info.power
		};

		let data = self.data;
		let side = (1 << power) + 1;
		let expected = side * side;
		let block = data.displacement_vertex_block(info.first_vertex, expected);
		if block.len() < expected {
			self.warn(DecompileWarning::ShortDisplacement {
				expected,
				found: block.len(),
			});
		}

		let vertex = |row: usize, col: usize| block.get(row * side + col).copied().unwrap_or_default();

		OutputDisplacement {
			power,
			start: info.start_position.as_dvec3(),
			normals: Grid::from_fn(side, |row, col| vertex(row, col).normal),
			distances: Grid::from_fn(side, |row, col| vertex(row, col).dist),
			alphas: Grid::from_fn(side, |row, col| vertex(row, col).alpha),
		}
	}
}
