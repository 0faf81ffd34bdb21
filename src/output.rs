//! The editable entities a decompile produces, ready for a map writer.

use crate::*;

/// A square, row-major grid. Always holds exactly `side * side` cells.
#[derive(Debug, Clone, Default, PartialEq, derive_more::Deref, derive_more::IntoIterator)]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grid<T> {
	side: usize,
	#[deref]
	#[into_iterator(owned, ref)]
	cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
	pub fn filled(side: usize, value: T) -> Self {
		Self {
			side,
			cells: vec![value; side * side],
		}
	}
}

impl<T> Grid<T> {
	/// Builds a grid by calling `f` with the row and column of every cell, in row-major order.
	pub fn from_fn(side: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
		let mut cells = Vec::with_capacity(side * side);
		for row in 0..side {
			for col in 0..side {
				cells.push(f(row, col));
			}
		}

		Self { side, cells }
	}

	#[inline]
	pub fn side(&self) -> usize {
		self.side
	}

	pub fn get(&self, row: usize, col: usize) -> Option<&T> {
		if row >= self.side || col >= self.side {
			return None;
		}
		self.cells.get(row * self.side + col)
	}

	pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
		if row >= self.side || col >= self.side {
			return None;
		}
		self.cells.get_mut(row * self.side + col)
	}

	pub fn rows(&self) -> std::slice::ChunksExact<'_, T> {
		self.cells.chunks_exact(self.side.max(1))
	}
}

/// Editor-space texture mapping. Unlike [`PlanarTextureProjection`] the axes are unit length, scale is stored separately.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextureAxes {
	pub u_axis: DVec3,
	pub u_offset: f64,
	pub v_axis: DVec3,
	pub v_offset: f64,
	pub scale: DVec2,
	pub rotation: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OutputSide {
	/// Three points on the plane, wound so `(p0 - p1) × (p2 - p1)` points along the plane normal.
	pub points: [DVec3; 3],
	pub plane: BspPlane,
	pub texture: String,
	pub texture_axes: TextureAxes,
	pub flags: i32,
	pub material: String,
	pub lightmap_scale: f64,
	pub lightmap_rotation: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OutputPatch {
	pub dims: UVec2,
	pub texture: String,
	/// Row-major, exactly `dims.x * dims.y` long.
	pub control_points: Vec<BspVertex>,
}

/// An Elite Force 2 heightmap terrain.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OutputGridTerrain {
	pub heights: Grid<f32>,
	pub alphas: Grid<f32>,
	pub texture: String,
	pub flags: i32,
	/// The lowest corner of the terrain on X and Y, Z is always 0.
	pub start: DVec3,
	pub side_length: f64,
	pub texture_shift: DVec2,
	pub texture_rotation: f64,
	pub texture_scale: DVec2,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TerrainPartition {
	pub texture: String,
	pub texture_scale: DVec2,
}

/// A MoHAA terrain patch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OutputPartitionedTerrain {
	pub heights: Grid<f32>,
	pub partitions: [TerrainPartition; 4],
	pub origin: DVec3,
	pub flags: u32,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OutputDisplacement {
	pub power: u32,
	pub start: DVec3,
	pub normals: Grid<Vec3>,
	pub distances: Grid<f32>,
	pub alphas: Grid<f32>,
}

/// What a brush is made of. Either planar sides, or exactly one special surface.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BrushGeometry {
	Sides(Vec<OutputSide>),
	Patch(OutputPatch),
	GridTerrain(OutputGridTerrain),
	PartitionedTerrain(OutputPartitionedTerrain),
	/// A displacement keeps the side it was built on. Writers extrude it into a solid, usually 32 units deep.
	Displacement { side: OutputSide, displacement: OutputDisplacement },
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OutputBrush {
	pub is_detail: bool,
	pub is_water: bool,
	pub is_manual_vis: bool,
	pub geometry: BrushGeometry,
}

impl OutputBrush {
	fn from_geometry(geometry: BrushGeometry) -> Self {
		Self {
			is_detail: false,
			is_water: false,
			is_manual_vis: false,
			geometry,
		}
	}

	pub fn patch(patch: OutputPatch) -> Self {
		Self::from_geometry(BrushGeometry::Patch(patch))
	}

	pub fn grid_terrain(terrain: OutputGridTerrain) -> Self {
		Self::from_geometry(BrushGeometry::GridTerrain(terrain))
	}

	pub fn partitioned_terrain(terrain: OutputPartitionedTerrain) -> Self {
		Self::from_geometry(BrushGeometry::PartitionedTerrain(terrain))
	}

	/// Displacement brushes are never solid, so they are always marked as detail.
	pub fn displacement(side: OutputSide, displacement: OutputDisplacement) -> Self {
		Self {
			is_detail: true,
			..Self::from_geometry(BrushGeometry::Displacement { side, displacement })
		}
	}

	/// The planar sides of this brush. Empty for everything but side lists and displacements.
	pub fn sides(&self) -> &[OutputSide] {
		match &self.geometry {
			BrushGeometry::Sides(sides) => sides,
			BrushGeometry::Displacement { side, .. } => std::slice::from_ref(side),
			_ => &[],
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OutputEntity {
	pub properties: IndexMap<String, String>,
	pub brushes: Vec<OutputBrush>,
}

impl OutputEntity {
	pub fn new(classname: impl Into<String>) -> Self {
		let mut entity = Self::default();
		entity.insert("classname", classname);
		entity
	}

	pub fn from_properties(properties: IndexMap<String, String>) -> Self {
		Self {
			properties,
			brushes: Vec::new(),
		}
	}

	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.properties.insert(key.into(), value.into());
	}

	#[inline]
	pub fn get(&self, key: &str) -> Option<&str> {
		self.properties.get(key).map(String::as_str)
	}

	#[inline]
	pub fn classname(&self) -> Option<&str> {
		self.get("classname")
	}
}
