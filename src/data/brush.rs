use crate::*;

/// A brush model: worldspawn is model 0, brush entities reference the others with `*N`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BspModel {
	pub first_brush: u32,
	pub num_brushes: u32,

	pub first_face: u32,
	pub num_faces: u32,

	pub first_leaf_patch: u32,
	pub num_leaf_patches: u32,
}

/// Where a brush's sides live in [`BspModelData::brush_sides`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BrushSides {
	/// An explicit range.
	Range { first: u32, count: u32 },
	/// Call of Duty brushes only store a count, their sides directly follow the previous brush's.
	/// See [`SideCursor`].
	Sequential { count: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BspBrush {
	/// Content flags, the meaning of the bits depends on [`BspFamily`].
	pub contents: i32,
	/// Texture the brush was given, idTech3 forks store content flags here instead of in `contents`.
	pub texture: Option<u32>,
	pub sides: BrushSides,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BspBrushSide {
	pub plane: Option<u32>,
	/// The face this side produced, if it was visible.
	pub face: Option<u32>,
	/// Depending on the family, either an index into [`BspModelData::textures`] or [`BspModelData::tex_info`].
	pub texture: Option<u32>,
	/// Call of Duty stores the first six sides as axial distances rather than plane references.
	pub dist: f32,
	/// Added by the compiler for collision, not something a mapper made.
	pub bevel: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BspPlane {
	pub normal: Vec3,
	pub dist: f32,
}

impl Default for BspPlane {
	fn default() -> Self {
		Self::ZERO
	}
}

impl BspPlane {
	/// Stand-in for planes that can't be resolved. Has a zero normal, so it contains no points.
	pub const ZERO: Self = Self::new(Vec3::ZERO, 0.);

	#[inline]
	pub const fn new(normal: Vec3, dist: f32) -> Self {
		Self { normal, dist }
	}

	/// The plane of the `index`th implicit side of a Call of Duty brush, `index` must be below 6.
	///
	/// Sides alternate between the negative and positive direction of X, Y, then Z. Negative sides store their
	/// distance from the origin negated.
	pub fn implicit_axial(index: usize, dist: f32) -> Self {
		const NORMALS: [Vec3; 6] = [Vec3::NEG_X, Vec3::X, Vec3::NEG_Y, Vec3::Y, Vec3::NEG_Z, Vec3::Z];

		let dist = if index % 2 == 0 { -dist } else { dist };
		Self::new(NORMALS[index], dist)
	}

	/// `>0` = front, `<0` = back, `0` = on plane
	pub fn point_side(&self, point: Vec3) -> f32 {
		(self.normal.as_dvec3().dot(point.as_dvec3()) - self.dist as f64) as f32
	}

	/// A zero normal, the plane doesn't actually describe anything.
	#[inline]
	pub fn is_degenerate(&self) -> bool {
		self.normal == Vec3::ZERO
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn implicit_axial_planes() {
		assert_eq!(BspPlane::implicit_axial(0, 16.), BspPlane::new(Vec3::NEG_X, -16.));
		assert_eq!(BspPlane::implicit_axial(1, 16.), BspPlane::new(Vec3::X, 16.));
		assert_eq!(BspPlane::implicit_axial(2, 16.), BspPlane::new(Vec3::NEG_Y, -16.));
		assert_eq!(BspPlane::implicit_axial(5, 16.), BspPlane::new(Vec3::Z, 16.));

		// A box from -16 to 16 stores its mins on even sides and maxs on odd sides.
		for i in 0..6 {
			let stored = if i % 2 == 0 { -16. } else { 16. };
			let plane = BspPlane::implicit_axial(i, stored);
			assert_eq!(plane.point_side(plane.normal * 16.), 0.);
			assert!(plane.point_side(Vec3::ZERO) < 0.);
		}
	}

	#[test]
	fn point_side() {
		let plane = BspPlane::new(Vec3::Z, 8.);
		assert!(plane.point_side(vec3(3., 4., 9.)) > 0.);
		assert!(plane.point_side(vec3(3., 4., 7.)) < 0.);
		assert!(BspPlane::ZERO.is_degenerate());
		assert!(!plane.is_degenerate());
	}
}
