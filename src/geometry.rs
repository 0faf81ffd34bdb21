//! Plane sampling and texture axis conversion.

use crate::*;

/// Squared triangle areas at or below this are too thin to define a plane.
pub const MIN_TRIANGLE_AREA: f64 = 0.001;
/// Distance between the points generated on a plane.
const PLANE_POINT_SPACING: f64 = 64.;

/// Quake's default texture axes. Each entry is a plane normal followed by the U and V axes used for planes facing closest to it.
const BASE_AXES: [[DVec3; 3]; 6] = [
	// Floor
	[DVec3::Z, DVec3::X, DVec3::NEG_Y],
	// Ceiling
	[DVec3::NEG_Z, DVec3::X, DVec3::NEG_Y],
	// West wall
	[DVec3::X, DVec3::Y, DVec3::NEG_Z],
	// East wall
	[DVec3::NEG_X, DVec3::Y, DVec3::NEG_Z],
	// South wall
	[DVec3::Y, DVec3::X, DVec3::NEG_Z],
	// North wall
	[DVec3::NEG_Y, DVec3::X, DVec3::NEG_Z],
];

/// Returns the default U and V axes for a plane facing `normal`. Ties go to the earlier entry of the axis table.
pub fn texture_axes_from_plane(normal: DVec3) -> (DVec3, DVec3) {
	let mut best = 0;
	let mut best_dot = 0.;

	for (i, [axis_normal, _, _]) in BASE_AXES.iter().enumerate() {
		let dot = normal.dot(*axis_normal);
		if dot > best_dot {
			best_dot = dot;
			best = i;
		}
	}

	let [_, u, v] = BASE_AXES[best];
	(u, v)
}

/// Returns the triangle with the largest area, if it's large enough to define a plane.
///
/// Compares squared areas, and keeps the first of equally large triangles.
pub fn largest_triangle(triangles: impl IntoIterator<Item = [DVec3; 3]>) -> Option<[DVec3; 3]> {
	let mut best = None;
	let mut best_area = 0.;

	for triangle in triangles {
		let [a, b, c] = triangle;
		let area = (b - a).cross(c - a).length_squared();
		if area > best_area {
			best_area = area;
			best = Some(triangle);
		}
	}

	best.filter(|_| best_area > MIN_TRIANGLE_AREA)
}

impl BspPlane {
	/// Generates three points on this plane, wound so that `(p0 - p1) × (p2 - p1)` points along the normal.
	///
	/// Degenerate planes give three zero points.
	pub fn three_points(&self) -> [DVec3; 3] {
		if self.is_degenerate() {
			return [DVec3::ZERO; 3];
		}

		let normal = self.normal.as_dvec3().normalize();
		let origin = normal * self.dist as f64;

		let (u, _) = texture_axes_from_plane(normal);
		let u = (u - normal * u.dot(normal)).normalize_or_zero();
		let v = normal.cross(u);

		[origin, origin + v * PLANE_POINT_SPACING, origin + u * PLANE_POINT_SPACING]
	}
}

impl TextureAxes {
	/// Default texture mapping for a plane facing `normal`.
	pub fn from_plane(normal: DVec3) -> Self {
		let (u_axis, v_axis) = texture_axes_from_plane(normal);
		Self {
			u_axis,
			u_offset: 0.,
			v_axis,
			v_offset: 0.,
			scale: DVec2::ONE,
			rotation: 0.,
		}
	}

	/// Converts BSP texture projection to editor space for a brush belonging to an entity at `world_position`.
	///
	/// Returns `None` if either axis is zero, as there's no scale that maps to it.
	pub fn from_projection(projection: &PlanarTextureProjection, world_position: DVec3) -> Option<Self> {
		let u_axis = projection.u_axis.as_dvec3();
		let v_axis = projection.v_axis.as_dvec3();
		let u_length = u_axis.length();
		let v_length = v_axis.length();

		if u_length == 0. || v_length == 0. {
			return None;
		}

		Some(Self {
			u_axis: u_axis / u_length,
			u_offset: projection.u_offset as f64 - u_axis.dot(world_position),
			v_axis: v_axis / v_length,
			v_offset: projection.v_offset as f64 - v_axis.dot(world_position),
			scale: dvec2(u_length.recip(), v_length.recip()),
			rotation: 0.,
		})
	}

	/// Converts `projection` if it exists and is usable, otherwise uses the default mapping for `plane`.
	pub fn project(projection: Option<&PlanarTextureProjection>, plane: &BspPlane, world_position: DVec3) -> Self {
		projection
			.and_then(|projection| Self::from_projection(projection, world_position))
			.unwrap_or_else(|| Self::from_plane(plane.normal.as_dvec3()))
	}
}

impl Decompiler<'_> {
	/// Picks three points to define the plane of the side `face` was built from.
	///
	/// Prefers the largest triangle of the face's own geometry, then the face's plane, then the brush side's plane.
	pub(crate) fn face_points(&mut self, face: &BspFace, side: Option<&BspBrushSide>) -> [DVec3; 3] {
		let data = self.data;

		if face.num_vertices > 2 {
			if let Some(points) = largest_triangle(data.face_triangles(face)) {
				return points;
			}
		}

		if let Some(plane) = face.plane.and_then(|idx| data.plane(idx)) {
			return plane.three_points();
		}
		if let Some(plane) = side.and_then(|side| side.plane).and_then(|idx| data.plane(idx)) {
			return plane.three_points();
		}

		self.warn(DecompileWarning::DegenerateFace);
		[DVec3::ZERO; 3]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn winding_normal([p0, p1, p2]: [DVec3; 3]) -> DVec3 {
		(p0 - p1).cross(p2 - p1).normalize()
	}

	#[test]
	fn three_points_winding() {
		let normals = [
			Vec3::X,
			Vec3::NEG_X,
			Vec3::Y,
			Vec3::NEG_Y,
			Vec3::Z,
			Vec3::NEG_Z,
			vec3(1., 1., 0.).normalize(),
			vec3(-0.3, 0.5, -0.8).normalize(),
		];

		for normal in normals {
			let plane = BspPlane::new(normal, 24.);
			let points = plane.three_points();

			for point in points {
				assert!(plane.point_side(point.as_vec3()).abs() < 0.001, "{normal}: {point} is off the plane");
			}
			assert!(winding_normal(points).abs_diff_eq(normal.as_dvec3(), 1e-6), "{normal}: wound the wrong way");
		}

		assert_eq!(BspPlane::ZERO.three_points(), [DVec3::ZERO; 3]);
	}

	#[test]
	fn largest_triangle_threshold() {
		let small = [DVec3::ZERO, dvec3(0.01, 0., 0.), dvec3(0., 0.01, 0.)];
		let large = [DVec3::ZERO, dvec3(8., 0., 0.), dvec3(0., 8., 0.)];
		let also_large = [DVec3::ONE, dvec3(9., 1., 1.), dvec3(1., 9., 1.)];

		assert_eq!(largest_triangle([small]), None);
		assert_eq!(largest_triangle([small, large, also_large]), Some(large));
		assert_eq!(largest_triangle([]), None);
	}

	#[test]
	fn default_axes() {
		assert_eq!(texture_axes_from_plane(DVec3::Z), (DVec3::X, DVec3::NEG_Y));
		assert_eq!(texture_axes_from_plane(DVec3::NEG_X), (DVec3::Y, DVec3::NEG_Z));
		// Exactly diagonal between floor and west wall picks the floor.
		assert_eq!(texture_axes_from_plane(dvec3(1., 0., 1.).normalize()), (DVec3::X, DVec3::NEG_Y));
	}

	#[test]
	fn projection_conversion() {
		let projection = PlanarTextureProjection {
			u_axis: vec3(0.5, 0., 0.),
			u_offset: 8.,
			v_axis: vec3(0., 0., -0.25),
			v_offset: 0.,
		};

		let axes = TextureAxes::from_projection(&projection, dvec3(32., 0., 16.)).unwrap();
		assert_eq!(axes.u_axis, DVec3::X);
		assert_eq!(axes.v_axis, DVec3::NEG_Z);
		assert_eq!(axes.scale, dvec2(2., 4.));
		assert_eq!(axes.u_offset, 8. - 16.);
		assert_eq!(axes.v_offset, 4.);

		// A point of the moved brush maps to the same texel its unmoved counterpart had in the BSP.
		let origin = dvec3(32., 0., 16.);
		let point = dvec3(40., 8., 24.);
		let editor_uv = dvec2(
			(axes.u_axis / axes.scale.x).dot(point) + axes.u_offset,
			(axes.v_axis / axes.scale.y).dot(point) + axes.v_offset,
		);
		assert_eq!(editor_uv, projection.project(point - origin));

		let zero_axis = PlanarTextureProjection { u_axis: Vec3::ZERO, ..projection };
		assert_eq!(TextureAxes::from_projection(&zero_axis, DVec3::ZERO), None);

		let plane = BspPlane::new(Vec3::Z, 0.);
		assert_eq!(TextureAxes::project(Some(&zero_axis), &plane, DVec3::ZERO), TextureAxes::from_plane(DVec3::Z));
	}
}
