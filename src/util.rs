use crate::*;

// Simple rectangle type partially copied from Bevy.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Rect {
	pub min: Vec2,
	pub max: Vec2,
}
impl Rect {
	pub const EMPTY: Self = Self {
		max: Vec2::NEG_INFINITY,
		min: Vec2::INFINITY,
	};

	#[inline]
	pub fn size(&self) -> Vec2 {
		self.max - self.min
	}

	/// Build a new rectangle formed of the union of this rectangle and a point.
	///
	/// The union is the smallest rectangle enclosing both the rectangle and the point. If the
	/// point is already inside the rectangle, this method returns a copy of the rectangle.
	#[inline]
	pub fn union_point(&self, other: Vec2) -> Self {
		Self {
			min: self.min.min(other),
			max: self.max.max(other),
		}
	}
}

/// Returns the `count` elements of `items` starting at `first`, clamped to what actually exists.
///
/// Malformed records pointing past the end of a lump just reference fewer elements.
#[inline]
pub fn referenced<T>(items: &[T], first: u32, count: u32) -> &[T] {
	let first = (first as usize).min(items.len());
	let last = first.saturating_add(count as usize).min(items.len());
	&items[first..last]
}

/// Formats a vector the way entity properties store them, `"x y z"`.
pub(crate) fn format_vec3(v: Vec3) -> String {
	format!("{} {} {}", v.x, v.y, v.z)
}

/// Parses an `"x y z"` entity property. Missing or unparsable components make the whole vector `None`.
pub(crate) fn parse_vec3(s: &str) -> Option<Vec3> {
	let mut components = s.split_whitespace().map(str::parse::<f32>);
	let v = vec3(components.next()?.ok()?, components.next()?.ok()?, components.next()?.ok()?);
	Some(v)
}
