pub mod prelude;
pub(crate) use prelude::*;

pub mod data;
pub use data::*;

pub mod output;
pub use output::*;

pub mod brush;
pub mod classify;
pub mod decompile;
pub mod entity;
pub mod family;
pub mod geometry;
pub mod progress;
pub mod surface;
pub mod util;


// Re-exports
pub use glam;
pub use indexmap;

/// Placeholder texture for faces carrying the legacy "wide surface" bit when [`DecompileSettings::convert_legacy_wide_surface_to_null`] is set.
pub const NULL_TEXTURE: &str = "**nulltexture**";
/// Placeholder texture for texture references that lead nowhere.
pub const SKIP_TEXTURE: &str = "**skiptexture**";
/// Placeholder texture for brush sides that carry no texture at all.
pub const CLIP_TEXTURE: &str = "**cliptexture**";
/// Material used when a face doesn't reference one.
pub const DEFAULT_MATERIAL: &str = "wld_lightmap";
/// Light-map scale written onto every reconstructed side.
pub const DEFAULT_LIGHTMAP_SCALE: f64 = 16.;

/// Options that change how a [`BspModelData`] is turned back into editable entities.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecompileSettings {
	/// Move the brushes of every brush entity into `worldspawn`, leaving the entities themselves brushless.
	pub merge_brushes_into_world: bool,
	/// Write `0` for the surface flags of every side instead of the face flags stored in the BSP.
	pub suppress_surface_flags: bool,
	/// Replace the texture of faces with bit 9 set (Nightfire's compiler-only surfaces) with [`NULL_TEXTURE`].
	pub convert_legacy_wide_surface_to_null: bool,
}

/// The kind of special surface a [`DecompileWarning::MisplacedSpecialSurface`] is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SpecialSurfaceKind {
	Displacement,
	Terrain,
}

/// Problems found while decompiling. None of these stop a run, each one only degrades the primitive it was found in.
#[derive(Debug, Clone, PartialEq, Error)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum DecompileWarning {
	#[error("No plane could be resolved (reference {plane:?}), using a zero plane")]
	MissingPlane { plane: Option<u32> },
	#[error("{kind} is not part of the world (found in model {model})")]
	MisplacedSpecialSurface { kind: SpecialSurfaceKind, model: usize },
	#[error("{table} index {index:?} is out of range, substituting \"**skiptexture**\"")]
	OutOfRangeTextureReference { table: &'static str, index: Option<u32> },
	#[error("{table} index {index} is out of range of {len} elements")]
	OutOfRangeReference { table: &'static str, index: usize, len: usize },
	#[error("Brush side with no points! Face has no usable triangle and no plane")]
	DegenerateFace,
	#[error("Terrain vertex {position} doesn't lie on the terrain grid, dropping it")]
	TerrainOffGrid { position: Vec3 },
	#[error("Displacement needs {expected} vertices, only {found} exist")]
	ShortDisplacement { expected: usize, found: usize },
	#[error("Displacement power {power} is larger than the maximum of {max}, clamping")]
	DisplacementPower { power: u32, max: u32 },
	#[error("Patch of size {dims} needs {expected} control points, only {found} are referenced")]
	ShortPatch { dims: UVec2, expected: usize, found: usize },
	#[error("Patch face has no size, dropping its {found} control points")]
	MissingPatchSize { found: usize },
}
