#[cfg(feature = "bevy_reflect")]
pub(crate) use bevy_reflect::prelude::*;
pub(crate) use glam::*;
pub(crate) use indexmap::IndexMap;
#[cfg(feature = "serde")]
pub(crate) use serde::{Deserialize, Serialize};
pub(crate) use smallvec::*;
pub(crate) use std::collections::HashSet;
pub(crate) use thiserror::Error;
pub(crate) use tracing::{debug, debug_span, warn};

pub(crate) use crate::util::*;

pub use crate::{
	brush::SideCursor,
	decompile::{DecompileOutput, Decompiler},
	entity::ProcessedEntity,
	family::BspFamily,
	progress::ProgressReporter,
	BspModelData, DecompileSettings, DecompileWarning, OutputBrush, OutputEntity,
};
