//! Decompiling a whole BSP.

use crate::*;

/// Every entity of the map, in input order followed by decorative records, and everything that went wrong on the way.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DecompileOutput {
	pub entities: Vec<OutputEntity>,
	pub warnings: Vec<DecompileWarning>,
}

/// A single decompile run. Use [`BspModelData::decompile`] if you don't need progress reports.
#[derive(Debug)]
pub struct Decompiler<'a> {
	pub(crate) data: &'a BspModelData,
	pub(crate) settings: &'a DecompileSettings,
	pub(crate) warnings: Vec<DecompileWarning>,
	pub(crate) progress: ProgressReporter<'a>,
}

impl<'a> Decompiler<'a> {
	pub fn new(data: &'a BspModelData, settings: &'a DecompileSettings) -> Self {
		Self {
			data,
			settings,
			warnings: Vec::new(),
			progress: ProgressReporter::new(data.count_work_units()),
		}
	}

	/// Calls `callback` with the fraction of work done, about once every percent.
	pub fn with_progress(mut self, callback: impl FnMut(f64) + 'a) -> Self {
		self.progress = self.progress.with_callback(callback);
		self
	}

	pub fn run(mut self) -> DecompileOutput {
		let data = self.data;
		let mut cursor = SideCursor::new();

		let world_idx = data.entities.iter().position(|entity| entity.classname() == Some("worldspawn"));
		let merge_into_world = self.settings.merge_brushes_into_world && world_idx.is_some();

		let decorations = data.static_props.len() + data.static_models.len() + data.cubemaps.len();
		let mut entities = Vec::with_capacity(data.entities.len() + decorations);
		let mut world_brushes = Vec::new();

		for entity in &data.entities {
			let _span = debug_span!("entity", classname = entity.classname().unwrap_or_default()).entered();

			let processed = self.process_entity(entity, &mut cursor, merge_into_world);
			debug!(brushes = processed.entity.brushes.len(), merged = processed.world_brushes.len(), "Processed entity");

			entities.push(processed.entity);
			world_brushes.extend(processed.world_brushes);
			self.progress.step();
		}

		if let Some(world) = world_idx.and_then(|idx| entities.get_mut(idx)) {
			world.brushes.extend(world_brushes);
		}

		for prop in &data.static_props {
			if prop.model as usize >= data.static_prop_dictionary.len() {
				self.warn(DecompileWarning::OutOfRangeReference {
					table: "static_prop_dictionary",
					index: prop.model as usize,
					len: data.static_prop_dictionary.len(),
				});
			}
			entities.push(prop.to_entity(&data.static_prop_dictionary));
			self.progress.step();
		}
		for model in &data.static_models {
			entities.push(model.to_entity());
			self.progress.step();
		}
		for cubemap in &data.cubemaps {
			entities.push(cubemap.to_entity());
			self.progress.step();
		}

		debug!(entities = entities.len(), warnings = self.warnings.len(), "Decompile finished");

		DecompileOutput {
			entities,
			warnings: self.warnings,
		}
	}

	/// Records a warning, and logs it.
	pub(crate) fn warn(&mut self, warning: DecompileWarning) {
		warn!("{warning}");
		self.warnings.push(warning);
	}
}

impl BspModelData {
	/// Turns this BSP back into editable entities.
	pub fn decompile(&self, settings: &DecompileSettings) -> DecompileOutput {
		Decompiler::new(self, settings).run()
	}
}
