//! Counting work units ahead of a decompile, and reporting how many are done.

use crate::*;

/// Reports progress as a fraction in `0..=1`, roughly every percent of the total.
pub struct ProgressReporter<'a> {
	total: usize,
	processed: usize,
	fraction: f64,
	callback: Option<Box<dyn FnMut(f64) + 'a>>,
}

impl std::fmt::Debug for ProgressReporter<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ProgressReporter")
			.field("total", &self.total)
			.field("processed", &self.processed)
			.field("fraction", &self.fraction)
			.finish_non_exhaustive()
	}
}

impl<'a> ProgressReporter<'a> {
	pub fn new(total: usize) -> Self {
		Self {
			total,
			processed: 0,
			fraction: 0.,
			callback: None,
		}
	}

	pub fn with_callback(mut self, callback: impl FnMut(f64) + 'a) -> Self {
		self.callback = Some(Box::new(callback));
		self
	}

	/// Marks one unit of work as done.
	pub fn step(&mut self) {
		self.processed += 1;

		let interval = (self.total / 100).max(1);
		if self.processed % interval != 0 {
			return;
		}

		self.fraction = if self.total == 0 {
			1.
		} else {
			(self.processed as f64 / self.total as f64).min(1.)
		};
		if let Some(callback) = &mut self.callback {
			callback(self.fraction);
		}
	}

	/// The last reported fraction.
	#[inline]
	pub fn fraction(&self) -> f64 {
		self.fraction
	}

	#[inline]
	pub fn processed(&self) -> usize {
		self.processed
	}

	#[inline]
	pub fn total(&self) -> usize {
		self.total
	}
}

impl BspModelData {
	/// How many units of work decompiling this will take. Each unit is one [`ProgressReporter::step`].
	///
	/// One per entity, brush, patch, special surface face, MoHAA terrain and decorative record.
	pub fn count_work_units(&self) -> usize {
		let decorations = self.static_props.len() + self.static_models.len() + self.cubemaps.len();

		let model_units: usize = self
			.entities
			.iter()
			.filter_map(|entity| entity.model_number())
			.filter_map(|model_number| Some((model_number, self.models.get(model_number)?)))
			.map(|(model_number, model)| {
				let special_faces = self
					.faces_in_model(model)
					.iter()
					.filter(|face| face.special_surface(self.family).is_some())
					.count();
				let lod_terrains = if model_number == 0 { self.lod_terrains.len() } else { 0 };

				self.brushes_in_model(model).len() + self.patches_in_model(model).len() + special_faces + lod_terrains
			})
			.sum();

		self.entities.len() + model_units + decorations
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::cell::RefCell;

	#[test]
	fn reports_every_percent() {
		let reports = RefCell::new(Vec::new());
		let mut progress = ProgressReporter::new(250).with_callback(|fraction| reports.borrow_mut().push(fraction));

		for _ in 0..250 {
			progress.step();
		}
		drop(progress);

		let reports = reports.into_inner();
		// Interval is 250 / 100 = 2.
		assert_eq!(reports.len(), 125);
		assert_eq!(reports[0], 2. / 250.);
		assert_eq!(reports.last(), Some(&1.));
		assert!(reports.windows(2).all(|pair| pair[0] < pair[1]));
	}

	#[test]
	fn small_totals_report_every_step() {
		let mut reports = Vec::new();
		let mut progress = ProgressReporter::new(3).with_callback(|fraction| reports.push(fraction));
		for _ in 0..4 {
			progress.step();
		}
		assert_eq!(progress.fraction(), 1.);
		assert_eq!(progress.processed(), 4);
		drop(progress);

		assert_eq!(reports, vec![1. / 3., 2. / 3., 1., 1.]);
	}
}
