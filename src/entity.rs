//! Turning a single BSP entity back into an editor entity.

use crate::*;

/// The result of processing one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedEntity {
	pub entity: OutputEntity,
	/// Brushes that belong in worldspawn instead of this entity.
	pub world_brushes: Vec<OutputBrush>,
}

impl Decompiler<'_> {
	/// Rebuilds every brush, patch, terrain and displacement of `entity`'s model.
	///
	/// Entities without a model only have their properties copied. The `model` property is never copied, as the
	/// brushes take its place.
	///
	/// If `merge_into_world` is set, plain brushes of models other than 0 are returned in [`ProcessedEntity::world_brushes`].
	pub fn process_entity(&mut self, entity: &BspEntity, cursor: &mut SideCursor, merge_into_world: bool) -> ProcessedEntity {
		let data = self.data;

		let mut processed = ProcessedEntity {
			entity: OutputEntity::from_properties(entity.properties.clone()),
			world_brushes: Vec::new(),
		};

		let Some(model_number) = entity.model_number() else {
			return processed;
		};
		let Some(model) = data.models.get(model_number) else {
			self.warn(DecompileWarning::OutOfRangeReference {
				table: "models",
				index: model_number,
				len: data.models.len(),
			});
			return processed;
		};

		let world_position = entity.origin().as_dvec3();
		let is_func_water = entity.classname() == Some("func_water");
		let brushes_to_world = merge_into_world && model_number != 0;

		for brush in data.brushes_in_model(model) {
			let mut output = self.build_brush(brush, world_position, cursor);
			output.is_water |= is_func_water;

			if brushes_to_world {
				processed.world_brushes.push(output);
			} else {
				processed.entity.brushes.push(output);
			}
			self.progress.step();
		}

		for patch in data.patches_in_model(model) {
			let patch = self.build_patch(patch);
			processed.entity.brushes.push(OutputBrush::patch(patch));
			self.progress.step();
		}

		for face in data.faces_in_model(model) {
			let Some(surface) = face.special_surface(data.family) else {
				continue;
			};

			match surface {
				FaceSurface::Displacement(displacement_idx) => {
					if model_number != 0 {
						self.warn(DecompileWarning::MisplacedSpecialSurface {
							kind: SpecialSurfaceKind::Displacement,
							model: model_number,
						});
					}

					match data.displacements.get(displacement_idx as usize) {
						Some(info) => {
							let side = self.face_side(face, None, world_position);
							let displacement = self.build_displacement(info);
							processed.entity.brushes.push(OutputBrush::displacement(side, displacement));
						}
						None => self.warn(DecompileWarning::OutOfRangeReference {
							table: "displacements",
							index: displacement_idx as usize,
							len: data.displacements.len(),
						}),
					}
				}
				FaceSurface::Patch => {
					let patch = self.build_face_patch(face);
					processed.entity.brushes.push(OutputBrush::patch(patch));
				}
				FaceSurface::Terrain => {
					if model_number != 0 {
						self.warn(DecompileWarning::MisplacedSpecialSurface {
							kind: SpecialSurfaceKind::Terrain,
							model: model_number,
						});
					}

					let terrain = self.build_grid_terrain(face);
					processed.entity.brushes.push(OutputBrush::grid_terrain(terrain));
				}
			}
			self.progress.step();
		}

		if model_number == 0 {
			for terrain in &data.lod_terrains {
				let terrain = self.build_partitioned_terrain(terrain);
				processed.entity.brushes.push(OutputBrush::partitioned_terrain(terrain));
				self.progress.step();
			}
		}

		processed.entity.properties.shift_remove("model");
		processed
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn entity_without_model_is_copied() {
		let mut data = BspModelData::new(BspFamily::Quake);
		data.entities.push(BspEntity::new([("classname", "light"), ("origin", "0 0 64"), ("light", "300")]));
		let settings = DecompileSettings::default();
		let mut decompiler = Decompiler::new(&data, &settings);

		let processed = decompiler.process_entity(&data.entities[0], &mut SideCursor::new(), false);
		assert_eq!(processed.entity.properties, data.entities[0].properties);
		assert!(processed.entity.brushes.is_empty());
		assert!(decompiler.warnings.is_empty());
	}

	#[test]
	fn missing_model_warns() {
		let mut data = BspModelData::new(BspFamily::Quake);
		data.models.push(BspModel::default());
		data.entities.push(BspEntity::new([("classname", "func_door"), ("model", "*3")]));
		let settings = DecompileSettings::default();
		let mut decompiler = Decompiler::new(&data, &settings);

		let processed = decompiler.process_entity(&data.entities[0], &mut SideCursor::new(), false);
		assert_eq!(processed.entity.get("model"), Some("*3"));
		assert_eq!(
			decompiler.warnings,
			vec![DecompileWarning::OutOfRangeReference {
				table: "models",
				index: 3,
				len: 1
			}]
		);
	}

	#[test]
	fn func_water_is_water() {
		let mut data = BspModelData::new(BspFamily::Quake);
		data.planes.push(BspPlane::new(Vec3::Z, 0.));
		data.brush_sides.push(BspBrushSide {
			plane: Some(0),
			..Default::default()
		});
		data.brushes.push(BspBrush {
			contents: -1,
			texture: None,
			sides: BrushSides::Range { first: 0, count: 1 },
		});
		data.models = vec![
			BspModel::default(),
			BspModel {
				num_brushes: 1,
				..Default::default()
			},
		];
		data.entities.push(BspEntity::new([("classname", "func_water"), ("model", "*1")]));
		let settings = DecompileSettings::default();
		let mut decompiler = Decompiler::new(&data, &settings);

		let processed = decompiler.process_entity(&data.entities[0], &mut SideCursor::new(), true);
		assert!(processed.entity.brushes.is_empty());
		assert_eq!(processed.world_brushes.len(), 1);
		assert!(processed.world_brushes[0].is_water);
		assert_eq!(processed.entity.get("model"), None);
		assert_eq!(processed.entity.classname(), Some("func_water"));
	}
}
