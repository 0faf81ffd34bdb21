//! Records that aren't entities in the BSP, but were placed as entities in the editor.

use crate::*;

/// A Source static prop.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BspStaticProp {
	/// Index into [`BspModelData::static_prop_dictionary`].
	pub model: u32,
	pub origin: Vec3,
	pub angles: Vec3,
	pub solidity: u8,
	pub skin: i32,
	pub fade_min_dist: f32,
	pub fade_max_dist: f32,
	pub flags: u32,
}

impl BspStaticProp {
	pub const FLAG_NO_SHADOW: u32 = 0x10;

	/// Converts to a `prop_static` entity. The `model` key is only written if `dictionary` contains the prop's model.
	pub fn to_entity(&self, dictionary: &[String]) -> OutputEntity {
		let mut entity = OutputEntity::new("prop_static");
		entity.insert("origin", format_vec3(self.origin));
		entity.insert("angles", format_vec3(self.angles));
		if let Some(model) = dictionary.get(self.model as usize) {
			entity.insert("model", model.clone());
		}
		entity.insert("skin", self.skin.to_string());
		entity.insert("solid", self.solidity.to_string());
		entity.insert("fademindist", self.fade_min_dist.to_string());
		entity.insert("fademaxdist", self.fade_max_dist.to_string());
		if self.flags & Self::FLAG_NO_SHADOW != 0 {
			entity.insert("disableshadows", "1");
		}

		entity
	}
}

/// A MoHAA static model.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BspStaticModel {
	pub model: String,
	pub origin: Vec3,
	pub angles: Vec3,
	pub scale: f32,
}

impl BspStaticModel {
	pub fn to_entity(&self) -> OutputEntity {
		let mut entity = OutputEntity::new("misc_model");
		entity.insert("model", self.model.clone());
		entity.insert("origin", format_vec3(self.origin));
		entity.insert("angles", format_vec3(self.angles));
		entity.insert("scale", self.scale.to_string());
		entity
	}
}

/// A Source cubemap sample point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BspCubemap {
	pub origin: IVec3,
	pub size: i32,
}

impl BspCubemap {
	pub fn to_entity(&self) -> OutputEntity {
		let mut entity = OutputEntity::new("env_cubemap");
		entity.insert("origin", format_vec3(self.origin.as_vec3()));
		entity.insert("cubemapsize", self.size.to_string());
		entity
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn static_prop() {
		let prop = BspStaticProp {
			model: 1,
			origin: vec3(1., 2., 3.),
			angles: vec3(0., 90., 0.),
			solidity: 6,
			skin: 2,
			fade_min_dist: 100.,
			fade_max_dist: 250.5,
			flags: 0x10,
		};
		let dictionary = ["models/a.mdl".to_string(), "models/b.mdl".to_string()];

		let entity = prop.to_entity(&dictionary);
		assert_eq!(entity.classname(), Some("prop_static"));
		assert_eq!(entity.get("model"), Some("models/b.mdl"));
		assert_eq!(entity.get("origin"), Some("1 2 3"));
		assert_eq!(entity.get("angles"), Some("0 90 0"));
		assert_eq!(entity.get("solid"), Some("6"));
		assert_eq!(entity.get("fademaxdist"), Some("250.5"));
		assert_eq!(entity.get("disableshadows"), Some("1"));
		assert!(entity.brushes.is_empty());

		let entity = BspStaticProp { flags: 0, ..prop }.to_entity(&dictionary[..1]);
		assert_eq!(entity.get("model"), None);
		assert_eq!(entity.get("disableshadows"), None);
	}

	#[test]
	fn cubemap() {
		let entity = BspCubemap { origin: ivec3(-64, 0, 128), size: 6 }.to_entity();
		assert_eq!(entity.classname(), Some("env_cubemap"));
		assert_eq!(entity.get("origin"), Some("-64 0 128"));
		assert_eq!(entity.get("cubemapsize"), Some("6"));
	}
}
