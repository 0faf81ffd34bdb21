use crate::*;

/// An entity from the entity lump, properties in the order they were written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BspEntity {
	pub properties: IndexMap<String, String>,
}

impl BspEntity {
	pub fn new<K: Into<String>, V: Into<String>>(properties: impl IntoIterator<Item = (K, V)>) -> Self {
		Self {
			properties: properties.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
		}
	}

	#[inline]
	pub fn get(&self, key: &str) -> Option<&str> {
		self.properties.get(key).map(String::as_str)
	}

	#[inline]
	pub fn classname(&self) -> Option<&str> {
		self.get("classname")
	}

	/// Zero if there's no `origin` or it can't be parsed.
	pub fn origin(&self) -> Vec3 {
		self.get("origin").and_then(parse_vec3).unwrap_or(Vec3::ZERO)
	}

	/// The model this entity uses for its brushes. Worldspawn always uses model 0.
	pub fn model_number(&self) -> Option<usize> {
		if let Some(number) = self.get("model").and_then(|model| model.strip_prefix('*')) {
			return number.parse().ok();
		}

		(self.classname() == Some("worldspawn")).then_some(0)
	}
}
