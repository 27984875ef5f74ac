//! Props system for slot content.
//!
//! Props are the runtime values a component offers to its slot content and
//! the attribute data carried by element nodes. Values are JSON values so
//! that typed prop structs can be hydrated from and serialized back to the
//! same representation the host framework uses for component attributes.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An unordered map from prop name to JSON value.
///
/// # Example
///
/// ```ignore
/// use quintette::Props;
///
/// let props = Props::new()
/// 	.with("variant", "primary")
/// 	.with("count", 3);
///
/// assert!(props.contains("variant"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Props {
	values: HashMap<String, Value>,
}

impl Props {
	/// Creates an empty prop set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets a prop, builder style.
	pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.values.insert(name.into(), value.into());
		self
	}

	/// Sets a prop mutably.
	pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
		self.values.insert(name.into(), value.into());
	}

	/// Returns the value of a prop, if present.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.values.get(name)
	}

	/// Removes a prop and returns its value, if present.
	pub fn remove(&mut self, name: &str) -> Option<Value> {
		self.values.remove(name)
	}

	/// Returns whether a prop is present.
	pub fn contains(&self, name: &str) -> bool {
		self.values.contains_key(name)
	}

	/// Returns whether the prop set is empty.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Returns the number of props.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Iterates over the props.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.values.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Returns a new prop set with `overlay` merged on top of `self`.
	///
	/// The merge is right-biased: a key present in both resolves to the
	/// overlay's value.
	pub fn merged(&self, overlay: &Props) -> Props {
		let mut out = self.clone();
		for (name, value) in &overlay.values {
			out.values.insert(name.clone(), value.clone());
		}
		out
	}

	/// Constructs props from a string attribute map.
	///
	/// This mirrors how component props are reconstructed from serialized
	/// attribute data during hydration.
	pub fn from_attrs(attrs: &HashMap<String, String>) -> Self {
		let mut props = Props::new();
		for (name, value) in attrs {
			props.set(name.clone(), value.clone());
		}
		props
	}

	/// Serializes the props to a string attribute map.
	///
	/// Null values are skipped; everything else is stringified.
	pub fn to_attrs(&self) -> HashMap<String, String> {
		let mut attrs = HashMap::new();
		for (name, value) in &self.values {
			let str_value = match value {
				Value::String(s) => s.clone(),
				Value::Bool(b) => b.to_string(),
				Value::Number(n) => n.to_string(),
				Value::Null => continue,
				other => other.to_string(),
			};
			attrs.insert(name.clone(), str_value);
		}
		attrs
	}

	/// Constructs props from any serializable prop struct.
	pub fn from_typed<P: Serialize>(props: &P) -> Result<Self, serde_json::Error> {
		let json = serde_json::to_value(props)?;

		let mut out = Props::new();
		if let Value::Object(map) = json {
			for (name, value) in map {
				out.set(name, value);
			}
		}
		Ok(out)
	}

	/// Hydrates a typed prop struct from the prop set.
	pub fn to_typed<P: DeserializeOwned>(&self) -> Result<P, serde_json::Error> {
		let json = serde_json::to_value(&self.values)?;
		serde_json::from_value(json)
	}
}

impl FromIterator<(String, Value)> for Props {
	fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
		Self {
			values: iter.into_iter().collect(),
		}
	}
}
