//! Merged view of defaults and URL values.

use std::ops::Index;

use indexmap::IndexMap;
use taskpad_query_codec::{ParamValue, RawQuery};

use crate::schema::ParamSchema;
use crate::typed_keys::{FromParamValue, TypedParamKey};

/// Schema defaults overlaid with the values decoded from a query string.
///
/// Always holds every key the schema declares a default for, in declaration
/// order, followed by any extra keys found in the URL, in sorted order. A URL
/// value replaces its default only when it decodes and is not blank.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectiveParams {
	values: IndexMap<String, ParamValue>,
}

impl EffectiveParams {
	/// Resolves the effective values for `raw` under `schema`.
	pub fn resolve(schema: &ParamSchema, raw: &RawQuery) -> Self {
		let mut values = schema.defaults().clone();
		let mut extra = Vec::new();

		for (key, value) in raw.iter() {
			let Some(decoded) = schema.decode(key, value) else {
				tracing::trace!(
					domain = "query_params",
					key,
					expected = schema.type_of(key).map_or("inferred", |t| t.name()),
					"malformed query value; keeping default",
				);
				continue;
			};
			if decoded.is_blank() {
				continue;
			}
			match values.get_mut(key) {
				Some(slot) => *slot = decoded,
				None => extra.push((key.to_string(), decoded)),
			}
		}

		values.extend(extra);
		Self { values }
	}

	/// Returns the value for `key`.
	pub fn get(&self, key: &str) -> Option<&ParamValue> {
		self.values.get(key)
	}

	/// Returns the value for `key` converted to `T`.
	pub fn get_as<T: FromParamValue>(&self, key: &str) -> Option<T> {
		self.values.get(key).and_then(T::from_param)
	}

	/// Returns the value behind a typed key.
	pub fn get_typed<T: FromParamValue>(&self, key: TypedParamKey<T>) -> Option<T> {
		self.get_as(key.name())
	}

	/// Returns true if `key` has a value.
	pub fn contains_key(&self, key: &str) -> bool {
		self.values.contains_key(key)
	}

	/// Iterates keys and values in order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
		self.values.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Returns the number of keys.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Returns true if there are no keys.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Returns the schema keys whose value differs from their default.
	///
	/// Arrays compare element by element in order, so `[a, b]` and `[b, a]`
	/// differ.
	pub fn changed_keys<'a>(&'a self, schema: &'a ParamSchema) -> impl Iterator<Item = &'a str> {
		schema
			.defaults()
			.iter()
			.filter(move |(key, default)| self.values.get(key.as_str()) != Some(*default))
			.map(|(key, _)| key.as_str())
	}

	/// Returns true if every schema key still holds its default.
	pub fn is_default(&self, schema: &ParamSchema) -> bool {
		self.changed_keys(schema).next().is_none()
	}

	/// Consumes the view, returning the underlying map.
	pub fn into_inner(self) -> IndexMap<String, ParamValue> {
		self.values
	}
}

impl Index<&str> for EffectiveParams {
	type Output = ParamValue;

	/// # Panics
	///
	/// Panics if `key` is neither declared by the schema nor present in the URL.
	fn index(&self, key: &str) -> &ParamValue {
		&self.values[key]
	}
}
