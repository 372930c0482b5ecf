//! Parameter schemas: declared keys, their defaults, and decode types.

use std::collections::HashMap;

use indexmap::IndexMap;
use taskpad_query_codec::{CustomDecoder, ParamType, ParamValue, RawValue, decode_value, infer_value};

use crate::error::{Result, SchemaError};


/// Declared query parameters and their defaults.
///
/// Each default's runtime type doubles as the key's decode type unless an
/// explicit override is registered with [`ParamSchemaBuilder::typed`].
/// Overrides may also name keys that have no default; those keys are never
/// filled in by the merged view but still decode with the declared type when
/// present in the URL.
///
/// A schema is immutable once built.
#[derive(Debug, Clone, Default)]
pub struct ParamSchema {
	defaults: IndexMap<String, ParamValue>,
	types: HashMap<String, ParamType>,
}

impl ParamSchema {
	/// Starts building a schema.
	pub fn builder() -> ParamSchemaBuilder {
		ParamSchemaBuilder::default()
	}

	/// Returns the defaults in declaration order.
	pub fn defaults(&self) -> &IndexMap<String, ParamValue> {
		&self.defaults
	}

	/// Returns the default for `key`, if it was declared with one.
	pub fn default_of(&self, key: &str) -> Option<&ParamValue> {
		self.defaults.get(key)
	}

	/// Returns true if `key` was declared with a default.
	pub fn contains(&self, key: &str) -> bool {
		self.defaults.contains_key(key)
	}

	/// Iterates declared keys in declaration order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.defaults.keys().map(String::as_str)
	}

	/// Returns the number of keys with defaults.
	pub fn len(&self) -> usize {
		self.defaults.len()
	}

	/// Returns true if no keys were declared with defaults.
	pub fn is_empty(&self) -> bool {
		self.defaults.is_empty()
	}

	/// Returns the effective decode type for `key`.
	///
	/// An explicit override wins over the type inferred from the default.
	/// Returns `None` for undeclared keys and for keys whose only declaration
	/// is a custom default without an override.
	pub fn type_of(&self, key: &str) -> Option<ParamType> {
		self.types
			.get(key)
			.cloned()
			.or_else(|| self.defaults.get(key).and_then(ParamType::of_default))
	}

	/// Decodes the raw value of `key` according to this schema.
	///
	/// Keys without a declared type are decoded best-effort and always
	/// succeed. Typed keys return `None` when the raw value does not fit.
	pub fn decode(&self, key: &str, raw: &RawValue) -> Option<ParamValue> {
		if let Some(ty) = self.types.get(key) {
			return decode_value(raw, ty);
		}
		match self.defaults.get(key).and_then(ParamType::of_default) {
			Some(ty) => decode_value(raw, &ty),
			None => Some(infer_value(raw)),
		}
	}
}

/// Builder for [`ParamSchema`].
#[derive(Debug, Default)]
pub struct ParamSchemaBuilder {
	defaults: IndexMap<String, ParamValue>,
	types: HashMap<String, ParamType>,
}

impl ParamSchemaBuilder {
	/// Declares `key` with a default value.
	///
	/// Declaring the same key twice keeps its original position and the
	/// latest default.
	pub fn param(mut self, key: impl Into<String>, default: impl Into<ParamValue>) -> Self {
		self.defaults.insert(key.into(), default.into());
		self
	}

	/// Overrides the decode type of `key`.
	pub fn typed(mut self, key: impl Into<String>, ty: ParamType) -> Self {
		self.types.insert(key.into(), ty);
		self
	}

	/// Registers a custom decoder for `key`.
	pub fn decoder(
		self,
		key: impl Into<String>,
		f: impl Fn(&RawValue) -> Option<ParamValue> + Send + Sync + 'static,
	) -> Self {
		self.typed(key, ParamType::Custom(CustomDecoder::new(f)))
	}

	/// Validates keys and type overrides and produces the schema.
	pub fn build(self) -> Result<ParamSchema> {
		for key in self.defaults.keys().chain(self.types.keys()) {
			validate_key(key)?;
		}

		for (key, default) in &self.defaults {
			if !is_finite(default) {
				return Err(SchemaError::NonFiniteDefault(key.clone()));
			}
			if let Some(ty) = self.types.get(key)
				&& !ty.accepts(default)
			{
				return Err(SchemaError::TypeMismatch {
					key: key.clone(),
					expected: ty.name(),
					got: default.type_name(),
				});
			}
		}

		Ok(ParamSchema {
			defaults: self.defaults,
			types: self.types,
		})
	}
}

/// URL numbers never decode to NaN or infinity.
fn is_finite(default: &ParamValue) -> bool {
	match default {
		ParamValue::Number(n) => n.is_finite(),
		ParamValue::NumberArray(ns) => ns.iter().all(|n| n.is_finite()),
		_ => true,
	}
}

fn validate_key(key: &str) -> Result<()> {
	if key.is_empty() || key.ends_with("[]") {
		return Err(SchemaError::InvalidKey(key.to_string()));
	}
	Ok(())
}
