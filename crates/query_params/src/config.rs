//! TOML schema declarations.
//!
//! A schema file lists parameters under a `params` table. Each entry may
//! declare a `type`, a `default`, or both:
//!
//! ```toml
//! [params.page]
//! default = 1
//!
//! [params.tags]
//! type = "string[]"
//! default = []
//!
//! # Type-only: decodes `status` as text when present, no default.
//! [params.status]
//! type = "string"
//! ```
//!
//! Without a `type`, the default's TOML value picks one: integers and floats
//! are numbers, arrays of numbers are `number[]`, and any other array
//! (including an empty one) is `string[]`. Custom decoders cannot be declared
//! here; register them on the builder instead.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use taskpad_query_codec::{ParamType, ParamValue};

use crate::error::{Result, SchemaError};
use crate::schema::{ParamSchema, ParamSchemaBuilder};


/// Parsed schema file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
	/// Parameter declarations in file order.
	#[serde(default)]
	pub params: IndexMap<String, ParamConfig>,
}

/// One `[params.<key>]` entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamConfig {
	/// Built-in type name (`string`, `number`, `boolean`, `string[]`, `number[]`).
	#[serde(rename = "type", default)]
	pub ty: Option<String>,
	/// Default value.
	#[serde(default)]
	pub default: Option<toml::Value>,
}

impl SchemaConfig {
	/// Parses a TOML document.
	pub fn parse(input: &str) -> Result<Self> {
		Ok(toml::from_str(input)?)
	}

	/// Converts the declarations into a validated [`ParamSchema`].
	pub fn into_schema(self) -> Result<ParamSchema> {
		self.params
			.into_iter()
			.try_fold(ParamSchema::builder(), |builder, (key, param)| param.declare(builder, key))?
			.build()
	}
}

impl ParamConfig {
	fn declare(self, mut builder: ParamSchemaBuilder, key: String) -> Result<ParamSchemaBuilder> {
		let ty = self
			.ty
			.map(|name| {
				ParamType::from_name(&name).ok_or_else(|| SchemaError::UnknownType {
					key: key.clone(),
					name,
				})
			})
			.transpose()?;
		let default = self
			.default
			.map(|value| default_from_toml(&key, value, ty.as_ref()))
			.transpose()?;

		if ty.is_none() && default.is_none() {
			return Err(SchemaError::Undeclared(key));
		}
		if let Some(default) = default {
			builder = builder.param(key.clone(), default);
		}
		if let Some(ty) = ty {
			builder = builder.typed(key, ty);
		}
		Ok(builder)
	}
}

impl ParamSchema {
	/// Parses a schema from a TOML document.
	pub fn from_toml(input: &str) -> Result<Self> {
		SchemaConfig::parse(input)?.into_schema()
	}

	/// Loads a schema from a TOML file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| SchemaError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		let schema = Self::from_toml(&content)?;
		tracing::debug!(
			domain = "query_params",
			path = %path.display(),
			params = schema.len(),
			"loaded parameter schema",
		);
		Ok(schema)
	}
}

fn default_from_toml(key: &str, value: toml::Value, hint: Option<&ParamType>) -> Result<ParamValue> {
	match value {
		toml::Value::String(v) => Ok(ParamValue::String(v)),
		toml::Value::Integer(v) => Ok(ParamValue::Number(v as f64)),
		toml::Value::Float(v) => Ok(ParamValue::Number(v)),
		toml::Value::Boolean(v) => Ok(ParamValue::Bool(v)),
		toml::Value::Array(items) if items.is_empty() => Ok(match hint {
			Some(ParamType::NumberArray) => ParamValue::NumberArray(Vec::new()),
			_ => ParamValue::StringArray(Vec::new()),
		}),
		toml::Value::Array(items) => array_default(key, items),
		toml::Value::Datetime(_) => Err(SchemaError::UnsupportedDefault {
			key: key.to_string(),
			kind: "datetime",
		}),
		toml::Value::Table(_) => Err(SchemaError::UnsupportedDefault {
			key: key.to_string(),
			kind: "table",
		}),
	}
}

fn array_default(key: &str, items: Vec<toml::Value>) -> Result<ParamValue> {
	if let Some(numbers) = items.iter().map(toml_number).collect::<Option<Vec<_>>>() {
		return Ok(ParamValue::NumberArray(numbers));
	}
	items
		.into_iter()
		.map(|item| match item {
			toml::Value::String(s) => Some(s),
			_ => None,
		})
		.collect::<Option<Vec<_>>>()
		.map(ParamValue::StringArray)
		.ok_or_else(|| SchemaError::MixedArray(key.to_string()))
}

fn toml_number(value: &toml::Value) -> Option<f64> {
	match value {
		toml::Value::Integer(v) => Some(*v as f64),
		toml::Value::Float(v) => Some(*v),
		_ => None,
	}
}
